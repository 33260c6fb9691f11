use inkbound_core::{
    ComicSlug, ComicStoreError, Page, PageRequest, ReadingProgress, ReadingProgressStore, UserId,
};

/// Error types shared by the reading-progress use cases
#[derive(Debug, thiserror::Error)]
pub enum ReadingProgressError {
    #[error("No reading progress found for this comic")]
    NotFound,
    #[error("Duplicate reading record detected")]
    Duplicate,
    #[error("{0}")]
    UnexpectedError(String),
}

impl From<ComicStoreError> for ReadingProgressError {
    fn from(error: ComicStoreError) -> Self {
        match error {
            ComicStoreError::RecordNotFound => ReadingProgressError::NotFound,
            ComicStoreError::DuplicateRecord => ReadingProgressError::Duplicate,
            ComicStoreError::UnexpectedError(e) => ReadingProgressError::UnexpectedError(e),
        }
    }
}

/// Update-progress use case - upsert of the caller's (user, slug) row.
pub struct UpdateProgressUseCase<R>
where
    R: ReadingProgressStore,
{
    progress_store: R,
}

impl<R> UpdateProgressUseCase<R>
where
    R: ReadingProgressStore,
{
    pub fn new(progress_store: R) -> Self {
        Self { progress_store }
    }

    #[tracing::instrument(name = "UpdateProgressUseCase::execute", skip(self), fields(user_id = %user_id, slug = %slug))]
    pub async fn execute(
        &self,
        user_id: UserId,
        slug: ComicSlug,
        chapter: String,
    ) -> Result<ReadingProgress, ReadingProgressError> {
        Ok(self
            .progress_store
            .upsert_progress(user_id, &slug, &chapter)
            .await?)
    }
}

/// Reading-list use case - paginated listing, most recently read first.
pub struct ReadingListUseCase<R>
where
    R: ReadingProgressStore,
{
    progress_store: R,
}

impl<R> ReadingListUseCase<R>
where
    R: ReadingProgressStore,
{
    pub fn new(progress_store: R) -> Self {
        Self { progress_store }
    }

    #[tracing::instrument(name = "ReadingListUseCase::execute", skip(self), fields(user_id = %user_id))]
    pub async fn execute(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Page<ReadingProgress>, ReadingProgressError> {
        Ok(self.progress_store.list_progress(user_id, page).await?)
    }
}

/// Last-chapter use case - single (user, slug) lookup.
pub struct LastChapterUseCase<R>
where
    R: ReadingProgressStore,
{
    progress_store: R,
}

impl<R> LastChapterUseCase<R>
where
    R: ReadingProgressStore,
{
    pub fn new(progress_store: R) -> Self {
        Self { progress_store }
    }

    #[tracing::instrument(name = "LastChapterUseCase::execute", skip(self), fields(user_id = %user_id, slug = %slug))]
    pub async fn execute(
        &self,
        user_id: UserId,
        slug: ComicSlug,
    ) -> Result<ReadingProgress, ReadingProgressError> {
        Ok(self.progress_store.get_progress(user_id, &slug).await?)
    }
}

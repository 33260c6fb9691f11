use inkbound_core::{ComicSlug, ComicStoreError, Favorite, FavoriteStore, UserId};

/// Error types shared by the favorites use cases
#[derive(Debug, thiserror::Error)]
pub enum FavoritesError {
    #[error("Comic not found in favorites")]
    NotFound,
    #[error("Comic is already in favorites")]
    Duplicate,
    #[error("{0}")]
    UnexpectedError(String),
}

impl From<ComicStoreError> for FavoritesError {
    fn from(error: ComicStoreError) -> Self {
        match error {
            ComicStoreError::RecordNotFound => FavoritesError::NotFound,
            ComicStoreError::DuplicateRecord => FavoritesError::Duplicate,
            ComicStoreError::UnexpectedError(e) => FavoritesError::UnexpectedError(e),
        }
    }
}

/// Add-favorite use case - upsert of the caller's (user, slug) favorite.
/// A chapter, when supplied, also stamps the read time.
pub struct AddFavoriteUseCase<F>
where
    F: FavoriteStore,
{
    favorite_store: F,
}

impl<F> AddFavoriteUseCase<F>
where
    F: FavoriteStore,
{
    pub fn new(favorite_store: F) -> Self {
        Self { favorite_store }
    }

    #[tracing::instrument(name = "AddFavoriteUseCase::execute", skip(self), fields(user_id = %user_id, slug = %slug))]
    pub async fn execute(
        &self,
        user_id: UserId,
        slug: ComicSlug,
        chapter: Option<String>,
    ) -> Result<Favorite, FavoritesError> {
        Ok(self
            .favorite_store
            .upsert_favorite(user_id, &slug, chapter.as_deref())
            .await?)
    }
}

/// Remove-favorite use case.
pub struct RemoveFavoriteUseCase<F>
where
    F: FavoriteStore,
{
    favorite_store: F,
}

impl<F> RemoveFavoriteUseCase<F>
where
    F: FavoriteStore,
{
    pub fn new(favorite_store: F) -> Self {
        Self { favorite_store }
    }

    #[tracing::instrument(name = "RemoveFavoriteUseCase::execute", skip(self), fields(user_id = %user_id, slug = %slug))]
    pub async fn execute(&self, user_id: UserId, slug: ComicSlug) -> Result<(), FavoritesError> {
        Ok(self.favorite_store.remove_favorite(user_id, &slug).await?)
    }
}

/// List-favorites use case - most recently updated first.
pub struct ListFavoritesUseCase<F>
where
    F: FavoriteStore,
{
    favorite_store: F,
}

impl<F> ListFavoritesUseCase<F>
where
    F: FavoriteStore,
{
    pub fn new(favorite_store: F) -> Self {
        Self { favorite_store }
    }

    #[tracing::instrument(name = "ListFavoritesUseCase::execute", skip(self), fields(user_id = %user_id))]
    pub async fn execute(&self, user_id: UserId) -> Result<Vec<Favorite>, FavoritesError> {
        Ok(self.favorite_store.list_favorites(user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::reading_progress::comic_test_support::MockComicStore;

    fn slug(value: &str) -> ComicSlug {
        ComicSlug::parse(value).unwrap()
    }

    #[tokio::test]
    async fn favorite_without_chapter_has_null_read_fields() {
        let store = MockComicStore::default();
        let favorite = AddFavoriteUseCase::new(store)
            .execute(UserId::new(), slug("one-piece"), None)
            .await
            .unwrap();

        assert!(favorite.last_read_chapter.is_none());
        assert!(favorite.last_read_at.is_none());
    }

    #[tokio::test]
    async fn supplying_a_chapter_later_sets_both_fields() {
        let store = MockComicStore::default();
        let user_id = UserId::new();
        let use_case = AddFavoriteUseCase::new(store.clone());

        use_case
            .execute(user_id, slug("one-piece"), None)
            .await
            .unwrap();
        let updated = use_case
            .execute(user_id, slug("one-piece"), Some("42".to_string()))
            .await
            .unwrap();

        assert_eq!(updated.last_read_chapter.as_deref(), Some("42"));
        assert!(updated.last_read_at.is_some());
        assert_eq!(store.favorites.read().await.len(), 1);
    }

    #[tokio::test]
    async fn removing_an_absent_favorite_is_not_found() {
        let store = MockComicStore::default();
        let result = RemoveFavoriteUseCase::new(store)
            .execute(UserId::new(), slug("one-piece"))
            .await;
        assert!(matches!(result, Err(FavoritesError::NotFound)));
    }

    #[tokio::test]
    async fn list_returns_most_recently_updated_first() {
        let store = MockComicStore::default();
        let user_id = UserId::new();
        let add = AddFavoriteUseCase::new(store.clone());

        add.execute(user_id, slug("a"), None).await.unwrap();
        add.execute(user_id, slug("b"), None).await.unwrap();
        add.execute(user_id, slug("a"), Some("3".to_string())).await.unwrap();

        let favorites = ListFavoritesUseCase::new(store)
            .execute(user_id)
            .await
            .unwrap();

        let slugs: Vec<_> = favorites.iter().map(|f| f.slug.as_str()).collect();
        assert_eq!(slugs, ["a", "b"]);
    }

    #[tokio::test]
    async fn remove_then_list_round_trip() {
        let store = MockComicStore::default();
        let user_id = UserId::new();
        AddFavoriteUseCase::new(store.clone())
            .execute(user_id, slug("one-piece"), None)
            .await
            .unwrap();

        RemoveFavoriteUseCase::new(store.clone())
            .execute(user_id, slug("one-piece"))
            .await
            .unwrap();

        let favorites = ListFavoritesUseCase::new(store).execute(user_id).await.unwrap();
        assert!(favorites.is_empty());
    }
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use inkbound_core::{
    ComicSlug, ComicStoreError, Favorite, FavoriteStore, Page, PageRequest, ReadingProgress,
    ReadingProgressStore, UserId,
};
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

/// Postgres store for both per-user comic collections. Uniqueness of
/// (user_id, slug) is enforced by the schema; upserts ride ON CONFLICT so
/// concurrent writers cannot produce duplicates.
#[derive(Clone)]
pub struct PostgresComicStore {
    pool: PgPool,
}

impl PostgresComicStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresComicStore { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProgressRow {
    user_id: Uuid,
    slug: String,
    last_read_chapter: String,
    last_read_at: DateTime<Utc>,
}

impl ProgressRow {
    fn into_progress(self) -> Result<ReadingProgress, ComicStoreError> {
        Ok(ReadingProgress {
            user_id: UserId::from(self.user_id),
            slug: ComicSlug::parse(self.slug)
                .map_err(|e| ComicStoreError::UnexpectedError(e.to_string()))?,
            last_read_chapter: self.last_read_chapter,
            last_read_at: self.last_read_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FavoriteRow {
    user_id: Uuid,
    slug: String,
    last_read_chapter: Option<String>,
    last_read_at: Option<DateTime<Utc>>,
}

impl FavoriteRow {
    fn into_favorite(self) -> Result<Favorite, ComicStoreError> {
        Ok(Favorite {
            user_id: UserId::from(self.user_id),
            slug: ComicSlug::parse(self.slug)
                .map_err(|e| ComicStoreError::UnexpectedError(e.to_string()))?,
            last_read_chapter: self.last_read_chapter,
            last_read_at: self.last_read_at,
        })
    }
}

fn map_store_error(e: sqlx::Error) -> ComicStoreError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.constraint().is_some() {
            return ComicStoreError::DuplicateRecord;
        }
    }
    ComicStoreError::UnexpectedError(e.to_string())
}

#[async_trait]
impl ReadingProgressStore for PostgresComicStore {
    #[tracing::instrument(name = "Upserting reading progress in PostgreSQL", skip_all)]
    async fn upsert_progress(
        &self,
        user_id: UserId,
        slug: &ComicSlug,
        chapter: &str,
    ) -> Result<ReadingProgress, ComicStoreError> {
        let row = sqlx::query_as::<_, ProgressRow>(
            r#"
                INSERT INTO reading_progress (user_id, slug, last_read_chapter, last_read_at)
                VALUES ($1, $2, $3, now())
                ON CONFLICT (user_id, slug)
                DO UPDATE SET last_read_chapter = EXCLUDED.last_read_chapter,
                              last_read_at = EXCLUDED.last_read_at
                RETURNING user_id, slug, last_read_chapter, last_read_at
            "#,
        )
        .bind(*user_id.as_uuid())
        .bind(slug.as_str())
        .bind(chapter)
        .fetch_one(&self.pool)
        .await
        .map_err(map_store_error)?;

        row.into_progress()
    }

    #[tracing::instrument(name = "Retrieving reading progress from PostgreSQL", skip_all)]
    async fn get_progress(
        &self,
        user_id: UserId,
        slug: &ComicSlug,
    ) -> Result<ReadingProgress, ComicStoreError> {
        let row = sqlx::query_as::<_, ProgressRow>(
            r#"
                SELECT user_id, slug, last_read_chapter, last_read_at
                FROM reading_progress
                WHERE user_id = $1 AND slug = $2
            "#,
        )
        .bind(*user_id.as_uuid())
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_store_error)?;

        row.ok_or(ComicStoreError::RecordNotFound)?.into_progress()
    }

    #[tracing::instrument(name = "Listing reading progress from PostgreSQL", skip_all)]
    async fn list_progress(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Page<ReadingProgress>, ComicStoreError> {
        let total_items: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM reading_progress WHERE user_id = $1")
                .bind(*user_id.as_uuid())
                .fetch_one(&self.pool)
                .await
                .map_err(map_store_error)?;

        let rows = sqlx::query_as::<_, ProgressRow>(
            r#"
                SELECT user_id, slug, last_read_chapter, last_read_at
                FROM reading_progress
                WHERE user_id = $1
                ORDER BY last_read_at DESC
                LIMIT $2 OFFSET $3
            "#,
        )
        .bind(*user_id.as_uuid())
        .bind(i64::from(page.limit()))
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(map_store_error)?;

        let items = rows
            .into_iter()
            .map(ProgressRow::into_progress)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, page, total_items as u64))
    }
}

#[async_trait]
impl FavoriteStore for PostgresComicStore {
    #[tracing::instrument(name = "Upserting favorite in PostgreSQL", skip_all)]
    async fn upsert_favorite(
        &self,
        user_id: UserId,
        slug: &ComicSlug,
        chapter: Option<&str>,
    ) -> Result<Favorite, ComicStoreError> {
        let row = sqlx::query_as::<_, FavoriteRow>(
            r#"
                INSERT INTO favorites (user_id, slug, last_read_chapter, last_read_at, updated_at)
                VALUES ($1, $2, $3, CASE WHEN $3::text IS NULL THEN NULL ELSE now() END, now())
                ON CONFLICT (user_id, slug)
                DO UPDATE SET last_read_chapter = EXCLUDED.last_read_chapter,
                              last_read_at = EXCLUDED.last_read_at,
                              updated_at = now()
                RETURNING user_id, slug, last_read_chapter, last_read_at
            "#,
        )
        .bind(*user_id.as_uuid())
        .bind(slug.as_str())
        .bind(chapter)
        .fetch_one(&self.pool)
        .await
        .map_err(map_store_error)?;

        row.into_favorite()
    }

    #[tracing::instrument(name = "Removing favorite from PostgreSQL", skip_all)]
    async fn remove_favorite(
        &self,
        user_id: UserId,
        slug: &ComicSlug,
    ) -> Result<(), ComicStoreError> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND slug = $2")
            .bind(*user_id.as_uuid())
            .bind(slug.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_store_error)?;

        if result.rows_affected() == 0 {
            return Err(ComicStoreError::RecordNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Listing favorites from PostgreSQL", skip_all)]
    async fn list_favorites(&self, user_id: UserId) -> Result<Vec<Favorite>, ComicStoreError> {
        let rows = sqlx::query_as::<_, FavoriteRow>(
            r#"
                SELECT user_id, slug, last_read_chapter, last_read_at
                FROM favorites
                WHERE user_id = $1
                ORDER BY updated_at DESC
            "#,
        )
        .bind(*user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(map_store_error)?;

        rows.into_iter().map(FavoriteRow::into_favorite).collect()
    }
}

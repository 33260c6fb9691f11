use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use inkbound_core::{
    ComicSlug, ComicStoreError, Favorite, FavoriteStore, Page, PageRequest, ReadingProgress,
    ReadingProgressStore, UserId,
};

#[derive(Clone)]
struct FavoriteEntry {
    favorite: Favorite,
    updated_at: DateTime<Utc>,
}

/// In-memory double for both comic-record stores.
#[derive(Default, Clone)]
pub struct HashMapComicStore {
    progress: Arc<RwLock<HashMap<(UserId, String), ReadingProgress>>>,
    favorites: Arc<RwLock<HashMap<(UserId, String), FavoriteEntry>>>,
}

impl HashMapComicStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn progress_count(&self) -> usize {
        self.progress.read().await.len()
    }
}

#[async_trait]
impl ReadingProgressStore for HashMapComicStore {
    async fn upsert_progress(
        &self,
        user_id: UserId,
        slug: &ComicSlug,
        chapter: &str,
    ) -> Result<ReadingProgress, ComicStoreError> {
        let record = ReadingProgress {
            user_id,
            slug: slug.clone(),
            last_read_chapter: chapter.to_string(),
            last_read_at: Utc::now(),
        };
        self.progress
            .write()
            .await
            .insert((user_id, slug.as_str().to_string()), record.clone());
        Ok(record)
    }

    async fn get_progress(
        &self,
        user_id: UserId,
        slug: &ComicSlug,
    ) -> Result<ReadingProgress, ComicStoreError> {
        self.progress
            .read()
            .await
            .get(&(user_id, slug.as_str().to_string()))
            .cloned()
            .ok_or(ComicStoreError::RecordNotFound)
    }

    async fn list_progress(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Page<ReadingProgress>, ComicStoreError> {
        let mut records: Vec<_> = self
            .progress
            .read()
            .await
            .values()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.last_read_at.cmp(&a.last_read_at));

        let total_items = records.len() as u64;
        let items = records
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();

        Ok(Page::new(items, page, total_items))
    }
}

#[async_trait]
impl FavoriteStore for HashMapComicStore {
    async fn upsert_favorite(
        &self,
        user_id: UserId,
        slug: &ComicSlug,
        chapter: Option<&str>,
    ) -> Result<Favorite, ComicStoreError> {
        let favorite = Favorite {
            user_id,
            slug: slug.clone(),
            last_read_chapter: chapter.map(str::to_string),
            last_read_at: chapter.map(|_| Utc::now()),
        };
        self.favorites.write().await.insert(
            (user_id, slug.as_str().to_string()),
            FavoriteEntry {
                favorite: favorite.clone(),
                updated_at: Utc::now(),
            },
        );
        Ok(favorite)
    }

    async fn remove_favorite(
        &self,
        user_id: UserId,
        slug: &ComicSlug,
    ) -> Result<(), ComicStoreError> {
        self.favorites
            .write()
            .await
            .remove(&(user_id, slug.as_str().to_string()))
            .map(|_| ())
            .ok_or(ComicStoreError::RecordNotFound)
    }

    async fn list_favorites(&self, user_id: UserId) -> Result<Vec<Favorite>, ComicStoreError> {
        let mut entries: Vec<_> = self
            .favorites
            .read()
            .await
            .values()
            .filter(|entry| entry.favorite.user_id == user_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        Ok(entries.into_iter().map(|entry| entry.favorite).collect())
    }
}

use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::user::UserId;

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 10;

#[derive(Debug, Error)]
pub enum SlugError {
    #[error("Slug is required")]
    Empty,
}

/// Identifier of a comic as used by the reading-progress and favorites
/// endpoints. Opaque to this service beyond being non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComicSlug(String);

impl ComicSlug {
    pub fn parse(value: impl Into<String>) -> Result<Self, SlugError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(SlugError::Empty);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComicSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row per (user, comic): the chapter the user last read and when.
#[derive(Debug, Clone)]
pub struct ReadingProgress {
    pub user_id: UserId,
    pub slug: ComicSlug,
    pub last_read_chapter: String,
    pub last_read_at: DateTime<Utc>,
}

/// One row per (user, comic). Chapter and timestamp stay null until the
/// user actually reads the favorite.
#[derive(Debug, Clone)]
pub struct Favorite {
    pub user_id: UserId,
    pub slug: ComicSlug,
    pub last_read_chapter: Option<String>,
    pub last_read_at: Option<DateTime<Utc>>,
}

/// Pagination input, clamped at construction: non-positive pages fall back
/// to the first page and non-positive limits to the default page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = match page {
            Some(p) if p >= 1 => p as u32,
            _ => DEFAULT_PAGE,
        };
        let limit = match limit {
            Some(l) if l >= 1 => l as u32,
            _ => DEFAULT_LIMIT,
        };
        Self { page, limit }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// One page of results plus the bookkeeping the list endpoints report.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub items_per_page: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        let total_pages = total_items.div_ceil(u64::from(request.limit())) as u32;
        Self {
            items,
            current_page: request.page(),
            total_pages,
            total_items,
            items_per_page: request.limit(),
        }
    }
}

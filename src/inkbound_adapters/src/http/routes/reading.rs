use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use inkbound_application::{LastChapterUseCase, ReadingListUseCase, UpdateProgressUseCase};
use inkbound_core::{ComicSlug, Page, PageRequest, ReadingProgress, ReadingProgressStore};
use serde::{Deserialize, Serialize};

use crate::auth::extract::AuthenticatedUser;

use super::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressData {
    pub slug: String,
    pub last_read_chapter: String,
    pub last_read_at: DateTime<Utc>,
}

impl From<ReadingProgress> for ProgressData {
    fn from(progress: ReadingProgress) -> Self {
        Self {
            slug: progress.slug.as_str().to_string(),
            last_read_chapter: progress.last_read_chapter,
            last_read_at: progress.last_read_at,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub items_per_page: u32,
}

#[derive(Serialize, Deserialize)]
pub struct ReadingListResponse {
    pub message: String,
    pub data: Vec<ProgressData>,
    pub pagination: PaginationInfo,
}

#[derive(Serialize, Deserialize)]
pub struct ProgressResponse {
    pub message: String,
    pub data: ProgressData,
}

#[derive(Deserialize)]
pub struct UpdateProgressRequest {
    pub slug: Option<String>,
    pub chapter: Option<String>,
}

#[tracing::instrument(name = "Reading list", skip_all)]
pub async fn reading_list<R>(
    State(progress_store): State<R>,
    AuthenticatedUser(context): AuthenticatedUser,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, ApiError>
where
    R: ReadingProgressStore + Clone + 'static,
{
    let page = PageRequest::new(query.page, query.limit);

    let use_case = ReadingListUseCase::new(progress_store);
    let result: Page<ReadingProgress> = use_case.execute(context.user_id, page).await?;

    Ok((
        StatusCode::OK,
        Json(ReadingListResponse {
            message: "Successfully fetched reading list".to_string(),
            pagination: PaginationInfo {
                current_page: result.current_page,
                total_pages: result.total_pages,
                total_items: result.total_items,
                items_per_page: result.items_per_page,
            },
            data: result.items.into_iter().map(ProgressData::from).collect(),
        }),
    ))
}

#[tracing::instrument(name = "Last chapter", skip_all)]
pub async fn last_chapter<R>(
    State(progress_store): State<R>,
    AuthenticatedUser(context): AuthenticatedUser,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    R: ReadingProgressStore + Clone + 'static,
{
    let slug = ComicSlug::parse(slug)?;

    let use_case = LastChapterUseCase::new(progress_store);
    let progress = use_case.execute(context.user_id, slug).await?;

    Ok((
        StatusCode::OK,
        Json(ProgressResponse {
            message: "Successfully fetched last read chapter".to_string(),
            data: ProgressData::from(progress),
        }),
    ))
}

#[tracing::instrument(name = "Update progress", skip_all)]
pub async fn update_progress<R>(
    State(progress_store): State<R>,
    AuthenticatedUser(context): AuthenticatedUser,
    Json(request): Json<UpdateProgressRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    R: ReadingProgressStore + Clone + 'static,
{
    let (Some(slug), Some(chapter)) = (
        request.slug.filter(|s| !s.trim().is_empty()),
        request.chapter.filter(|c| !c.trim().is_empty()),
    ) else {
        return Err(ApiError::MissingFields(
            "Slug and chapter are required".to_string(),
        ));
    };
    let slug = ComicSlug::parse(slug)?;

    let use_case = UpdateProgressUseCase::new(progress_store);
    let progress = use_case.execute(context.user_id, slug, chapter).await?;

    Ok((
        StatusCode::OK,
        Json(ProgressResponse {
            message: "Reading progress updated successfully".to_string(),
            data: ProgressData::from(progress),
        }),
    ))
}

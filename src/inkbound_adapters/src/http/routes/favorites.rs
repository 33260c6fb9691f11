use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use inkbound_application::{AddFavoriteUseCase, ListFavoritesUseCase, RemoveFavoriteUseCase};
use inkbound_core::{ComicSlug, Favorite, FavoriteStore};
use serde::{Deserialize, Serialize};

use crate::auth::extract::AuthenticatedUser;

use super::error::ApiError;

#[derive(Deserialize)]
pub struct AddFavoriteRequest {
    pub slug: Option<String>,
    pub chapter: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteData {
    pub slug: String,
    pub last_read_chapter: Option<String>,
    pub last_read_at: Option<DateTime<Utc>>,
}

impl From<Favorite> for FavoriteData {
    fn from(favorite: Favorite) -> Self {
        Self {
            slug: favorite.slug.as_str().to_string(),
            last_read_chapter: favorite.last_read_chapter,
            last_read_at: favorite.last_read_at,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct FavoriteResponse {
    pub message: String,
    pub data: FavoriteData,
}

#[derive(Serialize, Deserialize)]
pub struct RemovedFavorite {
    pub slug: String,
}

#[derive(Serialize, Deserialize)]
pub struct RemoveFavoriteResponse {
    pub message: String,
    pub data: RemovedFavorite,
}

#[derive(Serialize, Deserialize)]
pub struct FavoritesListResponse {
    pub message: String,
    pub count: usize,
    pub data: Vec<FavoriteData>,
}

#[tracing::instrument(name = "Add favorite", skip_all)]
pub async fn add_favorite<F>(
    State(favorite_store): State<F>,
    AuthenticatedUser(context): AuthenticatedUser,
    Json(request): Json<AddFavoriteRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    F: FavoriteStore + Clone + 'static,
{
    let Some(slug) = request.slug.filter(|s| !s.trim().is_empty()) else {
        return Err(ApiError::MissingFields("Slug is required".to_string()));
    };
    let slug = ComicSlug::parse(slug)?;
    let chapter = request.chapter.filter(|c| !c.trim().is_empty());

    let use_case = AddFavoriteUseCase::new(favorite_store);
    let favorite = use_case.execute(context.user_id, slug, chapter).await?;

    Ok((
        StatusCode::OK,
        Json(FavoriteResponse {
            message: "Added to favorites".to_string(),
            data: FavoriteData::from(favorite),
        }),
    ))
}

#[tracing::instrument(name = "Remove favorite", skip_all)]
pub async fn remove_favorite<F>(
    State(favorite_store): State<F>,
    AuthenticatedUser(context): AuthenticatedUser,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    F: FavoriteStore + Clone + 'static,
{
    let slug = ComicSlug::parse(slug)?;

    let use_case = RemoveFavoriteUseCase::new(favorite_store);
    use_case.execute(context.user_id, slug.clone()).await?;

    Ok((
        StatusCode::OK,
        Json(RemoveFavoriteResponse {
            message: "Removed from favorites".to_string(),
            data: RemovedFavorite {
                slug: slug.as_str().to_string(),
            },
        }),
    ))
}

#[tracing::instrument(name = "List favorites", skip_all)]
pub async fn list_favorites<F>(
    State(favorite_store): State<F>,
    AuthenticatedUser(context): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError>
where
    F: FavoriteStore + Clone + 'static,
{
    let use_case = ListFavoritesUseCase::new(favorite_store);
    let favorites = use_case.execute(context.user_id).await?;

    Ok((
        StatusCode::OK,
        Json(FavoritesListResponse {
            message: "Successfully fetched favorites".to_string(),
            count: favorites.len(),
            data: favorites.into_iter().map(FavoriteData::from).collect(),
        }),
    ))
}

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use inkbound_application::{AvatarUpload, GetProfileUseCase, UpdateProfileUseCase};
use inkbound_core::{MediaStore, ProfileUpdate, UserStore};
use serde::{Deserialize, Serialize};

use crate::auth::extract::AuthenticatedUser;
use crate::config::constants::MAX_AVATAR_SIZE_BYTES;

use super::error::ApiError;
use super::responses::UserResponse;

#[derive(Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: UserResponse,
}

#[derive(Serialize, Deserialize)]
pub struct UpdateProfileResponse {
    pub message: String,
    pub user: UserResponse,
}

#[tracing::instrument(name = "Get profile", skip_all)]
pub async fn get_profile<U, M>(
    State((user_store, _media_store)): State<(U, M)>,
    AuthenticatedUser(context): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    M: MediaStore + Clone + 'static,
{
    let use_case = GetProfileUseCase::new(user_store);
    let user = use_case.execute(context.user_id).await?;

    Ok((
        StatusCode::OK,
        Json(ProfileResponse {
            user: UserResponse::from(&user),
        }),
    ))
}

#[tracing::instrument(name = "Update profile", skip_all)]
pub async fn update_profile<U, M>(
    State((user_store, media_store)): State<(U, M)>,
    AuthenticatedUser(context): AuthenticatedUser,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    M: MediaStore + Clone + 'static,
{
    let mut update = ProfileUpdate::default();
    let mut avatar: Option<AvatarUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidInput(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "name" => update.name = text_field(field).await?,
            "phone" => update.phone = text_field(field).await?,
            "address" => update.address = text_field(field).await?,
            "avatar" => avatar = Some(avatar_field(field).await?),
            _ => {}
        }
    }

    let use_case = UpdateProfileUseCase::new(user_store, media_store);
    let user = use_case.execute(context.user_id, update, avatar).await?;

    Ok((
        StatusCode::OK,
        Json(UpdateProfileResponse {
            message: "Profile updated successfully".to_string(),
            user: UserResponse::from(&user),
        }),
    ))
}

async fn text_field(field: axum::extract::multipart::Field<'_>) -> Result<Option<String>, ApiError> {
    let value = field
        .text()
        .await
        .map_err(|e| ApiError::InvalidInput(e.to_string()))?;
    Ok(if value.is_empty() { None } else { Some(value) })
}

async fn avatar_field(field: axum::extract::multipart::Field<'_>) -> Result<AvatarUpload, ApiError> {
    let content_type = field
        .content_type()
        .map(str::to_string)
        .filter(|ct| ct.starts_with("image/"))
        .ok_or_else(|| ApiError::InvalidInput("Only image files are allowed".to_string()))?;

    let bytes = field
        .bytes()
        .await
        .map_err(|e| ApiError::InvalidInput(e.to_string()))?;
    if bytes.len() > MAX_AVATAR_SIZE_BYTES {
        return Err(ApiError::InvalidInput(
            "File size should not exceed 500KB".to_string(),
        ));
    }

    Ok(AvatarUpload {
        bytes: bytes.to_vec(),
        content_type,
    })
}

use inkbound_core::{MediaStore, ProfileUpdate, User, UserId, UserStore, UserStoreError};

/// Error types shared by the profile use cases
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("User not found")]
    UserNotFound,
    #[error("Failed to store avatar: {0}")]
    AvatarUploadFailed(String),
    #[error("{0}")]
    UnexpectedError(String),
}

impl From<UserStoreError> for ProfileError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserNotFound => ProfileError::UserNotFound,
            other => ProfileError::UnexpectedError(other.to_string()),
        }
    }
}

/// Get-profile use case - fetches the caller's account record.
pub struct GetProfileUseCase<U>
where
    U: UserStore,
{
    user_store: U,
}

impl<U> GetProfileUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "GetProfileUseCase::execute", skip(self))]
    pub async fn execute(&self, user_id: UserId) -> Result<User, ProfileError> {
        Ok(self.user_store.get_user_by_id(user_id).await?)
    }
}

/// A validated avatar image ready for the media store. Size and MIME checks
/// happen at the transport boundary; the buffer is dropped on every path.
#[derive(Debug, Clone)]
pub struct AvatarUpload {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Update-profile use case - partial text-field update plus optional avatar
/// replacement through the media store.
pub struct UpdateProfileUseCase<U, M>
where
    U: UserStore,
    M: MediaStore,
{
    user_store: U,
    media_store: M,
}

impl<U, M> UpdateProfileUseCase<U, M>
where
    U: UserStore,
    M: MediaStore,
{
    pub fn new(user_store: U, media_store: M) -> Self {
        Self {
            user_store,
            media_store,
        }
    }

    #[tracing::instrument(name = "UpdateProfileUseCase::execute", skip_all, fields(user_id = %user_id))]
    pub async fn execute(
        &self,
        user_id: UserId,
        mut update: ProfileUpdate,
        avatar: Option<AvatarUpload>,
    ) -> Result<User, ProfileError> {
        let user = self.user_store.get_user_by_id(user_id).await?;

        if update.is_empty() && avatar.is_none() {
            return Ok(user);
        }

        if let Some(upload) = avatar {
            let asset = self
                .media_store
                .upload(upload.bytes, &upload.content_type)
                .await
                .map_err(|e| ProfileError::AvatarUploadFailed(e.to_string()))?;

            // Best-effort cleanup of a previously uploaded avatar. The new
            // avatar is already stored, so a failure here only leaks an
            // orphan asset at the media host.
            if user.has_custom_avatar() {
                if let Some(old_asset_id) = self.media_store.asset_id_for_url(user.avatar_url()) {
                    if let Err(e) = self.media_store.delete(&old_asset_id).await {
                        tracing::warn!(error = %e, "failed to delete previous avatar");
                    }
                }
            }

            update.avatar_url = Some(asset.url);
        }

        Ok(self.user_store.update_profile(user_id, update).await?)
    }
}

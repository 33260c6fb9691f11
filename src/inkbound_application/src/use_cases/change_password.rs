use inkbound_core::{
    Email, Password, PasswordHashError, PasswordHasher, UserStore, UserStoreError,
};

/// Minimum length accepted for a caller-chosen password.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Error types specific to the change-password use case
#[derive(Debug, thiserror::Error)]
pub enum ChangePasswordError {
    #[error("New password must be at least {MIN_PASSWORD_LENGTH} characters long")]
    WeakPassword,
    #[error("User not found")]
    UserNotFound,
    #[error("Current password is incorrect")]
    IncorrectOldPassword,
    #[error("Password hash error: {0}")]
    HashError(#[from] PasswordHashError),
    #[error("{0}")]
    UnexpectedError(String),
}

/// Change-password use case - re-authenticates with the old password and
/// stores the new hash.
pub struct ChangePasswordUseCase<U, H>
where
    U: UserStore,
    H: PasswordHasher,
{
    user_store: U,
    password_hasher: H,
}

impl<U, H> ChangePasswordUseCase<U, H>
where
    U: UserStore,
    H: PasswordHasher,
{
    pub fn new(user_store: U, password_hasher: H) -> Self {
        Self {
            user_store,
            password_hasher,
        }
    }

    #[tracing::instrument(name = "ChangePasswordUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        email: Email,
        old_password: Password,
        new_password: Password,
    ) -> Result<(), ChangePasswordError> {
        if new_password.len() < MIN_PASSWORD_LENGTH {
            return Err(ChangePasswordError::WeakPassword);
        }

        let user = self
            .user_store
            .get_user_by_email(&email)
            .await
            .map_err(|e| match e {
                UserStoreError::UserNotFound => ChangePasswordError::UserNotFound,
                other => ChangePasswordError::UnexpectedError(other.to_string()),
            })?;

        let matches = self
            .password_hasher
            .verify(old_password.as_ref(), user.password_hash())
            .await?;
        if !matches {
            return Err(ChangePasswordError::IncorrectOldPassword);
        }

        let password_hash = self.password_hasher.hash(new_password.as_ref()).await?;
        self.user_store
            .set_password_hash(&email, password_hash)
            .await
            .map_err(|e| ChangePasswordError::UnexpectedError(e.to_string()))?;

        Ok(())
    }
}

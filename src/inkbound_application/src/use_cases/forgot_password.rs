use inkbound_core::{
    Email, EmailClient, Password, PasswordHashError, PasswordHasher, UserStore, UserStoreError,
};

use crate::emails;

/// Error types specific to the forgot-password use case
#[derive(Debug, thiserror::Error)]
pub enum ForgotPasswordError {
    #[error("User not found")]
    UserNotFound,
    #[error("Password hash error: {0}")]
    HashError(#[from] PasswordHashError),
    #[error("Failed to send email: {0}")]
    EmailDeliveryFailed(String),
    #[error("{0}")]
    UnexpectedError(String),
}

/// Forgot-password use case - rotates the account password to a fresh
/// random one and mails the plaintext. The new password is live before the
/// mail goes out; there is no token and no rollback on send failure.
pub struct ForgotPasswordUseCase<U, H, E>
where
    U: UserStore,
    H: PasswordHasher,
    E: EmailClient,
{
    user_store: U,
    password_hasher: H,
    email_client: E,
}

impl<U, H, E> ForgotPasswordUseCase<U, H, E>
where
    U: UserStore,
    H: PasswordHasher,
    E: EmailClient,
{
    pub fn new(user_store: U, password_hasher: H, email_client: E) -> Self {
        Self {
            user_store,
            password_hasher,
            email_client,
        }
    }

    #[tracing::instrument(name = "ForgotPasswordUseCase::execute", skip_all)]
    pub async fn execute(&self, email: Email) -> Result<(), ForgotPasswordError> {
        self.user_store
            .get_user_by_email(&email)
            .await
            .map_err(|e| match e {
                UserStoreError::UserNotFound => ForgotPasswordError::UserNotFound,
                other => ForgotPasswordError::UnexpectedError(other.to_string()),
            })?;

        let new_password = Password::generate_temporary();
        let password_hash = self.password_hasher.hash(new_password.as_ref()).await?;

        self.user_store
            .set_password_hash(&email, password_hash)
            .await
            .map_err(|e| ForgotPasswordError::UnexpectedError(e.to_string()))?;

        let (subject, body) = emails::password_reset_email(new_password.as_ref());
        self.email_client
            .send_email(&email, &subject, &body)
            .await
            .map_err(ForgotPasswordError::EmailDeliveryFailed)?;

        Ok(())
    }
}

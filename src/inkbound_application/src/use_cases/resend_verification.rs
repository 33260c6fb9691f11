use inkbound_core::{
    Email, EmailClient, PasswordHasher, UserStore, UserStoreError, VerificationTokenStore,
};

use super::send_verification::{issue_and_send, SendVerificationError};

/// Error types specific to the resend-verification use case
#[derive(Debug, thiserror::Error)]
pub enum ResendVerificationError {
    #[error("User not found")]
    UserNotFound,
    #[error("This account is already verified")]
    AlreadyVerified,
    #[error("Failed to send verification email: {0}")]
    EmailDeliveryFailed(String),
    #[error("{0}")]
    UnexpectedError(String),
}

/// Resend-verification use case - replaces any pending token for the user
/// with a fresh one and mails the new link.
pub struct ResendVerificationUseCase<U, V, H, E>
where
    U: UserStore,
    V: VerificationTokenStore,
    H: PasswordHasher,
    E: EmailClient,
{
    user_store: U,
    token_store: V,
    password_hasher: H,
    email_client: E,
    base_url: String,
}

impl<U, V, H, E> ResendVerificationUseCase<U, V, H, E>
where
    U: UserStore,
    V: VerificationTokenStore,
    H: PasswordHasher,
    E: EmailClient,
{
    pub fn new(
        user_store: U,
        token_store: V,
        password_hasher: H,
        email_client: E,
        base_url: String,
    ) -> Self {
        Self {
            user_store,
            token_store,
            password_hasher,
            email_client,
            base_url,
        }
    }

    #[tracing::instrument(name = "ResendVerificationUseCase::execute", skip_all)]
    pub async fn execute(&self, email: Email) -> Result<(), ResendVerificationError> {
        let user = self
            .user_store
            .get_user_by_email(&email)
            .await
            .map_err(|e| match e {
                UserStoreError::UserNotFound => ResendVerificationError::UserNotFound,
                other => ResendVerificationError::UnexpectedError(other.to_string()),
            })?;

        if user.is_verified() {
            return Err(ResendVerificationError::AlreadyVerified);
        }

        self.token_store
            .delete_tokens(user.id())
            .await
            .map_err(|e| ResendVerificationError::UnexpectedError(e.to_string()))?;

        issue_and_send(
            &user,
            &self.token_store,
            &self.password_hasher,
            &self.email_client,
            &self.base_url,
        )
        .await
        .map_err(|e| match e {
            SendVerificationError::EmailError(msg) => {
                ResendVerificationError::EmailDeliveryFailed(msg)
            }
            other => ResendVerificationError::UnexpectedError(other.to_string()),
        })
    }
}

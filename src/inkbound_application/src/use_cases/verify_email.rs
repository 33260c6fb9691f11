use chrono::Utc;
use inkbound_core::{
    PasswordHashError, PasswordHasher, UserStore, UserStoreError, VerificationCode,
    VerificationStoreError, VerificationTokenStore,
};
use secrecy::Secret;

/// Error types specific to the verify-email use case
#[derive(Debug, thiserror::Error)]
pub enum VerifyEmailError {
    #[error("Verification record not found")]
    TokenNotFound,
    #[error("Verification link has expired")]
    TokenExpired,
    #[error("Invalid verification link")]
    InvalidCode,
    #[error("User not found")]
    UserNotFound,
    #[error("Password hash error: {0}")]
    HashError(#[from] PasswordHashError),
    #[error("{0}")]
    UnexpectedError(String),
}

impl From<VerificationStoreError> for VerifyEmailError {
    fn from(error: VerificationStoreError) -> Self {
        match error {
            VerificationStoreError::TokenNotFound => VerifyEmailError::TokenNotFound,
            VerificationStoreError::UnexpectedError(e) => VerifyEmailError::UnexpectedError(e),
        }
    }
}

/// Verify-email use case - consumes a verification link and activates the
/// account. Single-use: the ledger row is deleted on success, and also on
/// expiry detection so a later resend starts clean.
pub struct VerifyEmailUseCase<U, V, H>
where
    U: UserStore,
    V: VerificationTokenStore,
    H: PasswordHasher,
{
    user_store: U,
    token_store: V,
    password_hasher: H,
}

impl<U, V, H> VerifyEmailUseCase<U, V, H>
where
    U: UserStore,
    V: VerificationTokenStore,
    H: PasswordHasher,
{
    pub fn new(user_store: U, token_store: V, password_hasher: H) -> Self {
        Self {
            user_store,
            token_store,
            password_hasher,
        }
    }

    #[tracing::instrument(name = "VerifyEmailUseCase::execute", skip_all)]
    pub async fn execute(&self, code: VerificationCode) -> Result<(), VerifyEmailError> {
        let user_id = code.user_id();
        let token = self.token_store.get_token(user_id).await?;

        if token.is_expired(Utc::now()) {
            self.token_store.delete_tokens(user_id).await?;
            return Err(VerifyEmailError::TokenExpired);
        }

        let matches = self
            .password_hasher
            .verify(&Secret::from(code.to_string()), token.secret_hash())
            .await?;
        if !matches {
            return Err(VerifyEmailError::InvalidCode);
        }

        self.user_store
            .mark_verified(user_id)
            .await
            .map_err(|e| match e {
                UserStoreError::UserNotFound => VerifyEmailError::UserNotFound,
                other => VerifyEmailError::UnexpectedError(other.to_string()),
            })?;

        self.token_store.delete_tokens(user_id).await?;

        Ok(())
    }
}

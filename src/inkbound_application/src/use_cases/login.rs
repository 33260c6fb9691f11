use inkbound_core::{
    Email, Password, PasswordHashError, PasswordHasher, User, UserStore, UserStoreError,
};

/// Error types specific to the login use case
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("User not found")]
    UserNotFound,
    #[error("Please verify your email before logging in")]
    EmailNotVerified,
    #[error("Invalid password")]
    InvalidCredentials,
    #[error("Password hash error: {0}")]
    HashError(#[from] PasswordHashError),
    #[error("{0}")]
    UnexpectedError(String),
}

/// Login use case - checks verification state and credentials. Token
/// issuance is the transport adapter's job; this returns the validated user.
pub struct LoginUseCase<U, H>
where
    U: UserStore,
    H: PasswordHasher,
{
    user_store: U,
    password_hasher: H,
}

impl<U, H> LoginUseCase<U, H>
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

    #[tracing::instrument(name = "LoginUseCase::execute", skip_all)]
    pub async fn execute(&self, email: Email, password: Password) -> Result<User, LoginError> {
        let user = self
            .user_store
            .get_user_by_email(&email)
            .await
            .map_err(|e| match e {
                UserStoreError::UserNotFound => LoginError::UserNotFound,
                other => LoginError::UnexpectedError(other.to_string()),
            })?;

        // Verification is checked before the password so the caller learns
        // the account state without a valid credential pair.
        if !user.is_verified() {
            return Err(LoginError::EmailNotVerified);
        }

        let matches = self
            .password_hasher
            .verify(password.as_ref(), user.password_hash())
            .await?;
        if !matches {
            return Err(LoginError::InvalidCredentials);
        }

        Ok(user)
    }
}

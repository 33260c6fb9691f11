use inkbound_core::{
    Email, EmailClient, Password, PasswordHasher, User, UserStore, UserStoreError,
    VerificationTokenStore,
};

use super::send_verification::{issue_and_send, SendVerificationError};

/// Error types specific to the register use case
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("Please verify your email first")]
    UserNotVerified,
    #[error("Failed to send verification email: {0}")]
    EmailDeliveryFailed(String),
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
    #[error("{0}")]
    UnexpectedError(String),
}

/// Register use case - creates an unverified user and mails the
/// verification link. All-or-nothing from the caller's perspective: a
/// failed send rolls the fresh user row back.
pub struct RegisterUseCase<U, V, H, E>
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

impl<U, V, H, E> RegisterUseCase<U, V, H, E>
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

    #[tracing::instrument(name = "RegisterUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
        name: String,
    ) -> Result<User, RegisterError> {
        match self.user_store.get_user_by_email(&email).await {
            Ok(existing) if existing.is_verified() => return Err(RegisterError::UserAlreadyExists),
            Ok(_) => return Err(RegisterError::UserNotVerified),
            Err(UserStoreError::UserNotFound) => {}
            Err(e) => return Err(RegisterError::UserStoreError(e)),
        }

        let password_hash = self
            .password_hasher
            .hash(password.as_ref())
            .await
            .map_err(|e| RegisterError::UnexpectedError(e.to_string()))?;

        let user = User::new(email, password_hash, name);

        self.user_store
            .add_user(user.clone())
            .await
            .map_err(|e| match e {
                UserStoreError::UserAlreadyExists => RegisterError::UserAlreadyExists,
                other => RegisterError::UserStoreError(other),
            })?;

        if let Err(e) = issue_and_send(
            &user,
            &self.token_store,
            &self.password_hasher,
            &self.email_client,
            &self.base_url,
        )
        .await
        {
            // Roll the fresh user row back so the email can be registered again.
            if let Err(rollback) = self.user_store.delete_user(user.id()).await {
                tracing::error!(error = %rollback, "failed to roll back user after send failure");
            }
            return Err(match e {
                SendVerificationError::EmailError(msg) => RegisterError::EmailDeliveryFailed(msg),
                other => RegisterError::UnexpectedError(other.to_string()),
            });
        }

        Ok(user)
    }
}

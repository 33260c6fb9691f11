use inkbound_core::{
    EmailClient, PasswordHashError, PasswordHasher, User, VerificationCode,
    VerificationStoreError, VerificationToken, VerificationTokenStore,
};
use secrecy::Secret;

use crate::emails;

/// Error types shared by the flows that issue a verification mail
#[derive(Debug, thiserror::Error)]
pub enum SendVerificationError {
    #[error("Password hash error: {0}")]
    HashError(#[from] PasswordHashError),
    #[error("Verification store error: {0}")]
    VerificationStoreError(#[from] VerificationStoreError),
    #[error("Failed to send verification email: {0}")]
    EmailError(String),
}

/// Create a fresh verification token for `user` and mail out the link.
///
/// The token row is persisted before the mail goes out, so a failed send
/// never leaves a link in flight without a ledger entry behind it.
pub(crate) async fn issue_and_send<V, H, E>(
    user: &User,
    token_store: &V,
    password_hasher: &H,
    email_client: &E,
    base_url: &str,
) -> Result<(), SendVerificationError>
where
    V: VerificationTokenStore,
    H: PasswordHasher,
    E: EmailClient,
{
    let code = VerificationCode::new(user.id());
    let secret_hash = password_hasher
        .hash(&Secret::from(code.to_string()))
        .await?;

    token_store
        .store_token(VerificationToken::new(user.id(), secret_hash))
        .await?;

    let (subject, body) = emails::verification_email(base_url, &code);
    email_client
        .send_email(user.email(), &subject, &body)
        .await
        .map_err(SendVerificationError::EmailError)?;

    Ok(())
}

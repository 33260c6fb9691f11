use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

use crate::domain::email::Email;

// PasswordHasher port trait and errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Failed to hash secret: {0}")]
    HashingFailed(String),
    #[error("Stored hash is malformed: {0}")]
    MalformedHash(String),
}

/// Salted slow one-way hashing, used for account passwords and for
/// verification-link secrets alike. `verify` reports a mismatch as
/// `Ok(false)`; it only errors when the stored hash itself is unusable.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, plaintext: &Secret<String>) -> Result<Secret<String>, PasswordHashError>;
    async fn verify(
        &self,
        plaintext: &Secret<String>,
        hash: &Secret<String>,
    ) -> Result<bool, PasswordHashError>;
}

// EmailClient port trait
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String>;
}

// MediaStore port trait and errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAsset {
    pub url: String,
    pub asset_id: String,
}

#[derive(Debug, Error)]
pub enum MediaStoreError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),
    #[error("Delete failed: {0}")]
    DeleteFailed(String),
}

/// Opaque media host: store bytes, get back a URL.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<MediaAsset, MediaStoreError>;
    /// Best-effort; callers are expected to log and swallow failures.
    async fn delete(&self, asset_id: &str) -> Result<(), MediaStoreError>;
    /// Recover the asset id from a URL previously returned by `upload`.
    /// `None` for URLs this store does not own.
    fn asset_id_for_url(&self, url: &str) -> Option<String>;
}

use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

use crate::domain::{
    comic::{ComicSlug, Favorite, Page, PageRequest, ReadingProgress},
    email::Email,
    user::{ProfileUpdate, User, UserId},
    verification::VerificationToken,
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UserAlreadyExists, Self::UserAlreadyExists) => true,
            (Self::UserNotFound, Self::UserNotFound) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn add_user(&self, user: User) -> Result<(), UserStoreError>;
    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError>;
    async fn get_user_by_id(&self, id: UserId) -> Result<User, UserStoreError>;
    async fn set_password_hash(
        &self,
        email: &Email,
        password_hash: Secret<String>,
    ) -> Result<(), UserStoreError>;
    async fn mark_verified(&self, id: UserId) -> Result<(), UserStoreError>;
    async fn update_profile(
        &self,
        id: UserId,
        update: ProfileUpdate,
    ) -> Result<User, UserStoreError>;
    async fn delete_user(&self, id: UserId) -> Result<(), UserStoreError>;
}

// VerificationTokenStore port trait and errors
#[derive(Debug, Error)]
pub enum VerificationStoreError {
    #[error("Verification record not found")]
    TokenNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for VerificationStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::TokenNotFound, Self::TokenNotFound) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// The verification ledger. At most one effective token per user; the store
/// is also responsible for purging rows past their expiry.
#[async_trait]
pub trait VerificationTokenStore: Send + Sync {
    async fn store_token(&self, token: VerificationToken) -> Result<(), VerificationStoreError>;
    async fn get_token(&self, user_id: UserId) -> Result<VerificationToken, VerificationStoreError>;
    async fn delete_tokens(&self, user_id: UserId) -> Result<(), VerificationStoreError>;
}

// Reading-progress / favorites port traits and errors
#[derive(Debug, Error)]
pub enum ComicStoreError {
    #[error("Record not found")]
    RecordNotFound,
    #[error("Duplicate record")]
    DuplicateRecord,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for ComicStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::RecordNotFound, Self::RecordNotFound) => true,
            (Self::DuplicateRecord, Self::DuplicateRecord) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

#[async_trait]
pub trait ReadingProgressStore: Send + Sync {
    /// Atomic upsert on the unique (user, slug) key.
    async fn upsert_progress(
        &self,
        user_id: UserId,
        slug: &ComicSlug,
        chapter: &str,
    ) -> Result<ReadingProgress, ComicStoreError>;
    async fn get_progress(
        &self,
        user_id: UserId,
        slug: &ComicSlug,
    ) -> Result<ReadingProgress, ComicStoreError>;
    /// Most recently read first.
    async fn list_progress(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Page<ReadingProgress>, ComicStoreError>;
}

#[async_trait]
pub trait FavoriteStore: Send + Sync {
    /// Atomic upsert on the unique (user, slug) key. A chapter, when given,
    /// also stamps the read time; when absent both stay null.
    async fn upsert_favorite(
        &self,
        user_id: UserId,
        slug: &ComicSlug,
        chapter: Option<&str>,
    ) -> Result<Favorite, ComicStoreError>;
    async fn remove_favorite(&self, user_id: UserId, slug: &ComicSlug)
        -> Result<(), ComicStoreError>;
    /// Most recently updated first.
    async fn list_favorites(&self, user_id: UserId) -> Result<Vec<Favorite>, ComicStoreError>;
}

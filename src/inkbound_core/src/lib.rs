pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    comic::{ComicSlug, Favorite, Page, PageRequest, ReadingProgress, SlugError},
    email::Email,
    password::{Password, TEMPORARY_PASSWORD_LENGTH},
    user::{AuthContext, ProfileUpdate, Role, User, UserError, UserId, DEFAULT_AVATAR_URL},
    verification::{
        VerificationCode, VerificationCodeError, VerificationToken,
        VERIFICATION_TOKEN_TTL_SECONDS,
    },
};

pub use ports::{
    repositories::{
        ComicStoreError, FavoriteStore, ReadingProgressStore, UserStore, UserStoreError,
        VerificationStoreError, VerificationTokenStore,
    },
    services::{
        EmailClient, MediaAsset, MediaStore, MediaStoreError, PasswordHashError, PasswordHasher,
    },
};

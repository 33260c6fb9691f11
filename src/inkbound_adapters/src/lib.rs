pub mod auth;
pub mod config;
pub mod email;
pub mod hashing;
pub mod http;
pub mod media;
pub mod persistence;

// Re-export the pieces the service crate wires together
pub use auth::{
    extract::AuthenticatedUser,
    jwt::{generate_token_pair, JwtConfig, JwtConfigError, TokenAuthError, TokenPair},
};
pub use config::settings::{AllowedOrigins, Settings};
pub use email::{mock_email_client::MockEmailClient, postmark_email_client::PostmarkEmailClient};
pub use hashing::argon2_password_hasher::Argon2PasswordHasher;
pub use media::{http_media_client::HttpMediaClient, mock_media_client::MockMediaStore};
pub use persistence::{
    hashmap_comic_store::HashMapComicStore, hashmap_user_store::HashMapUserStore,
    hashmap_verification_store::HashMapVerificationStore, postgres_comic_store::PostgresComicStore,
    postgres_user_store::PostgresUserStore,
    postgres_verification_store::PostgresVerificationStore,
};

//! Inkbound: a small REST backend for a comic-reading service.
//!
//! Registration and login with email verification, password reset/change,
//! profile and avatar management, and per-user reading-progress and
//! favorites tracking for comics identified by slug.
//!
//! The workspace is layered hexagonally: `inkbound_core` holds the domain
//! types and port traits, `inkbound_application` the use cases,
//! `inkbound_adapters` the Postgres/argon2/JWT/HTTP implementations, and
//! `inkbound_service` the assembled router and binary. This crate re-exports
//! the public surface of all four.

// Key dependencies that appear in the public API surface
pub use async_trait;
pub use axum;
pub use secrecy;
pub use tokio;

pub use inkbound_adapters as adapters;
pub use inkbound_application as application;
pub use inkbound_core as core;
pub use inkbound_service as service;

pub use inkbound_adapters::{
    Argon2PasswordHasher, HashMapComicStore, HashMapUserStore, HashMapVerificationStore,
    HttpMediaClient, JwtConfig, MockEmailClient, MockMediaStore, PostgresComicStore,
    PostgresUserStore, PostgresVerificationStore, PostmarkEmailClient, Settings,
};
pub use inkbound_core::{
    Email, EmailClient, FavoriteStore, MediaStore, Password, PasswordHasher,
    ReadingProgressStore, Role, User, UserId, UserStore, VerificationTokenStore,
};
pub use inkbound_service::ComicService;

use std::sync::Arc;

use axum::extract::FromRequestParts;
use http::header::AUTHORIZATION;
use http::request::Parts;
use inkbound_core::AuthContext;

use crate::http::routes::error::ApiError;

use super::jwt::{decode_access_token, JwtConfig, TokenAuthError};

/// Extractor gating every protected route: validates the bearer credential
/// and injects the caller identity. Rejects before the handler runs on a
/// missing, malformed or expired token.
///
/// The `JwtConfig` is installed as a request extension when the router is
/// built, so the extractor works with any handler state.
pub struct AuthenticatedUser(pub AuthContext);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let config = parts
            .extensions
            .get::<Arc<JwtConfig>>()
            .cloned()
            .ok_or_else(|| {
                ApiError::UnexpectedError("JWT configuration is not installed".to_string())
            })?;

        let token = bearer_token(parts)?;
        let context = decode_access_token(token, &config)?;

        Ok(Self(context))
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, TokenAuthError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or(TokenAuthError::MissingToken)?;
    let value = header.to_str().map_err(|_| TokenAuthError::MalformedToken)?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or(TokenAuthError::MalformedToken)
}

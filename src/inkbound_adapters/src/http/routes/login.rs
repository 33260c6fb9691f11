use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use inkbound_application::LoginUseCase;
use inkbound_core::{Email, Password, PasswordHasher, UserStore};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_token_pair, JwtConfig};

use super::error::ApiError;
use super::responses::UserResponse;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

#[derive(Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserResponse,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<U, H>(
    State((user_store, password_hasher)): State<(U, H)>,
    Extension(jwt_config): Extension<Arc<JwtConfig>>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    let email = Email::try_from(request.email)?;
    let password = Password::try_from(request.password)?;

    let use_case = LoginUseCase::new(user_store, password_hasher);
    let user = use_case.execute(email, password).await?;

    let pair = generate_token_pair(user.id(), user.role(), &jwt_config)?;

    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            user: UserResponse::from(&user),
        }),
    ))
}

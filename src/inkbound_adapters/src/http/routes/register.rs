use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use inkbound_application::RegisterUseCase;
use inkbound_core::{Email, EmailClient, Password, PasswordHasher, UserStore, VerificationTokenStore};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use super::error::ApiError;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
    pub name: String,
}

#[derive(Serialize, Deserialize)]
pub struct RegisteredUser {
    pub id: String,
    pub email: String,
    pub name: String,
}

#[derive(Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: RegisteredUser,
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<U, V, H, E>(
    State((user_store, token_store, password_hasher, email_client, base_url)): State<(
        U,
        V,
        H,
        E,
        String,
    )>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    V: VerificationTokenStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let email = Email::try_from(request.email)?;
    let password = Password::try_from(request.password)?;
    if request.name.trim().is_empty() {
        return Err(ApiError::MissingFields("Name is required".to_string()));
    }

    let use_case = RegisterUseCase::new(
        user_store,
        token_store,
        password_hasher,
        email_client,
        base_url,
    );
    let user = use_case.execute(email, password, request.name).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Registration successful! Please check your email to verify your account."
                .to_string(),
            user: RegisteredUser {
                id: user.id().to_string(),
                email: user.email().as_ref().expose_secret().clone(),
                name: user.name().to_string(),
            },
        }),
    ))
}

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use inkbound_application::ResendVerificationUseCase;
use inkbound_core::{Email, EmailClient, PasswordHasher, UserStore, VerificationTokenStore};
use secrecy::Secret;
use serde::Deserialize;

use super::error::ApiError;
use super::responses::MessageResponse;

#[derive(Deserialize)]
pub struct ResendVerificationRequest {
    pub email: Secret<String>,
}

#[tracing::instrument(name = "Resend verification", skip_all)]
pub async fn resend_verification<U, V, H, E>(
    State((user_store, token_store, password_hasher, email_client, base_url)): State<(
        U,
        V,
        H,
        E,
        String,
    )>,
    Json(request): Json<ResendVerificationRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    V: VerificationTokenStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let email = Email::try_from(request.email)?;

    let use_case = ResendVerificationUseCase::new(
        user_store,
        token_store,
        password_hasher,
        email_client,
        base_url,
    );
    use_case.execute(email).await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Verification email has been resent".to_string(),
        }),
    ))
}

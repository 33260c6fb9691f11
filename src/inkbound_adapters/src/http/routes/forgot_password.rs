use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use inkbound_application::ForgotPasswordUseCase;
use inkbound_core::{Email, EmailClient, PasswordHasher, UserStore};
use secrecy::Secret;
use serde::Deserialize;

use super::error::ApiError;
use super::responses::MessageResponse;

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Secret<String>,
}

#[tracing::instrument(name = "Forgot password", skip_all)]
pub async fn forgot_password<U, H, E>(
    State((user_store, password_hasher, email_client)): State<(U, H, E)>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let email = Email::try_from(request.email)?;

    let use_case = ForgotPasswordUseCase::new(user_store, password_hasher, email_client);
    use_case.execute(email).await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "A new password has been sent to your email".to_string(),
        }),
    ))
}

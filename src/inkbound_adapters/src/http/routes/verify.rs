use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use inkbound_application::VerifyEmailUseCase;
use inkbound_core::{PasswordHasher, UserStore, VerificationCode, VerificationTokenStore};

use super::error::ApiError;
use super::responses::MessageResponse;

#[tracing::instrument(name = "Verify email", skip_all)]
pub async fn verify<U, V, H>(
    State((user_store, token_store, password_hasher)): State<(U, V, H)>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    V: VerificationTokenStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    let code: VerificationCode = code.parse()?;

    let use_case = VerifyEmailUseCase::new(user_store, token_store, password_hasher);
    use_case.execute(code).await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Email verified successfully! You can now login.".to_string(),
        }),
    ))
}

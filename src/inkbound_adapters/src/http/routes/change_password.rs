use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use inkbound_application::ChangePasswordUseCase;
use inkbound_core::{Email, Password, PasswordHasher, UserStore};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ApiError;
use super::responses::MessageResponse;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub email: Option<Secret<String>>,
    pub old_password: Option<Secret<String>>,
    pub new_password: Option<Secret<String>>,
}

fn required(field: Option<Secret<String>>) -> Option<Secret<String>> {
    field.filter(|value| !value.expose_secret().is_empty())
}

#[tracing::instrument(name = "Change password", skip_all)]
pub async fn change_password<U, H>(
    State((user_store, password_hasher)): State<(U, H)>,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    let (Some(email), Some(old_password), Some(new_password)) = (
        required(request.email),
        required(request.old_password),
        required(request.new_password),
    ) else {
        return Err(ApiError::MissingFields(
            "Email, old password, and new password are required".to_string(),
        ));
    };

    let email = Email::try_from(email)?;
    let old_password = Password::try_from(old_password)?;
    let new_password = Password::try_from(new_password)?;

    let use_case = ChangePasswordUseCase::new(user_store, password_hasher);
    use_case.execute(email, old_password, new_password).await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Password updated successfully".to_string(),
        }),
    ))
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use inkbound_application::{
    ChangePasswordError, FavoritesError, ForgotPasswordError, LoginError, ProfileError,
    ReadingProgressError, RegisterError, ResendVerificationError, VerifyEmailError,
};
use inkbound_core::{SlugError, UserError, VerificationCodeError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::jwt::TokenAuthError;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    MissingFields(String),

    #[error("New password must be at least 6 characters long")]
    WeakPassword,

    #[error("User not found")]
    UserNotFound,

    #[error("{0}")]
    NotFound(String),

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Please verify your email first")]
    UserNotVerified,

    #[error("{0}")]
    Conflict(String),

    #[error("Missing token")]
    MissingToken,

    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Please verify your email before logging in")]
    EmailNotVerified,

    #[error("{0}")]
    DeliveryError(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

/// The unverified-login rejection carries a machine-readable flag on top of
/// the message so clients can branch without string matching.
#[derive(Serialize, Deserialize)]
pub struct UnverifiedResponse {
    pub error: String,
    pub verified: bool,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::EmailNotVerified = self {
            let body = Json(UnverifiedResponse {
                error: self.to_string(),
                verified: false,
            });
            return (StatusCode::UNAUTHORIZED, body).into_response();
        }

        let (status_code, error_message) = match self {
            ApiError::InvalidInput(_) | ApiError::MissingFields(_) | ApiError::WeakPassword => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }

            ApiError::UserNotFound | ApiError::NotFound(_) => {
                (StatusCode::NOT_FOUND, self.to_string())
            }

            ApiError::UserAlreadyExists | ApiError::UserNotVerified | ApiError::Conflict(_) => {
                (StatusCode::CONFLICT, self.to_string())
            }

            ApiError::MissingToken
            | ApiError::AuthenticationError(_)
            | ApiError::EmailNotVerified => (StatusCode::UNAUTHORIZED, self.to_string()),

            ApiError::DeliveryError(_) | ApiError::UnexpectedError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status_code, body).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(error: UserError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<VerificationCodeError> for ApiError {
    fn from(error: VerificationCodeError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<SlugError> for ApiError {
    fn from(error: SlugError) -> Self {
        ApiError::MissingFields(error.to_string())
    }
}

impl From<TokenAuthError> for ApiError {
    fn from(error: TokenAuthError) -> Self {
        match error {
            TokenAuthError::MissingToken => ApiError::MissingToken,
            TokenAuthError::MalformedToken | TokenAuthError::TokenExpired => {
                ApiError::AuthenticationError(error.to_string())
            }
            TokenAuthError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<RegisterError> for ApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::UserAlreadyExists => ApiError::UserAlreadyExists,
            RegisterError::UserNotVerified => ApiError::UserNotVerified,
            RegisterError::EmailDeliveryFailed(_) => {
                ApiError::DeliveryError("Failed to send verification email".to_string())
            }
            RegisterError::UserStoreError(e) => ApiError::UnexpectedError(e.to_string()),
            RegisterError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<VerifyEmailError> for ApiError {
    fn from(error: VerifyEmailError) -> Self {
        match error {
            VerifyEmailError::TokenNotFound => ApiError::NotFound(error.to_string()),
            VerifyEmailError::TokenExpired | VerifyEmailError::InvalidCode => {
                ApiError::InvalidInput(error.to_string())
            }
            VerifyEmailError::UserNotFound => ApiError::UserNotFound,
            VerifyEmailError::HashError(e) => ApiError::UnexpectedError(e.to_string()),
            VerifyEmailError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<ResendVerificationError> for ApiError {
    fn from(error: ResendVerificationError) -> Self {
        match error {
            ResendVerificationError::UserNotFound => ApiError::UserNotFound,
            ResendVerificationError::AlreadyVerified => ApiError::InvalidInput(error.to_string()),
            ResendVerificationError::EmailDeliveryFailed(_) => {
                ApiError::DeliveryError("Failed to resend verification email".to_string())
            }
            ResendVerificationError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::UserNotFound => ApiError::UserNotFound,
            LoginError::EmailNotVerified => ApiError::EmailNotVerified,
            LoginError::InvalidCredentials => ApiError::AuthenticationError(error.to_string()),
            LoginError::HashError(e) => ApiError::UnexpectedError(e.to_string()),
            LoginError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<ForgotPasswordError> for ApiError {
    fn from(error: ForgotPasswordError) -> Self {
        match error {
            ForgotPasswordError::UserNotFound => ApiError::UserNotFound,
            ForgotPasswordError::EmailDeliveryFailed(_) => {
                ApiError::DeliveryError("Failed to send password reset email".to_string())
            }
            ForgotPasswordError::HashError(e) => ApiError::UnexpectedError(e.to_string()),
            ForgotPasswordError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<ChangePasswordError> for ApiError {
    fn from(error: ChangePasswordError) -> Self {
        match error {
            ChangePasswordError::WeakPassword => ApiError::WeakPassword,
            ChangePasswordError::UserNotFound => ApiError::UserNotFound,
            ChangePasswordError::IncorrectOldPassword => {
                ApiError::AuthenticationError(error.to_string())
            }
            ChangePasswordError::HashError(e) => ApiError::UnexpectedError(e.to_string()),
            ChangePasswordError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<ProfileError> for ApiError {
    fn from(error: ProfileError) -> Self {
        match error {
            ProfileError::UserNotFound => ApiError::UserNotFound,
            ProfileError::AvatarUploadFailed(e) => ApiError::DeliveryError(e),
            ProfileError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<ReadingProgressError> for ApiError {
    fn from(error: ReadingProgressError) -> Self {
        match error {
            ReadingProgressError::NotFound => ApiError::NotFound(error.to_string()),
            ReadingProgressError::Duplicate => ApiError::Conflict(error.to_string()),
            ReadingProgressError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<FavoritesError> for ApiError {
    fn from(error: FavoritesError) -> Self {
        match error {
            FavoritesError::NotFound => ApiError::NotFound(error.to_string()),
            FavoritesError::Duplicate => ApiError::Conflict(error.to_string()),
            FavoritesError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User ID is not present in session")]
    UserNotInSession,
    #[error("User ID {0:?} not found in database despite having an active session")]
    UserNotInDatabase(i32),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("An account is already registered with email {0:?}")]
    EmailTaken(String),
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Password must be between {min} and {max} characters")]
    InvalidPassword { min: usize, max: usize },
}

impl AuthError {
    fn error_response(status: StatusCode, message: String) -> Response {
        (status, Json(ErrorDto { error: message })).into_response()
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::UserNotInSession => {
                tracing::debug!("{}", self);

                Self::error_response(StatusCode::UNAUTHORIZED, "Not logged in".to_string())
            }
            Self::UserNotInDatabase(user_id) => {
                tracing::debug!(
                    user_id = %user_id,
                    "{}",
                    self
                );

                Self::error_response(StatusCode::NOT_FOUND, "User not found".to_string())
            }
            Self::InvalidCredentials => {
                tracing::debug!("Failed login attempt");

                Self::error_response(StatusCode::UNAUTHORIZED, self.to_string())
            }
            Self::EmailTaken(_) => {
                tracing::debug!("{}", self);

                // Same message regardless of which address was taken
                Self::error_response(
                    StatusCode::CONFLICT,
                    "That email address is already registered".to_string(),
                )
            }
            Self::InvalidEmail | Self::InvalidPassword { .. } => {
                Self::error_response(StatusCode::BAD_REQUEST, self.to_string())
            }
        }
    }
}

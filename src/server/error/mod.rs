//! Error types for the offpath server.
//!
//! Domain failures are grouped into specialised enums (authentication, configuration, game
//! rules) which are folded into the single [`Error`] type via `#[from]`. Every error implements
//! `IntoResponse` so controllers can return `Result<_, Error>` and let `?` pick the status code.

pub mod auth;
pub mod config;
pub mod game;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{auth::AuthError, config::ConfigError, game::GameError},
};

/// Main error type for the offpath server.
///
/// # Error Categories
/// - Configuration errors (missing/invalid environment variables)
/// - Authentication errors (session, credentials, registration input)
/// - Game errors (geocache expiry, check-in distance, ownership, missing resources)
/// - External library errors (database, sessions, file system, archives, password hashing)
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication error (session, credentials, registration input).
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Game rule violation or missing game resource.
    #[error(transparent)]
    GameError(#[from] GameError),
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Internal error indicating a bug or an impossible state.
    #[error("Internal error: {0:?}")]
    InternalError(String),
    /// Password hashing or verification failed for a reason other than a mismatch.
    #[error("Password hash error: {0}")]
    PasswordHash(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Redis session store error (connection, command execution).
    #[error(transparent)]
    SessionRedisError(#[from] tower_sessions_redis_store::fred::prelude::Error),
    /// File system error while storing or reading uploads.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    /// JSON serialization error while building an account export.
    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
    /// Zip archive error while building an account export.
    #[error(transparent)]
    ZipError(#[from] zip::result::ZipError),
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 4xx - For authentication failures and game rule violations
/// - 500 Internal Server Error - For all other errors (with error logging)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::GameError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// The full error is logged while the client only receives a generic message.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}

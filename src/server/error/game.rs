//! Game rule violations.
//!
//! These are the recoverable failures of the geocache and check-in workflows. Each maps to a
//! distinct client-facing status so the caller can tell "walk closer" apart from "generate a
//! new geocache".

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Kind of record a [`GameError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    User,
    Geocache,
    Checkin,
    Image,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::User => "User",
            Self::Geocache => "Geocache",
            Self::Checkin => "Check-in",
            Self::Image => "Image",
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    /// Referenced record does not exist, or an image upload never completed.
    #[error("{0} not found")]
    NotFound(Resource),
    /// Geocache is no longer eligible for check-in under the active policy.
    #[error("Geocache has expired, generate a new one to keep playing")]
    Expired,
    /// Check-in position is beyond the admissible distance from the geocache.
    #[error("You are {distance:.1}m from the geocache, get within {max_distance:.1}m to check in")]
    TooFar { distance: f64, max_distance: f64 },
    /// Record exists but belongs to another user.
    #[error("{0} belongs to another user")]
    Unauthorized(Resource),
    /// User already holds a check-in for this geocache.
    #[error("Already checked in to geocache {0}")]
    AlreadyCheckedIn(i32),
    /// Malformed request data (coordinates, text length, upload format).
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl GameError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Expired | Self::TooFar { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::FORBIDDEN,
            Self::AlreadyCheckedIn(_) => StatusCode::CONFLICT,
            Self::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for GameError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        (
            self.status(),
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

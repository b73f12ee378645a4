use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use rand::{rngs::StdRng, SeedableRng};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        geocache::{GeocacheDto, LocationDto},
    },
    server::{
        controller::util::get_user::get_user_from_session, error::Error,
        model::app::AppState, service::geocache::GeocacheService,
    },
};

pub static GEOCACHE_TAG: &str = "geocache";

/// Request a geocache to walk to from the given location
///
/// Generates a new target around the location and discards the player's other unvisited
/// geocaches, unless the reuse policy hands back an existing one.
#[utoipa::path(
    post,
    path = "/api/geocache",
    tag = GEOCACHE_TAG,
    request_body = LocationDto,
    responses(
        (status = 200, description = "Geocache to walk to", body = GeocacheDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 422, description = "Location is not a valid coordinate", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn request_geocache(
    State(state): State<AppState>,
    session: Session,
    Json(location): Json<LocationDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let geocache = GeocacheService::new(
        &state.db,
        &state.game,
        state.calendar(),
        StdRng::from_os_rng(),
    )
    .request_geocache(user.id, location.into())
    .await?;

    Ok((StatusCode::OK, Json(GeocacheDto::from(geocache))))
}

/// Get the player's active geocache
#[utoipa::path(
    get,
    path = "/api/geocache",
    tag = GEOCACHE_TAG,
    responses(
        (status = 200, description = "Active geocache", body = GeocacheDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "No geocache is active", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_active_geocache(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let geocache = GeocacheService::new(
        &state.db,
        &state.game,
        state.calendar(),
        StdRng::from_os_rng(),
    )
    .get_active(user.id)
    .await?;

    Ok((StatusCode::OK, Json(GeocacheDto::from(geocache))))
}

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        stats::{GlobalStatsDto, UserStatsDto},
    },
    server::{
        controller::util::get_user::get_user_from_session, error::Error,
        model::app::AppState, service::stats::StatsService,
    },
};

pub static STATS_TAG: &str = "stats";

/// Get the logged-in player's check-in count and streaks
#[utoipa::path(
    get,
    path = "/api/stats",
    tag = STATS_TAG,
    responses(
        (status = 200, description = "Player stats", body = UserStatsDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_stats(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let stats = StatsService::new(&state.db, state.calendar())
        .compute_stats(user.id)
        .await?;

    Ok((StatusCode::OK, Json(UserStatsDto::from(stats))))
}

/// Get totals across all players
#[utoipa::path(
    get,
    path = "/api/stats/global",
    tag = STATS_TAG,
    responses(
        (status = 200, description = "Global stats", body = GlobalStatsDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_global_stats(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let stats = StatsService::new(&state.db, state.calendar())
        .global_stats()
        .await?;

    Ok((StatusCode::OK, Json(GlobalStatsDto::from(stats))))
}

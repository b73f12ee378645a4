use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        checkin::{CheckinDto, CheckinPageDto, CreateCheckinDto, PageQuery, UpdateCheckinDto},
    },
    server::{
        controller::util::get_user::get_user_from_session, error::Error,
        model::app::AppState, service::checkin::CheckinService,
    },
};

pub static CHECKIN_TAG: &str = "checkin";

/// Check in at a geocache
///
/// The check-in is admitted only if the geocache is still open and the reported location lies
/// within the configured distance of it.
#[utoipa::path(
    post,
    path = "/api/checkin",
    tag = CHECKIN_TAG,
    request_body = CreateCheckinDto,
    responses(
        (status = 201, description = "Check-in recorded", body = CheckinDto),
        (status = 400, description = "Geocache expired or location too far away", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Image belongs to another player", body = ErrorDto),
        (status = 404, description = "Geocache or image not found", body = ErrorDto),
        (status = 409, description = "Already checked in at this geocache", body = ErrorDto),
        (status = 422, description = "Invalid location or text", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_checkin(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateCheckinDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let checkin = CheckinService::new(&state.db, &state.game, state.calendar())
        .create_checkin(user.id, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(CheckinDto::from(checkin))))
}

/// Edit the text and image of one of the player's check-ins
#[utoipa::path(
    put,
    path = "/api/checkin/{id}",
    tag = CHECKIN_TAG,
    params(("id" = i32, Path, description = "Check-in ID")),
    request_body = UpdateCheckinDto,
    responses(
        (status = 200, description = "Check-in updated", body = CheckinDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Check-in or image belongs to another player", body = ErrorDto),
        (status = 404, description = "Check-in or image not found", body = ErrorDto),
        (status = 422, description = "Invalid text", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_checkin(
    State(state): State<AppState>,
    session: Session,
    Path(checkin_id): Path<i32>,
    Json(payload): Json<UpdateCheckinDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let checkin = CheckinService::new(&state.db, &state.game, state.calendar())
        .update_checkin(checkin_id, user.id, payload.into())
        .await?;

    Ok((StatusCode::OK, Json(CheckinDto::from(checkin))))
}

/// Get one of the player's check-ins
#[utoipa::path(
    get,
    path = "/api/checkin/{id}",
    tag = CHECKIN_TAG,
    params(("id" = i32, Path, description = "Check-in ID")),
    responses(
        (status = 200, description = "Check-in", body = CheckinDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Check-in belongs to another player", body = ErrorDto),
        (status = 404, description = "Check-in not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_checkin(
    State(state): State<AppState>,
    session: Session,
    Path(checkin_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let checkin = CheckinService::new(&state.db, &state.game, state.calendar())
        .get_checkin(user.id, checkin_id)
        .await?;

    Ok((StatusCode::OK, Json(CheckinDto::from(checkin))))
}

/// List all of the player's check-ins, newest first
#[utoipa::path(
    get,
    path = "/api/checkin",
    tag = CHECKIN_TAG,
    responses(
        (status = 200, description = "Check-ins", body = Vec<CheckinDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_checkins(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let checkins: Vec<CheckinDto> = CheckinService::new(&state.db, &state.game, state.calendar())
        .list_checkins(user.id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((StatusCode::OK, Json(checkins)))
}

/// List one page of the player's check-ins, newest first
#[utoipa::path(
    get,
    path = "/api/checkin/paginated",
    tag = CHECKIN_TAG,
    params(PageQuery),
    responses(
        (status = 200, description = "Page of check-ins", body = CheckinPageDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 422, description = "Page number is zero", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_checkins_paginated(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let page = CheckinService::new(&state.db, &state.game, state.calendar())
        .list_checkins_paginated(user.id, query.page.unwrap_or(1))
        .await?;

    Ok((StatusCode::OK, Json(CheckinPageDto::from(page))))
}

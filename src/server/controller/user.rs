use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        user::{ChangePasswordDto, CredentialsDto, DeleteAccountDto, UserDto},
    },
    server::{
        controller::util::get_user::get_user_from_session,
        error::Error,
        model::{app::AppState, session::user::SessionUserId},
        service::user::UserService,
    },
};

pub static USER_TAG: &str = "user";

/// Register a new player account and log it in
#[utoipa::path(
    post,
    path = "/api/user/register",
    tag = USER_TAG,
    request_body = CredentialsDto,
    responses(
        (status = 201, description = "Account created and logged in", body = UserDto),
        (status = 400, description = "Invalid email address or password length", body = ErrorDto),
        (status = 409, description = "Email address already registered", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CredentialsDto>,
) -> Result<impl IntoResponse, Error> {
    let user = UserService::new(&state.db, state.calendar())
        .register(&payload.email, &payload.password)
        .await?;

    SessionUserId::insert(&session, user.id).await?;

    Ok((StatusCode::CREATED, Json(UserDto::from(user))))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/user/login",
    tag = USER_TAG,
    request_body = CredentialsDto,
    responses(
        (status = 200, description = "Logged in", body = UserDto),
        (status = 401, description = "Invalid email or password", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CredentialsDto>,
) -> Result<impl IntoResponse, Error> {
    let user = UserService::new(&state.db, state.calendar())
        .login(&payload.email, &payload.password)
        .await?;

    SessionUserId::insert(&session, user.id).await?;

    Ok((StatusCode::OK, Json(UserDto::from(user))))
}

/// Log out by clearing the session
#[utoipa::path(
    post,
    path = "/api/user/logout",
    tag = USER_TAG,
    responses(
        (status = 204, description = "Logged out"),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, Error> {
    // Clearing a session that was never stored fails, so only clear a logged-in one
    if SessionUserId::get(&session).await?.is_some() {
        session.clear().await;
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Get the logged-in player
#[utoipa::path(
    get,
    path = "/api/user",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Logged-in player", body = UserDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    Ok((StatusCode::OK, Json(UserDto::from(user))))
}

/// Change the logged-in player's password
#[utoipa::path(
    put,
    path = "/api/user/password",
    tag = USER_TAG,
    request_body = ChangePasswordDto,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "New password length out of range", body = ErrorDto),
        (status = 401, description = "Not logged in or current password wrong", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn change_password(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<ChangePasswordDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    UserService::new(&state.db, state.calendar())
        .change_password(user.id, &payload.old_password, &payload.new_password)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete the logged-in player's account and their data
///
/// Stored image files are removed after the rows are gone; a file that cannot be removed is
/// logged and left behind.
#[utoipa::path(
    post,
    path = "/api/user/delete",
    tag = USER_TAG,
    request_body = DeleteAccountDto,
    responses(
        (status = 204, description = "Account deleted and logged out"),
        (status = 401, description = "Not logged in or password wrong", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_account(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<DeleteAccountDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let images = UserService::new(&state.db, state.calendar())
        .delete_account(user.id, &payload.password)
        .await?;

    for filepath in images.into_iter().filter_map(|image| image.filepath) {
        if let Err(e) = tokio::fs::remove_file(&filepath).await {
            tracing::warn!(
                user_id = %user.id,
                "Failed to remove image file {} of deleted account: {}",
                filepath,
                e
            );
        }
    }

    session.clear().await;

    Ok(StatusCode::NO_CONTENT)
}

/// Download everything stored for the logged-in player
///
/// The zip archive holds `account.json` with the player's rows and the stored file of every
/// finished image upload under `images/`.
#[utoipa::path(
    get,
    path = "/api/user/export",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Account export archive", content_type = "application/zip", body = Vec<u8>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn export(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let archive = UserService::new(&state.db, state.calendar())
        .export_archive(user.id)
        .await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", archive.filename),
            ),
        ],
        archive.bytes,
    ))
}

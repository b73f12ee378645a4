use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        image::{ImageDto, ImageUploadDto},
    },
    server::{
        controller::util::get_user::get_user_from_session,
        error::{game::GameError, Error},
        model::app::AppState,
        service::image::ImageService,
    },
};

pub static IMAGE_TAG: &str = "image";

/// Name of the multipart field carrying the file
pub const UPLOAD_FIELD: &str = "file";

/// Largest accepted request body for uploads
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Upload an image to attach to check-ins
#[utoipa::path(
    post,
    path = "/api/image",
    tag = IMAGE_TAG,
    request_body(content = ImageUploadDto, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image stored", body = ImageDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 422, description = "Missing file, empty file or unsupported extension", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn upload_image(
    State(state): State<AppState>,
    session: Session,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    while let Some(field) = multipart.next_field().await.map_err(invalid_multipart)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(invalid_multipart)?;

        let image = ImageService::new(&state.db, &state.upload_directory, state.calendar())
            .upload(user.id, &filename, &bytes)
            .await?;

        return Ok((StatusCode::CREATED, Json(ImageDto::from(image))));
    }

    Err(GameError::InvalidInput(format!("Missing multipart field `{}`", UPLOAD_FIELD)).into())
}

/// Get one of the player's images
#[utoipa::path(
    get,
    path = "/api/image/{id}",
    tag = IMAGE_TAG,
    params(("id" = i32, Path, description = "Image ID")),
    responses(
        (status = 200, description = "Image", body = ImageDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Image belongs to another player", body = ErrorDto),
        (status = 404, description = "Image not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_image(
    State(state): State<AppState>,
    session: Session,
    Path(image_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let image = ImageService::new(&state.db, &state.upload_directory, state.calendar())
        .get(user.id, image_id)
        .await?;

    Ok((StatusCode::OK, Json(ImageDto::from(image))))
}

fn invalid_multipart(e: axum::extract::multipart::MultipartError) -> Error {
    GameError::InvalidInput(e.body_text()).into()
}

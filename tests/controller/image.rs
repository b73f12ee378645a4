//! Tests for the image upload endpoints.

use axum::{
    body::Body,
    extract::{FromRequest, Multipart, Path, State},
    http::{header::CONTENT_TYPE, Request, StatusCode},
    response::IntoResponse,
};
use offpath::{
    model::image::{ImageDto, ImageStatusDto},
    server::{
        config::GameConfig,
        controller::image::{get_image, upload_image},
        model::session::user::SessionUserId,
    },
};

use super::*;

const BOUNDARY: &str = "offpath-test-boundary";

async fn multipart(field: &str, filename: &str, contents: &str) -> Multipart {
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n{contents}\r\n--{b}--\r\n",
        b = BOUNDARY
    );
    let request = Request::builder()
        .method("POST")
        .uri("/api/image")
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap();

    Multipart::from_request(request, &()).await.unwrap()
}

/// Expect 201 with a ready image stored in the upload directory
#[tokio::test]
async fn uploads_png() -> Result<(), TestError> {
    let test = TestBuilder::new().with_game_tables().build().await?;
    let user = test.user().insert_user("a@example.com").await?;
    SessionUserId::insert(&test.session, user.id).await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let state = test.into_app_state_with(GameConfig::default(), dir.path());

    let resp = upload_image(
        State(state.clone()),
        test.session.clone(),
        multipart("file", "photo.PNG", "not really a png").await,
    )
    .await
    .unwrap()
    .into_response();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let image: ImageDto = json_body(resp).await;
    assert_eq!(image.status, ImageStatusDto::Ready);
    let filename = image.filename.unwrap();
    assert_eq!(filename, format!("{}.png", image.id));
    assert_eq!(
        std::fs::read_to_string(dir.path().join(&filename)).unwrap(),
        "not really a png"
    );

    let resp = get_image(State(state), test.session.clone(), Path(image.id))
        .await
        .unwrap()
        .into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

/// Expect 422 for an unsupported extension or a missing file field
#[tokio::test]
async fn rejects_bad_uploads() -> Result<(), TestError> {
    let test = TestBuilder::new().with_game_tables().build().await?;
    let user = test.user().insert_user("a@example.com").await?;
    SessionUserId::insert(&test.session, user.id).await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let state = test.into_app_state_with(GameConfig::default(), dir.path());

    let wrong_extension = upload_image(
        State(state.clone()),
        test.session.clone(),
        multipart("file", "notes.txt", "hello").await,
    )
    .await;
    let wrong_field = upload_image(
        State(state),
        test.session.clone(),
        multipart("attachment", "photo.jpg", "hello").await,
    )
    .await;

    assert_eq!(
        wrong_extension.err().unwrap().into_response().status(),
        StatusCode::UNPROCESSABLE_ENTITY
    );
    assert_eq!(
        wrong_field.err().unwrap().into_response().status(),
        StatusCode::UNPROCESSABLE_ENTITY
    );

    Ok(())
}

/// Expect 403 for another player's image
#[tokio::test]
async fn get_rejects_foreign_image() -> Result<(), TestError> {
    let test = TestBuilder::new().with_game_tables().build().await?;
    let user = test.user().insert_user("a@example.com").await?;
    let other = test.user().insert_user("b@example.com").await?;
    let image = test.image().insert_ready_image(other.id).await?;
    SessionUserId::insert(&test.session, user.id).await.unwrap();

    let result = get_image(
        State(test.into_app_state()),
        test.session.clone(),
        Path(image.id),
    )
    .await;

    assert_eq!(
        result.err().unwrap().into_response().status(),
        StatusCode::FORBIDDEN
    );

    Ok(())
}

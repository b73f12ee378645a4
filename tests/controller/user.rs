//! Tests for the account endpoints.

use std::io::{Cursor, Read};

use axum::{
    body::to_bytes,
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use offpath::{
    model::user::{
        AccountExportDto, ChangePasswordDto, CredentialsDto, DeleteAccountDto, UserDto,
    },
    server::{
        controller::user::{change_password, delete_account, export, get_user, login, logout, register},
        data::user::UserRepository,
        error::{auth::AuthError, Error},
        model::session::user::SessionUserId,
    },
};
use zip::ZipArchive;

use super::*;

const PASSWORD: &str = "hunter2hunter2";

fn credentials(email: &str, password: &str) -> Json<CredentialsDto> {
    Json(CredentialsDto {
        email: email.to_string(),
        password: password.to_string(),
    })
}

/// Expect 201 with the new user and the user logged in
#[tokio::test]
async fn register_creates_and_logs_in_user() -> Result<(), TestError> {
    let test = TestBuilder::new().with_game_tables().build().await?;

    let resp = register(
        State(test.into_app_state()),
        test.session.clone(),
        credentials("a@example.com", PASSWORD),
    )
    .await
    .unwrap()
    .into_response();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let user: UserDto = json_body(resp).await;
    assert_eq!(user.email, "a@example.com");
    assert_eq!(user.roles, vec!["player".to_string()]);
    assert_eq!(SessionUserId::get(&test.session).await.unwrap(), Some(user.id));

    Ok(())
}

/// Expect 409 when the email is already registered
#[tokio::test]
async fn register_conflicts_for_taken_email() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_game_tables()
        .with_user("a@example.com")
        .build()
        .await?;

    let result = register(
        State(test.into_app_state()),
        test.session.clone(),
        credentials("a@example.com", PASSWORD),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(SessionUserId::get(&test.session).await.unwrap(), None);

    Ok(())
}

/// Expect 400 for a password that is too short
#[tokio::test]
async fn register_rejects_short_password() -> Result<(), TestError> {
    let test = TestBuilder::new().with_game_tables().build().await?;

    let result = register(
        State(test.into_app_state()),
        test.session.clone(),
        credentials("a@example.com", "short"),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect 200 and a session for correct credentials, 401 otherwise
#[tokio::test]
async fn login_checks_credentials() -> Result<(), TestError> {
    let test = TestBuilder::new().with_game_tables().build().await?;
    let state = test.into_app_state();
    register(
        State(state.clone()),
        test.session.clone(),
        credentials("a@example.com", PASSWORD),
    )
    .await
    .unwrap();
    logout(test.session.clone()).await.unwrap();

    let rejected = login(
        State(state.clone()),
        test.session.clone(),
        credentials("a@example.com", "not my password"),
    )
    .await;

    assert!(matches!(
        rejected,
        Err(Error::AuthError(AuthError::InvalidCredentials))
    ));
    assert_eq!(SessionUserId::get(&test.session).await.unwrap(), None);

    let resp = login(
        State(state),
        test.session.clone(),
        credentials("a@example.com", PASSWORD),
    )
    .await
    .unwrap()
    .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(SessionUserId::get(&test.session).await.unwrap().is_some());

    Ok(())
}

/// Expect 204 and an empty session after logout, also when nobody was logged in
#[tokio::test]
async fn logout_clears_session() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_game_tables()
        .with_user("a@example.com")
        .build()
        .await?;
    SessionUserId::insert(&test.session, 1).await.unwrap();

    let resp = logout(test.session.clone()).await.unwrap().into_response();

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(SessionUserId::get(&test.session).await.unwrap(), None);

    let resp = logout(test.session.clone()).await.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    Ok(())
}

/// Expect 401 without a session and 404 with a session for a missing user
#[tokio::test]
async fn get_user_requires_existing_session_user() -> Result<(), TestError> {
    let test = TestBuilder::new().with_game_tables().build().await?;

    let anonymous = get_user(State(test.into_app_state()), test.session.clone()).await;
    assert_eq!(
        anonymous.err().unwrap().into_response().status(),
        StatusCode::UNAUTHORIZED
    );

    SessionUserId::insert(&test.session, 42).await.unwrap();
    let missing = get_user(State(test.into_app_state()), test.session.clone()).await;

    assert!(matches!(
        missing,
        Err(Error::AuthError(AuthError::UserNotInDatabase(42)))
    ));
    assert_eq!(SessionUserId::get(&test.session).await.unwrap(), None);

    Ok(())
}

/// Expect 204 for a password change with the correct current password
#[tokio::test]
async fn change_password_succeeds() -> Result<(), TestError> {
    let test = TestBuilder::new().with_game_tables().build().await?;
    let state = test.into_app_state();
    register(
        State(state.clone()),
        test.session.clone(),
        credentials("a@example.com", PASSWORD),
    )
    .await
    .unwrap();

    let resp = change_password(
        State(state),
        test.session.clone(),
        Json(ChangePasswordDto {
            old_password: PASSWORD.to_string(),
            new_password: "a brand new password".to_string(),
        }),
    )
    .await
    .unwrap()
    .into_response();

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    Ok(())
}

/// Expect the account removed and the session cleared
#[tokio::test]
async fn delete_account_removes_user() -> Result<(), TestError> {
    let test = TestBuilder::new().with_game_tables().build().await?;
    let state = test.into_app_state();
    register(
        State(state.clone()),
        test.session.clone(),
        credentials("a@example.com", PASSWORD),
    )
    .await
    .unwrap();

    let resp = delete_account(
        State(state),
        test.session.clone(),
        Json(DeleteAccountDto {
            password: PASSWORD.to_string(),
        }),
    )
    .await
    .unwrap()
    .into_response();

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(SessionUserId::get(&test.session).await.unwrap(), None);
    assert!(UserRepository::new(&test.db)
        .find_by_email("a@example.com")
        .await?
        .is_none());

    Ok(())
}

/// Expect a zip download named after the user carrying their geocaches and check-ins
#[tokio::test]
async fn export_returns_owned_rows() -> Result<(), TestError> {
    let test = TestBuilder::new().with_game_tables().build().await?;
    let user = test.user().insert_user("a@example.com").await?;
    let geocache = test.geocache().insert_geocache(user.id, test.now_naive()).await?;
    test.checkin()
        .insert_checkin(user.id, &geocache, test.now_naive())
        .await?;
    SessionUserId::insert(&test.session, user.id).await.unwrap();

    let resp = export(State(test.into_app_state()), test.session.clone())
        .await
        .unwrap()
        .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/zip");
    assert_eq!(
        resp.headers()[header::CONTENT_DISPOSITION],
        format!("attachment; filename=\"{}.zip\"", user.id).as_str()
    );

    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let mut archive = ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
    let mut account = Vec::new();
    archive
        .by_name("account.json")
        .unwrap()
        .read_to_end(&mut account)
        .unwrap();

    let export: AccountExportDto = serde_json::from_slice(&account)?;
    assert_eq!(export.user.id, user.id);
    assert_eq!(export.geocaches.len(), 1);
    assert_eq!(export.checkins.len(), 1);
    assert!(export.images.is_empty());

    Ok(())
}

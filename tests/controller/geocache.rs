//! Tests for the geocache endpoints.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use offpath::{
    model::geocache::{GeocacheDto, LocationDto},
    server::{
        controller::geocache::{get_active_geocache, request_geocache},
        model::session::user::SessionUserId,
        util::geo::{self, Point},
    },
};
use offpath_test_utils::constant::{TEST_LAT, TEST_LNG};

use super::*;

const HOME: LocationDto = LocationDto {
    lat: TEST_LAT,
    lng: TEST_LNG,
};

/// Expect a geocache within the target band that is then reported as active
#[tokio::test]
async fn request_then_get_active() -> Result<(), TestError> {
    let test = TestBuilder::new().with_game_tables().build().await?;
    let user = test.user().insert_user("a@example.com").await?;
    SessionUserId::insert(&test.session, user.id).await.unwrap();
    let state = test.into_app_state();

    let resp = request_geocache(State(state.clone()), test.session.clone(), Json(HOME))
        .await
        .unwrap()
        .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let generated: GeocacheDto = json_body(resp).await;
    let distance = geo::distance(
        Point::new(TEST_LAT, TEST_LNG),
        Point::new(generated.lat, generated.lng),
    );
    assert!((99.0..=501.0).contains(&distance), "distance {distance}");

    let resp = get_active_geocache(State(state), test.session.clone())
        .await
        .unwrap()
        .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let active: GeocacheDto = json_body(resp).await;
    assert_eq!(active.id, generated.id);

    Ok(())
}

/// Expect 404 when the player has no active geocache
#[tokio::test]
async fn get_active_not_found() -> Result<(), TestError> {
    let test = TestBuilder::new().with_game_tables().build().await?;
    let user = test.user().insert_user("a@example.com").await?;
    test.geocache().insert_geocache(user.id, test.days_ago(1)).await?;
    SessionUserId::insert(&test.session, user.id).await.unwrap();

    let result = get_active_geocache(State(test.into_app_state()), test.session.clone()).await;

    assert_eq!(
        result.err().unwrap().into_response().status(),
        StatusCode::NOT_FOUND
    );

    Ok(())
}

/// Expect 422 for an out of range coordinate
#[tokio::test]
async fn request_rejects_invalid_location() -> Result<(), TestError> {
    let test = TestBuilder::new().with_game_tables().build().await?;
    let user = test.user().insert_user("a@example.com").await?;
    SessionUserId::insert(&test.session, user.id).await.unwrap();

    let result = request_geocache(
        State(test.into_app_state()),
        test.session.clone(),
        Json(LocationDto {
            lat: 91.0,
            lng: 0.0,
        }),
    )
    .await;

    assert_eq!(
        result.err().unwrap().into_response().status(),
        StatusCode::UNPROCESSABLE_ENTITY
    );

    Ok(())
}

/// Expect 401 without a logged-in player
#[tokio::test]
async fn request_requires_login() -> Result<(), TestError> {
    let test = TestBuilder::new().with_game_tables().build().await?;

    let result = request_geocache(State(test.into_app_state()), test.session.clone(), Json(HOME))
        .await;

    assert_eq!(
        result.err().unwrap().into_response().status(),
        StatusCode::UNAUTHORIZED
    );

    Ok(())
}

//! Tests for the check-in endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use offpath::{
    model::{
        checkin::{CheckinDto, CheckinPageDto, CreateCheckinDto, PageQuery, UpdateCheckinDto},
        geocache::LocationDto,
    },
    server::{
        config::GameConfig,
        controller::checkin::{
            create_checkin, get_checkin, list_checkins, list_checkins_paginated, update_checkin,
        },
        model::session::user::SessionUserId,
        util::geo::{self, Point},
    },
};

use super::*;

fn checkin_at(geocache: &entity::geocache::Model, distance_m: f64) -> Json<CreateCheckinDto> {
    let point = geo::project(Point::new(geocache.lat, geocache.lng), 45.0, distance_m);

    Json(CreateCheckinDto {
        geocache_id: geocache.id,
        location: LocationDto {
            lat: point.lat,
            lng: point.lng,
        },
        text: Some("Found it".to_string()),
        image_id: None,
    })
}

/// Expect 201 for a check-in within range of today's geocache
#[tokio::test]
async fn create_admits_nearby_checkin() -> Result<(), TestError> {
    let test = TestBuilder::new().with_game_tables().build().await?;
    let user = test.user().insert_user("a@example.com").await?;
    let geocache = test.geocache().insert_geocache(user.id, test.now_naive()).await?;
    SessionUserId::insert(&test.session, user.id).await.unwrap();

    let resp = create_checkin(
        State(test.into_app_state()),
        test.session.clone(),
        checkin_at(&geocache, 5.0),
    )
    .await
    .unwrap()
    .into_response();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let checkin: CheckinDto = json_body(resp).await;
    assert_eq!(checkin.geocache_id, geocache.id);
    assert_eq!(checkin.text, "Found it");
    assert!((checkin.final_distance - 5.0).abs() < 1e-3);

    Ok(())
}

/// Expect 400 when the player is out of range or the geocache has expired
#[tokio::test]
async fn create_rejects_far_and_expired() -> Result<(), TestError> {
    let test = TestBuilder::new().with_game_tables().build().await?;
    let user = test.user().insert_user("a@example.com").await?;
    let today = test.geocache().insert_geocache(user.id, test.now_naive()).await?;
    let yesterday = test.geocache().insert_geocache(user.id, test.days_ago(1)).await?;
    SessionUserId::insert(&test.session, user.id).await.unwrap();
    let state = test.into_app_state();

    let too_far = create_checkin(
        State(state.clone()),
        test.session.clone(),
        checkin_at(&today, 50.0),
    )
    .await;
    let expired = create_checkin(
        State(state),
        test.session.clone(),
        checkin_at(&yesterday, 1.0),
    )
    .await;

    assert_eq!(
        too_far.err().unwrap().into_response().status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        expired.err().unwrap().into_response().status(),
        StatusCode::BAD_REQUEST
    );

    Ok(())
}

/// Expect 409 for a repeat check-in when repeats are rejected
#[tokio::test]
async fn create_rejects_repeat_when_configured() -> Result<(), TestError> {
    let test = TestBuilder::new().with_game_tables().build().await?;
    let user = test.user().insert_user("a@example.com").await?;
    let geocache = test.geocache().insert_geocache(user.id, test.now_naive()).await?;
    SessionUserId::insert(&test.session, user.id).await.unwrap();

    let mut game = GameConfig::default();
    game.checkin.reject_repeat = true;
    let state = test.into_app_state_with(game, &std::env::temp_dir());

    create_checkin(
        State(state.clone()),
        test.session.clone(),
        checkin_at(&geocache, 1.0),
    )
    .await
    .unwrap();
    let repeat = create_checkin(State(state), test.session.clone(), checkin_at(&geocache, 1.0))
        .await;

    assert_eq!(
        repeat.err().unwrap().into_response().status(),
        StatusCode::CONFLICT
    );

    Ok(())
}

/// Expect the text replaced and 403 for another player's check-in
#[tokio::test]
async fn update_edits_own_checkin_only() -> Result<(), TestError> {
    let test = TestBuilder::new().with_game_tables().build().await?;
    let user = test.user().insert_user("a@example.com").await?;
    let other = test.user().insert_user("b@example.com").await?;
    let geocache = test.geocache().insert_geocache(user.id, test.now_naive()).await?;
    let own = test.checkin().insert_checkin(user.id, &geocache, test.now_naive()).await?;
    let foreign = test.checkin().insert_checkin(other.id, &geocache, test.now_naive()).await?;
    SessionUserId::insert(&test.session, user.id).await.unwrap();
    let state = test.into_app_state();

    let resp = update_checkin(
        State(state.clone()),
        test.session.clone(),
        Path(own.id),
        Json(UpdateCheckinDto {
            text: Some("Edited".to_string()),
            image_id: None,
        }),
    )
    .await
    .unwrap()
    .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let updated: CheckinDto = json_body(resp).await;
    assert_eq!(updated.text, "Edited");

    let result = update_checkin(
        State(state),
        test.session.clone(),
        Path(foreign.id),
        Json(UpdateCheckinDto::default()),
    )
    .await;

    assert_eq!(
        result.err().unwrap().into_response().status(),
        StatusCode::FORBIDDEN
    );

    Ok(())
}

/// Expect 200 for an own check-in and 404 for an unknown one
#[tokio::test]
async fn get_returns_own_checkin() -> Result<(), TestError> {
    let test = TestBuilder::new().with_game_tables().build().await?;
    let user = test.user().insert_user("a@example.com").await?;
    let geocache = test.geocache().insert_geocache(user.id, test.now_naive()).await?;
    let checkin = test.checkin().insert_checkin(user.id, &geocache, test.now_naive()).await?;
    SessionUserId::insert(&test.session, user.id).await.unwrap();
    let state = test.into_app_state();

    let resp = get_checkin(State(state.clone()), test.session.clone(), Path(checkin.id))
        .await
        .unwrap()
        .into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let missing = get_checkin(State(state), test.session.clone(), Path(checkin.id + 100)).await;
    assert_eq!(
        missing.err().unwrap().into_response().status(),
        StatusCode::NOT_FOUND
    );

    Ok(())
}

/// Expect all check-ins newest first, and pages of the configured size
#[tokio::test]
async fn lists_checkins_with_pagination() -> Result<(), TestError> {
    let test = TestBuilder::new().with_game_tables().build().await?;
    let user = test.user().insert_user("a@example.com").await?;
    for days in 0..3 {
        let geocache = test.geocache().insert_geocache(user.id, test.days_ago(days)).await?;
        test.checkin()
            .insert_checkin(user.id, &geocache, test.days_ago(days))
            .await?;
    }
    SessionUserId::insert(&test.session, user.id).await.unwrap();

    let mut game = GameConfig::default();
    game.posts_per_page = 2;
    let state = test.into_app_state_with(game, &std::env::temp_dir());

    let resp = list_checkins(State(state.clone()), test.session.clone())
        .await
        .unwrap()
        .into_response();
    let all: Vec<CheckinDto> = json_body(resp).await;
    assert_eq!(all.len(), 3);
    assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));

    let resp = list_checkins_paginated(
        State(state.clone()),
        test.session.clone(),
        Query(PageQuery { page: None }),
    )
    .await
    .unwrap()
    .into_response();
    let first: CheckinPageDto = json_body(resp).await;
    assert_eq!(first.page, 1);
    assert_eq!(first.items.len(), 2);
    assert!(first.has_next);

    let resp = list_checkins_paginated(
        State(state.clone()),
        test.session.clone(),
        Query(PageQuery { page: Some(2) }),
    )
    .await
    .unwrap()
    .into_response();
    let second: CheckinPageDto = json_body(resp).await;
    assert_eq!(second.items.len(), 1);
    assert!(!second.has_next);

    let zero = list_checkins_paginated(
        State(state),
        test.session.clone(),
        Query(PageQuery { page: Some(0) }),
    )
    .await;
    assert_eq!(
        zero.err().unwrap().into_response().status(),
        StatusCode::UNPROCESSABLE_ENTITY
    );

    Ok(())
}

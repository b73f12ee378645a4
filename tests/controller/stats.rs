//! Tests for the stats endpoints.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use offpath::{
    model::stats::{GlobalStatsDto, UserStatsDto},
    server::{
        controller::stats::{get_global_stats, get_stats},
        model::session::user::SessionUserId,
    },
};

use super::*;

/// Expect check-ins on today and the two days before to form a streak of three
#[tokio::test]
async fn returns_player_streaks() -> Result<(), TestError> {
    let test = TestBuilder::new().with_game_tables().build().await?;
    let user = test.user().insert_user("a@example.com").await?;
    for days in [0, 1, 2, 5] {
        let geocache = test.geocache().insert_geocache(user.id, test.days_ago(days)).await?;
        test.checkin()
            .insert_checkin(user.id, &geocache, test.days_ago(days))
            .await?;
    }
    SessionUserId::insert(&test.session, user.id).await.unwrap();

    let resp = get_stats(State(test.into_app_state()), test.session.clone())
        .await
        .unwrap()
        .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let stats: UserStatsDto = json_body(resp).await;
    assert_eq!(stats.num_checkins, 4);
    assert_eq!(stats.current_streak, 3);
    assert_eq!(stats.longest_streak, 3);

    Ok(())
}

/// Expect 401 for player stats without a session
#[tokio::test]
async fn player_stats_require_login() -> Result<(), TestError> {
    let test = TestBuilder::new().with_game_tables().build().await?;

    let result = get_stats(State(test.into_app_state()), test.session.clone()).await;

    assert_eq!(
        result.err().unwrap().into_response().status(),
        StatusCode::UNAUTHORIZED
    );

    Ok(())
}

/// Expect totals across players without a session
#[tokio::test]
async fn returns_global_totals() -> Result<(), TestError> {
    let test = TestBuilder::new().with_game_tables().build().await?;
    let a = test.user().insert_user("a@example.com").await?;
    let b = test.user().insert_user("b@example.com").await?;
    let geocache = test.geocache().insert_geocache(a.id, test.now_naive()).await?;
    test.checkin().insert_checkin(a.id, &geocache, test.now_naive()).await?;
    test.checkin().insert_checkin(b.id, &geocache, test.now_naive()).await?;

    let resp = get_global_stats(State(test.into_app_state()))
        .await
        .unwrap()
        .into_response();

    assert_eq!(resp.status(), StatusCode::OK);
    let stats: GlobalStatsDto = json_body(resp).await;
    assert_eq!(stats.num_checkins, 2);
    assert_eq!(stats.num_players, 2);

    Ok(())
}

//! Row-lock interleavings against a real Postgres database.
//!
//! SQLite serializes writers for the whole database, so these orderings only show up on Postgres.
//! Point `TEST_DATABASE_URL` at a disposable database; every run resets its schema.

use std::{sync::Arc, time::Duration};

use migration::{Migrator, MigratorTrait};
use offpath::server::{
    config::GameConfig,
    data::{geocache::GeocacheRepository, user::UserRepository},
    error::{
        game::{GameError, Resource},
        Error,
    },
    service::{
        checkin::{CheckinService, CreateCheckin},
        geocache::purge_unconsumed,
    },
    util::{
        geo::Point,
        time::{Calendar, CalendarZone},
    },
};
use offpath_test_utils::prelude::*;
use sea_orm::{Database, DatabaseConnection, TransactionTrait};

async fn connect() -> Result<DatabaseConnection, TestError> {
    let _ = dotenvy::dotenv();
    let url = std::env::var("TEST_DATABASE_URL")
        .expect("TEST_DATABASE_URL must point at a disposable Postgres database");

    let db = Database::connect(url).await?;
    Migrator::fresh(&db).await?;

    Ok(db)
}

/// Expect a check-in that waited on the owner's lock to see the purge committed under it
#[tokio::test]
async fn checkin_rereads_geocache_purged_while_waiting() -> Result<(), TestError> {
    let db = connect().await?;
    let calendar = Calendar::new(Arc::new(FixedClock(chrono::Utc::now())), CalendarZone::Utc);
    let now = calendar.now();

    let user = UserRepository::new(&db)
        .create("a@example.com", "hash".to_string(), "player", now)
        .await?;
    let stale = GeocacheRepository::new(&db)
        .create(user.id, Point::new(52.0, 13.0), now)
        .await?;

    // Replace the stale geocache while holding the owner's lock
    let txn = db.begin().await?;
    UserRepository::new(&txn).lock(user.id).await?;
    let fresh = GeocacheRepository::new(&txn)
        .create(user.id, Point::new(52.01, 13.01), now)
        .await?;
    purge_unconsumed(&txn, user.id, fresh.id).await.unwrap();

    let checkin = tokio::spawn({
        let db = db.clone();
        let calendar = calendar.clone();
        async move {
            let config = GameConfig::default();
            CheckinService::new(&db, &config, calendar)
                .create_checkin(
                    user.id,
                    CreateCheckin {
                        geocache_id: stale.id,
                        point: Point::new(stale.lat, stale.lng),
                        text: None,
                        image_id: None,
                    },
                )
                .await
        }
    });

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!checkin.is_finished());

    txn.commit().await?;

    let result = checkin.await.unwrap();
    assert!(matches!(
        result,
        Err(Error::GameError(GameError::NotFound(Resource::Geocache)))
    ));

    Ok(())
}

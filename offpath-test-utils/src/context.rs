//! Test context structure and utilities.
//!
//! This module provides the `TestContext` returned by `TestBuilder`. The context owns an
//! in-memory SQLite database, a memory-backed session and the instant the test clock is
//! pinned to.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};
use tower_sessions::{MemoryStore, Session};

use crate::{clock::FixedClock, error::TestError};

/// Test context structure returned by `TestBuilder`
///
/// ```ignore
/// let test = TestBuilder::new().with_game_tables().build().await?;
///
/// let user = test.user().insert_user("a@example.com").await?;
/// let geocache = test.geocache().insert_geocache(user.id, test.now_naive()).await?;
/// ```
pub struct TestContext {
    /// Database connection to in-memory SQLite database
    pub db: DatabaseConnection,
    /// Session store for authentication flows
    pub session: Session,
    /// Instant the test clock reports
    pub now: DateTime<Utc>,
}

impl TestContext {
    /// Create a new test context with an empty database.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context
    /// - `Err(TestError::DbErr)` - Database connection failed
    pub(crate) async fn new(now: DateTime<Utc>) -> Result<Self, TestError> {
        let store = Arc::new(MemoryStore::default());
        let session = Session::new(None, store, None);

        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestContext { db, session, now })
    }

    /// Create database tables from schema statements.
    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Clock pinned to [`TestContext::now`].
    pub fn clock(&self) -> Arc<FixedClock> {
        Arc::new(FixedClock(self.now))
    }

    /// Current test instant as stored in timestamp columns.
    pub fn now_naive(&self) -> NaiveDateTime {
        self.now.naive_utc()
    }

    /// Stored timestamp for the same time of day `days` calendar days before now.
    pub fn days_ago(&self, days: i64) -> NaiveDateTime {
        (self.now - Duration::days(days)).naive_utc()
    }
}

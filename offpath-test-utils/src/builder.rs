//! Declarative test builder.
//!
//! The builder queues table creation and fixture rows, all of which run during `build()`.

use chrono::{DateTime, Utc};
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{clock::FixedClock, error::TestError, TestContext};

/// Builder for declarative test initialization.
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_game_tables: bool,
    users: Vec<String>,
    now: DateTime<Utc>,
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBuilder {
    /// Create a new TestBuilder with no tables and the clock at [`FixedClock::default_instant`].
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_game_tables: false,
            users: Vec::new(),
            now: FixedClock::default_instant(),
        }
    }

    /// Add every table used by the game: user, image, geocache and checkin.
    pub fn with_game_tables(mut self) -> Self {
        self.include_game_tables = true;
        self
    }

    /// Add a single entity table to the test database.
    ///
    /// ```no_run
    /// use offpath_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), offpath_test_utils::TestError> {
    /// let test = TestBuilder::new().with_table(User).build().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert a user with the provided email during `build()`.
    pub fn with_user(mut self, email: &str) -> Self {
        self.users.push(email.to_string());
        self
    }

    /// Pin the test clock to `now`.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Build the test context, creating tables then inserting queued fixtures.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Ready test environment
    /// - `Err(TestError::DbErr)` - Table creation or fixture insertion failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let test = TestContext::new(self.now).await?;

        let mut all_tables = Vec::new();

        if self.include_game_tables {
            // Parents before children so foreign keys resolve
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::User),
                schema.create_table_from_entity(entity::prelude::Image),
                schema.create_table_from_entity(entity::prelude::Geocache),
                schema.create_table_from_entity(entity::prelude::Checkin),
            ]);
        }

        all_tables.extend(self.tables);
        test.with_tables(all_tables).await?;

        for email in self.users {
            test.user().insert_user(&email).await?;
        }

        Ok(test)
    }
}

//! Shared test harness for the offpath workspace.
//!
//! Tests build an isolated environment with [`TestBuilder`], then use the returned
//! [`TestContext`] for its in-memory database, session and pinned clock, inserting rows
//! through the fixture helpers (`test.user()`, `test.geocache()`, ...).

pub mod builder;
pub mod clock;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;

pub use builder::TestBuilder;
pub use clock::FixedClock;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{FixedClock, TestBuilder, TestContext, TestError};
}

//! Database fixture helpers.
//!
//! Each submodule adds an accessor on [`TestContext`](crate::TestContext) returning a fixture
//! struct whose methods insert rows directly through the entity crate, bypassing services.

pub mod checkin;
pub mod geocache;
pub mod image;
pub mod user;

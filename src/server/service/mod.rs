//! Service layer for game rules and account workflows.
//!
//! Services own transaction boundaries and translate repository results into game outcomes.
//! Each one receives the [`GameConfig`](crate::server::config::GameConfig) and a
//! [`Calendar`](crate::server::util::time::Calendar) explicitly through its constructor.

pub mod checkin;
pub mod export;
pub mod geocache;
pub mod image;
pub mod stats;
pub mod user;

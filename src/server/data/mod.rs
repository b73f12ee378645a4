//! Data access layer repositories.
//!
//! One repository per table. Each is generic over [`sea_orm::ConnectionTrait`] so the same
//! queries run against the pool or inside a transaction opened by a service.

pub mod checkin;
pub mod geocache;
pub mod image;
pub mod user;

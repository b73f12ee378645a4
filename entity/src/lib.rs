//! SeaORM entities for the offpath database schema.

pub mod prelude;

pub mod checkin;
pub mod geocache;
pub mod image;
pub mod user;

//! Request and response bodies of the HTTP API.

pub mod api;
pub mod checkin;
pub mod geocache;
pub mod image;
pub mod stats;
pub mod user;

//! HTTP controller endpoints for the offpath web API.
//!
//! Axum handlers for accounts, geocaches, check-ins, image uploads and stats. Controllers
//! resolve the player from the session, hand the request to a service and map the result to a
//! DTO. Every handler is annotated for the OpenAPI document built in the router.

pub mod checkin;
pub mod geocache;
pub mod image;
pub mod stats;
pub mod user;
pub mod util;

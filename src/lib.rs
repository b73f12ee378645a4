//! offpath: a location-based geocaching game backend.
//!
//! Players are handed generated geocaches a short walk from where they stand, check in when they
//! arrive within range, and build daily streaks. [`server`] holds the game services and the
//! HTTP API; [`model`] holds the request and response bodies of that API.

pub mod model;
pub mod server;

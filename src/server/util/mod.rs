//! Utility functions and helpers for server operations.
//!
//! This module provides the geodesic math used by geocache generation and check-in admission,
//! the calendar used for every date-granular decision (geocache expiry, streaks), and password
//! hashing for accounts.

pub mod geo;
pub mod password;
pub mod time;

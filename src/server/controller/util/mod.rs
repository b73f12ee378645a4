//! Utility functions for controller request handling.
//!
//! Session lookup shared by every endpoint that requires a logged-in player.

pub mod get_user;

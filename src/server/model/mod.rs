//! Server application models.
//!
//! Application state shared by every handler, and the typed wrappers around values kept in the
//! player's session.

pub mod app;
pub mod session;

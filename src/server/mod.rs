//! Server application core modules.
//!
//! This module contains all server-side functionality for offpath: configuration, the
//! repositories over the game tables, the game services (geocache generation and lifecycle,
//! check-in admission, streaks, accounts and image uploads), the HTTP controllers and router,
//! and the startup helpers that connect the database and session store.

#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;

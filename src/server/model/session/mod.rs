//! Session data models and utilities.
//!
//! Type-safe wrappers for session data storage and retrieval using tower-sessions. The session
//! store is Redis-backed in production and memory-backed in tests.

pub mod user;

//! Tests for HTTP controller endpoints.
//!
//! Handlers are called directly with an in-memory database and session, verifying status codes,
//! response bodies and session effects for every API endpoint.

mod checkin;
mod geocache;
mod image;
mod stats;
mod user;

use offpath_test_utils::prelude::*;

use crate::util::{json_body, TestContextExt};

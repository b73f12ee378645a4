//! Helpers for calling controllers directly with a test context.

use std::{path::Path, sync::Arc};

use axum::{body::to_bytes, response::Response};
use offpath::server::{config::GameConfig, model::app::AppState};
use offpath_test_utils::TestContext;
use serde::de::DeserializeOwned;

/// Extension trait for TestContext to create AppState
pub trait TestContextExt {
    /// State with default game rules, storing uploads in the system temp directory
    fn into_app_state(&self) -> AppState;

    /// State with the given game rules and upload directory
    fn into_app_state_with(&self, game: GameConfig, upload_directory: &Path) -> AppState;
}

impl TestContextExt for TestContext {
    fn into_app_state(&self) -> AppState {
        self.into_app_state_with(GameConfig::default(), &std::env::temp_dir())
    }

    fn into_app_state_with(&self, game: GameConfig, upload_directory: &Path) -> AppState {
        AppState {
            db: self.db.clone(),
            clock: self.clock(),
            game: Arc::new(game),
            upload_directory: Arc::new(upload_directory.to_path_buf()),
        }
    }
}

/// Reads a JSON response body
pub async fn json_body<T: DeserializeOwned>(resp: Response) -> T {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();

    serde_json::from_slice(&bytes).unwrap()
}

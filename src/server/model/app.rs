use std::{path::PathBuf, sync::Arc};

use sea_orm::DatabaseConnection;

use crate::server::{
    config::GameConfig,
    util::time::{Calendar, SharedClock},
};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub clock: SharedClock,
    pub game: Arc<GameConfig>,
    pub upload_directory: Arc<PathBuf>,
}

impl AppState {
    /// Calendar in the configured zone, reading the shared clock
    pub fn calendar(&self) -> Calendar {
        Calendar::new(self.clock.clone(), self.game.calendar_zone)
    }
}

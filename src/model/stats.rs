use serde::{Deserialize, Serialize};

use crate::server::service::stats::{GlobalStats, UserStats};

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserStatsDto {
    pub num_checkins: u64,
    /// Consecutive days with a check-in, ending today or yesterday
    pub current_streak: u32,
    pub longest_streak: u32,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct GlobalStatsDto {
    pub num_checkins: u64,
    pub num_players: u64,
}

impl From<UserStats> for UserStatsDto {
    fn from(stats: UserStats) -> Self {
        Self {
            num_checkins: stats.num_checkins,
            current_streak: stats.current_streak,
            longest_streak: stats.longest_streak,
        }
    }
}

impl From<GlobalStats> for GlobalStatsDto {
    fn from(stats: GlobalStats) -> Self {
        Self {
            num_checkins: stats.num_checkins,
            num_players: stats.num_players,
        }
    }
}

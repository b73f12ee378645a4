//! Streak and aggregate statistics.
//!
//! Streaks are computed over calendar dates in the configured zone. The pure functions
//! [`current_streak`] and [`longest_streak`] take dates ordered newest first, matching the order
//! check-ins are loaded in.

use std::collections::HashSet;

use chrono::{Days, NaiveDate};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{checkin::CheckinRepository, user::UserRepository},
    error::Error,
    util::time::Calendar,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserStats {
    pub num_checkins: u64,
    pub current_streak: u32,
    pub longest_streak: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalStats {
    pub num_checkins: u64,
    /// Users with the active flag set
    pub num_players: u64,
}

pub struct StatsService<'a> {
    db: &'a DatabaseConnection,
    calendar: Calendar,
}

impl<'a> StatsService<'a> {
    /// Creates a new instance of [`StatsService`]
    pub fn new(db: &'a DatabaseConnection, calendar: Calendar) -> Self {
        Self { db, calendar }
    }

    pub async fn compute_stats(&self, user_id: i32) -> Result<UserStats, Error> {
        let checkins = CheckinRepository::new(self.db).get_by_user(user_id).await?;

        let dates: Vec<NaiveDate> = checkins
            .iter()
            .map(|checkin| self.calendar.date_of(checkin.created_at))
            .collect();

        Ok(UserStats {
            num_checkins: checkins.len() as u64,
            current_streak: current_streak(self.calendar.today(), &dates),
            longest_streak: longest_streak(&dates),
        })
    }

    pub async fn global_stats(&self) -> Result<GlobalStats, Error> {
        Ok(GlobalStats {
            num_checkins: CheckinRepository::new(self.db).count_all().await?,
            num_players: UserRepository::new(self.db).count_active().await?,
        })
    }
}

/// Consecutive days with a check-in, walking back from `today`
///
/// Today contributes one day when present, but its absence does not end the streak: the walk
/// always continues from yesterday.
pub fn current_streak(today: NaiveDate, dates: &[NaiveDate]) -> u32 {
    let days: HashSet<NaiveDate> = dates.iter().copied().collect();

    let mut streak = u32::from(days.contains(&today));
    let mut day = today.checked_sub_days(Days::new(1));

    while let Some(d) = day.filter(|d| days.contains(d)) {
        streak += 1;
        day = d.checked_sub_days(Days::new(1));
    }

    streak
}

/// Longest run of consecutive check-in days
///
/// `dates` must be ordered newest first. Several check-ins on one day count once.
pub fn longest_streak(dates: &[NaiveDate]) -> u32 {
    if dates.is_empty() {
        return 0;
    }

    let mut longest = 0;
    let mut run = 1;

    for pair in dates.windows(2) {
        match (pair[0] - pair[1]).num_days() {
            0 => {}
            1 => run += 1,
            _ => {
                longest = longest.max(run);
                run = 1;
            }
        }
    }

    longest.max(run)
}

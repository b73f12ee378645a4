//! Calendar date calculations.
//!
//! Geocache expiry and streaks are decided by calendar date rather than elapsed time. The
//! [`Calendar`] pins every "today" decision to one configured zone so that the date of a row's
//! creation and the current date are always derived the same way. Timestamps are stored as
//! naive UTC; the calendar converts them into the configured zone when a date is needed.

use std::{fmt, str::FromStr, sync::Arc};

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use mockable::Clock;

use crate::server::error::Error;

/// Shared clock handle injected into services.
pub type SharedClock = Arc<dyn Clock + Send + Sync>;

/// Zone whose calendar determines which day a timestamp falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarZone {
    #[default]
    Utc,
    Local,
}

impl FromStr for CalendarZone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utc" => Ok(Self::Utc),
            "local" => Ok(Self::Local),
            other => Err(format!("expected `utc` or `local`, got `{}`", other)),
        }
    }
}

impl fmt::Display for CalendarZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utc => f.write_str("utc"),
            Self::Local => f.write_str("local"),
        }
    }
}

/// Clock paired with the zone used for calendar dates.
#[derive(Clone)]
pub struct Calendar {
    clock: SharedClock,
    zone: CalendarZone,
}

impl Calendar {
    /// Creates a new calendar reading time from `clock` and dating it in `zone`.
    pub fn new(clock: SharedClock, zone: CalendarZone) -> Self {
        Self { clock, zone }
    }

    /// Current UTC timestamp as stored on new rows.
    pub fn now(&self) -> NaiveDateTime {
        self.clock.utc().naive_utc()
    }

    /// Current calendar date in the configured zone.
    pub fn today(&self) -> NaiveDate {
        match self.zone {
            CalendarZone::Utc => self.clock.utc().date_naive(),
            CalendarZone::Local => self.clock.local().date_naive(),
        }
    }

    /// Calendar date of a stored UTC timestamp in the configured zone.
    pub fn date_of(&self, timestamp: NaiveDateTime) -> NaiveDate {
        match self.zone {
            CalendarZone::Utc => timestamp.date(),
            CalendarZone::Local => Utc
                .from_utc_datetime(&timestamp)
                .with_timezone(&Local)
                .date_naive(),
        }
    }

    /// Half-open UTC range `[start, end)` covering `date` in the configured zone.
    ///
    /// Used to filter rows by calendar date directly in the database.
    ///
    /// # Returns
    /// - `Ok((start, end))` - UTC timestamps of the day's first instant and the next day's
    /// - `Err(Error::InternalError)` - `date` is the last representable date, or local midnight
    ///   does not exist in the configured zone
    pub fn day_bounds(&self, date: NaiveDate) -> Result<(NaiveDateTime, NaiveDateTime), Error> {
        let next = date.succ_opt().ok_or_else(|| {
            Error::InternalError(format!("No calendar date follows {}", date))
        })?;

        Ok((self.start_of(date)?, self.start_of(next)?))
    }

    fn start_of(&self, date: NaiveDate) -> Result<NaiveDateTime, Error> {
        let midnight = date.and_time(NaiveTime::MIN);

        match self.zone {
            CalendarZone::Utc => Ok(midnight),
            CalendarZone::Local => Local
                .from_local_datetime(&midnight)
                .earliest()
                .map(|start| start.naive_utc())
                .ok_or_else(|| {
                    Error::InternalError(format!(
                        "Local midnight for {} cannot be represented in the server time zone",
                        date
                    ))
                }),
        }
    }
}

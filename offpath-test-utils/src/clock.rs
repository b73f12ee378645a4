use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

/// Clock pinned to a single instant.
///
/// Every service takes its time from an injected clock, so tests pin "now" here rather than
/// racing the wall clock around midnight.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Midday UTC on 2024-06-15, far enough from midnight that nearby offsets stay on the same day.
    pub fn default_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self(Self::default_instant())
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

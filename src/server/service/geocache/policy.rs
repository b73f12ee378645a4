//! Rules deciding which geocache is active and whether it may still be checked into.

use chrono::NaiveDateTime;

use crate::server::{
    error::Error,
    util::{
        geo::{self, Point},
        time::Calendar,
    },
};

/// Strategy selecting the active geocache, chosen once per deployment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeocachePolicy {
    /// A geocache is active only on the calendar day it was created and until it is checked
    /// into. Every request for a target generates a fresh one.
    DateScoped,
    /// Any unconsumed geocache stays active regardless of age. A request for a target reuses
    /// the newest unconsumed geocache lying within the band from the requester, and only
    /// generates a new one when none does.
    DistanceScopedReuse {
        min_distance_m: f64,
        max_distance_m: f64,
    },
}

impl GeocachePolicy {
    /// Creation range an active geocache must fall within, `None` when age is irrelevant.
    pub fn active_window(
        &self,
        calendar: &Calendar,
    ) -> Result<Option<(NaiveDateTime, NaiveDateTime)>, Error> {
        match self {
            Self::DateScoped => Ok(Some(calendar.day_bounds(calendar.today())?)),
            Self::DistanceScopedReuse { .. } => Ok(None),
        }
    }

    /// Whether a geocache created at `created_at` still accepts check-ins.
    pub fn is_checkinable(&self, created_at: NaiveDateTime, calendar: &Calendar) -> bool {
        match self {
            Self::DateScoped => calendar.date_of(created_at) == calendar.today(),
            Self::DistanceScopedReuse { .. } => true,
        }
    }

    /// Picks the first candidate to hand out again instead of generating a new target.
    ///
    /// `candidates` must be the user's unconsumed geocaches ordered newest first.
    pub fn reuse_candidate<'m>(
        &self,
        candidates: &'m [entity::geocache::Model],
        origin: Point,
    ) -> Option<&'m entity::geocache::Model> {
        match self {
            Self::DateScoped => None,
            Self::DistanceScopedReuse {
                min_distance_m,
                max_distance_m,
            } => candidates.iter().find(|geocache| {
                let distance = geo::distance(origin, Point::new(geocache.lat, geocache.lng));

                distance >= *min_distance_m && distance <= *max_distance_m
            }),
        }
    }
}

use rand::Rng;

use crate::server::{
    config::GeocacheConfig,
    util::geo::{self, Point},
};

/// A projected target before it is persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    /// Whole degrees in `1..=360`
    pub bearing: u32,
    /// Whole metres within the configured band
    pub distance_m: u32,
    pub point: Point,
}

/// Projects new geocache targets at a random bearing and distance from an origin.
///
/// The random source is supplied by the caller so tests can seed it.
pub struct GeocacheGenerator<R: Rng> {
    rng: R,
    min_distance_m: u32,
    max_distance_m: u32,
}

impl<R: Rng> GeocacheGenerator<R> {
    /// Creates a generator drawing distances from `[min_distance_m, max_distance_m]`.
    ///
    /// Bounds given in the wrong order are swapped.
    pub fn new(rng: R, min_distance_m: u32, max_distance_m: u32) -> Self {
        Self {
            rng,
            min_distance_m: min_distance_m.min(max_distance_m),
            max_distance_m: min_distance_m.max(max_distance_m),
        }
    }

    pub fn from_config(rng: R, config: &GeocacheConfig) -> Self {
        Self::new(
            rng,
            config.target_min_distance_m,
            config.target_max_distance_m,
        )
    }

    /// Draws the next target around `origin`.
    pub fn next_target(&mut self, origin: Point) -> Target {
        let bearing = self.rng.random_range(1..=360);
        let distance_m = self
            .rng
            .random_range(self.min_distance_m..=self.max_distance_m);

        Target {
            bearing,
            distance_m,
            point: geo::project(origin, f64::from(bearing), f64::from(distance_m)),
        }
    }
}

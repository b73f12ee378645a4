//! Geocache generation and lifecycle.
//!
//! A user holds at most one unconsumed geocache at a time: whenever a new target is generated,
//! every earlier geocache of theirs that was never checked into is purged in the same
//! transaction. Checked-in geocaches are kept as history. Which geocache counts as active, and
//! whether an existing one is handed out again, is decided by the configured
//! [`GeocachePolicy`](policy::GeocachePolicy).

pub mod generator;
pub mod policy;


use rand::Rng;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::server::{
    config::GameConfig,
    data::{geocache::GeocacheRepository, user::UserRepository},
    error::{
        game::{GameError, Resource},
        Error,
    },
    service::geocache::generator::GeocacheGenerator,
    util::{geo::Point, time::Calendar},
};

pub struct GeocacheService<'a, R: Rng> {
    db: &'a DatabaseConnection,
    config: &'a GameConfig,
    calendar: Calendar,
    generator: GeocacheGenerator<R>,
}

impl<'a, R: Rng> GeocacheService<'a, R> {
    /// Creates a new instance of [`GeocacheService`] drawing targets from `rng`
    pub fn new(
        db: &'a DatabaseConnection,
        config: &'a GameConfig,
        calendar: Calendar,
        rng: R,
    ) -> Self {
        Self {
            db,
            config,
            calendar,
            generator: GeocacheGenerator::from_config(rng, &config.geocache),
        }
    }

    /// Gets the user's active geocache
    ///
    /// The newest geocache without a check-in is returned, restricted to geocaches created
    /// today when the policy is date scoped.
    ///
    /// # Returns
    /// - `Ok(Model)` - The active geocache
    /// - `Err(GameError::NotFound)` - No geocache is active for the user
    pub async fn get_active(&self, user_id: i32) -> Result<entity::geocache::Model, Error> {
        let window = self.config.geocache.policy.active_window(&self.calendar)?;

        GeocacheRepository::new(self.db)
            .get_unconsumed_by_user(user_id, window)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| GameError::NotFound(Resource::Geocache).into())
    }

    /// Generates a new geocache around `origin` and purges the user's other unconsumed geocaches
    ///
    /// # Returns
    /// - `Ok(Model)` - The newly generated geocache
    /// - `Err(GameError::InvalidInput)` - `origin` is not a valid coordinate
    /// - `Err(GameError::NotFound)` - The user does not exist
    pub async fn generate(
        &mut self,
        user_id: i32,
        origin: Point,
    ) -> Result<entity::geocache::Model, Error> {
        require_valid_point(origin)?;

        let txn = self.db.begin().await?;
        lock_player(&txn, user_id).await?;

        let geocache = self.generate_in(&txn, user_id, origin).await?;

        txn.commit().await?;

        Ok(geocache)
    }

    /// Hands the user a geocache to walk to from `origin`
    ///
    /// Under the date scoped policy this always generates a new target. Under distance scoped
    /// reuse the newest unconsumed geocache within the reuse band is returned unchanged, and a
    /// new one is generated only when none qualifies.
    pub async fn request_geocache(
        &mut self,
        user_id: i32,
        origin: Point,
    ) -> Result<entity::geocache::Model, Error> {
        require_valid_point(origin)?;

        let policy = self.config.geocache.policy;

        let txn = self.db.begin().await?;
        lock_player(&txn, user_id).await?;

        let candidates = GeocacheRepository::new(&txn)
            .get_unconsumed_by_user(user_id, None)
            .await?;

        if let Some(geocache) = policy.reuse_candidate(&candidates, origin) {
            let geocache = geocache.clone();
            txn.commit().await?;

            tracing::debug!(
                user_id = %user_id,
                geocache_id = %geocache.id,
                "Reusing unconsumed geocache"
            );

            return Ok(geocache);
        }

        let geocache = self.generate_in(&txn, user_id, origin).await?;

        txn.commit().await?;

        Ok(geocache)
    }

    async fn generate_in<C: ConnectionTrait>(
        &mut self,
        db: &C,
        user_id: i32,
        origin: Point,
    ) -> Result<entity::geocache::Model, Error> {
        let target = self.generator.next_target(origin);

        let geocache = GeocacheRepository::new(db)
            .create(user_id, target.point, self.calendar.now())
            .await?;

        let purged = purge_unconsumed(db, user_id, geocache.id).await?;

        tracing::info!(
            user_id = %user_id,
            geocache_id = %geocache.id,
            bearing = %target.bearing,
            distance_m = %target.distance_m,
            purged = %purged,
            "Generated geocache"
        );

        Ok(geocache)
    }
}

/// Deletes every geocache of the user that has no check-in, except `keep_id`
///
/// # Returns
/// - `Ok(u64)` - Number of geocaches deleted
pub async fn purge_unconsumed<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    keep_id: i32,
) -> Result<u64, Error> {
    let result = GeocacheRepository::new(db)
        .delete_unconsumed_by_user(user_id, Some(keep_id))
        .await?;

    Ok(result.rows_affected)
}

/// Takes the per-user write lock for the rest of the transaction
pub(crate) async fn lock_player<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<(), Error> {
    match UserRepository::new(db).lock(user_id).await? {
        Some(_) => Ok(()),
        None => Err(GameError::NotFound(Resource::User).into()),
    }
}

pub(crate) fn require_valid_point(point: Point) -> Result<Point, GameError> {
    if point.is_valid() {
        Ok(point)
    } else {
        Err(GameError::InvalidInput(format!(
            "({}, {}) is not a valid latitude/longitude",
            point.lat, point.lng
        )))
    }
}

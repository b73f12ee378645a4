//! Check-in admission and editing.
//!
//! A check-in is admitted only while its geocache is still checkinable under the configured
//! policy and the submitted position lies within `CHECKIN_MAX_DISTANCE_M` of the target. The
//! distance is measured once, at admission, and stored with the check-in.

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::server::{
    config::GameConfig,
    data::{
        checkin::{CheckinRepository, NewCheckin},
        geocache::GeocacheRepository,
        image::ImageRepository,
        user::UserRepository,
    },
    error::{
        game::{GameError, Resource},
        Error,
    },
    service::{
        geocache::require_valid_point,
        image::ImageStatus,
    },
    util::{
        geo::{self, Point},
        time::Calendar,
    },
};

/// Longest accepted check-in text, in characters
pub const MAX_CHECKIN_TEXT_LEN: usize = 140;

/// A proposed check-in
#[derive(Debug, Clone)]
pub struct CreateCheckin {
    pub geocache_id: i32,
    pub point: Point,
    pub text: Option<String>,
    pub image_id: Option<i32>,
}

/// Change to the image attached to a check-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageUpdate {
    #[default]
    Keep,
    Detach,
    Attach(i32),
}

/// Edit of an existing check-in
///
/// `text` always replaces the stored text; `None` clears it.
#[derive(Debug, Clone, Default)]
pub struct UpdateCheckin {
    pub text: Option<String>,
    pub image: ImageUpdate,
}

/// One page of a user's check-ins, newest first
#[derive(Debug, Clone, PartialEq)]
pub struct CheckinPage {
    pub items: Vec<entity::checkin::Model>,
    /// One-based page number
    pub page: u64,
    pub has_next: bool,
}

pub struct CheckinService<'a> {
    db: &'a DatabaseConnection,
    config: &'a GameConfig,
    calendar: Calendar,
}

impl<'a> CheckinService<'a> {
    /// Creates a new instance of [`CheckinService`]
    pub fn new(db: &'a DatabaseConnection, config: &'a GameConfig, calendar: Calendar) -> Self {
        Self {
            db,
            config,
            calendar,
        }
    }

    /// Admits and records a check-in
    ///
    /// Validation short-circuits in order: input shape, geocache existence, expiry, distance,
    /// optional repeat rejection, then image ownership. The whole sequence runs in one
    /// transaction holding the geocache owner's lock, so it cannot interleave with a purge of
    /// that owner's geocaches.
    ///
    /// # Returns
    /// - `Ok(Model)` - The recorded check-in
    /// - `Err(GameError::InvalidInput)` - Invalid coordinates or text too long
    /// - `Err(GameError::NotFound)` - Geocache or image missing, or image upload unfinished
    /// - `Err(GameError::Expired)` - Geocache no longer accepts check-ins
    /// - `Err(GameError::TooFar)` - Submitted position is beyond the admissible distance
    /// - `Err(GameError::AlreadyCheckedIn)` - Repeat check-in while repeats are rejected
    /// - `Err(GameError::Unauthorized)` - Image belongs to another user
    pub async fn create_checkin(
        &self,
        user_id: i32,
        checkin: CreateCheckin,
    ) -> Result<entity::checkin::Model, Error> {
        let point = require_valid_point(checkin.point)?;
        let text = validate_text(checkin.text)?;

        let txn = self.db.begin().await?;

        let geocache = self.find_locked_geocache(&txn, checkin.geocache_id).await?;

        if !self
            .config
            .geocache
            .policy
            .is_checkinable(geocache.created_at, &self.calendar)
        {
            return Err(GameError::Expired.into());
        }

        let final_distance = geo::distance(point, Point::new(geocache.lat, geocache.lng));
        let max_distance = self.config.checkin.max_distance_m;

        if final_distance > max_distance {
            return Err(GameError::TooFar {
                distance: final_distance,
                max_distance,
            }
            .into());
        }

        let checkin_repo = CheckinRepository::new(&txn);

        if self.config.checkin.reject_repeat
            && checkin_repo
                .exists_for_user_geocache(user_id, geocache.id)
                .await?
        {
            return Err(GameError::AlreadyCheckedIn(geocache.id).into());
        }

        if let Some(image_id) = checkin.image_id {
            require_usable_image(&txn, user_id, image_id).await?;
        }

        let created = checkin_repo
            .create(NewCheckin {
                user_id,
                geocache_id: geocache.id,
                image_id: checkin.image_id,
                text,
                point,
                final_distance,
                created_at: self.calendar.now(),
            })
            .await?;

        txn.commit().await?;

        tracing::info!(
            user_id = %user_id,
            checkin_id = %created.id,
            geocache_id = %geocache.id,
            final_distance = %final_distance,
            "Recorded check-in"
        );

        Ok(created)
    }

    /// Edits the text and image of a check-in owned by `requester_id`
    ///
    /// Nothing is written unless every check passes.
    ///
    /// # Returns
    /// - `Ok(Model)` - The updated check-in
    /// - `Err(GameError::NotFound)` - Check-in or image missing, or image upload unfinished
    /// - `Err(GameError::Unauthorized)` - Check-in or image belongs to another user
    /// - `Err(GameError::InvalidInput)` - Text too long
    pub async fn update_checkin(
        &self,
        checkin_id: i32,
        requester_id: i32,
        update: UpdateCheckin,
    ) -> Result<entity::checkin::Model, Error> {
        let text = validate_text(update.text)?;

        let txn = self.db.begin().await?;
        let checkin_repo = CheckinRepository::new(&txn);

        let checkin = checkin_repo
            .get(checkin_id)
            .await?
            .ok_or(GameError::NotFound(Resource::Checkin))?;

        if checkin.user_id != requester_id {
            return Err(GameError::Unauthorized(Resource::Checkin).into());
        }

        let image_id = match update.image {
            ImageUpdate::Keep => checkin.image_id,
            ImageUpdate::Detach => None,
            ImageUpdate::Attach(image_id) => {
                require_usable_image(&txn, requester_id, image_id).await?;
                Some(image_id)
            }
        };

        let updated = checkin_repo.update(checkin, text, image_id).await?;

        txn.commit().await?;

        Ok(updated)
    }

    /// Gets a check-in owned by `user_id`
    pub async fn get_checkin(
        &self,
        user_id: i32,
        checkin_id: i32,
    ) -> Result<entity::checkin::Model, Error> {
        let checkin = CheckinRepository::new(self.db)
            .get(checkin_id)
            .await?
            .ok_or(GameError::NotFound(Resource::Checkin))?;

        if checkin.user_id != user_id {
            return Err(GameError::Unauthorized(Resource::Checkin).into());
        }

        Ok(checkin)
    }

    /// Gets all of the user's check-ins, newest first
    pub async fn list_checkins(&self, user_id: i32) -> Result<Vec<entity::checkin::Model>, Error> {
        Ok(CheckinRepository::new(self.db).get_by_user(user_id).await?)
    }

    /// Gets one page of the user's check-ins
    ///
    /// # Arguments
    /// - `page` - One-based page number, page size is `POSTS_PER_PAGE`
    pub async fn list_checkins_paginated(
        &self,
        user_id: i32,
        page: u64,
    ) -> Result<CheckinPage, Error> {
        if page == 0 {
            return Err(GameError::InvalidInput("Pages are numbered from 1".to_string()).into());
        }

        let per_page = self.config.posts_per_page.max(1);
        let (items, has_next) = CheckinRepository::new(self.db)
            .get_page_by_user(user_id, page - 1, per_page)
            .await?;

        Ok(CheckinPage {
            items,
            page,
            has_next,
        })
    }

    /// Resolves the geocache and locks its owner, re-reading it once the lock is held
    async fn find_locked_geocache<C: ConnectionTrait>(
        &self,
        db: &C,
        geocache_id: i32,
    ) -> Result<entity::geocache::Model, Error> {
        let geocache_repo = GeocacheRepository::new(db);

        let geocache = geocache_repo
            .get(geocache_id)
            .await?
            .ok_or(GameError::NotFound(Resource::Geocache))?;

        // Ownerless geocaches are never purged. A missing owner means the account was deleted
        // while we waited, so the re-read below decides.
        if let Some(owner_id) = geocache.user_id {
            UserRepository::new(db).lock(owner_id).await?;
        }

        // A purge may have removed it while we waited for the lock
        Ok(geocache_repo
            .get(geocache_id)
            .await?
            .ok_or(GameError::NotFound(Resource::Geocache))?)
    }
}

fn validate_text(text: Option<String>) -> Result<String, GameError> {
    let text = text.unwrap_or_default();

    if text.chars().count() > MAX_CHECKIN_TEXT_LEN {
        return Err(GameError::InvalidInput(format!(
            "Check-in text must be at most {} characters",
            MAX_CHECKIN_TEXT_LEN
        )));
    }

    Ok(text)
}

/// Ensures the image exists, belongs to `user_id` and has finished uploading
async fn require_usable_image<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    image_id: i32,
) -> Result<(), Error> {
    let image = ImageRepository::new(db)
        .get(image_id)
        .await?
        .ok_or(GameError::NotFound(Resource::Image))?;

    if image.user_id != user_id {
        return Err(GameError::Unauthorized(Resource::Image).into());
    }

    match ImageStatus::of(&image) {
        ImageStatus::Ready => Ok(()),
        ImageStatus::Pending => Err(GameError::NotFound(Resource::Image).into()),
    }
}

//! Player accounts.
//!
//! Accounts are identified by email and authenticated with an Argon2id password hash. Deleting
//! an account removes the player's rows in one transaction. Geocaches other players have checked
//! in at survive without an owner. Files of deleted images are left for the caller to remove once
//! the transaction has committed.

use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        checkin::CheckinRepository, geocache::GeocacheRepository, image::ImageRepository,
        user::UserRepository,
    },
    error::{
        auth::AuthError,
        game::{GameError, Resource},
        Error,
    },
    service::{
        export::{build_archive, ExportArchive},
        geocache::lock_player,
    },
    util::{
        password::{hash_password, verify_password},
        time::Calendar,
    },
};

pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$";
pub const MIN_PASSWORD_LEN: usize = 10;
pub const MAX_PASSWORD_LEN: usize = 32;
pub const DEFAULT_ROLES: &str = "player";

/// Everything stored about a player, oldest rows first for geocaches and newest first for
/// check-ins.
#[derive(Debug, Clone)]
pub struct AccountExport {
    pub user: entity::user::Model,
    pub geocaches: Vec<entity::geocache::Model>,
    pub checkins: Vec<entity::checkin::Model>,
    pub images: Vec<entity::image::Model>,
}

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
    calendar: Calendar,
}

impl<'a> UserService<'a> {
    /// Creates a new instance of [`UserService`]
    pub fn new(db: &'a DatabaseConnection, calendar: Calendar) -> Self {
        Self { db, calendar }
    }

    /// Registers a new active player
    ///
    /// # Returns
    /// - `Ok(Model)` - The created user
    /// - `Err(AuthError::InvalidEmail)` - Email is not a plausible address
    /// - `Err(AuthError::InvalidPassword)` - Password length is out of range
    /// - `Err(AuthError::EmailTaken)` - An account already uses the email
    pub async fn register(
        &self,
        email: &str,
        password: &str,
    ) -> Result<entity::user::Model, Error> {
        let email = email.trim();

        validate_email(email)?;
        validate_password(password)?;

        let user_repo = UserRepository::new(self.db);

        if user_repo.find_by_email(email).await?.is_some() {
            return Err(AuthError::EmailTaken(email.to_string()).into());
        }

        let password_hash = hash_password(password)?;
        let user = user_repo
            .create(email, password_hash, DEFAULT_ROLES, self.calendar.now())
            .await?;

        tracing::info!(user_id = %user.id, "Registered user");

        Ok(user)
    }

    /// Authenticates a player by email and password
    ///
    /// Unknown emails, wrong passwords and deactivated accounts all fail the same way.
    pub async fn login(&self, email: &str, password: &str) -> Result<entity::user::Model, Error> {
        let Some(user) = UserRepository::new(self.db)
            .find_by_email(email.trim())
            .await?
        else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !user.is_active || !verify_password(password, &user.password)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(user)
    }

    pub async fn get(&self, user_id: i32) -> Result<entity::user::Model, Error> {
        UserRepository::new(self.db)
            .get(user_id)
            .await?
            .ok_or_else(|| GameError::NotFound(Resource::User).into())
    }

    /// Replaces the password after verifying the current one
    ///
    /// # Returns
    /// - `Ok(Model)` - The updated user
    /// - `Err(AuthError::InvalidCredentials)` - `old_password` does not match
    /// - `Err(AuthError::InvalidPassword)` - `new_password` length is out of range
    pub async fn change_password(
        &self,
        user_id: i32,
        old_password: &str,
        new_password: &str,
    ) -> Result<entity::user::Model, Error> {
        let user = self.get(user_id).await?;

        if !verify_password(old_password, &user.password)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        validate_password(new_password)?;

        let password_hash = hash_password(new_password)?;
        let user = UserRepository::new(self.db)
            .update_password(user, password_hash)
            .await?;

        tracing::info!(user_id = %user.id, "Changed password");

        Ok(user)
    }

    /// Deletes the account and the rows only it references
    ///
    /// The user's check-ins go first, then their images and unvisited geocaches. Geocaches that
    /// still carry another player's check-in are kept with their owner cleared, so those
    /// check-ins stay intact. The user row goes last.
    ///
    /// # Returns
    /// - `Ok(Vec<Model>)` - The deleted image rows, whose stored files are now orphaned
    /// - `Err(AuthError::InvalidCredentials)` - `password` does not match
    pub async fn delete_account(
        &self,
        user_id: i32,
        password: &str,
    ) -> Result<Vec<entity::image::Model>, Error> {
        let user = self.get(user_id).await?;

        if !verify_password(password, &user.password)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        let txn = self.db.begin().await?;
        lock_player(&txn, user_id).await?;

        let geocache_repo = GeocacheRepository::new(&txn);
        let image_repo = ImageRepository::new(&txn);

        let images = image_repo.get_by_user(user_id).await?;

        let checkins = CheckinRepository::new(&txn).delete_by_user(user_id).await?;
        image_repo.delete_by_user(user_id).await?;
        let geocaches = geocache_repo.delete_unconsumed_by_user(user_id, None).await?;
        let released = geocache_repo.release_by_user(user_id).await?;
        UserRepository::new(&txn).delete(user_id).await?;

        txn.commit().await?;

        tracing::info!(
            user_id = %user_id,
            checkins = %checkins.rows_affected,
            geocaches = %geocaches.rows_affected,
            released_geocaches = %released.rows_affected,
            images = %images.len(),
            "Deleted account"
        );

        Ok(images)
    }

    /// Collects every row owned by the user
    pub async fn export(&self, user_id: i32) -> Result<AccountExport, Error> {
        let user = self.get(user_id).await?;

        Ok(AccountExport {
            geocaches: GeocacheRepository::new(self.db).get_by_user(user_id).await?,
            checkins: CheckinRepository::new(self.db).get_by_user(user_id).await?,
            images: ImageRepository::new(self.db).get_by_user(user_id).await?,
            user,
        })
    }

    /// Packs [`Self::export`] and the user's stored image files into a zip archive
    pub async fn export_archive(&self, user_id: i32) -> Result<ExportArchive, Error> {
        let export = self.export(user_id).await?;

        build_archive(export).await
    }
}

static EMAIL_REGEX: Lazy<Result<Regex, regex::Error>> = Lazy::new(|| Regex::new(EMAIL_PATTERN));

fn validate_email(email: &str) -> Result<(), Error> {
    let pattern = EMAIL_REGEX
        .as_ref()
        .map_err(|e| Error::InternalError(e.to_string()))?;

    if pattern.is_match(email) {
        Ok(())
    } else {
        Err(AuthError::InvalidEmail.into())
    }
}

fn validate_password(password: &str) -> Result<(), AuthError> {
    let len = password.chars().count();

    if (MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len) {
        Ok(())
    } else {
        Err(AuthError::InvalidPassword {
            min: MIN_PASSWORD_LEN,
            max: MAX_PASSWORD_LEN,
        })
    }
}

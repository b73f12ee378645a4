//! Image uploads.
//!
//! An upload is recorded in two phases: a placeholder row is inserted first so the file can be
//! named after its id, then the file is written and the row updated with its location. A row
//! whose file was never written stays [`ImageStatus::Pending`] and cannot be attached to a
//! check-in.

use std::path::Path;

use sea_orm::DatabaseConnection;

use crate::server::{
    data::image::ImageRepository,
    error::{
        game::{GameError, Resource},
        Error,
    },
    util::time::Calendar,
};

/// Accepted file extensions, compared case-insensitively
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["jpeg", "jpg", "png"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageStatus {
    /// Row exists but the file has not been stored
    Pending,
    /// File is stored and the image may be referenced
    Ready,
}

impl ImageStatus {
    pub fn of(image: &entity::image::Model) -> Self {
        match image.filepath {
            Some(_) => Self::Ready,
            None => Self::Pending,
        }
    }
}

pub struct ImageService<'a> {
    db: &'a DatabaseConnection,
    upload_directory: &'a Path,
    calendar: Calendar,
}

impl<'a> ImageService<'a> {
    /// Creates a new instance of [`ImageService`] storing files in `upload_directory`
    pub fn new(db: &'a DatabaseConnection, upload_directory: &'a Path, calendar: Calendar) -> Self {
        Self {
            db,
            upload_directory,
            calendar,
        }
    }

    /// Stores an uploaded image for the user
    ///
    /// # Returns
    /// - `Ok(Model)` - Ready image with its stored filename
    /// - `Err(GameError::InvalidInput)` - Unsupported extension or empty file
    /// - `Err(Error::IoError)` - Writing the file failed, the row is left pending
    /// - `Err(Error::DbErr)` - Recording the file failed, the file is removed and the row is
    ///   left pending
    pub async fn upload(
        &self,
        user_id: i32,
        original_filename: &str,
        bytes: &[u8],
    ) -> Result<entity::image::Model, Error> {
        let extension = allowed_extension(original_filename)?;

        if bytes.is_empty() {
            return Err(GameError::InvalidInput("Uploaded file is empty".to_string()).into());
        }

        let image_repo = ImageRepository::new(self.db);
        let placeholder = image_repo
            .create_placeholder(user_id, self.calendar.now())
            .await?;

        let filename = format!("{}.{}", placeholder.id, extension);
        let filepath = self.upload_directory.join(&filename);

        if let Err(e) = tokio::fs::write(&filepath, bytes).await {
            tracing::warn!(
                user_id = %user_id,
                image_id = %placeholder.id,
                "Failed to store uploaded image: {}",
                e
            );

            return Err(e.into());
        }

        let image = match image_repo
            .set_file(
                placeholder,
                filepath.to_string_lossy().into_owned(),
                filename,
            )
            .await
        {
            Ok(image) => image,
            Err(e) => {
                // The row stays pending, so nothing can reference the file
                if let Err(remove_err) = tokio::fs::remove_file(&filepath).await {
                    tracing::warn!(
                        user_id = %user_id,
                        "Failed to remove unrecorded image file {}: {}",
                        filepath.display(),
                        remove_err
                    );
                }

                return Err(e.into());
            }
        };

        tracing::debug!(user_id = %user_id, image_id = %image.id, "Stored image");

        Ok(image)
    }

    /// Gets an image owned by `user_id`
    pub async fn get(&self, user_id: i32, image_id: i32) -> Result<entity::image::Model, Error> {
        let image = ImageRepository::new(self.db)
            .get(image_id)
            .await?
            .ok_or(GameError::NotFound(Resource::Image))?;

        if image.user_id != user_id {
            return Err(GameError::Unauthorized(Resource::Image).into());
        }

        Ok(image)
    }
}

fn allowed_extension(filename: &str) -> Result<String, GameError> {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(ext),
        _ => Err(GameError::InvalidInput(format!(
            "Only {} images can be uploaded",
            ALLOWED_EXTENSIONS.join(", ")
        ))),
    }
}

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::server::service::image::ImageStatus;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ImageStatusDto {
    Pending,
    Ready,
}

/// Multipart form accepted by the upload endpoint
#[derive(utoipa::ToSchema)]
pub struct ImageUploadDto {
    /// JPEG or PNG file
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ImageDto {
    pub id: i32,
    /// Stored file name, absent until the upload has been written
    pub filename: Option<String>,
    pub status: ImageStatusDto,
    pub created_at: NaiveDateTime,
}

impl From<entity::image::Model> for ImageDto {
    fn from(image: entity::image::Model) -> Self {
        let status = match ImageStatus::of(&image) {
            ImageStatus::Pending => ImageStatusDto::Pending,
            ImageStatus::Ready => ImageStatusDto::Ready,
        };

        Self {
            id: image.id,
            filename: image.filename,
            status,
            created_at: image.created_at,
        }
    }
}

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{
    model::geocache::LocationDto,
    server::service::checkin::{CheckinPage, CreateCheckin, ImageUpdate, UpdateCheckin},
};

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateCheckinDto {
    pub geocache_id: i32,
    /// Where the player is standing
    pub location: LocationDto,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub image_id: Option<i32>,
}

/// Replacement text and image for an existing check-in
///
/// An omitted `text` clears the text. An omitted `image_id` keeps the attached image while an
/// explicit `null` detaches it.
#[derive(Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateCheckinDto {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(
        default,
        with = "::serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<i32>)]
    pub image_id: Option<Option<i32>>,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CheckinDto {
    pub id: i32,
    pub geocache_id: i32,
    pub image_id: Option<i32>,
    pub text: String,
    pub lat: f64,
    pub lng: f64,
    /// Metres between the check-in and its geocache when it was recorded
    pub final_distance: f64,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CheckinPageDto {
    pub items: Vec<CheckinDto>,
    pub page: u64,
    pub has_next: bool,
}

#[derive(Clone, Serialize, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-based page number
    pub page: Option<u64>,
}

impl From<CreateCheckinDto> for CreateCheckin {
    fn from(dto: CreateCheckinDto) -> Self {
        Self {
            geocache_id: dto.geocache_id,
            point: dto.location.into(),
            text: dto.text,
            image_id: dto.image_id,
        }
    }
}

impl From<UpdateCheckinDto> for UpdateCheckin {
    fn from(dto: UpdateCheckinDto) -> Self {
        let image = match dto.image_id {
            None => ImageUpdate::Keep,
            Some(None) => ImageUpdate::Detach,
            Some(Some(image_id)) => ImageUpdate::Attach(image_id),
        };

        Self {
            text: dto.text,
            image,
        }
    }
}

impl From<entity::checkin::Model> for CheckinDto {
    fn from(checkin: entity::checkin::Model) -> Self {
        Self {
            id: checkin.id,
            geocache_id: checkin.geocache_id,
            image_id: checkin.image_id,
            text: checkin.text,
            lat: checkin.lat,
            lng: checkin.lng,
            final_distance: checkin.final_distance,
            created_at: checkin.created_at,
        }
    }
}

impl From<CheckinPage> for CheckinPageDto {
    fn from(page: CheckinPage) -> Self {
        Self {
            items: page.items.into_iter().map(Into::into).collect(),
            page: page.page,
            has_next: page.has_next,
        }
    }
}

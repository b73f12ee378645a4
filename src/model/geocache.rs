use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::server::util::geo::Point;

/// Latitude and longitude in decimal degrees
#[derive(Clone, Copy, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LocationDto {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct GeocacheDto {
    pub id: i32,
    pub lat: f64,
    pub lng: f64,
    pub created_at: NaiveDateTime,
}

impl From<LocationDto> for Point {
    fn from(location: LocationDto) -> Self {
        Point::new(location.lat, location.lng)
    }
}

impl From<entity::geocache::Model> for GeocacheDto {
    fn from(geocache: entity::geocache::Model) -> Self {
        Self {
            id: geocache.id,
            lat: geocache.lat,
            lng: geocache.lng,
            created_at: geocache.created_at,
        }
    }
}

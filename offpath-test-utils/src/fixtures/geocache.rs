use chrono::NaiveDateTime;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{
    constant::{TEST_LAT, TEST_LNG},
    error::TestError,
    TestContext,
};

impl TestContext {
    pub fn geocache<'a>(&'a self) -> GeocacheFixtures<'a> {
        GeocacheFixtures { test: self }
    }
}

pub struct GeocacheFixtures<'a> {
    test: &'a TestContext,
}

impl<'a> GeocacheFixtures<'a> {
    /// Insert a geocache at the default fixture location.
    pub async fn insert_geocache(
        &self,
        user_id: i32,
        created_at: NaiveDateTime,
    ) -> Result<entity::geocache::Model, TestError> {
        self.insert_geocache_at(user_id, TEST_LAT, TEST_LNG, created_at)
            .await
    }

    pub async fn insert_geocache_at(
        &self,
        user_id: i32,
        lat: f64,
        lng: f64,
        created_at: NaiveDateTime,
    ) -> Result<entity::geocache::Model, TestError> {
        Ok(entity::prelude::Geocache::insert(entity::geocache::ActiveModel {
            user_id: ActiveValue::Set(Some(user_id)),
            lat: ActiveValue::Set(lat),
            lng: ActiveValue::Set(lng),
            created_at: ActiveValue::Set(created_at),
            ..Default::default()
        })
        .exec_with_returning(&self.test.db)
        .await?)
    }
}

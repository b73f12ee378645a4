use chrono::NaiveDateTime;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{constant::TEST_CHECKIN_TEXT, error::TestError, TestContext};

impl TestContext {
    pub fn checkin<'a>(&'a self) -> CheckinFixtures<'a> {
        CheckinFixtures { test: self }
    }
}

pub struct CheckinFixtures<'a> {
    test: &'a TestContext,
}

impl<'a> CheckinFixtures<'a> {
    /// Insert a check-in standing exactly on the geocache.
    pub async fn insert_checkin(
        &self,
        user_id: i32,
        geocache: &entity::geocache::Model,
        created_at: NaiveDateTime,
    ) -> Result<entity::checkin::Model, TestError> {
        self.insert_checkin_with_image(user_id, geocache, None, created_at)
            .await
    }

    pub async fn insert_checkin_with_image(
        &self,
        user_id: i32,
        geocache: &entity::geocache::Model,
        image_id: Option<i32>,
        created_at: NaiveDateTime,
    ) -> Result<entity::checkin::Model, TestError> {
        Ok(entity::prelude::Checkin::insert(entity::checkin::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            geocache_id: ActiveValue::Set(geocache.id),
            image_id: ActiveValue::Set(image_id),
            text: ActiveValue::Set(TEST_CHECKIN_TEXT.to_string()),
            lat: ActiveValue::Set(geocache.lat),
            lng: ActiveValue::Set(geocache.lng),
            final_distance: ActiveValue::Set(0.0),
            created_at: ActiveValue::Set(created_at),
            ..Default::default()
        })
        .exec_with_returning(&self.test.db)
        .await?)
    }
}

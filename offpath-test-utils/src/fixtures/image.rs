use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn image<'a>(&'a self) -> ImageFixtures<'a> {
        ImageFixtures { test: self }
    }
}

pub struct ImageFixtures<'a> {
    test: &'a TestContext,
}

impl<'a> ImageFixtures<'a> {
    /// Insert an image row whose upload never completed.
    pub async fn insert_pending_image(
        &self,
        user_id: i32,
    ) -> Result<entity::image::Model, TestError> {
        self.insert(user_id, None).await
    }

    /// Insert an image row pointing at a stored file.
    pub async fn insert_ready_image(
        &self,
        user_id: i32,
    ) -> Result<entity::image::Model, TestError> {
        self.insert(user_id, Some("upload.png".to_string())).await
    }

    async fn insert(
        &self,
        user_id: i32,
        filename: Option<String>,
    ) -> Result<entity::image::Model, TestError> {
        Ok(entity::prelude::Image::insert(entity::image::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            filepath: ActiveValue::Set(filename.as_ref().map(|f| format!("uploads/{}", f))),
            filename: ActiveValue::Set(filename),
            created_at: ActiveValue::Set(self.test.now_naive()),
            ..Default::default()
        })
        .exec_with_returning(&self.test.db)
        .await?)
    }
}

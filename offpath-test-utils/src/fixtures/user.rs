use sea_orm::{ActiveValue, EntityTrait};

use crate::{constant::TEST_PASSWORD_PLACEHOLDER, error::TestError, TestContext};

impl TestContext {
    pub fn user<'a>(&'a self) -> UserFixtures<'a> {
        UserFixtures { test: self }
    }
}

pub struct UserFixtures<'a> {
    test: &'a TestContext,
}

impl<'a> UserFixtures<'a> {
    /// Insert an active player. The stored password is a placeholder, so logging in as this
    /// user always fails; register through the user service when credentials matter.
    pub async fn insert_user(&self, email: &str) -> Result<entity::user::Model, TestError> {
        Ok(entity::prelude::User::insert(entity::user::ActiveModel {
            email: ActiveValue::Set(email.to_string()),
            password: ActiveValue::Set(TEST_PASSWORD_PLACEHOLDER.to_string()),
            roles: ActiveValue::Set("player".to_string()),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(self.test.now_naive()),
            ..Default::default()
        })
        .exec_with_returning(&self.test.db)
        .await?)
    }
}

use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QuerySelect,
};

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new active user
    pub async fn create(
        &self,
        email: &str,
        password_hash: String,
        roles: &str,
        created_at: NaiveDateTime,
    ) -> Result<entity::user::Model, DbErr> {
        let user = entity::user::ActiveModel {
            email: ActiveValue::Set(email.to_string()),
            password: ActiveValue::Set(password_hash),
            roles: ActiveValue::Set(roles.to_string()),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(created_at),
            ..Default::default()
        };

        user.insert(self.db).await
    }

    pub async fn get(&self, user_id: i32) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_by_id(user_id).one(self.db).await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await
    }

    /// Gets a user while taking an exclusive row lock held until the surrounding transaction ends.
    ///
    /// Game writes for one user are serialized on this lock. Backends without row locks
    /// (SQLite) ignore the clause and rely on their database-level write lock instead.
    pub async fn lock(&self, user_id: i32) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_by_id(user_id)
            .lock_exclusive()
            .one(self.db)
            .await
    }

    pub async fn update_password(
        &self,
        user: entity::user::Model,
        password_hash: String,
    ) -> Result<entity::user::Model, DbErr> {
        let mut user_am = user.into_active_model();
        user_am.password = ActiveValue::Set(password_hash);

        user_am.update(self.db).await
    }

    pub async fn set_active(
        &self,
        user: entity::user::Model,
        is_active: bool,
    ) -> Result<entity::user::Model, DbErr> {
        let mut user_am = user.into_active_model();
        user_am.is_active = ActiveValue::Set(is_active);

        user_am.update(self.db).await
    }

    /// Counts users with the active flag set
    pub async fn count_active(&self) -> Result<u64, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::IsActive.eq(true))
            .count(self.db)
            .await
    }

    /// Deletes a user
    ///
    /// Returns OK regardless of user existing, to confirm the deletion result
    /// check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, user_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::User::delete_by_id(user_id)
            .exec(self.db)
            .await
    }
}

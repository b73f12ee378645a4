use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};

pub struct ImageRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ImageRepository<'a, C> {
    /// Creates a new instance of [`ImageRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an image row with no stored file yet
    pub async fn create_placeholder(
        &self,
        user_id: i32,
        created_at: NaiveDateTime,
    ) -> Result<entity::image::Model, DbErr> {
        let image = entity::image::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            filepath: ActiveValue::Set(None),
            filename: ActiveValue::Set(None),
            created_at: ActiveValue::Set(created_at),
            ..Default::default()
        };

        image.insert(self.db).await
    }

    /// Records where the image file was stored
    pub async fn set_file(
        &self,
        image: entity::image::Model,
        filepath: String,
        filename: String,
    ) -> Result<entity::image::Model, DbErr> {
        let mut image_am = image.into_active_model();
        image_am.filepath = ActiveValue::Set(Some(filepath));
        image_am.filename = ActiveValue::Set(Some(filename));

        image_am.update(self.db).await
    }

    pub async fn get(&self, image_id: i32) -> Result<Option<entity::image::Model>, DbErr> {
        entity::prelude::Image::find_by_id(image_id)
            .one(self.db)
            .await
    }

    pub async fn get_by_user(&self, user_id: i32) -> Result<Vec<entity::image::Model>, DbErr> {
        entity::prelude::Image::find()
            .filter(entity::image::Column::UserId.eq(user_id))
            .order_by_asc(entity::image::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn count_by_user(&self, user_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Image::find()
            .filter(entity::image::Column::UserId.eq(user_id))
            .count(self.db)
            .await
    }

    /// Deletes every image row owned by the user
    ///
    /// Check-ins referencing these images must be removed first.
    pub async fn delete_by_user(&self, user_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Image::delete_many()
            .filter(entity::image::Column::UserId.eq(user_id))
            .exec(self.db)
            .await
    }
}

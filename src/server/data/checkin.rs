use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::util::geo::Point;

/// Values for a new check-in row
pub struct NewCheckin {
    pub user_id: i32,
    pub geocache_id: i32,
    pub image_id: Option<i32>,
    pub text: String,
    pub point: Point,
    pub final_distance: f64,
    pub created_at: NaiveDateTime,
}

pub struct CheckinRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CheckinRepository<'a, C> {
    /// Creates a new instance of [`CheckinRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, checkin: NewCheckin) -> Result<entity::checkin::Model, DbErr> {
        let checkin = entity::checkin::ActiveModel {
            user_id: ActiveValue::Set(checkin.user_id),
            geocache_id: ActiveValue::Set(checkin.geocache_id),
            image_id: ActiveValue::Set(checkin.image_id),
            text: ActiveValue::Set(checkin.text),
            lat: ActiveValue::Set(checkin.point.lat),
            lng: ActiveValue::Set(checkin.point.lng),
            final_distance: ActiveValue::Set(checkin.final_distance),
            created_at: ActiveValue::Set(checkin.created_at),
            ..Default::default()
        };

        checkin.insert(self.db).await
    }

    pub async fn get(&self, checkin_id: i32) -> Result<Option<entity::checkin::Model>, DbErr> {
        entity::prelude::Checkin::find_by_id(checkin_id)
            .one(self.db)
            .await
    }

    /// Gets all of the user's check-ins, newest first
    pub async fn get_by_user(&self, user_id: i32) -> Result<Vec<entity::checkin::Model>, DbErr> {
        entity::prelude::Checkin::find()
            .filter(entity::checkin::Column::UserId.eq(user_id))
            .order_by_desc(entity::checkin::Column::CreatedAt)
            .order_by_desc(entity::checkin::Column::Id)
            .all(self.db)
            .await
    }

    /// Gets one page of the user's check-ins, newest first
    ///
    /// `page` is zero-based. One row beyond the page is fetched to report whether another page
    /// follows without a separate count query.
    ///
    /// # Returns
    /// - `Ok((items, has_next))` - At most `per_page` check-ins and whether more remain
    pub async fn get_page_by_user(
        &self,
        user_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<entity::checkin::Model>, bool), DbErr> {
        let mut items = entity::prelude::Checkin::find()
            .filter(entity::checkin::Column::UserId.eq(user_id))
            .order_by_desc(entity::checkin::Column::CreatedAt)
            .order_by_desc(entity::checkin::Column::Id)
            .offset(page.saturating_mul(per_page))
            .limit(per_page.saturating_add(1))
            .all(self.db)
            .await?;

        let has_next = items.len() as u64 > per_page;
        items.truncate(per_page as usize);

        Ok((items, has_next))
    }

    /// Replaces the mutable fields of a check-in
    pub async fn update(
        &self,
        checkin: entity::checkin::Model,
        text: String,
        image_id: Option<i32>,
    ) -> Result<entity::checkin::Model, DbErr> {
        let mut checkin_am = checkin.into_active_model();
        checkin_am.text = ActiveValue::Set(text);
        checkin_am.image_id = ActiveValue::Set(image_id);

        checkin_am.update(self.db).await
    }

    pub async fn exists_for_user_geocache(
        &self,
        user_id: i32,
        geocache_id: i32,
    ) -> Result<bool, DbErr> {
        let count = entity::prelude::Checkin::find()
            .filter(entity::checkin::Column::UserId.eq(user_id))
            .filter(entity::checkin::Column::GeocacheId.eq(geocache_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn count_by_user(&self, user_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Checkin::find()
            .filter(entity::checkin::Column::UserId.eq(user_id))
            .count(self.db)
            .await
    }

    pub async fn count_all(&self) -> Result<u64, DbErr> {
        entity::prelude::Checkin::find().count(self.db).await
    }

    /// Deletes the check-ins placed by the user
    pub async fn delete_by_user(&self, user_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Checkin::delete_many()
            .filter(entity::checkin::Column::UserId.eq(user_id))
            .exec(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    mod get_by_user {
        use offpath_test_utils::prelude::*;

        use crate::server::data::checkin::CheckinRepository;

        /// Expect the user's check-ins ordered newest first
        #[tokio::test]
        async fn returns_newest_first() -> Result<(), TestError> {
            let test = TestBuilder::new().with_game_tables().build().await?;
            let user = test.user().insert_user("a@example.com").await?;
            let geocache = test.geocache().insert_geocache(user.id, test.days_ago(3)).await?;

            let oldest = test
                .checkin()
                .insert_checkin(user.id, &geocache, test.days_ago(3))
                .await?;
            let newest = test
                .checkin()
                .insert_checkin(user.id, &geocache, test.now_naive())
                .await?;
            let middle = test
                .checkin()
                .insert_checkin(user.id, &geocache, test.days_ago(1))
                .await?;

            let checkin_repo = CheckinRepository::new(&test.db);
            let result = checkin_repo.get_by_user(user.id).await?;

            assert_eq!(result, vec![newest, middle, oldest]);

            Ok(())
        }
    }

    mod get_page_by_user {
        use offpath_test_utils::prelude::*;

        use crate::server::data::checkin::CheckinRepository;

        /// Expect has_next to be true only while more rows remain
        #[tokio::test]
        async fn reports_following_page() -> Result<(), TestError> {
            let test = TestBuilder::new().with_game_tables().build().await?;
            let user = test.user().insert_user("a@example.com").await?;
            let geocache = test.geocache().insert_geocache(user.id, test.days_ago(5)).await?;
            for day in 0..5 {
                test.checkin()
                    .insert_checkin(user.id, &geocache, test.days_ago(day))
                    .await?;
            }

            let checkin_repo = CheckinRepository::new(&test.db);

            let (first, has_next) = checkin_repo.get_page_by_user(user.id, 0, 2).await?;
            assert_eq!(first.len(), 2);
            assert!(has_next);

            let (last, has_next) = checkin_repo.get_page_by_user(user.id, 2, 2).await?;
            assert_eq!(last.len(), 1);
            assert!(!has_next);

            let (beyond, has_next) = checkin_repo.get_page_by_user(user.id, 3, 2).await?;
            assert!(beyond.is_empty());
            assert!(!has_next);

            Ok(())
        }
    }

    mod update {
        use offpath_test_utils::prelude::*;

        use crate::server::data::checkin::CheckinRepository;

        /// Expect text and image to be replaced while the distance is untouched
        #[tokio::test]
        async fn replaces_text_and_image() -> Result<(), TestError> {
            let test = TestBuilder::new().with_game_tables().build().await?;
            let user = test.user().insert_user("a@example.com").await?;
            let image = test.image().insert_ready_image(user.id).await?;
            let geocache = test.geocache().insert_geocache(user.id, test.now_naive()).await?;
            let checkin = test
                .checkin()
                .insert_checkin(user.id, &geocache, test.now_naive())
                .await?;

            let checkin_repo = CheckinRepository::new(&test.db);
            let updated = checkin_repo
                .update(checkin.clone(), "edited".to_string(), Some(image.id))
                .await?;

            assert_eq!(updated.text, "edited");
            assert_eq!(updated.image_id, Some(image.id));
            assert_eq!(updated.final_distance, checkin.final_distance);

            Ok(())
        }
    }

    mod delete_by_user {
        use offpath_test_utils::prelude::*;

        use crate::server::data::checkin::CheckinRepository;

        /// Expect other players' check-ins to survive, even on the user's geocaches
        #[tokio::test]
        async fn deletes_only_own_checkins() -> Result<(), TestError> {
            let test = TestBuilder::new().with_game_tables().build().await?;
            let user = test.user().insert_user("a@example.com").await?;
            let other = test.user().insert_user("b@example.com").await?;
            let owned = test.geocache().insert_geocache(user.id, test.now_naive()).await?;
            let foreign = test.geocache().insert_geocache(other.id, test.now_naive()).await?;

            test.checkin().insert_checkin(user.id, &owned, test.now_naive()).await?;
            test.checkin().insert_checkin(user.id, &foreign, test.now_naive()).await?;
            let on_owned = test
                .checkin()
                .insert_checkin(other.id, &owned, test.now_naive())
                .await?;

            let checkin_repo = CheckinRepository::new(&test.db);
            let result = checkin_repo.delete_by_user(user.id).await?;

            assert_eq!(result.rows_affected, 2);
            assert_eq!(checkin_repo.count_all().await?, 1);
            assert!(checkin_repo.get(on_owned.id).await?.is_some());

            Ok(())
        }
    }
}

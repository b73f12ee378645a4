use chrono::NaiveDateTime;
use sea_orm::{
    sea_query::{Expr, Query, SelectStatement},
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, UpdateResult,
};

use crate::server::util::geo::Point;

pub struct GeocacheRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GeocacheRepository<'a, C> {
    /// Creates a new instance of [`GeocacheRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: i32,
        point: Point,
        created_at: NaiveDateTime,
    ) -> Result<entity::geocache::Model, DbErr> {
        let geocache = entity::geocache::ActiveModel {
            user_id: ActiveValue::Set(Some(user_id)),
            lat: ActiveValue::Set(point.lat),
            lng: ActiveValue::Set(point.lng),
            created_at: ActiveValue::Set(created_at),
            ..Default::default()
        };

        geocache.insert(self.db).await
    }

    pub async fn get(&self, geocache_id: i32) -> Result<Option<entity::geocache::Model>, DbErr> {
        entity::prelude::Geocache::find_by_id(geocache_id)
            .one(self.db)
            .await
    }

    /// Gets the user's geocaches without any check-in, newest first
    ///
    /// When `created_between` is provided only geocaches created within the half-open
    /// `[start, end)` range are returned.
    pub async fn get_unconsumed_by_user(
        &self,
        user_id: i32,
        created_between: Option<(NaiveDateTime, NaiveDateTime)>,
    ) -> Result<Vec<entity::geocache::Model>, DbErr> {
        let mut condition = Condition::all()
            .add(entity::geocache::Column::UserId.eq(user_id))
            .add(entity::geocache::Column::Id.not_in_subquery(checked_in_geocache_ids()));

        if let Some((start, end)) = created_between {
            condition = condition
                .add(entity::geocache::Column::CreatedAt.gte(start))
                .add(entity::geocache::Column::CreatedAt.lt(end));
        }

        entity::prelude::Geocache::find()
            .filter(condition)
            .order_by_desc(entity::geocache::Column::CreatedAt)
            .order_by_desc(entity::geocache::Column::Id)
            .all(self.db)
            .await
    }

    /// Deletes the user's geocaches without any check-in, except `keep_id`
    pub async fn delete_unconsumed_by_user(
        &self,
        user_id: i32,
        keep_id: Option<i32>,
    ) -> Result<DeleteResult, DbErr> {
        let mut condition = Condition::all()
            .add(entity::geocache::Column::UserId.eq(user_id))
            .add(entity::geocache::Column::Id.not_in_subquery(checked_in_geocache_ids()));

        if let Some(keep_id) = keep_id {
            condition = condition.add(entity::geocache::Column::Id.ne(keep_id));
        }

        entity::prelude::Geocache::delete_many()
            .filter(condition)
            .exec(self.db)
            .await
    }

    /// Gets every geocache owned by the user, oldest first
    pub async fn get_by_user(&self, user_id: i32) -> Result<Vec<entity::geocache::Model>, DbErr> {
        entity::prelude::Geocache::find()
            .filter(entity::geocache::Column::UserId.eq(user_id))
            .order_by_asc(entity::geocache::Column::CreatedAt)
            .order_by_asc(entity::geocache::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn count_by_user(&self, user_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Geocache::find()
            .filter(entity::geocache::Column::UserId.eq(user_id))
            .count(self.db)
            .await
    }

    /// Clears the owner of every geocache the user still owns
    ///
    /// Run after [`Self::delete_unconsumed_by_user`] so only geocaches other rows still
    /// reference are kept, ownerless.
    pub async fn release_by_user(&self, user_id: i32) -> Result<UpdateResult, DbErr> {
        entity::prelude::Geocache::update_many()
            .col_expr(
                entity::geocache::Column::UserId,
                Expr::value(Option::<i32>::None),
            )
            .filter(entity::geocache::Column::UserId.eq(user_id))
            .exec(self.db)
            .await
    }
}

fn checked_in_geocache_ids() -> SelectStatement {
    Query::select()
        .column(entity::checkin::Column::GeocacheId)
        .from(entity::checkin::Entity)
        .to_owned()
}

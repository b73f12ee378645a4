use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "checkin")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub geocache_id: i32,
    pub image_id: Option<i32>,
    #[sea_orm(column_type = "String(StringLen::N(140))")]
    pub text: String,
    pub lat: f64,
    pub lng: f64,
    /// Metres between the submitted location and the geocache, fixed at creation
    pub final_distance: f64,
    /// UTC creation timestamp
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::geocache::Entity",
        from = "Column::GeocacheId",
        to = "super::geocache::Column::Id"
    )]
    Geocache,
    #[sea_orm(
        belongs_to = "super::image::Entity",
        from = "Column::ImageId",
        to = "super::image::Column::Id"
    )]
    Image,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::geocache::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Geocache.def()
    }
}

impl Related<super::image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Image.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

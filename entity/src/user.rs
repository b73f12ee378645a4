use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2id PHC string
    pub password: String,
    /// Comma separated role names
    pub roles: String,
    pub is_active: bool,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::geocache::Entity")]
    Geocache,
    #[sea_orm(has_many = "super::checkin::Entity")]
    Checkin,
    #[sea_orm(has_many = "super::image::Entity")]
    Image,
}

impl Related<super::geocache::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Geocache.def()
    }
}

impl Related<super::checkin::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Checkin.def()
    }
}

impl Related<super::image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Image.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

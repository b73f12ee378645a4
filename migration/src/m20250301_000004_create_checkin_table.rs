use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20250301_000001_create_user_table::User, m20250301_000002_create_image_table::Image,
    m20250301_000003_create_geocache_table::Geocache,
};

static IDX_CHECKIN_USER_ID_CREATED_AT: &str = "idx_checkin_user_id_created_at";
static IDX_CHECKIN_GEOCACHE_ID: &str = "idx_checkin_geocache_id";
static FK_CHECKIN_USER_ID: &str = "fk_checkin_user_id";
static FK_CHECKIN_GEOCACHE_ID: &str = "fk_checkin_geocache_id";
static FK_CHECKIN_IMAGE_ID: &str = "fk_checkin_image_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Checkin::Table)
                    .if_not_exists()
                    .col(pk_auto(Checkin::Id))
                    .col(integer(Checkin::UserId))
                    .col(integer(Checkin::GeocacheId))
                    .col(integer_null(Checkin::ImageId))
                    .col(string_len(Checkin::Text, 140))
                    .col(double(Checkin::Lat))
                    .col(double(Checkin::Lng))
                    .col(double(Checkin::FinalDistance))
                    .col(timestamp(Checkin::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_CHECKIN_USER_ID)
                            .from(Checkin::Table, Checkin::UserId)
                            .to(User::Table, User::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_CHECKIN_GEOCACHE_ID)
                            .from(Checkin::Table, Checkin::GeocacheId)
                            .to(Geocache::Table, Geocache::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_CHECKIN_IMAGE_ID)
                            .from(Checkin::Table, Checkin::ImageId)
                            .to(Image::Table, Image::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CHECKIN_USER_ID_CREATED_AT)
                    .table(Checkin::Table)
                    .col(Checkin::UserId)
                    .col(Checkin::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CHECKIN_GEOCACHE_ID)
                    .table(Checkin::Table)
                    .col(Checkin::GeocacheId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CHECKIN_GEOCACHE_ID)
                    .table(Checkin::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CHECKIN_USER_ID_CREATED_AT)
                    .table(Checkin::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Checkin::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Checkin {
    Table,
    Id,
    UserId,
    GeocacheId,
    ImageId,
    Text,
    Lat,
    Lng,
    FinalDistance,
    CreatedAt,
}

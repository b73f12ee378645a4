use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000001_create_user_table::User;

static IDX_GEOCACHE_USER_ID_CREATED_AT: &str = "idx_geocache_user_id_created_at";
static FK_GEOCACHE_USER_ID: &str = "fk_geocache_user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Geocache::Table)
                    .if_not_exists()
                    .col(pk_auto(Geocache::Id))
                    .col(integer_null(Geocache::UserId))
                    .col(double(Geocache::Lat))
                    .col(double(Geocache::Lng))
                    .col(timestamp(Geocache::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_GEOCACHE_USER_ID)
                            .from(Geocache::Table, Geocache::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Active geocache lookups filter by owner and order by creation time
        manager
            .create_index(
                Index::create()
                    .name(IDX_GEOCACHE_USER_ID_CREATED_AT)
                    .table(Geocache::Table)
                    .col(Geocache::UserId)
                    .col(Geocache::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_GEOCACHE_USER_ID_CREATED_AT)
                    .table(Geocache::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Geocache::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Geocache {
    Table,
    Id,
    UserId,
    Lat,
    Lng,
    CreatedAt,
}

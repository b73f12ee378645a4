use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000001_create_user_table::User;

static IDX_IMAGE_USER_ID: &str = "idx_image_user_id";
static FK_IMAGE_USER_ID: &str = "fk_image_user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Image::Table)
                    .if_not_exists()
                    .col(pk_auto(Image::Id))
                    .col(integer(Image::UserId))
                    // Both stay NULL until the upload has been written to storage
                    .col(string_len_null(Image::Filepath, 512))
                    .col(string_len_null(Image::Filename, 256))
                    .col(timestamp(Image::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_IMAGE_USER_ID)
                            .from(Image::Table, Image::UserId)
                            .to(User::Table, User::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_IMAGE_USER_ID)
                    .table(Image::Table)
                    .col(Image::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_IMAGE_USER_ID)
                    .table(Image::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Image::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Image {
    Table,
    Id,
    UserId,
    Filepath,
    Filename,
    CreatedAt,
}

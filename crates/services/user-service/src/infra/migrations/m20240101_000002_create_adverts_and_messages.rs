//! Migration: Create adverts and messages tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Adverts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Adverts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Adverts::Title).string().not_null())
                    .col(ColumnDef::new(Adverts::Description).text().null())
                    .col(
                        ColumnDef::new(Adverts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Messages::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Messages::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Messages::Sender).string().not_null())
                    .col(ColumnDef::new(Messages::Content).text().not_null())
                    .col(
                        ColumnDef::new(Messages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Messages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Adverts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Adverts {
    Table,
    Id,
    Title,
    Description,
    CreatedAt,
}

#[derive(Iden)]
enum Messages {
    Table,
    Id,
    Sender,
    Content,
    CreatedAt,
}

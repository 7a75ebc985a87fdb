//! Migration: Create user advert and message reference tables.
//!
//! References are append-only rows; the serial `id` keeps append order.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserAdverts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserAdverts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserAdverts::UserId).uuid().not_null())
                    .col(ColumnDef::new(UserAdverts::AdvertId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_adverts_user")
                            .from(UserAdverts::Table, UserAdverts::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_adverts_advert")
                            .from(UserAdverts::Table, UserAdverts::AdvertId)
                            .to(Adverts::Table, Adverts::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_adverts_user_id")
                    .table(UserAdverts::Table)
                    .col(UserAdverts::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserMessages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserMessages::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserMessages::UserId).uuid().not_null())
                    .col(ColumnDef::new(UserMessages::MessageId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_messages_user")
                            .from(UserMessages::Table, UserMessages::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_messages_message")
                            .from(UserMessages::Table, UserMessages::MessageId)
                            .to(Messages::Table, Messages::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_messages_user_id")
                    .table(UserMessages::Table)
                    .col(UserMessages::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserMessages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserAdverts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Adverts {
    Table,
    Id,
}

#[derive(Iden)]
enum Messages {
    Table,
    Id,
}

#[derive(Iden)]
enum UserAdverts {
    Table,
    Id,
    UserId,
    AdvertId,
}

#[derive(Iden)]
enum UserMessages {
    Table,
    Id,
    UserId,
    MessageId,
}

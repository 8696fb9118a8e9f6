//! Migration to create attendees table

use sea_orm_migration::prelude::*;

use super::m20250115_000001_create_users::Users;
use super::m20250115_000002_create_events::Events;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Attendees::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Attendees::EventId).string().not_null())
                    .col(ColumnDef::new(Attendees::UserId).string().not_null())
                    .col(
                        ColumnDef::new(Attendees::RsvpStatus)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Attendees::RespondedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    // One status record per (event, user)
                    .primary_key(
                        Index::create()
                            .col(Attendees::EventId)
                            .col(Attendees::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendees_event")
                            .from(Attendees::Table, Attendees::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendees_user")
                            .from(Attendees::Table, Attendees::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_attendees_user")
                    .table(Attendees::Table)
                    .col(Attendees::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Attendees::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Attendees {
    Table,
    EventId,
    UserId,
    RsvpStatus,
    RespondedAt,
}

use sea_orm_migration::prelude::*;

use super::m20260815_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Activities::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Activities::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Activities::UserId).big_integer().not_null())
          .col(ColumnDef::new(Activities::ActivityType).text().not_null())
          .col(ColumnDef::new(Activities::RpgStat).text().null())
          .col(ColumnDef::new(Activities::Description).string().null())
          .col(ColumnDef::new(Activities::Value).double().null())
          .col(ColumnDef::new(Activities::Metadata).string().null())
          .col(ColumnDef::new(Activities::Platform).string().null())
          .col(ColumnDef::new(Activities::Repository).string().null())
          .col(ColumnDef::new(Activities::Difficulty).string().null())
          .col(ColumnDef::new(Activities::TimeSpentMinutes).integer().null())
          .col(ColumnDef::new(Activities::SetsCompleted).integer().null())
          .col(ColumnDef::new(Activities::RepsCompleted).integer().null())
          .col(ColumnDef::new(Activities::Likes).integer().null())
          .col(ColumnDef::new(Activities::Comments).integer().null())
          .col(ColumnDef::new(Activities::Shares).integer().null())
          .col(ColumnDef::new(Activities::OccurredAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_activities_user")
              .from(Activities::Table, Activities::UserId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    // recompute and trend queries scan per user, per category, per instant
    manager
      .create_index(
        Index::create()
          .name("idx_activities_user_type_occurred")
          .table(Activities::Table)
          .col(Activities::UserId)
          .col(Activities::ActivityType)
          .col(Activities::OccurredAt)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Activities::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Activities {
  Table,
  Id,
  UserId,
  ActivityType,
  RpgStat,
  Description,
  Value,
  Metadata,
  Platform,
  Repository,
  Difficulty,
  TimeSpentMinutes,
  SetsCompleted,
  RepsCompleted,
  Likes,
  Comments,
  Shares,
  OccurredAt,
}

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
          .table(Goals::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Goals::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Goals::UserId).big_integer().not_null())
          .col(ColumnDef::new(Goals::ActivityType).text().not_null())
          .col(ColumnDef::new(Goals::Name).string().not_null())
          .col(ColumnDef::new(Goals::Period).text().not_null())
          .col(ColumnDef::new(Goals::RpgStat).text().null())
          .col(ColumnDef::new(Goals::TargetValue).double().not_null())
          .col(ColumnDef::new(Goals::CustomPeriodDays).double().null())
          .col(ColumnDef::new(Goals::Unit).string().null())
          .col(
            ColumnDef::new(Goals::CurrentValue)
              .double()
              .not_null()
              .default(0.0),
          )
          .col(ColumnDef::new(Goals::StartDate).date().null())
          .col(ColumnDef::new(Goals::EndDate).date().null())
          .col(ColumnDef::new(Goals::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_goals_user")
              .from(Goals::Table, Goals::UserId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_goals_user_type")
          .table(Goals::Table)
          .col(Goals::UserId)
          .col(Goals::ActivityType)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Goals::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Goals {
  Table,
  Id,
  UserId,
  ActivityType,
  Name,
  Period,
  RpgStat,
  TargetValue,
  CustomPeriodDays,
  Unit,
  CurrentValue,
  StartDate,
  EndDate,
  CreatedAt,
}

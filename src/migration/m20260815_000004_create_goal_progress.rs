use sea_orm_migration::prelude::*;

use super::m20260815_000003_create_goals::Goals;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(GoalProgress::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(GoalProgress::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(GoalProgress::GoalId).big_integer().not_null())
          .col(ColumnDef::new(GoalProgress::Date).date().not_null())
          .col(ColumnDef::new(GoalProgress::Value).double().not_null())
          .col(ColumnDef::new(GoalProgress::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_goal_progress_goal")
              .from(GoalProgress::Table, GoalProgress::GoalId)
              .to(Goals::Table, Goals::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    // one ledger row per (goal, day); the store enforces upsert semantics
    manager
      .create_index(
        Index::create()
          .name("idx_goal_progress_goal_date")
          .table(GoalProgress::Table)
          .col(GoalProgress::GoalId)
          .col(GoalProgress::Date)
          .unique()
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(GoalProgress::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum GoalProgress {
  Table,
  Id,
  GoalId,
  Date,
  Value,
  CreatedAt,
}

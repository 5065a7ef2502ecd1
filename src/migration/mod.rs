//! Database migrations using SeaORM

use sea_orm_migration::prelude::*;

mod m20260815_000001_create_users;
mod m20260815_000002_create_activities;
mod m20260815_000003_create_goals;
mod m20260815_000004_create_goal_progress;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
  fn migrations() -> Vec<Box<dyn MigrationTrait>> {
    vec![
      Box::new(m20260815_000001_create_users::Migration),
      Box::new(m20260815_000002_create_activities::Migration),
      Box::new(m20260815_000003_create_goals::Migration),
      Box::new(m20260815_000004_create_goal_progress::Migration),
    ]
  }
}

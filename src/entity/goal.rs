//! Goal entity - recurring target over a period window

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::activity::{ActivityType, RpgStat};

/// Recurrence granularity of a goal's tracking window.
#[derive(
  Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize,
  Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "UPPERCASE")]
pub enum GoalPeriod {
  #[sea_orm(string_value = "DAILY")]
  Daily,
  #[sea_orm(string_value = "WEEKLY")]
  Weekly,
  #[sea_orm(string_value = "MONTHLY")]
  Monthly,
  #[sea_orm(string_value = "QUARTERLY")]
  Quarterly,
  #[sea_orm(string_value = "CUSTOM")]
  Custom,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "goals")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  pub user_id: i64,
  pub activity_type: ActivityType,
  pub name: String,
  pub period: GoalPeriod,
  pub rpg_stat: Option<RpgStat>,
  pub target_value: f64,
  /// window length for Custom period; ≤ 0 or absent means 7 days
  pub custom_period_days: Option<f64>,
  pub unit: Option<String>,
  /// derived cache, written only by the recalculator
  pub current_value: f64,
  pub start_date: Option<Date>,
  pub end_date: Option<Date>,
  pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "super::user::Entity",
    from = "Column::UserId",
    to = "super::user::Column::Id"
  )]
  User,
  #[sea_orm(has_many = "super::goal_progress::Entity")]
  Progress,
}

impl Related<super::user::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::User.def()
  }
}

impl Related<super::goal_progress::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Progress.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}

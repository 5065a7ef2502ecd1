//! Activity entity - immutable facts a user logs over time

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Fixed classification of a logged activity.
#[derive(
  Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum,
  Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
  #[sea_orm(string_value = "GITHUB_COMMITS")]
  GithubCommits,
  #[sea_orm(string_value = "STUDY")]
  Study,
  #[sea_orm(string_value = "GYM")]
  Gym,
  #[sea_orm(string_value = "LINKEDIN_POST")]
  LinkedinPost,
  #[sea_orm(string_value = "DSA")]
  Dsa,
  #[sea_orm(string_value = "CUSTOM")]
  Custom,
}

/// One of six gamification attributes an activity contributes to.
#[derive(
  Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum,
  Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "UPPERCASE")]
pub enum RpgStat {
  #[sea_orm(string_value = "STR")]
  Str,
  #[sea_orm(string_value = "DEX")]
  Dex,
  #[sea_orm(string_value = "INT")]
  Int,
  #[sea_orm(string_value = "WIS")]
  Wis,
  #[sea_orm(string_value = "CHA")]
  Cha,
  #[sea_orm(string_value = "VIT")]
  Vit,
}

impl ActivityType {
  /// Stat an activity of this category feeds when no explicit tag is set.
  ///
  /// Exhaustive on purpose: ingestion defaults and dashboard aggregation
  /// both resolve through this single mapping.
  pub fn default_stat(self) -> RpgStat {
    match self {
      Self::GithubCommits => RpgStat::Dex,
      Self::Study => RpgStat::Int,
      Self::Gym => RpgStat::Str,
      Self::LinkedinPost => RpgStat::Cha,
      Self::Dsa => RpgStat::Wis,
      Self::Custom => RpgStat::Vit,
    }
  }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activities")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  pub user_id: i64,
  pub activity_type: ActivityType,
  pub rpg_stat: Option<RpgStat>,
  pub description: Option<String>,
  /// magnitude of the activity; absent counts as one unit
  pub value: Option<f64>,
  pub metadata: Option<String>,
  pub platform: Option<String>,
  pub repository: Option<String>,
  pub difficulty: Option<String>,
  pub time_spent_minutes: Option<i32>,
  pub sets_completed: Option<i32>,
  pub reps_completed: Option<i32>,
  pub likes: Option<i32>,
  pub comments: Option<i32>,
  pub shares: Option<i32>,
  /// UTC instant the activity happened at
  pub occurred_at: DateTime,
}

impl Model {
  /// Value this activity adds to any sum (1.0 when no magnitude was logged).
  pub fn contribution(&self) -> f64 {
    self.value.unwrap_or(1.0)
  }

  /// Explicit stat tag, else the category default.
  pub fn stat(&self) -> RpgStat {
    self.rpg_stat.unwrap_or_else(|| self.activity_type.default_stat())
  }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "super::user::Entity",
    from = "Column::UserId",
    to = "super::user::Column::Id"
  )]
  User,
}

impl Related<super::user::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::User.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}

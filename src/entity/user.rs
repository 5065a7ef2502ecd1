//! UserAccount entity - identity, timezone and tracked categories

use json::Value;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  pub name: String,
  #[sea_orm(unique)]
  pub email: String,
  /// IANA zone name; absent or unparseable falls back to UTC
  pub timezone: Option<String>,
  pub notifications_enabled: bool,
  pub weekly_email_enabled: bool,
  /// json array of tracked activity category keys
  pub tracked_activities: Option<Value>,
  pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(has_many = "super::activity::Entity")]
  Activity,
  #[sea_orm(has_many = "super::goal::Entity")]
  Goal,
}

impl Related<super::activity::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Activity.def()
  }
}

impl Related<super::goal::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Goal.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}

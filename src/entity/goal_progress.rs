//! GoalProgress entity - one ledger row per (goal, calendar day)

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "goal_progress")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  pub goal_id: i64,
  pub date: Date,
  pub value: f64,
  pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "super::goal::Entity",
    from = "Column::GoalId",
    to = "super::goal::Column::Id"
  )]
  Goal,
}

impl Related<super::goal::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Goal.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}

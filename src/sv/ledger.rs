//! Progress ledger - per-day explicit progress entries for a goal

use crate::{entity::goal_progress, prelude::*};

pub struct Ledger<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Ledger<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Upsert the entry for `(goal, date)`; a second write for the same day
  /// replaces the value, it never accumulates.
  pub async fn set_progress(
    &self,
    goal_id: i64,
    date: Date,
    value: f64,
  ) -> Result<goal_progress::Model> {
    let txn = self.db.begin().await?;

    let existing = goal_progress::Entity::find()
      .filter(goal_progress::Column::GoalId.eq(goal_id))
      .filter(goal_progress::Column::Date.eq(date))
      .one(&txn)
      .await?;

    let saved = match existing {
      Some(entry) => {
        goal_progress::ActiveModel { value: Set(value), ..entry.into() }
          .update(&txn)
          .await?
      }
      None => {
        goal_progress::ActiveModel {
          goal_id: Set(goal_id),
          date: Set(date),
          value: Set(value),
          created_at: Set(Utc::now().naive_utc()),
          ..Default::default()
        }
        .insert(&txn)
        .await?
      }
    };

    txn.commit().await?;
    Ok(saved)
  }

  /// Sum of entry values with `start <= date <= end`; 0.0 when none exist.
  pub async fn sum_in_range(
    &self,
    goal_id: i64,
    start: Date,
    end: Date,
  ) -> Result<f64> {
    Ok(self.entries_in_range(goal_id, start, end).await?.iter()
      .map(|entry| entry.value)
      .sum())
  }

  pub async fn entries_in_range(
    &self,
    goal_id: i64,
    start: Date,
    end: Date,
  ) -> Result<Vec<goal_progress::Model>> {
    let entries = goal_progress::Entity::find()
      .filter(goal_progress::Column::GoalId.eq(goal_id))
      .filter(goal_progress::Column::Date.gte(start))
      .filter(goal_progress::Column::Date.lte(end))
      .all(self.db)
      .await?;
    Ok(entries)
  }

  /// Most recent entries by date descending, for history display.
  pub async fn recent(
    &self,
    goal_id: i64,
    limit: u64,
  ) -> Result<Vec<goal_progress::Model>> {
    let entries = goal_progress::Entity::find()
      .filter(goal_progress::Column::GoalId.eq(goal_id))
      .order_by_desc(goal_progress::Column::Date)
      .limit(limit)
      .all(self.db)
      .await?;
    Ok(entries)
  }
}

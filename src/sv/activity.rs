//! Activity ingestion and queries

use chrono::DateTime as ChronoDateTime;
use serde::Deserialize;

use crate::{
  entity::{
    ActivityType, RpgStat,
    activity::{self, Model},
  },
  period::Window,
  prelude::*,
};

/// Ingestion payload. Manually logged activities and records pulled from
/// outside integrations both arrive through this shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActivity {
  #[serde(rename = "type")]
  pub activity_type: ActivityType,
  pub rpg_stat: Option<RpgStat>,
  pub description: Option<String>,
  pub value: Option<f64>,
  pub metadata: Option<String>,
  pub occurred_at: Option<ChronoDateTime<Utc>>,
  pub platform: Option<String>,
  pub repository: Option<String>,
  pub difficulty: Option<String>,
  pub time_spent_minutes: Option<i32>,
  pub sets_completed: Option<i32>,
  pub reps_completed: Option<i32>,
  pub likes: Option<i32>,
  pub comments: Option<i32>,
  pub shares: Option<i32>,
}

pub struct Activity<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Activity<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Persist one immutable activity fact. A missing stat tag resolves to
  /// the category default so dashboard aggregation and ingestion agree.
  pub async fn create(&self, user_id: i64, new: NewActivity) -> Result<Model> {
    let occurred_at =
      new.occurred_at.map(|at| at.naive_utc()).unwrap_or_else(|| {
        Utc::now().naive_utc()
      });
    let rpg_stat =
      new.rpg_stat.unwrap_or_else(|| new.activity_type.default_stat());

    let activity = activity::ActiveModel {
      user_id: Set(user_id),
      activity_type: Set(new.activity_type),
      rpg_stat: Set(Some(rpg_stat)),
      description: Set(new.description),
      value: Set(new.value),
      metadata: Set(new.metadata),
      platform: Set(new.platform),
      repository: Set(new.repository),
      difficulty: Set(new.difficulty),
      time_spent_minutes: Set(new.time_spent_minutes),
      sets_completed: Set(new.sets_completed),
      reps_completed: Set(new.reps_completed),
      likes: Set(new.likes),
      comments: Set(new.comments),
      shares: Set(new.shares),
      occurred_at: Set(occurred_at),
      ..Default::default()
    };

    Ok(activity.insert(self.db).await?)
  }

  pub async fn all(&self, user_id: i64) -> Result<Vec<Model>> {
    let activities = activity::Entity::find()
      .filter(activity::Column::UserId.eq(user_id))
      .all(self.db)
      .await?;
    Ok(activities)
  }

  /// Activities from the trailing 30 days.
  pub async fn recent(&self, user_id: i64) -> Result<Vec<Model>> {
    let from = Utc::now().naive_utc() - TimeDelta::days(30);
    let activities = activity::Entity::find()
      .filter(activity::Column::UserId.eq(user_id))
      .filter(activity::Column::OccurredAt.gte(from))
      .all(self.db)
      .await?;
    Ok(activities)
  }

  /// Latest activities, newest first, clamped to at most 50.
  pub async fn feed(&self, user_id: i64, limit: u64) -> Result<Vec<Model>> {
    let activities = activity::Entity::find()
      .filter(activity::Column::UserId.eq(user_id))
      .order_by_desc(activity::Column::OccurredAt)
      .limit(limit.clamp(1, 50))
      .all(self.db)
      .await?;
    Ok(activities)
  }

  pub async fn by_type(
    &self,
    user_id: i64,
    ty: ActivityType,
  ) -> Result<Vec<Model>> {
    let activities = activity::Entity::find()
      .filter(activity::Column::UserId.eq(user_id))
      .filter(activity::Column::ActivityType.eq(ty))
      .all(self.db)
      .await?;
    Ok(activities)
  }

  /// Sum of contributions for activities of `ty` with `occurred_at` inside
  /// the half-open window.
  pub async fn sum_in_window(
    &self,
    user_id: i64,
    ty: ActivityType,
    window: Window,
  ) -> Result<f64> {
    let activities = activity::Entity::find()
      .filter(activity::Column::UserId.eq(user_id))
      .filter(activity::Column::ActivityType.eq(ty))
      .filter(activity::Column::OccurredAt.gte(window.start.naive_utc()))
      .filter(activity::Column::OccurredAt.lt(window.end.naive_utc()))
      .all(self.db)
      .await?;

    Ok(activities.iter().map(Model::contribution).sum())
  }
}

//! Goal configuration and the progress recalculator
//!
//! `current_value` on a goal is a derived cache. Only `recompute` writes it,
//! and every call site (ingestion, ledger writes, goal creation) goes through
//! that one function.

use serde::Deserialize;

use crate::{
  entity::{
    ActivityType, GoalPeriod, RpgStat,
    goal::{self, Model},
    user,
  },
  period,
  prelude::*,
  sv::{Activity, Ledger},
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
  pub activity_type: ActivityType,
  pub period: GoalPeriod,
  pub target_value: f64,
  pub name: String,
  pub unit: Option<String>,
  pub custom_period_days: Option<f64>,
  pub rpg_stat: Option<RpgStat>,
  pub start_date: Option<Date>,
  pub end_date: Option<Date>,
}

pub struct Goal<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Goal<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Always creates a new goal; a user may track the same category and
  /// period with several goals at once.
  pub async fn create(&self, user_id: i64, new: NewGoal) -> Result<Model> {
    let goal = goal::ActiveModel {
      user_id: Set(user_id),
      activity_type: Set(new.activity_type),
      name: Set(new.name),
      period: Set(new.period),
      rpg_stat: Set(new.rpg_stat),
      target_value: Set(new.target_value),
      custom_period_days: Set(new.custom_period_days),
      unit: Set(new.unit),
      current_value: Set(0.0),
      start_date: Set(new.start_date),
      end_date: Set(new.end_date),
      created_at: Set(Utc::now().naive_utc()),
      ..Default::default()
    };

    Ok(goal.insert(self.db).await?)
  }

  pub async fn list(&self, user_id: i64) -> Result<Vec<Model>> {
    let goals = goal::Entity::find()
      .filter(goal::Column::UserId.eq(user_id))
      .order_by_asc(goal::Column::CreatedAt)
      .all(self.db)
      .await?;
    Ok(goals)
  }

  pub async fn by_activity_type(
    &self,
    user_id: i64,
    ty: ActivityType,
  ) -> Result<Vec<Model>> {
    let goals = goal::Entity::find()
      .filter(goal::Column::UserId.eq(user_id))
      .filter(goal::Column::ActivityType.eq(ty))
      .all(self.db)
      .await?;
    Ok(goals)
  }

  /// Fetch a goal only if it belongs to `user_id`; fails closed so no
  /// goal-scoped operation can touch another user's goal.
  pub async fn owned(&self, user_id: i64, goal_id: i64) -> Result<Model> {
    goal::Entity::find_by_id(goal_id)
      .filter(goal::Column::UserId.eq(user_id))
      .one(self.db)
      .await?
      .ok_or(Error::GoalNotFound)
  }

  pub async fn delete(&self, user_id: i64, goal_id: i64) -> Result<()> {
    let goal = self.owned(user_id, goal_id).await?;
    goal::Entity::delete_by_id(goal.id).exec(self.db).await?;
    Ok(())
  }

  /// Recompute the goal's current progress for its active window and
  /// persist it into `current_value`.
  ///
  /// Ledger entries take precedence the moment any exist in the window;
  /// raw activity sums are only a fallback. A user switching to daily
  /// ledger entries after logging raw activities sees the value drop until
  /// enough days are populated - intentional boundary behavior.
  pub async fn recompute(
    &self,
    user: &user::Model,
    goal: &Model,
  ) -> Result<f64> {
    let tz = period::user_tz(user.timezone.as_deref());
    let now = Utc::now();
    let window = period::resolve(
      goal.period,
      tz,
      goal.start_date,
      goal.end_date,
      goal.custom_period_days,
      now,
    );

    let ledger_start = window.start_date(tz);
    let ledger_end = goal
      .end_date
      .unwrap_or_else(|| now.with_timezone(&tz).date_naive());

    let entries = Ledger::new(self.db)
      .entries_in_range(goal.id, ledger_start, ledger_end)
      .await?;

    let current = if entries.is_empty() {
      Activity::new(self.db)
        .sum_in_window(user.id, goal.activity_type, window)
        .await?
    } else {
      entries.iter().map(|entry| entry.value).sum()
    };

    goal::ActiveModel { current_value: Set(current), ..goal.clone().into() }
      .update(self.db)
      .await?;

    debug!(goal = goal.id, current, "recomputed goal progress");
    Ok(current)
  }
}

#[cfg(test)]
mod tests {
  use sea_orm::{DbBackend, Schema};

  use super::*;
  use crate::{entity::*, sv::activity::NewActivity};

  async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();

    let schema = Schema::new(DbBackend::Sqlite);

    for stmt in [
      schema.create_table_from_entity(user::Entity),
      schema.create_table_from_entity(activity::Entity),
      schema.create_table_from_entity(goal::Entity),
      schema.create_table_from_entity(goal_progress::Entity),
    ] {
      db.execute(db.get_database_backend().build(&stmt)).await.unwrap();
    }

    db
  }

  async fn test_user(db: &DatabaseConnection) -> user::Model {
    user::ActiveModel {
      name: Set("tester".into()),
      email: Set("tester@example.com".into()),
      timezone: Set(Some("UTC".into())),
      notifications_enabled: Set(true),
      weekly_email_enabled: Set(false),
      tracked_activities: Set(None),
      created_at: Set(Utc::now().naive_utc()),
      ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
  }

  fn new_goal(ty: ActivityType, period: GoalPeriod, target: f64) -> NewGoal {
    NewGoal {
      activity_type: ty,
      period,
      target_value: target,
      name: "test goal".into(),
      unit: None,
      custom_period_days: None,
      rpg_stat: None,
      start_date: None,
      end_date: None,
    }
  }

  fn log(ty: ActivityType, value: Option<f64>, at: TimeDelta) -> NewActivity {
    NewActivity {
      activity_type: ty,
      rpg_stat: None,
      description: None,
      value,
      metadata: None,
      occurred_at: Some(Utc::now() - at),
      platform: None,
      repository: None,
      difficulty: None,
      time_spent_minutes: None,
      sets_completed: None,
      reps_completed: None,
      likes: None,
      comments: None,
      shares: None,
    }
  }

  #[tokio::test]
  async fn recompute_sums_activities_without_ledger() {
    let db = setup_test_db().await;
    let user = test_user(&db).await;
    let sv = Goal::new(&db);

    let goal = sv
      .create(user.id, new_goal(ActivityType::Gym, GoalPeriod::Monthly, 10.0))
      .await
      .unwrap();

    let activities = Activity::new(&db);
    activities
      .create(user.id, log(ActivityType::Gym, None, TimeDelta::minutes(5)))
      .await
      .unwrap();
    activities
      .create(
        user.id,
        log(ActivityType::Gym, Some(2.5), TimeDelta::minutes(10)),
      )
      .await
      .unwrap();
    // wrong category must not count
    activities
      .create(user.id, log(ActivityType::Study, None, TimeDelta::minutes(1)))
      .await
      .unwrap();

    let current = sv.recompute(&user, &goal).await.unwrap();
    assert_eq!(current, 3.5);

    let stored = sv.owned(user.id, goal.id).await.unwrap();
    assert_eq!(stored.current_value, 3.5);
  }

  #[tokio::test]
  async fn ledger_takes_precedence_over_activities() {
    let db = setup_test_db().await;
    let user = test_user(&db).await;
    let sv = Goal::new(&db);

    // explicit window so the test is independent of the wall clock
    let mut new = new_goal(ActivityType::Study, GoalPeriod::Weekly, 5.0);
    new.start_date = Date::from_ymd_opt(2026, 8, 1);
    new.end_date = Date::from_ymd_opt(2026, 8, 31);
    let goal = sv.create(user.id, new).await.unwrap();

    let at = Utc.with_ymd_and_hms(2026, 8, 10, 12, 0, 0).unwrap();
    let mut raw = log(ActivityType::Study, Some(100.0), TimeDelta::zero());
    raw.occurred_at = Some(at);
    Activity::new(&db).create(user.id, raw).await.unwrap();

    // raw activities alone: 100
    assert_eq!(sv.recompute(&user, &goal).await.unwrap(), 100.0);

    // two ledger entries in the window sum to 3 and win over the 100
    let ledger = Ledger::new(&db);
    ledger
      .set_progress(goal.id, Date::from_ymd_opt(2026, 8, 10).unwrap(), 1.0)
      .await
      .unwrap();
    ledger
      .set_progress(goal.id, Date::from_ymd_opt(2026, 8, 11).unwrap(), 2.0)
      .await
      .unwrap();

    assert_eq!(sv.recompute(&user, &goal).await.unwrap(), 3.0);
  }

  #[tokio::test]
  async fn negative_custom_period_behaves_as_seven_days() {
    let db = setup_test_db().await;
    let user = test_user(&db).await;
    let sv = Goal::new(&db);

    let mut new = new_goal(ActivityType::Dsa, GoalPeriod::Custom, 10.0);
    new.custom_period_days = Some(-1.0);
    let goal = sv.create(user.id, new).await.unwrap();

    let activities = Activity::new(&db);
    // inside the trailing week
    activities
      .create(user.id, log(ActivityType::Dsa, Some(2.0), TimeDelta::days(3)))
      .await
      .unwrap();
    // outside it
    activities
      .create(user.id, log(ActivityType::Dsa, Some(9.0), TimeDelta::days(8)))
      .await
      .unwrap();

    assert_eq!(sv.recompute(&user, &goal).await.unwrap(), 2.0);
  }

  #[tokio::test]
  async fn owned_fails_closed_for_foreign_goals() {
    let db = setup_test_db().await;
    let user = test_user(&db).await;
    let sv = Goal::new(&db);

    let goal = sv
      .create(user.id, new_goal(ActivityType::Gym, GoalPeriod::Daily, 1.0))
      .await
      .unwrap();

    assert!(matches!(
      sv.owned(user.id + 1, goal.id).await,
      Err(Error::GoalNotFound)
    ));
    assert!(matches!(
      sv.delete(user.id + 1, goal.id).await,
      Err(Error::GoalNotFound)
    ));

    // still there for the rightful owner
    assert!(sv.owned(user.id, goal.id).await.is_ok());
  }

  #[tokio::test]
  async fn multiple_goals_per_category_allowed() {
    let db = setup_test_db().await;
    let user = test_user(&db).await;
    let sv = Goal::new(&db);

    sv.create(user.id, new_goal(ActivityType::Gym, GoalPeriod::Weekly, 3.0))
      .await
      .unwrap();
    sv.create(user.id, new_goal(ActivityType::Gym, GoalPeriod::Weekly, 5.0))
      .await
      .unwrap();

    let goals =
      sv.by_activity_type(user.id, ActivityType::Gym).await.unwrap();
    assert_eq!(goals.len(), 2);
  }
}

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::{
  entity::{goal, user},
  migration::Migrator,
  prelude::*,
  sv,
};

/// One mutex per goal id; recomputes for the same goal are serialized so
/// concurrent ingestions never race on the `current_value` read-modify-write.
pub type GoalLocks = DashMap<i64, Arc<Mutex<()>>>;

pub struct Services<'a> {
  pub user: sv::User<'a>,
  pub activity: sv::Activity<'a>,
  pub goal: sv::Goal<'a>,
  pub ledger: sv::Ledger<'a>,
  pub dashboard: sv::Dashboard<'a>,
  pub reminder: sv::Reminder<'a>,
}

pub struct AppState {
  pub db: DatabaseConnection,
  goal_locks: GoalLocks,
}

impl AppState {
  pub async fn new(db_url: &str) -> Self {
    info!("Connecting to database...");
    let db =
      Database::connect(db_url).await.expect("Failed to connect to database");

    info!("Running migrations...");
    Migrator::up(&db, None).await.expect("Failed to run migrations");

    Self { db, goal_locks: DashMap::new() }
  }

  pub fn sv(&self) -> Services<'_> {
    Services {
      user: sv::User::new(&self.db),
      activity: sv::Activity::new(&self.db),
      goal: sv::Goal::new(&self.db),
      ledger: sv::Ledger::new(&self.db),
      dashboard: sv::Dashboard::new(&self.db),
      reminder: sv::Reminder::new(&self.db),
    }
  }

  /// Recompute a goal's derived progress under its per-goal lock.
  pub async fn recompute_goal(
    &self,
    user: &user::Model,
    goal: &goal::Model,
  ) -> Result<f64> {
    let lock = self.goal_locks.entry(goal.id).or_default().clone();
    let _guard = lock.lock().await;

    self.sv().goal.recompute(user, goal).await
  }
}

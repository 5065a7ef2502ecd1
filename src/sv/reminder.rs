//! Pending-goal checks
//!
//! Decides which goals have no progress logged for today; delivery of the
//! actual reminder is someone else's job.

use crate::{
  entity::user,
  period,
  prelude::*,
  sv::{Goal, Ledger},
};

pub struct Reminder<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Reminder<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Goals with a non-positive ledger sum for today in the user's timezone,
  /// rendered as `"<TYPE> · <target>"` lines.
  pub async fn pending(&self, user: &user::Model) -> Result<Vec<String>> {
    let tz = period::user_tz(user.timezone.as_deref());
    let today = Utc::now().with_timezone(&tz).date_naive();

    let ledger = Ledger::new(self.db);
    let mut pending = Vec::new();

    for goal in Goal::new(self.db).list(user.id).await? {
      let today_sum = ledger.sum_in_range(goal.id, today, today).await?;
      if today_sum <= 0.0 {
        pending.push(format!(
          "{} · {}",
          goal.activity_type.to_value(),
          goal.target_value
        ));
      }
    }

    Ok(pending)
  }
}

//! Dashboard aggregation
//!
//! Everything here is recomputed per request from the user's stored
//! activities and goals; only a goal's `current_value` arrives precomputed.

use chrono::Local;
use serde::Serialize;

use crate::{
  entity::{ActivityType, GoalPeriod, RpgStat, activity, goal, user},
  period,
  prelude::*,
  sv::{Activity, Goal},
};

const MILESTONE_HIGH: f64 = 50.0;
const MILESTONE_LOW: f64 = 20.0;

const MILESTONE_HIGH_MESSAGE: &str = "50+ logged — great consistency";
const MILESTONE_LOW_MESSAGE: &str = "20+ milestone reached";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
  pub productivity_score: f64,
  pub breakdown: HashMap<String, f64>,
  pub rpg_stats: StatTotals,
  pub trends: Vec<ActivityTrend>,
  pub streaks: Vec<Streak>,
  pub milestones: Vec<Milestone>,
  pub goals: Vec<GoalProgressView>,
}

/// All six stats, always present, in canonical order.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct StatTotals {
  #[serde(rename = "STR")]
  pub strength: f64,
  #[serde(rename = "DEX")]
  pub dexterity: f64,
  #[serde(rename = "INT")]
  pub intelligence: f64,
  #[serde(rename = "WIS")]
  pub wisdom: f64,
  #[serde(rename = "CHA")]
  pub charisma: f64,
  #[serde(rename = "VIT")]
  pub vitality: f64,
}

impl StatTotals {
  fn add(&mut self, stat: RpgStat, value: f64) {
    match stat {
      RpgStat::Str => self.strength += value,
      RpgStat::Dex => self.dexterity += value,
      RpgStat::Int => self.intelligence += value,
      RpgStat::Wis => self.wisdom += value,
      RpgStat::Cha => self.charisma += value,
      RpgStat::Vit => self.vitality += value,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct ActivityTrend {
  pub label: String,
  pub points: Vec<TrendPoint>,
}

#[derive(Debug, Serialize)]
pub struct TrendPoint {
  pub period: String,
  pub value: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Streak {
  pub activity_type: String,
  pub length: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
  pub activity_type: String,
  pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgressView {
  pub id: i64,
  pub activity_type: ActivityType,
  pub name: String,
  pub period: GoalPeriod,
  pub current_value: f64,
  pub target_value: f64,
  /// fraction of the target reached, clamped to [0, 1]
  pub progress: f64,
  pub unit: Option<String>,
  pub custom_period_days: Option<f64>,
  pub rpg_stat: Option<RpgStat>,
}

pub struct Dashboard<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Dashboard<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn summary(&self, user: &user::Model) -> Result<DashboardSummary> {
    let activities = Activity::new(self.db).all(user.id).await?;
    let goals = Goal::new(self.db).list(user.id).await?;

    let tz = period::user_tz(user.timezone.as_deref());
    let today = Utc::now().with_timezone(&tz).date_naive();

    Ok(build_summary(&activities, &goals, tz, today))
  }
}

/// Assemble the full dashboard from snapshot reads. Pure given its inputs.
pub fn build_summary(
  activities: &[activity::Model],
  goals: &[goal::Model],
  tz: Tz,
  today: Date,
) -> DashboardSummary {
  let totals = type_totals(activities);
  let productivity_score = totals.values().sum();

  let breakdown =
    totals.iter().map(|(ty, value)| (ty.to_value(), *value)).collect();

  DashboardSummary {
    productivity_score,
    breakdown,
    rpg_stats: stat_totals(activities),
    trends: trend_series(activities),
    streaks: streaks(activities, tz, today),
    milestones: milestones(&totals),
    goals: goals.iter().map(goal_view).collect(),
  }
}

fn type_totals(activities: &[activity::Model]) -> HashMap<ActivityType, f64> {
  let mut totals = HashMap::new();
  for activity in activities {
    *totals.entry(activity.activity_type).or_insert(0.0) +=
      activity.contribution();
  }
  totals
}

/// One series per category; points grouped by the server-local calendar
/// day and sorted ascending.
fn trend_series(activities: &[activity::Model]) -> Vec<ActivityTrend> {
  let mut grouped: HashMap<ActivityType, BTreeMap<String, f64>> =
    HashMap::new();

  for activity in activities {
    let day = Utc
      .from_utc_datetime(&activity.occurred_at)
      .with_timezone(&Local)
      .format("%Y-%m-%d")
      .to_string();
    *grouped
      .entry(activity.activity_type)
      .or_default()
      .entry(day)
      .or_insert(0.0) += activity.contribution();
  }

  ActivityType::iter()
    .filter_map(|ty| grouped.remove(&ty).map(|days| (ty, days)))
    .map(|(ty, days)| ActivityTrend {
      label: ty.to_value(),
      points: days
        .into_iter()
        .map(|(period, value)| TrendPoint { period, value })
        .collect(),
    })
    .collect()
}

/// Consecutive days ending today (user timezone) with at least one activity
/// of the category. Zero-length streaks are omitted.
fn streaks(
  activities: &[activity::Model],
  tz: Tz,
  today: Date,
) -> Vec<Streak> {
  let mut days_by_type: HashMap<ActivityType, HashSet<Date>> = HashMap::new();
  for activity in activities {
    let day = Utc
      .from_utc_datetime(&activity.occurred_at)
      .with_timezone(&tz)
      .date_naive();
    days_by_type.entry(activity.activity_type).or_default().insert(day);
  }

  ActivityType::iter()
    .filter_map(|ty| {
      let days = days_by_type.get(&ty)?;
      let length = streak_length(days, today);
      (length > 0)
        .then(|| Streak { activity_type: ty.to_value(), length })
    })
    .collect()
}

/// Walk backward from `today` until the first missing day.
pub fn streak_length(days: &HashSet<Date>, today: Date) -> u32 {
  let mut length = 0;
  let mut cursor = today;
  while days.contains(&cursor) {
    length += 1;
    cursor = cursor - TimeDelta::days(1);
  }
  length
}

fn milestones(totals: &HashMap<ActivityType, f64>) -> Vec<Milestone> {
  ActivityType::iter()
    .filter_map(|ty| {
      let total = *totals.get(&ty)?;
      let message = if total >= MILESTONE_HIGH {
        MILESTONE_HIGH_MESSAGE
      } else if total >= MILESTONE_LOW {
        MILESTONE_LOW_MESSAGE
      } else {
        return None;
      };
      Some(Milestone {
        activity_type: ty.to_value(),
        message: message.to_string(),
      })
    })
    .collect()
}

fn stat_totals(activities: &[activity::Model]) -> StatTotals {
  let mut totals = StatTotals::default();
  for activity in activities {
    totals.add(activity.stat(), activity.contribution());
  }
  totals
}

fn goal_view(goal: &goal::Model) -> GoalProgressView {
  let progress = if goal.target_value > 0.0 {
    (goal.current_value / goal.target_value).min(1.0)
  } else {
    0.0
  };

  GoalProgressView {
    id: goal.id,
    activity_type: goal.activity_type,
    name: goal.name.clone(),
    period: goal.period,
    current_value: goal.current_value,
    target_value: goal.target_value,
    progress,
    unit: goal.unit.clone(),
    custom_period_days: goal.custom_period_days,
    rpg_stat: goal.rpg_stat,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(day: u32) -> Date {
    Date::from_ymd_opt(2026, 8, day).unwrap()
  }

  fn activity_on(
    ty: ActivityType,
    value: Option<f64>,
    day: u32,
  ) -> activity::Model {
    activity::Model {
      id: 0,
      user_id: 1,
      activity_type: ty,
      rpg_stat: None,
      description: None,
      value,
      metadata: None,
      platform: None,
      repository: None,
      difficulty: None,
      time_spent_minutes: None,
      sets_completed: None,
      reps_completed: None,
      likes: None,
      comments: None,
      shares: None,
      occurred_at: Utc
        .with_ymd_and_hms(2026, 8, day, 12, 0, 0)
        .unwrap()
        .naive_utc(),
    }
  }

  fn goal_with(current: f64, target: f64) -> goal::Model {
    goal::Model {
      id: 1,
      user_id: 1,
      activity_type: ActivityType::Study,
      name: "study".into(),
      period: GoalPeriod::Weekly,
      rpg_stat: None,
      target_value: target,
      custom_period_days: None,
      unit: None,
      current_value: current,
      start_date: None,
      end_date: None,
      created_at: Utc::now().naive_utc(),
    }
  }

  #[test]
  fn three_consecutive_gym_days_give_streak_three() {
    let activities = vec![
      activity_on(ActivityType::Gym, None, 18),
      activity_on(ActivityType::Gym, None, 19),
      activity_on(ActivityType::Gym, None, 20),
    ];

    let summary = build_summary(&activities, &[], Tz::UTC, date(20));

    assert_eq!(summary.streaks.len(), 1);
    assert_eq!(summary.streaks[0].activity_type, "GYM");
    assert_eq!(summary.streaks[0].length, 3);
    assert_eq!(summary.breakdown["GYM"], 3.0);
    assert_eq!(summary.productivity_score, 3.0);
  }

  #[test]
  fn streak_stops_at_first_gap() {
    let days: HashSet<Date> =
      [date(20), date(19), date(18), date(16)].into_iter().collect();

    // 17th is missing, so the 16th never counts
    assert_eq!(streak_length(&days, date(20)), 3);
  }

  #[test]
  fn streak_without_today_is_omitted() {
    let activities = vec![activity_on(ActivityType::Study, None, 18)];
    let summary = build_summary(&activities, &[], Tz::UTC, date(20));

    assert!(summary.streaks.is_empty());
  }

  #[test]
  fn milestones_use_fixed_thresholds() {
    let activities = vec![
      activity_on(ActivityType::Gym, Some(55.0), 20),
      activity_on(ActivityType::Study, Some(20.0), 20),
      activity_on(ActivityType::Dsa, Some(19.0), 20),
    ];

    let summary = build_summary(&activities, &[], Tz::UTC, date(20));

    assert_eq!(summary.milestones.len(), 2);
    let by_type: HashMap<_, _> = summary
      .milestones
      .iter()
      .map(|m| (m.activity_type.as_str(), m.message.as_str()))
      .collect();
    assert_eq!(by_type["GYM"], MILESTONE_HIGH_MESSAGE);
    assert_eq!(by_type["STUDY"], MILESTONE_LOW_MESSAGE);
    assert!(!by_type.contains_key("DSA"));
  }

  #[test]
  fn untagged_commit_feeds_dexterity_only() {
    let activities =
      vec![activity_on(ActivityType::GithubCommits, Some(4.0), 20)];

    let summary = build_summary(&activities, &[], Tz::UTC, date(20));

    assert_eq!(
      summary.rpg_stats,
      StatTotals { dexterity: 4.0, ..Default::default() }
    );
  }

  #[test]
  fn explicit_stat_tag_wins_over_default() {
    let mut activity = activity_on(ActivityType::Gym, Some(2.0), 20);
    activity.rpg_stat = Some(RpgStat::Wis);

    let summary = build_summary(&[activity], &[], Tz::UTC, date(20));

    assert_eq!(summary.rpg_stats.wisdom, 2.0);
    assert_eq!(summary.rpg_stats.strength, 0.0);
  }

  #[test]
  fn stats_serialize_in_canonical_order() {
    let encoded = json::to_string(&StatTotals::default()).unwrap();
    let keys: Vec<&str> =
      ["STR", "DEX", "INT", "WIS", "CHA", "VIT"].to_vec();

    let mut last = 0;
    for key in keys {
      let pos = encoded.find(key).unwrap();
      assert!(pos > last, "{key} out of order in {encoded}");
      last = pos;
    }
  }

  #[test]
  fn trend_points_are_sorted_by_day() {
    let activities = vec![
      activity_on(ActivityType::Study, Some(2.0), 19),
      activity_on(ActivityType::Study, Some(1.0), 17),
      activity_on(ActivityType::Study, Some(3.0), 19),
    ];

    let summary = build_summary(&activities, &[], Tz::UTC, date(20));

    assert_eq!(summary.trends.len(), 1);
    let points = &summary.trends[0].points;
    assert_eq!(points.len(), 2);
    assert!(points[0].period < points[1].period);
    // contributions on the same day accumulate
    assert_eq!(points[1].value, 5.0);
  }

  #[test]
  fn goal_progress_fraction_is_clamped() {
    let goals = vec![
      goal_with(3.0, 5.0),
      goal_with(12.0, 5.0),
      goal_with(3.0, 0.0),
    ];

    let summary = build_summary(&[], &goals, Tz::UTC, date(20));

    assert_eq!(summary.goals[0].progress, 0.6);
    assert_eq!(summary.goals[1].progress, 1.0);
    assert_eq!(summary.goals[2].progress, 0.0);
  }
}

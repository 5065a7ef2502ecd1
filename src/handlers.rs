//! HTTP handlers and wire DTOs
//!
//! Identity is resolved upstream; requests carry an `x-user-id` header that
//! must map to a stored account, otherwise the call is rejected before any
//! user-scoped work happens.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::HeaderMap,
};
use chrono::DateTime as ChronoDateTime;
use serde::{Deserialize, Serialize};

use crate::{
  entity::{ActivityType, GoalPeriod, RpgStat, activity, goal, user},
  period,
  prelude::*,
  state::AppState,
  sv::{
    activity::NewActivity,
    dashboard::DashboardSummary,
    goal::NewGoal,
    user::{NewUser, ProfileUpdate},
  },
};

const USER_ID_HEADER: &str = "x-user-id";

async fn current_user(
  app: &AppState,
  headers: &HeaderMap,
) -> Result<user::Model> {
  let id: i64 = headers
    .get(USER_ID_HEADER)
    .and_then(|value| value.to_str().ok())
    .and_then(|value| value.parse().ok())
    .ok_or(Error::Unauthenticated)?;

  app.sv().user.by_id(id).await?.ok_or(Error::Unauthenticated)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
  pub id: i64,
  pub name: String,
  pub email: String,
  pub timezone: Option<String>,
  pub notifications_enabled: bool,
  pub weekly_email_enabled: bool,
  pub tracked_activities: Option<json::Value>,
}

impl From<user::Model> for ProfileResponse {
  fn from(user: user::Model) -> Self {
    Self {
      id: user.id,
      name: user.name,
      email: user.email,
      timezone: user.timezone,
      notifications_enabled: user.notifications_enabled,
      weekly_email_enabled: user.weekly_email_enabled,
      tracked_activities: user.tracked_activities,
    }
  }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
  pub id: i64,
  #[serde(rename = "type")]
  pub activity_type: ActivityType,
  pub rpg_stat: Option<RpgStat>,
  pub description: Option<String>,
  pub value: Option<f64>,
  pub metadata: Option<String>,
  pub occurred_at: ChronoDateTime<Utc>,
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

impl From<activity::Model> for ActivityResponse {
  fn from(activity: activity::Model) -> Self {
    Self {
      id: activity.id,
      activity_type: activity.activity_type,
      rpg_stat: activity.rpg_stat,
      description: activity.description,
      value: activity.value,
      metadata: activity.metadata,
      occurred_at: Utc.from_utc_datetime(&activity.occurred_at),
      platform: activity.platform,
      repository: activity.repository,
      difficulty: activity.difficulty,
      time_spent_minutes: activity.time_spent_minutes,
      sets_completed: activity.sets_completed,
      reps_completed: activity.reps_completed,
      likes: activity.likes,
      comments: activity.comments,
      shares: activity.shares,
    }
  }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalResponse {
  pub id: i64,
  pub activity_type: ActivityType,
  pub period: GoalPeriod,
  pub target_value: f64,
  pub current_value: f64,
  pub name: String,
  pub unit: Option<String>,
  pub custom_period_days: Option<f64>,
  pub start_date: Option<Date>,
  pub end_date: Option<Date>,
  pub rpg_stat: Option<RpgStat>,
}

impl From<goal::Model> for GoalResponse {
  fn from(goal: goal::Model) -> Self {
    Self {
      id: goal.id,
      activity_type: goal.activity_type,
      period: goal.period,
      target_value: goal.target_value,
      current_value: goal.current_value,
      name: goal.name,
      unit: goal.unit,
      custom_period_days: goal.custom_period_days,
      start_date: goal.start_date,
      end_date: goal.end_date,
      rpg_stat: goal.rpg_stat,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct GoalHistoryResponse {
  pub date: Date,
  pub value: f64,
}

pub async fn register(
  State(app): State<Arc<AppState>>,
  Json(req): Json<NewUser>,
) -> Result<Json<ProfileResponse>> {
  let user = app.sv().user.register(req).await?;
  info!(user = user.id, "registered account");
  Ok(Json(user.into()))
}

pub async fn profile(
  State(app): State<Arc<AppState>>,
  headers: HeaderMap,
) -> Result<Json<ProfileResponse>> {
  let user = current_user(&app, &headers).await?;
  Ok(Json(user.into()))
}

pub async fn update_profile(
  State(app): State<Arc<AppState>>,
  headers: HeaderMap,
  Json(req): Json<ProfileUpdate>,
) -> Result<Json<ProfileResponse>> {
  let user = current_user(&app, &headers).await?;
  let updated = app.sv().user.update_profile(user, req).await?;
  Ok(Json(updated.into()))
}

pub async fn create_activity(
  State(app): State<Arc<AppState>>,
  headers: HeaderMap,
  Json(req): Json<NewActivity>,
) -> Result<Json<ActivityResponse>> {
  let user = current_user(&app, &headers).await?;
  let activity = app.sv().activity.create(user.id, req).await?;

  // every goal tracking this category picks the new fact up immediately
  let goals = app
    .sv()
    .goal
    .by_activity_type(user.id, activity.activity_type)
    .await?;
  for goal in &goals {
    app.recompute_goal(&user, goal).await?;
  }

  Ok(Json(activity.into()))
}

pub async fn recent_activities(
  State(app): State<Arc<AppState>>,
  headers: HeaderMap,
) -> Result<Json<Vec<ActivityResponse>>> {
  let user = current_user(&app, &headers).await?;
  let activities = app.sv().activity.recent(user.id).await?;
  Ok(Json(activities.into_iter().map(Into::into).collect()))
}

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
  #[serde(default = "default_feed_limit")]
  pub limit: u64,
}

fn default_feed_limit() -> u64 {
  20
}

pub async fn activity_feed(
  State(app): State<Arc<AppState>>,
  headers: HeaderMap,
  Query(query): Query<FeedQuery>,
) -> Result<Json<Vec<ActivityResponse>>> {
  let user = current_user(&app, &headers).await?;
  let activities = app.sv().activity.feed(user.id, query.limit).await?;
  Ok(Json(activities.into_iter().map(Into::into).collect()))
}

#[derive(Debug, Deserialize)]
pub struct TypeQuery {
  #[serde(rename = "type")]
  pub activity_type: ActivityType,
}

pub async fn activities_by_type(
  State(app): State<Arc<AppState>>,
  headers: HeaderMap,
  Query(query): Query<TypeQuery>,
) -> Result<Json<Vec<ActivityResponse>>> {
  let user = current_user(&app, &headers).await?;
  let activities =
    app.sv().activity.by_type(user.id, query.activity_type).await?;
  Ok(Json(activities.into_iter().map(Into::into).collect()))
}

pub async fn create_goal(
  State(app): State<Arc<AppState>>,
  headers: HeaderMap,
  Json(req): Json<NewGoal>,
) -> Result<Json<GoalResponse>> {
  let user = current_user(&app, &headers).await?;
  let goal = app.sv().goal.create(user.id, req).await?;
  let current_value = app.recompute_goal(&user, &goal).await?;

  Ok(Json(goal::Model { current_value, ..goal }.into()))
}

pub async fn list_goals(
  State(app): State<Arc<AppState>>,
  headers: HeaderMap,
) -> Result<Json<Vec<GoalResponse>>> {
  let user = current_user(&app, &headers).await?;
  let goals = app.sv().goal.list(user.id).await?;
  Ok(Json(goals.into_iter().map(Into::into).collect()))
}

pub async fn delete_goal(
  State(app): State<Arc<AppState>>,
  headers: HeaderMap,
  Path(id): Path<i64>,
) -> Result<()> {
  let user = current_user(&app, &headers).await?;
  app.sv().goal.delete(user.id, id).await
}

pub async fn goal_history(
  State(app): State<Arc<AppState>>,
  headers: HeaderMap,
  Path(id): Path<i64>,
) -> Result<Json<Vec<GoalHistoryResponse>>> {
  let user = current_user(&app, &headers).await?;
  let goal = app.sv().goal.owned(user.id, id).await?;

  let entries = app.sv().ledger.recent(goal.id, 14).await?;
  Ok(Json(
    entries
      .into_iter()
      .map(|entry| GoalHistoryResponse { date: entry.date, value: entry.value })
      .collect(),
  ))
}

#[derive(Debug, Deserialize)]
pub struct SetProgressReq {
  pub date: Option<Date>,
  pub value: f64,
}

pub async fn set_goal_progress(
  State(app): State<Arc<AppState>>,
  headers: HeaderMap,
  Path(id): Path<i64>,
  Json(req): Json<SetProgressReq>,
) -> Result<Json<GoalHistoryResponse>> {
  let user = current_user(&app, &headers).await?;
  let goal = app.sv().goal.owned(user.id, id).await?;

  let tz = period::user_tz(user.timezone.as_deref());
  let date = req
    .date
    .unwrap_or_else(|| Utc::now().with_timezone(&tz).date_naive());

  let saved = app.sv().ledger.set_progress(goal.id, date, req.value).await?;
  app.recompute_goal(&user, &goal).await?;

  Ok(Json(GoalHistoryResponse { date: saved.date, value: saved.value }))
}

pub async fn dashboard(
  State(app): State<Arc<AppState>>,
  headers: HeaderMap,
) -> Result<Json<DashboardSummary>> {
  let user = current_user(&app, &headers).await?;
  let summary = app.sv().dashboard.summary(&user).await?;
  Ok(Json(summary))
}

pub async fn pending_reminders(
  State(app): State<Arc<AppState>>,
  headers: HeaderMap,
) -> Result<Json<Vec<String>>> {
  let user = current_user(&app, &headers).await?;
  let pending = app.sv().reminder.pending(&user).await?;
  Ok(Json(pending))
}

pub async fn health() -> &'static str {
  "OK"
}

//! Life Dashboard Server - activity logging and goal progress tracking
//!
//! Architecture:
//! - SeaORM for database access (SQLite)
//! - Axum for HTTP API with rate limiting
//! - Tokio for async runtime
//! - Pure window/streak/milestone algorithms under src/period.rs and src/sv

mod entity;
mod error;
mod handlers;
mod migration;
mod period;
mod prelude;
mod state;
mod sv;

use std::{env, net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;

use axum::{
  Router,
  routing::{delete, get, post},
};
use tower::ServiceBuilder;
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder};
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};
use tracing_subscriber::{
  EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::{prelude::*, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
      "lifeboard=debug,tower_http=debug,sea_orm=warn".into()
    }))
    .with(tracing_subscriber::fmt::layer())
    .init();

  let db_url = env::var("DATABASE_URL")
    .unwrap_or_else(|_| "sqlite:lifeboard.db?mode=rwc".into());

  info!("Starting Life Dashboard Server v{}", env!("CARGO_PKG_VERSION"));

  let app_state = Arc::new(AppState::new(&db_url).await);

  // Configure rate limiting (100 requests per minute per IP)
  let governor_conf = Arc::new(
    GovernorConfigBuilder::default()
      .per_second(2)
      .burst_size(100)
      .finish()
      .context("Failed to build rate limiter config")?,
  );

  let governor_limiter = governor_conf.limiter().clone();

  // Spawn rate limiter cleanup task
  tokio::spawn(async move {
    loop {
      tokio::time::sleep(Duration::from_secs(60)).await;
      governor_limiter.retain_recent();
    }
  });

  let app = Router::new()
    .route("/api/users", post(handlers::register))
    .route(
      "/api/profile",
      get(handlers::profile).put(handlers::update_profile),
    )
    .route(
      "/api/activities",
      post(handlers::create_activity).get(handlers::recent_activities),
    )
    .route("/api/activities/feed", get(handlers::activity_feed))
    .route("/api/activities/by-type", get(handlers::activities_by_type))
    .route(
      "/api/goals",
      post(handlers::create_goal).get(handlers::list_goals),
    )
    .route("/api/goals/{id}", delete(handlers::delete_goal))
    .route(
      "/api/goals/{id}/history",
      get(handlers::goal_history).post(handlers::set_goal_progress),
    )
    .route("/api/dashboard", get(handlers::dashboard))
    .route("/api/reminders/pending", get(handlers::pending_reminders))
    .route("/health", get(handlers::health))
    .layer(
      ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(GovernorLayer::new(governor_conf))
        .layer(
          CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        ),
    )
    .with_state(app_state)
    .into_make_service_with_connect_info::<SocketAddr>();

  let port: u16 =
    env::var("PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(3000);
  let addr = SocketAddr::from(([0, 0, 0, 0], port));

  info!("HTTP server listening on {addr}");

  let listener = tokio::net::TcpListener::bind(addr)
    .await
    .with_context(|| format!("Failed to bind {addr}"))?;
  axum::serve(listener, app).await.context("Server error")?;

  Ok(())
}

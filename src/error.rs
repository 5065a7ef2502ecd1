//! Error types for the dashboard server

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] sea_orm::DbErr),

  #[error("goal not found")]
  GoalNotFound,

  #[error("email already registered")]
  EmailTaken,

  #[error("unauthenticated")]
  Unauthenticated,
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      Error::Database(err) => {
        error!("database error: {err}");
        (StatusCode::INTERNAL_SERVER_ERROR, "Database error")
      }
      Error::GoalNotFound => (StatusCode::NOT_FOUND, "Goal not found"),
      Error::EmailTaken => (StatusCode::CONFLICT, "Email already registered"),
      Error::Unauthenticated => (StatusCode::UNAUTHORIZED, "Unauthorized"),
    };

    let body = json::json!({
      "success": false,
      "error": message
    });

    (status, Json(body)).into_response()
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

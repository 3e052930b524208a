//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("request timed out")]
  Timeout,

  /// One side of a friendship toggle was saved and the other was not.
  #[error("{0}")]
  PartialWrite(String),

  /// A server-side failure unrelated to the store.
  #[error("internal error: {0}")]
  Internal(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<mingle_core::Error> for ApiError {
  fn from(e: mingle_core::Error) -> Self {
    use mingle_core::Error as E;
    match e {
      E::UserNotFound(id) => ApiError::NotFound(format!("user {id} not found")),
      E::SelfFriendship(_) => ApiError::BadRequest(e.to_string()),
      E::PartialWrite { .. } => ApiError::PartialWrite(e.to_string()),
      E::Store(source) => ApiError::Store(source),
    }
  }
}

impl From<PathRejection> for ApiError {
  fn from(r: PathRejection) -> Self { ApiError::BadRequest(r.body_text()) }
}

impl From<JsonRejection> for ApiError {
  fn from(r: JsonRejection) -> Self { ApiError::BadRequest(r.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Timeout => (StatusCode::REQUEST_TIMEOUT, self.to_string()),
      ApiError::PartialWrite(m) => (StatusCode::INTERNAL_SERVER_ERROR, m.clone()),
      ApiError::Internal(m) => {
        tracing::error!(error = %m, "internal failure");
        (StatusCode::INTERNAL_SERVER_ERROR, m.clone())
      }
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  async fn body_of(e: ApiError) -> (StatusCode, serde_json::Value) {
    let resp = e.into_response();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
  }

  #[tokio::test]
  async fn internal_is_500_without_blaming_the_store() {
    let (status, body) =
      body_of(ApiError::Internal("argon2 error: bad params".into())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let msg = body["error"].as_str().unwrap();
    assert!(msg.contains("argon2"));
    assert!(!msg.contains("store"));
  }

  #[tokio::test]
  async fn timeout_is_408_with_error_payload() {
    let (status, body) = body_of(ApiError::Timeout).await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(body["error"], "request timed out");
  }
}

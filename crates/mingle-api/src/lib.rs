//! JSON REST API for Mingle.
//!
//! Exposes an axum [`Router`] backed by a [`FriendService`] over any
//! [`UserStore`]. Auth, TLS, and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .merge(mingle_api::api_router(Arc::new(FriendService::new(store))))
//! ```

pub mod auth;
pub mod error;
pub mod extract;
pub mod users;

use std::{sync::Arc, time::Duration};

use axum::{
  Router,
  http::StatusCode,
  middleware,
  response::{IntoResponse, Response},
  routing::{get, patch, post},
};
use mingle_core::{FriendService, store::UserStore};
use tower_http::timeout::TimeoutLayer;

pub use error::ApiError;

/// Build the API router for `service`.
///
/// The returned `Router<()>` can be merged into any parent router regardless
/// of its own state type.
pub fn api_router<S>(service: Arc<FriendService<S>>) -> Router<()>
where
  S: UserStore + 'static,
{
  Router::new()
    // Accounts
    .route("/auth/register", post(auth::register::<S>))
    // Users and friendships
    .route("/users/{id}", get(users::get_one::<S>))
    .route("/users/{id}/friends", get(users::friends::<S>))
    .route("/users/{id}/{friend_id}", patch(users::toggle_friend::<S>))
    .with_state(service)
}

/// Abort requests running longer than `timeout`, answering 408 with the
/// usual `{"error": ...}` payload. Dropping the handler future cancels any
/// store reads it still has in flight.
pub fn with_request_timeout(router: Router, timeout: Duration) -> Router {
  router
    .layer(TimeoutLayer::new(timeout))
    .layer(middleware::map_response(timeout_body))
}

async fn timeout_body(resp: Response) -> Response {
  if resp.status() == StatusCode::REQUEST_TIMEOUT {
    return ApiError::Timeout.into_response();
  }
  resp
}

// ─── Integration tests ────────────────────────────────────────────────────────

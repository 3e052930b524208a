//! Handlers for `/users` endpoints.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `GET`   | `/users/:id` | Full user document; 404 if not found |
//! | `GET`   | `/users/:id/friends` | Friend projections in stored order |
//! | `PATCH` | `/users/:id/:friend_id` | Toggle the friendship; returns `:id`'s friend list |

use std::sync::Arc;

use axum::{Json, extract::State};
use mingle_core::{
  FriendService,
  store::UserStore,
  user::{FriendProjection, User},
};
use uuid::Uuid;

use crate::{error::ApiError, extract::Path};

/// `GET /users/:id`
pub async fn get_one<S>(
  State(service): State<Arc<FriendService<S>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<User>, ApiError>
where
  S: UserStore,
{
  Ok(Json(service.get_user(id).await?))
}

/// `GET /users/:id/friends`
pub async fn friends<S>(
  State(service): State<Arc<FriendService<S>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<FriendProjection>>, ApiError>
where
  S: UserStore,
{
  Ok(Json(service.list_friends(id).await?))
}

/// `PATCH /users/:id/:friend_id`
pub async fn toggle_friend<S>(
  State(service): State<Arc<FriendService<S>>>,
  Path((id, friend_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Vec<FriendProjection>>, ApiError>
where
  S: UserStore,
{
  Ok(Json(service.toggle_friend(id, friend_id).await?))
}

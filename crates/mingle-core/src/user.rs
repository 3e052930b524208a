//! The `User` document and its friend-list projection.
//!
//! A user's `friends` field is stored as an ordered sequence but treated as a
//! set: insertion order is kept for display, duplicates are never written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── User ────────────────────────────────────────────────────────────────────

/// A stored user document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub id:            Uuid,
  pub first_name:    String,
  pub last_name:     String,
  pub email:         String,
  /// argon2 PHC string. Never leaves the server.
  #[serde(skip_serializing, default)]
  pub password_hash: String,
  pub picture_path:  String,
  /// Ids of befriended users, in the order the edges were created.
  pub friends:       Vec<Uuid>,
  pub location:      Option<String>,
  pub occupation:    Option<String>,
  pub created_at:    DateTime<Utc>,
  pub updated_at:    DateTime<Utc>,
}

impl User {
  pub fn is_friend(&self, id: Uuid) -> bool { self.friends.contains(&id) }

  /// Add `id` to the friend set. Returns `false` if it was already present.
  pub fn add_friend(&mut self, id: Uuid) -> bool {
    if self.is_friend(id) {
      return false;
    }
    self.friends.push(id);
    true
  }

  /// Remove every occurrence of `id`. Returns `false` if it was absent.
  pub fn remove_friend(&mut self, id: Uuid) -> bool {
    let before = self.friends.len();
    self.friends.retain(|f| *f != id);
    self.friends.len() != before
  }

  pub fn projection(&self) -> FriendProjection { FriendProjection::from(self) }
}

// ─── NewUser ─────────────────────────────────────────────────────────────────

/// Input to [`crate::store::UserStore::insert_user`].
/// `id`, timestamps, and the empty friend set are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub first_name:    String,
  pub last_name:     String,
  pub email:         String,
  pub password_hash: String,
  pub picture_path:  String,
  pub location:      Option<String>,
  pub occupation:    Option<String>,
}

// ─── FriendProjection ────────────────────────────────────────────────────────

/// The public face of a user inside someone else's friend list.
///
/// Carries exactly the fields below; credentials, email, and the user's own
/// friend graph are never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendProjection {
  pub id:           Uuid,
  pub first_name:   String,
  pub last_name:    String,
  pub occupation:   Option<String>,
  pub location:     Option<String>,
  pub picture_path: String,
}

impl From<&User> for FriendProjection {
  fn from(u: &User) -> Self {
    Self {
      id:           u.id,
      first_name:   u.first_name.clone(),
      last_name:    u.last_name.clone(),
      occupation:   u.occupation.clone(),
      location:     u.location.clone(),
      picture_path: u.picture_path.clone(),
    }
  }
}

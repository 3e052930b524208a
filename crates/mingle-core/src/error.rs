//! Error types for `mingle-core`.

use thiserror::Error;
use uuid::Uuid;

/// A boxed store-level failure, erased from the backend's concrete type.
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("user not found: {0}")]
  UserNotFound(Uuid),

  #[error("user {0} cannot befriend themselves")]
  SelfFriendship(Uuid),

  #[error("store error: {0}")]
  Store(#[source] StoreError),

  /// The first side of a toggle was persisted and the second was not, so the
  /// edge between the two users is now asymmetric.
  #[error(
    "friendship {user_id} <-> {friend_id} is half-written: {user_id} was \
     saved but saving {friend_id} failed: {source}"
  )]
  PartialWrite {
    user_id:   Uuid,
    friend_id: Uuid,
    #[source]
    source:    StoreError,
  },
}

impl Error {
  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

//! The `UserStore` trait.
//!
//! Implemented by storage backends (e.g. `mingle-store-sqlite`). The store is
//! the single source of truth; [`crate::FriendService`] keeps no state of its
//! own between calls.

use std::future::Future;

use uuid::Uuid;

use crate::user::{NewUser, User};

/// Abstraction over a document store holding user documents.
///
/// No multi-document transactions are assumed: every method touches exactly
/// one document.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait UserStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Create and persist a new user. Returns `None` if the email is already
  /// registered.
  fn insert_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// Retrieve a user by id. Returns `None` if not found.
  fn find_by_id(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// Overwrite the stored document with `user`'s profile and friend set.
  ///
  /// Returns an error if no document with `user.id` exists.
  fn save<'a>(
    &'a self,
    user: &'a User,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

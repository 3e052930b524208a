//! [`FriendService`] — lookup, friend-list projection, and the symmetric
//! friendship toggle.
//!
//! A friendship is an undirected edge stored twice: `B ∈ A.friends` and
//! `A ∈ B.friends`. The store does not enforce that symmetry; this service is
//! the only writer of the `friends` field and always flips both sides.

use std::sync::Arc;

use futures_util::future::join_all;
use uuid::Uuid;

use crate::{
  Error, Result,
  lock::KeyedLocks,
  store::UserStore,
  user::{FriendProjection, User},
};

pub struct FriendService<S> {
  store: Arc<S>,
  locks: KeyedLocks,
}

impl<S: UserStore> FriendService<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self { store, locks: KeyedLocks::new() }
  }

  /// The backing store, for collaborators outside the friend graph
  /// (registration and the like).
  pub fn store(&self) -> &Arc<S> { &self.store }

  /// Fetch the full stored document for `id`.
  pub async fn get_user(&self, id: Uuid) -> Result<User> {
    self
      .store
      .find_by_id(id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::UserNotFound(id))
  }

  /// Project every resolvable friend of `id`, in stored order.
  ///
  /// A missing `id` is [`Error::UserNotFound`]. Friend ids that no longer
  /// resolve are skipped.
  pub async fn list_friends(&self, id: Uuid) -> Result<Vec<FriendProjection>> {
    let user = self.get_user(id).await?;
    self.project_friends(&user).await
  }

  /// Create the edge between `user_id` and `friend_id` if it is absent,
  /// remove it if it is present, and return `user_id`'s resulting friend list.
  ///
  /// Both documents must exist. Their writes are sequential and not
  /// transactional; when the second one fails the edge is left asymmetric and
  /// [`Error::PartialWrite`] is returned.
  pub async fn toggle_friend(
    &self,
    user_id: Uuid,
    friend_id: Uuid,
  ) -> Result<Vec<FriendProjection>> {
    if user_id == friend_id {
      return Err(Error::SelfFriendship(user_id));
    }

    let guard = self.locks.lock_pair(user_id, friend_id).await;

    let (mut user, mut friend) = tokio::try_join!(
      self.get_user(user_id),
      self.get_user(friend_id)
    )?;

    let removing = user.is_friend(friend_id);
    if removing {
      user.remove_friend(friend_id);
      friend.remove_friend(user_id);
    } else {
      user.add_friend(friend_id);
      friend.add_friend(user_id);
    }

    self.store.save(&user).await.map_err(Error::store)?;
    if let Err(e) = self.store.save(&friend).await {
      tracing::error!(
        saved = %user_id,
        failed = %friend_id,
        removing,
        error = %e,
        "friendship toggle half-written; edge is now asymmetric"
      );
      return Err(Error::PartialWrite {
        user_id,
        friend_id,
        source: Box::new(e),
      });
    }
    drop(guard);

    tracing::debug!(
      %user_id,
      %friend_id,
      action = if removing { "removed" } else { "added" },
      "friendship toggled"
    );

    self.project_friends(&user).await
  }

  /// Fetch every friend of `user` concurrently and project them in the order
  /// of `user.friends`, dropping dangling ids.
  async fn project_friends(&self, user: &User) -> Result<Vec<FriendProjection>> {
    let fetched =
      join_all(user.friends.iter().map(|id| self.store.find_by_id(*id))).await;

    let mut projections = Vec::with_capacity(fetched.len());
    for (id, result) in user.friends.iter().zip(fetched) {
      match result.map_err(Error::store)? {
        Some(friend) => projections.push(friend.projection()),
        None => tracing::warn!(
          user_id = %user.id,
          friend_id = %id,
          "skipping dangling friend reference"
        ),
      }
    }
    Ok(projections)
  }
}

//! Per-user async locks.
//!
//! A toggle rewrites two user documents. Holding the lock for both ids keeps
//! concurrent toggles that share a user from interleaving their
//! read-modify-write cycles inside one process. Locks are always taken in
//! ascending id order so two toggles over the same pair cannot deadlock.

use std::{
  collections::HashMap,
  sync::{Arc, Mutex, PoisonError},
};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct KeyedLocks {
  slots: Mutex<HashMap<Uuid, Arc<AsyncMutex<()>>>>,
}

impl KeyedLocks {
  pub fn new() -> Self { Self::default() }

  /// Wait until both `a` and `b` are held by the caller.
  ///
  /// The returned guard exists before the first wait, so a cancelled call
  /// still releases and prunes whatever it touched.
  pub async fn lock_pair(&self, a: Uuid, b: Uuid) -> PairGuard<'_> {
    let mut ids = [a, b];
    ids.sort();

    let mut pair = PairGuard {
      locks:   self,
      touched: Vec::with_capacity(2),
      guards:  Vec::with_capacity(2),
    };
    for id in ids {
      if pair.touched.contains(&id) {
        continue;
      }
      pair.touched.push(id);
      let slot = self.slot(id);
      pair.guards.push(slot.lock_owned().await);
    }

    pair
  }

  /// Number of ids with a live lock slot.
  pub fn len(&self) -> usize { self.slots().len() }

  pub fn is_empty(&self) -> bool { self.len() == 0 }

  fn slot(&self, id: Uuid) -> Arc<AsyncMutex<()>> {
    self.slots().entry(id).or_default().clone()
  }

  fn slots(
    &self,
  ) -> std::sync::MutexGuard<'_, HashMap<Uuid, Arc<AsyncMutex<()>>>> {
    self.slots.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

/// Held locks for one toggle. Slots nobody else is waiting on are pruned on
/// drop.
pub struct PairGuard<'a> {
  locks:   &'a KeyedLocks,
  /// Every id whose slot this guard created or cloned, held or not.
  touched: Vec<Uuid>,
  guards:  Vec<OwnedMutexGuard<()>>,
}

impl Drop for PairGuard<'_> {
  fn drop(&mut self) {
    self.guards.clear();

    let mut slots = self.locks.slots();
    for id in self.touched.drain(..) {
      // Clones only happen under `slots`, so a count of 1 means idle.
      if slots.get(&id).is_some_and(|s| Arc::strong_count(s) == 1) {
        slots.remove(&id);
      }
    }
  }
}

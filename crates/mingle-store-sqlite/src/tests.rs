//! Integration tests for `SqliteStore` against an in-memory database.

use std::sync::Arc;

use mingle_core::{
  FriendService,
  store::UserStore,
  user::{NewUser, User},
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_user(first_name: &str) -> NewUser {
  NewUser {
    first_name:    first_name.into(),
    last_name:     "Liddell".into(),
    email:         format!("{}@example.com", first_name.to_lowercase()),
    password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
    picture_path:  format!("{first_name}.jpg"),
    location:      Some("Oxford".into()),
    occupation:    None,
  }
}

async fn add(s: &SqliteStore, first_name: &str) -> User {
  s.insert_user(new_user(first_name)).await.unwrap().unwrap()
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_find_user() {
  let s = store().await;

  let user = add(&s, "Alice").await;
  assert!(user.friends.is_empty());

  let fetched = s.find_by_id(user.id).await.unwrap().unwrap();
  assert_eq!(fetched.id, user.id);
  assert_eq!(fetched.first_name, "Alice");
  assert_eq!(fetched.email, "alice@example.com");
  assert_eq!(fetched.password_hash, user.password_hash);
  assert_eq!(fetched.location.as_deref(), Some("Oxford"));
  assert_eq!(fetched.occupation, None);
  assert_eq!(fetched.created_at, user.created_at);
}

#[tokio::test]
async fn find_missing_returns_none() {
  let s = store().await;
  let result = s.find_by_id(Uuid::new_v4()).await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
  let s = store().await;
  add(&s, "Alice").await;

  let second = s.insert_user(new_user("Alice")).await.unwrap();
  assert!(second.is_none());
}

#[tokio::test]
async fn save_persists_friends_in_order() {
  let s = store().await;
  let mut alice = add(&s, "Alice").await;
  let (b, c, d) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
  alice.friends = vec![c, b, d];
  alice.occupation = Some("Explorer".into());

  s.save(&alice).await.unwrap();

  let fetched = s.find_by_id(alice.id).await.unwrap().unwrap();
  assert_eq!(fetched.friends, vec![c, b, d]);
  assert_eq!(fetched.occupation.as_deref(), Some("Explorer"));
  assert!(fetched.updated_at >= alice.updated_at);
}

#[tokio::test]
async fn save_missing_user_errors() {
  let s = store().await;
  let mut ghost = add(&s, "Ghost").await;
  ghost.id = Uuid::new_v4();

  let err = s.save(&ghost).await.unwrap_err();
  assert!(matches!(err, crate::Error::UserNotFound(id) if id == ghost.id));
}

// ─── Friend service over SQLite ──────────────────────────────────────────────

#[tokio::test]
async fn toggle_round_trip_through_sqlite() {
  let s = Arc::new(store().await);
  let service = FriendService::new(s.clone());
  let a = add(&s, "Alice").await.id;
  let b = add(&s, "Bob").await.id;

  let list = service.toggle_friend(a, b).await.unwrap();
  assert_eq!(list.len(), 1);
  assert_eq!(list[0].id, b);
  assert_eq!(s.find_by_id(a).await.unwrap().unwrap().friends, vec![b]);
  assert_eq!(s.find_by_id(b).await.unwrap().unwrap().friends, vec![a]);

  let list = service.toggle_friend(a, b).await.unwrap();
  assert!(list.is_empty());
  assert!(s.find_by_id(a).await.unwrap().unwrap().friends.is_empty());
  assert!(s.find_by_id(b).await.unwrap().unwrap().friends.is_empty());
}

#[tokio::test]
async fn list_friends_through_sqlite_keeps_order() {
  let s = Arc::new(store().await);
  let service = FriendService::new(s.clone());
  let a = add(&s, "Alice").await.id;
  let b = add(&s, "Bob").await.id;
  let c = add(&s, "Carol").await.id;

  service.toggle_friend(a, b).await.unwrap();
  service.toggle_friend(a, c).await.unwrap();

  let names: Vec<_> = service
    .list_friends(a)
    .await
    .unwrap()
    .into_iter()
    .map(|p| p.first_name)
    .collect();
  assert_eq!(names, ["Bob", "Carol"]);
}

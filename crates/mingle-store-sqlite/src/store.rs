//! [`SqliteStore`] — the SQLite implementation of [`UserStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use mingle_core::{
  store::UserStore,
  user::{NewUser, User},
};

use crate::{
  encode::{encode_dt, encode_friends, encode_uuid, RawUser, USER_COLUMNS},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Mingle user store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── UserStore impl ──────────────────────────────────────────────────────────

impl UserStore for SqliteStore {
  type Error = Error;

  async fn insert_user(&self, input: NewUser) -> Result<Option<User>> {
    let now = Utc::now();
    let user = User {
      id:            Uuid::new_v4(),
      first_name:    input.first_name,
      last_name:     input.last_name,
      email:         input.email,
      password_hash: input.password_hash,
      picture_path:  input.picture_path,
      friends:       Vec::new(),
      location:      input.location,
      occupation:    input.occupation,
      created_at:    now,
      updated_at:    now,
    };

    let id_str      = encode_uuid(user.id);
    let friends_str = encode_friends(&user.friends)?;
    let at_str      = encode_dt(now);
    let first_name  = user.first_name.clone();
    let last_name   = user.last_name.clone();
    let email       = user.email.clone();
    let hash        = user.password_hash.clone();
    let picture     = user.picture_path.clone();
    let location    = user.location.clone();
    let occupation  = user.occupation.clone();

    let inserted = self
      .conn
      .call(move |conn| {
        let taken = conn
          .query_row(
            "SELECT 1 FROM users WHERE email = ?1",
            rusqlite::params![email],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if taken {
          return Ok(false);
        }

        conn.execute(
          "INSERT INTO users (
             user_id, first_name, last_name, email, password_hash,
             picture_path, location, occupation, friends,
             created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)",
          rusqlite::params![
            id_str,
            first_name,
            last_name,
            email,
            hash,
            picture,
            location,
            occupation,
            friends_str,
            at_str,
          ],
        )?;
        Ok(true)
      })
      .await?;

    Ok(inserted.then_some(user))
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = ?1"),
            rusqlite::params![id_str],
            RawUser::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn save(&self, user: &User) -> Result<()> {
    let id_str      = encode_uuid(user.id);
    let friends_str = encode_friends(&user.friends)?;
    let at_str      = encode_dt(Utc::now());
    let first_name  = user.first_name.clone();
    let last_name   = user.last_name.clone();
    let picture     = user.picture_path.clone();
    let location    = user.location.clone();
    let occupation  = user.occupation.clone();

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE users
              SET first_name   = ?2,
                  last_name    = ?3,
                  picture_path = ?4,
                  location     = ?5,
                  occupation   = ?6,
                  friends      = ?7,
                  updated_at   = ?8
            WHERE user_id = ?1",
          rusqlite::params![
            id_str,
            first_name,
            last_name,
            picture,
            location,
            occupation,
            friends_str,
            at_str,
          ],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::UserNotFound(user.id));
    }
    Ok(())
  }
}

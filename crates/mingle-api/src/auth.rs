//! Handler for `POST /auth/register`.
//!
//! Only account creation lives here. Token issuance and request
//! authentication belong to the deployment in front of this router.

use std::sync::Arc;

use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use mingle_core::{FriendService, store::UserStore, user::NewUser};
use rand_core::OsRng;
use serde::Deserialize;

use crate::{error::ApiError, extract};

/// JSON body accepted by `POST /auth/register`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody {
  pub first_name:   String,
  pub last_name:    String,
  pub email:        String,
  pub password:     String,
  #[serde(default)]
  pub picture_path: String,
  pub location:     Option<String>,
  pub occupation:   Option<String>,
}

impl RegisterBody {
  fn validate(&self) -> Result<(), ApiError> {
    let required = [
      ("firstName", &self.first_name),
      ("lastName", &self.last_name),
      ("email", &self.email),
      ("password", &self.password),
    ];
    for (field, value) in required {
      if value.trim().is_empty() {
        return Err(ApiError::BadRequest(format!("{field} must not be empty")));
      }
    }
    Ok(())
  }
}

/// Hash `password` into an argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|h| h.to_string())
    .map_err(|e| ApiError::Internal(format!("argon2 error: {e}")))
}

/// `POST /auth/register` — returns 201 + the stored user (without its hash).
pub async fn register<S>(
  State(service): State<Arc<FriendService<S>>>,
  extract::Json(body): extract::Json<RegisterBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: UserStore,
{
  body.validate()?;

  let input = NewUser {
    password_hash: hash_password(&body.password)?,
    first_name:    body.first_name,
    last_name:     body.last_name,
    email:         body.email.trim().to_lowercase(),
    picture_path:  body.picture_path,
    location:      body.location,
    occupation:    body.occupation,
  };
  let email = input.email.clone();

  let user = service
    .store()
    .insert_user(input)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| {
      ApiError::Conflict(format!("email {email} is already registered"))
    })?;

  tracing::info!(user_id = %user.id, "registered user");
  Ok((StatusCode::CREATED, Json(user)))
}

#[cfg(test)]
mod tests {
  use argon2::{PasswordHash, PasswordVerifier};

  use super::*;

  #[test]
  fn hashed_password_verifies() {
    let hash = hash_password("hunter2").unwrap();
    let parsed = PasswordHash::new(&hash).unwrap();
    assert!(Argon2::default().verify_password(b"hunter2", &parsed).is_ok());
    assert!(Argon2::default().verify_password(b"hunter3", &parsed).is_err());
  }

  #[test]
  fn blank_fields_are_rejected() {
    let body = RegisterBody {
      first_name:   "Ada".into(),
      last_name:    "  ".into(),
      email:        "ada@example.com".into(),
      password:     "pw".into(),
      picture_path: String::new(),
      location:     None,
      occupation:   None,
    };
    assert!(matches!(body.validate(), Err(ApiError::BadRequest(m)) if m.contains("lastName")));
  }
}

//! Core types and the friend-relationship service for Mingle.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::UserStore`]; the HTTP layer drives
//! [`friends::FriendService`].

pub mod error;
pub mod friends;
pub mod lock;
pub mod store;
pub mod user;

pub use error::{Error, Result};
pub use friends::FriendService;

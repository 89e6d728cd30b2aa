//! Database models shared across the users repository.

#[cfg(feature = "server")]
pub mod config;
pub mod user;

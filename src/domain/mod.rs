//! Domain aggregates exposed by the user-management service layer.

pub mod types;
pub mod user;

//! Credential hashing for stored user records.

use crate::services::{ServiceError, ServiceResult};

/// Hashes a password with bcrypt using the configured work factor.
pub fn hash_password(password: &str, cost: u32) -> ServiceResult<String> {
    bcrypt::hash(password, cost).map_err(|err| {
        log::error!("Failed to hash password: {err}");
        ServiceError::Internal("failed to hash password".to_string())
    })
}

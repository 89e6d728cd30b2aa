//! Configuration model loaded from external sources.

use serde::Deserialize;

fn default_bcrypt_cost() -> u32 {
    12
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Work factor used when hashing credentials.
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

use thiserror::Error;

/// Errors that can occur when talking to the users API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Requested user does not exist
    #[error("User not found")]
    NotFound,

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Background request task panicked
    #[error("Request task failed: {0}")]
    Task(String),

    /// Controller task is gone
    #[error("List controller has stopped")]
    Closed,
}

/// Result type for users API client operations.
pub type ClientResult<T> = std::result::Result<T, ClientError>;

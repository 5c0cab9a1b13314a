//! Error types for the ScholarNet SDK

use scholarnet::StoreError;
use thiserror::Error;

/// Errors that can occur while talking to a graph store
#[derive(Error, Debug)]
pub enum SdkError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Error reported by the server for a Cypher statement
    #[error("Cypher error {code}: {message}")]
    Cypher { code: String, message: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Response parsed but did not carry a result set
    #[error("Unexpected response: {0}")]
    Protocol(String),
}

pub type SdkResult<T> = Result<T, SdkError>;

impl SdkError {
    /// Transport-level failures mean the store cannot be reached at all
    pub fn is_connectivity(&self) -> bool {
        match self {
            SdkError::Http(err) => err.is_connect() || err.is_timeout(),
            SdkError::Status { status, .. } => *status == 401 || *status == 403 || *status >= 500,
            _ => false,
        }
    }
}

impl From<SdkError> for StoreError {
    fn from(err: SdkError) -> Self {
        match err {
            SdkError::Serialization(_) | SdkError::Protocol(_) => StoreError::Decode(err.to_string()),
            other => StoreError::Execution(other.to_string()),
        }
    }
}

use serde::Deserialize;

/// Errors returned by the todo client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport or connection error.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Local storage is unreachable or unwritable.
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// A draft or patch violates field constraints.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The target todo does not exist in the backing store.
    #[error("Todo {0} not found")]
    NotFound(uuid::Uuid),

    /// The server returned an unexpected error status code.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Failed to deserialize a response or stored payload.
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

/// Structured error body returned by the todo API.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error: Option<String>,
    pub details: Option<Vec<String>>,
}

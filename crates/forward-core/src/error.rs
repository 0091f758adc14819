//! Error types for the Forward client.

use thiserror::Error;

/// Result type alias using Forward's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Forward client operations.
///
/// No variant is fatal to the process: hooks translate every failure
/// into a user-facing notification plus unchanged (or, for
/// [`Error::NotAuthenticated`], emptied) local state.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// The remote collaborator rejected the call (permission/validation)
    #[error("Remote error: {0}")]
    Remote(String),

    /// No authenticated session; dependent state resets to defaults
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Uploaded document has no extractable text layer (scanned PDF)
    #[error("Could not read document: {0}")]
    UnreadableDocument(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

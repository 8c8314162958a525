//! Domain errors for the Hydra client.

use thiserror::Error;

/// Errors surfaced by the resource layer.
///
/// The enum is `Clone` so a single failed collection fetch can be handed to
/// every caller that joined it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResourceError {
    /// The request never produced an HTTP response (connection, timeout, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success status code.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The payload could not be decoded into the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Update or delete was requested for an entity without an `@href`.
    #[error("No @href found for resource")]
    MissingReference,

    /// The client was built from an unusable configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ResourceError {
    /// Returns true if the error came back from the server as a 404.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

/// Result alias used throughout the crate.
pub type ResourceResult<T> = Result<T, ResourceError>;

impl From<serde_json::Error> for ResourceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for ResourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

//! Error types used throughout the integration

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the eTims integration
///
/// Only faults surface through this type. Expected remote-side conditions
/// (non-2xx responses, transport failures) reach the caller's error handler
/// instead, and missing configuration is reported as a dispatch outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum EtimsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The remote side returned a body that does not match its declared
    /// content type (e.g. `application/json` that fails to parse).
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A success or error handler supplied by the caller failed.
    #[error("Handler error: {0}")]
    Handler(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl EtimsError {
    /// Stable label suitable for structured log fields.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Network(_) => "network",
            Self::Auth(_) => "auth",
            Self::NotFound(_) => "not_found",
            Self::InvalidInput(_) => "invalid_input",
            Self::MalformedResponse(_) => "malformed_response",
            Self::Handler(_) => "handler",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias for eTims operations
pub type Result<T> = std::result::Result<T, EtimsError>;

//! Error types for the Mailinator client.

use thiserror::Error;

/// Error type for all Mailinator client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport failure: connection, DNS, TLS, or a non-2xx response status.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Response body was not JSON or did not match the expected shape.
    #[error("failed to parse response: {0}")]
    Json(#[from] serde_json::Error),
    /// The message has no MIME parts to take a body from.
    #[error("message {id} has no parts")]
    EmptyParts { id: String },
    /// The configured base URL could not be parsed or joined.
    #[error("invalid base url: {0}")]
    InvalidUrl(String),
}

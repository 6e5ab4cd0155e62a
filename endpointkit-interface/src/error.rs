//! Error types reported by transports.

use thiserror::Error;

/// Errors a transport may report while executing a prepared request.
#[derive(Debug, Error)]
pub enum Error {
    /// The transport does not accept the request URL.
    #[error("Invalid URL")]
    InvalidUrl,
    /// An underlying I/O error occurred.
    #[error("IO Error")]
    Io(#[from] std::io::Error),
    /// The request did not finish within its declared timeout.
    #[error("Request is not finished within timeout")]
    RequestTimeout,
}

/// Result type for transport operations.
pub type Result<T> = std::result::Result<T, Error>;

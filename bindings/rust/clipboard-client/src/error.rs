//! Error types for the clipboard client.

use thiserror::Error;

/// Errors that can occur when using the clipboard client.
#[derive(Error, Debug)]
pub enum Error {
    /// The request could not be sent or the response could not be read
    #[error("Request error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server rejected the request (HTTP 400)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The server answered with a status this client does not expect
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// The HTTP status code
        status: u16,
        /// The message body, when one could be decoded
        message: String,
    },
}

impl Error {
    /// Returns `true` if this error indicates the server rejected the
    /// request as invalid.
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, Error::InvalidRequest(_))
    }
}

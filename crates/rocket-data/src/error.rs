//! Fetch errors.

use thiserror::Error;

/// Why a catalog request produced no usable value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request never got a response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("{url} returned {status}: {message}")]
    Status {
        status: u16,
        url: String,
        message: String,
    },

    /// The body was not the expected JSON document.
    #[error("could not decode response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

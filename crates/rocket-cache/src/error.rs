//! Cache errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    /// The named store could not be opened.
    #[error("cannot open store: {0}")]
    Open(String),

    /// A value did not encode to or decode from JSON.
    #[error("bad cached value: {0}")]
    Codec(#[from] serde_json::Error),

    /// The backend refused the operation.
    #[error("backend error: {0}")]
    Backend(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

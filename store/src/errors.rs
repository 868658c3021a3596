//! Store-wide error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage quota exceeded writing `{key}`: {needed} bytes needed, capacity {capacity}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        capacity: usize,
    },

    #[error("reserved email: {0}")]
    ReservedEmail(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

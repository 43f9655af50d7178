//! Error types for vitalsim
//!
//! Generator and orchestrator math is infallible for valid inputs; every
//! failure in this crate originates from store I/O.

use thiserror::Error;

/// Errors raised by the store contracts.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(String),

    #[error("store backend failure: {0}")]
    Backend(String),

    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

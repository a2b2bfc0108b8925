//! Error types for sonnet-rhymes
//!
//! The two I/O boundaries (provider and store) surface untouched to the
//! caller; contract violations cover malformed poems handed to the scorer.

use crate::provider::ProviderError;
use thiserror::Error;

/// Error type for cache and scoring operations
#[derive(Debug, Error)]
pub enum RhymeError {
    /// External rhyme lookup failed
    #[error("Rhyme provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Transaction or connection failure
    #[error("Storage error: {0}")]
    Storage(#[from] sonnet_common::Error),

    /// Caller passed input the scorer does not accept
    #[error("Contract violation: {0}")]
    ContractViolation(String),
}

impl From<sqlx::Error> for RhymeError {
    fn from(err: sqlx::Error) -> Self {
        RhymeError::Storage(sonnet_common::Error::Database(err))
    }
}

/// Result type for cache and scoring operations
pub type RhymeResult<T> = Result<T, RhymeError>;

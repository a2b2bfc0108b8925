//! External rhyme providers
//!
//! The cache talks to providers only through [`RhymeProvider`], so the
//! network client can be swapped for an in-memory table in tests.

pub mod datamuse;

pub use datamuse::DatamuseClient;

use crate::models::ProviderRhyme;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Rhyme provider errors
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Source of truth for "which words rhyme with W"
///
/// Implementations may return an empty list; that is a valid answer and is
/// cached like any other.
#[async_trait]
pub trait RhymeProvider: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Query every known rhyme of `word`
    async fn lookup_rhymes(&self, word: &str) -> Result<Vec<ProviderRhyme>, ProviderError>;
}

#[async_trait]
impl<P: RhymeProvider + ?Sized> RhymeProvider for Arc<P> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn lookup_rhymes(&self, word: &str) -> Result<Vec<ProviderRhyme>, ProviderError> {
        (**self).lookup_rhymes(word).await
    }
}

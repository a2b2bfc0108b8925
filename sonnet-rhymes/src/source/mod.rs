//! Poem document sources
//!
//! A source produces poems as ordered lists of non-empty lines. Shape
//! filtering (14 lines) is left to the caller.

pub mod gutenberg;

pub use gutenberg::{extract_poems, GutenbergSource, HtmlFileSource};

use crate::models::Poem;
use async_trait::async_trait;
use thiserror::Error;

/// Poem source errors
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("HTTP error {0}")]
    HttpError(u16),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid selector {0:?}: {1}")]
    InvalidSelector(String, String),
}

/// Anything that can supply a batch of poems
#[async_trait]
pub trait PoemSource: Send + Sync {
    async fn fetch_poems(&self) -> Result<Vec<Poem>, SourceError>;
}

//! sonnet-rhymes library interface
//!
//! Scores sonnets against the ABAB CDCD EFEF GG rhyme pattern using a
//! persistent cache of rhymes fetched from an external provider.

pub mod cache;
pub mod db;
pub mod error;
pub mod models;
pub mod provider;
pub mod report;
pub mod scorer;
pub mod source;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::cache::RhymeCache;
pub use crate::db::RhymeStore;
pub use crate::error::{RhymeError, RhymeResult};
pub use crate::models::{Poem, RhymeFact, SonnetStats};
pub use crate::scorer::SonnetScorer;

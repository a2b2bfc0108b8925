//! Rhyme cache
//!
//! Cache-aside in front of a [`RhymeProvider`]: read the store, and on a miss
//! query the provider once, persist everything it returned, then read back.
//! The `populated` flag in the store is what limits a word to a single
//! external lookup; two concurrent misses on the same word may both call the
//! provider, and the store keeps only the first population.

use crate::db::{PopulateOutcome, RhymeStore};
use crate::error::RhymeResult;
use crate::models::RhymeFact;
use crate::provider::RhymeProvider;
use tracing::{debug, info};

/// Cache-aside access to rhymes
pub struct RhymeCache<P> {
    store: RhymeStore,
    provider: P,
}

impl<P: RhymeProvider> RhymeCache<P> {
    pub fn new(store: RhymeStore, provider: P) -> Self {
        Self { store, provider }
    }

    pub fn store(&self) -> &RhymeStore {
        &self.store
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// All known rhymes of `word`, querying the provider on first use
    ///
    /// Provider and storage errors are returned as-is; nothing is retried and
    /// a failed lookup leaves the word unpopulated.
    pub async fn find_rhyming_words(&self, word: &str) -> RhymeResult<Vec<RhymeFact>> {
        // No pooled connection is held across the provider call
        {
            let mut conn = self.store.acquire().await?;
            if conn.is_populated(word).await? {
                debug!(word = %word, "Rhyme cache hit");
                return Ok(conn.find_rhymes(word).await?);
            }
        }

        debug!(word = %word, provider = self.provider.name(), "Rhyme cache miss");
        let facts: Vec<RhymeFact> = self
            .provider
            .lookup_rhymes(word)
            .await?
            .into_iter()
            .map(|candidate| candidate.into_fact(word))
            .collect();

        let mut conn = self.store.acquire().await?;
        match conn.populate(word, &facts).await? {
            PopulateOutcome::Populated { facts_inserted } => {
                info!(
                    word = %word,
                    provider_results = facts.len(),
                    facts_inserted,
                    "Cached rhymes"
                );
            }
            PopulateOutcome::AlreadyPopulated => {
                debug!(word = %word, "Concurrent lookup populated word first");
            }
        }

        Ok(conn.find_rhymes(word).await?)
    }
}

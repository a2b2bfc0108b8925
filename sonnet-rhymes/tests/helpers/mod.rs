//! Shared helpers for sonnet-rhymes integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use sonnet_common::config::DatabaseConfig;
use sonnet_rhymes::models::ProviderRhyme;
use sonnet_rhymes::provider::{ProviderError, RhymeProvider};
use sonnet_rhymes::RhymeStore;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::TempDir;

/// Create a store in a fresh temporary directory
///
/// Returns (TempDir, RhymeStore) - TempDir must be kept alive for duration of test
pub async fn create_test_store() -> (TempDir, RhymeStore) {
    let temp_dir = TempDir::new().unwrap();
    let store = open_store(temp_dir.path()).await;
    (temp_dir, store)
}

/// Open (or reopen) the store inside `dir`
pub async fn open_store(dir: &Path) -> RhymeStore {
    RhymeStore::open(&dir.join("rhymes.db"), &DatabaseConfig::default())
        .await
        .expect("Failed to open test store")
}

/// Provider answering from a fixed table, counting calls
pub struct FixedProvider {
    table: HashMap<String, Vec<ProviderRhyme>>,
    delay: Duration,
    calls: AtomicUsize,
}

impl FixedProvider {
    pub fn new() -> Self {
        Self {
            table: HashMap::new(),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn rhyme(mut self, word: &str, candidate: &str, score: f64, num_syllables: i64) -> Self {
        self.table.entry(word.to_string()).or_default().push(ProviderRhyme {
            word: candidate.to_string(),
            score,
            num_syllables,
        });
        self
    }

    /// Simulate a slow network round trip
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RhymeProvider for FixedProvider {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn lookup_rhymes(&self, word: &str) -> Result<Vec<ProviderRhyme>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.table.get(word).cloned().unwrap_or_default())
    }
}

/// Shakespeare's Sonnet 18
pub fn sonnet_18() -> Vec<String> {
    [
        "Shall I compare thee to a summer's day?",
        "Thou art more lovely and more temperate:",
        "Rough winds do shake the darling buds of May,",
        "And summer's lease hath all too short a date;",
        "Sometime too hot the eye of heaven shines,",
        "And often is his gold complexion dimm'd;",
        "And every fair from fair sometime declines,",
        "By chance or nature's changing course untrimm'd;",
        "But thy eternal summer shall not fade,",
        "Nor lose possession of that fair thou ow'st;",
        "Nor shall death brag thou wander'st in his shade,",
        "When in eternal lines to time thou grow'st:",
        "So long as men can breathe or eyes can see,",
        "So long lives this, and this gives life to thee.",
    ]
    .iter()
    .map(|line| line.to_string())
    .collect()
}

/// Provider that knows every rhyme pair of Sonnet 18
pub fn sonnet_18_provider() -> FixedProvider {
    FixedProvider::new()
        .rhyme("day", "may", 100.0, 1)
        .rhyme("temperate", "date", 90.0, 1)
        .rhyme("shines", "declines", 80.0, 2)
        .rhyme("dimmd", "untrimmd", 70.0, 2)
        .rhyme("fade", "shade", 60.0, 1)
        .rhyme("owst", "growst", 50.0, 1)
        .rhyme("see", "thee", 40.0, 1)
}

//! Fixtures shared by unit tests

use crate::db::RhymeStore;
use crate::models::{ProviderRhyme, RhymeFact};
use crate::provider::{ProviderError, RhymeProvider};
use async_trait::async_trait;
use sonnet_common::config::DatabaseConfig;
use std::collections::HashMap;
use std::sync::Mutex;
use tempfile::TempDir;

pub fn fact(word1: &str, word2: &str, score: f64, num_syllables: i64) -> RhymeFact {
    RhymeFact {
        word1: word1.to_string(),
        word2: word2.to_string(),
        score,
        num_syllables,
    }
}

/// Store backed by a fresh database file; keep the `TempDir` alive
pub async fn open_temp_store() -> (TempDir, RhymeStore) {
    let dir = TempDir::new().unwrap();
    let store = RhymeStore::open(&dir.path().join("rhymes.db"), &DatabaseConfig::default())
        .await
        .unwrap();
    (dir, store)
}

/// In-memory provider that records every lookup
#[derive(Default)]
pub struct TableProvider {
    rhymes: HashMap<String, Vec<ProviderRhyme>>,
    failing: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl TableProvider {
    pub fn with(mut self, word: &str, candidates: &[(&str, f64, i64)]) -> Self {
        self.rhymes.insert(
            word.to_string(),
            candidates
                .iter()
                .map(|(w, score, syllables)| ProviderRhyme {
                    word: w.to_string(),
                    score: *score,
                    num_syllables: *syllables,
                })
                .collect(),
        );
        self
    }

    pub fn failing_on(mut self, word: &str) -> Self {
        self.failing.push(word.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RhymeProvider for TableProvider {
    fn name(&self) -> &'static str {
        "table"
    }

    async fn lookup_rhymes(&self, word: &str) -> Result<Vec<ProviderRhyme>, ProviderError> {
        self.calls.lock().unwrap().push(word.to_string());
        if self.failing.iter().any(|w| w == word) {
            return Err(ProviderError::NetworkError("connection reset".to_string()));
        }
        Ok(self.rhymes.get(word).cloned().unwrap_or_default())
    }
}

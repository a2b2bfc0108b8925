//! End-to-end scoring tests against a real store

mod helpers;

use helpers::{create_test_store, sonnet_18, sonnet_18_provider, FixedProvider};
use sonnet_rhymes::report::AnalysisReport;
use sonnet_rhymes::scorer::SONNET_RHYME_PAIRS;
use sonnet_rhymes::{RhymeCache, RhymeError, SonnetScorer};
use std::sync::Arc;

#[tokio::test]
async fn test_sonnet_18_fully_rhymes() {
    let (_dir, store) = create_test_store().await;
    let cache = RhymeCache::new(store, sonnet_18_provider());
    let scorer = SonnetScorer::new(&cache);

    let analysis = scorer.analyze(&sonnet_18()).await.unwrap();

    assert_eq!(analysis.rhyme_words[9], "owst");
    assert_eq!(analysis.pairs.len(), SONNET_RHYME_PAIRS.len());
    assert!(analysis.pairs.iter().all(|p| p.score.is_some()));
    assert_eq!(analysis.stats.num_rhymes_found, 7);
    assert_eq!(analysis.stats.average_rhyme_score, Some(70.0));
}

#[tokio::test]
async fn test_rescoring_hits_cache_only() {
    let (_dir, store) = create_test_store().await;
    let provider = Arc::new(sonnet_18_provider());
    let cache = RhymeCache::new(store, provider.clone());
    let scorer = SonnetScorer::new(&cache);

    let first = scorer.score(&sonnet_18()).await.unwrap();
    let calls = provider.call_count();
    let second = scorer.score(&sonnet_18()).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(calls, SONNET_RHYME_PAIRS.len());
    assert_eq!(provider.call_count(), calls);
}

#[tokio::test]
async fn test_batch_with_malformed_poems() {
    let (_dir, store) = create_test_store().await;
    let provider = Arc::new(FixedProvider::new().rhyme("day", "may", 100.0, 1));
    let cache = RhymeCache::new(store, provider.clone());
    let scorer = SonnetScorer::new(&cache);

    let mut short = sonnet_18();
    short.pop();
    let poems = vec![sonnet_18(), short];

    let mut report = AnalysisReport::new();
    for (index, poem) in poems.iter().enumerate() {
        match scorer.analyze(poem).await {
            Ok(analysis) => report.record_scored(index, analysis),
            Err(RhymeError::ContractViolation(reason)) => report.record_skipped(index, reason),
            Err(err) => panic!("unexpected error: {}", err),
        }
    }

    assert_eq!(report.scored.len(), 1);
    assert_eq!(report.scored[0].stats.num_rhymes_found, 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].index, 1);
    assert_eq!(report.mean_scores(), vec![100.0]);
}

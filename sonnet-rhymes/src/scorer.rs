//! Sonnet scorer
//!
//! Checks a 14-line poem against the English sonnet rhyme pattern
//! ABAB CDCD EFEF GG using rhymes from the [`RhymeCache`].

use crate::cache::RhymeCache;
use crate::error::{RhymeError, RhymeResult};
use crate::models::{PairResult, SonnetAnalysis, SonnetStats};
use crate::provider::RhymeProvider;
use tracing::debug;

/// Lines in an English sonnet
pub const SONNET_LINE_COUNT: usize = 14;

/// Expected rhyming line pairs (0-indexed) for ABAB CDCD EFEF GG
pub const SONNET_RHYME_PAIRS: [(usize, usize); 7] = [
    (0, 2),
    (1, 3),
    (4, 6),
    (5, 7),
    (8, 10),
    (9, 11),
    (12, 13),
];

/// Rhyme word of one line, lowercased
///
/// Apostrophes are dropped so elisions stay one word ("ow’st" -> "owst");
/// any other non-alphanumeric character separates words. Returns `None` for
/// a line with no word characters.
pub fn rhyme_word(line: &str) -> Option<String> {
    let normalized: String = line
        .chars()
        .filter(|c| !matches!(c, '\'' | '\u{2018}' | '\u{2019}'))
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    normalized
        .split_whitespace()
        .last()
        .map(|word| word.to_lowercase())
}

/// Rhyme words of a sonnet, one per line
pub fn extract_rhyme_words(poem: &[String]) -> RhymeResult<Vec<String>> {
    if poem.len() != SONNET_LINE_COUNT {
        return Err(RhymeError::ContractViolation(format!(
            "expected {} lines, got {}",
            SONNET_LINE_COUNT,
            poem.len()
        )));
    }

    poem.iter()
        .enumerate()
        .map(|(index, line)| {
            rhyme_word(line).ok_or_else(|| {
                RhymeError::ContractViolation(format!("line {} has no rhyme word: {:?}", index, line))
            })
        })
        .collect()
}

/// Scores poems through a rhyme cache
pub struct SonnetScorer<'a, P> {
    cache: &'a RhymeCache<P>,
}

impl<'a, P: RhymeProvider> SonnetScorer<'a, P> {
    pub fn new(cache: &'a RhymeCache<P>) -> Self {
        Self { cache }
    }

    /// Per-pair results and summary for one sonnet
    ///
    /// A pair counts as a hit when the first line's word has a stored fact
    /// whose `word2` is the second line's word. With several such facts the
    /// first one in storage order supplies the score.
    pub async fn analyze(&self, poem: &[String]) -> RhymeResult<SonnetAnalysis> {
        let rhyme_words = extract_rhyme_words(poem)?;

        let mut pairs = Vec::with_capacity(SONNET_RHYME_PAIRS.len());
        let mut hit_scores = Vec::new();

        for (first_line, second_line) in SONNET_RHYME_PAIRS {
            let first_word = &rhyme_words[first_line];
            let second_word = &rhyme_words[second_line];

            let score = self
                .cache
                .find_rhyming_words(first_word)
                .await?
                .into_iter()
                .find(|fact| &fact.word2 == second_word)
                .map(|fact| fact.score);

            debug!(
                first_line,
                second_line,
                first_word = %first_word,
                second_word = %second_word,
                score = ?score,
                "Scored rhyme pair"
            );

            if let Some(score) = score {
                hit_scores.push(score);
            }
            pairs.push(PairResult {
                first_line,
                second_line,
                first_word: first_word.clone(),
                second_word: second_word.clone(),
                score,
            });
        }

        Ok(SonnetAnalysis {
            rhyme_words,
            pairs,
            stats: SonnetStats::from_hit_scores(&hit_scores),
        })
    }

    /// Summary statistics for one sonnet
    pub async fn score(&self, poem: &[String]) -> RhymeResult<SonnetStats> {
        Ok(self.analyze(poem).await?.stats)
    }
}

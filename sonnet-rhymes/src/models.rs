//! Shared data types

use serde::{Deserialize, Serialize};

/// A poem as an ordered list of lines
pub type Poem = Vec<String>;

/// Directed rhyme relation as stored in the `rhymes` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RhymeFact {
    pub word1: String,
    pub word2: String,
    /// Provider-defined rhyme quality
    pub score: f64,
    pub num_syllables: i64,
}

impl RhymeFact {
    /// The same fact seen from `word2`
    pub fn mirrored(&self) -> Self {
        Self {
            word1: self.word2.clone(),
            word2: self.word1.clone(),
            score: self.score,
            num_syllables: self.num_syllables,
        }
    }
}

/// One candidate returned by the external provider
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRhyme {
    pub word: String,
    pub score: f64,
    pub num_syllables: i64,
}

impl ProviderRhyme {
    /// Build the fact recording that `queried` rhymes with this candidate
    pub fn into_fact(self, queried: &str) -> RhymeFact {
        RhymeFact {
            word1: queried.to_string(),
            word2: self.word,
            score: self.score,
            num_syllables: self.num_syllables,
        }
    }
}

/// Summary of one scored sonnet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SonnetStats {
    /// Expected rhyme pairs confirmed by the cache (0-7)
    pub num_rhymes_found: usize,
    /// Mean score of the confirmed pairs; `None` when nothing rhymed
    pub average_rhyme_score: Option<f64>,
}

impl SonnetStats {
    pub fn from_hit_scores(scores: &[f64]) -> Self {
        let average_rhyme_score = if scores.is_empty() {
            None
        } else {
            Some(scores.iter().sum::<f64>() / scores.len() as f64)
        };

        Self {
            num_rhymes_found: scores.len(),
            average_rhyme_score,
        }
    }
}

/// Outcome for one expected rhyme pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairResult {
    pub first_line: usize,
    pub second_line: usize,
    pub first_word: String,
    pub second_word: String,
    /// Score of the matching fact, if the words rhyme
    pub score: Option<f64>,
}

/// Full scoring output: extracted words, per-pair results and the summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SonnetAnalysis {
    pub rhyme_words: Vec<String>,
    pub pairs: Vec<PairResult>,
    pub stats: SonnetStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_average() {
        let stats = SonnetStats::from_hit_scores(&[100.0, 90.0, 80.0, 70.0, 60.0, 50.0, 40.0]);
        assert_eq!(stats.num_rhymes_found, 7);
        assert_eq!(stats.average_rhyme_score, Some(70.0));
    }

    #[test]
    fn test_stats_zero_hits_has_no_average() {
        let stats = SonnetStats::from_hit_scores(&[]);
        assert_eq!(stats.num_rhymes_found, 0);
        assert_eq!(stats.average_rhyme_score, None);
    }

    #[test]
    fn test_mirrored_keeps_score_and_syllables() {
        let fact = RhymeFact {
            word1: "light".to_string(),
            word2: "night".to_string(),
            score: 85.0,
            num_syllables: 1,
        };
        let mirror = fact.mirrored();
        assert_eq!(mirror.word1, "night");
        assert_eq!(mirror.word2, "light");
        assert_eq!(mirror.score, 85.0);
        assert_eq!(mirror.num_syllables, 1);
        assert_eq!(mirror.mirrored(), fact);
    }
}

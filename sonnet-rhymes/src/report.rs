//! Report generation and formatting
//!
//! Aggregates per-poem results into the two distributions of interest
//! (rhyming pairs found, mean rhyme score) and renders them as text
//! histograms or a JSON export.

use crate::models::{PairResult, SonnetAnalysis, SonnetStats};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Number of histogram bins used for both distributions
pub const HISTOGRAM_BINS: usize = 6;

const BAR_WIDTH: usize = 40;

/// A poem that was scored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredPoem {
    /// Position of the poem in the source document
    pub index: usize,
    pub rhyme_words: Vec<String>,
    /// One entry per expected rhyme pair, in pattern order
    pub pairs: Vec<PairResult>,
    pub stats: SonnetStats,
}

/// A poem that was not scored, and why
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedPoem {
    pub index: usize,
    pub reason: String,
}

/// Results of one analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub scored: Vec<ScoredPoem>,
    pub skipped: Vec<SkippedPoem>,
}

impl Default for AnalysisReport {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisReport {
    pub fn new() -> Self {
        Self {
            generated_at: Utc::now(),
            scored: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn record_scored(&mut self, index: usize, analysis: SonnetAnalysis) {
        self.scored.push(ScoredPoem {
            index,
            rhyme_words: analysis.rhyme_words,
            pairs: analysis.pairs,
            stats: analysis.stats,
        });
    }

    pub fn record_skipped(&mut self, index: usize, reason: impl Into<String>) {
        self.skipped.push(SkippedPoem {
            index,
            reason: reason.into(),
        });
    }

    /// Rhyming pairs found, one value per scored poem
    pub fn rhymes_found(&self) -> Vec<f64> {
        self.scored
            .iter()
            .map(|p| p.stats.num_rhymes_found as f64)
            .collect()
    }

    /// Mean rhyme scores; poems without any hit have no mean and are left out
    pub fn mean_scores(&self) -> Vec<f64> {
        self.scored
            .iter()
            .filter_map(|p| p.stats.average_rhyme_score)
            .collect()
    }

    /// Scored poems in which no expected pair rhymed
    pub fn zero_hit_count(&self) -> usize {
        self.scored
            .iter()
            .filter(|p| p.stats.average_rhyme_score.is_none())
            .count()
    }

    /// Default export file name, e.g. `sonnets_1760600000.json`
    pub fn default_file_name(&self) -> String {
        format!("sonnets_{}.json", self.generated_at.timestamp())
    }

    /// Export report to JSON file
    pub fn export_json<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Export into `dir` under the default file name
    pub fn export_json_to_dir(&self, dir: &Path) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(self.default_file_name());
        self.export_json(&path)?;
        Ok(path)
    }

    /// Import report from JSON file
    pub fn import_json<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let file = File::open(path)?;
        let report: AnalysisReport = serde_json::from_reader(file)?;
        Ok(report)
    }
}

/// One histogram bin; `upper` is exclusive except for the last bin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width histogram over the range of the data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Bin `values` into `bin_count` equal-width bins spanning min..=max
    ///
    /// When all values are equal the range is widened by 0.5 on each side.
    /// Empty input yields no bins.
    pub fn from_values(values: &[f64], bin_count: usize) -> Self {
        if values.is_empty() || bin_count == 0 {
            return Self { bins: Vec::new() };
        }

        let mut min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if min == max {
            min -= 0.5;
            max += 0.5;
        }
        let width = (max - min) / bin_count as f64;

        let mut bins: Vec<HistogramBin> = (0..bin_count)
            .map(|i| HistogramBin {
                lower: min + width * i as f64,
                upper: if i + 1 == bin_count {
                    max
                } else {
                    min + width * (i + 1) as f64
                },
                count: 0,
            })
            .collect();

        for value in values {
            let index = (((value - min) / width) as usize).min(bin_count - 1);
            bins[index].count += 1;
        }

        Self { bins }
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

/// CLI formatter for analysis results
pub struct CliFormatter;

impl CliFormatter {
    /// Render a histogram as labelled text bars
    pub fn format_histogram(title: &str, histogram: &Histogram) -> String {
        let mut output = format!("\n{}\n", title);

        if histogram.bins.is_empty() {
            output.push_str("  (no data)\n");
            return output;
        }

        let peak = histogram.bins.iter().map(|b| b.count).max().unwrap_or(0).max(1);
        for bin in &histogram.bins {
            let bar_len = bin.count * BAR_WIDTH / peak;
            output.push_str(&format!(
                "  {:>7.2} - {:>7.2} │{:<width$}│ {}\n",
                bin.lower,
                bin.upper,
                "█".repeat(bar_len),
                bin.count,
                width = BAR_WIDTH
            ));
        }

        output
    }

    /// Format the full run summary
    pub fn format_summary(report: &AnalysisReport) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Sonnets scored: {}  skipped: {}  without any rhyme: {}\n",
            report.scored.len(),
            report.skipped.len(),
            report.zero_hit_count()
        ));

        let mean_scores = report.mean_scores();
        if !mean_scores.is_empty() {
            let overall = mean_scores.iter().sum::<f64>() / mean_scores.len() as f64;
            output.push_str(&format!("Overall mean rhyme score: {:.1}\n", overall));
        }

        output.push_str(&Self::format_histogram(
            "Sonnet rhyming lines found",
            &Histogram::from_values(&report.rhymes_found(), HISTOGRAM_BINS),
        ));
        output.push_str(&Self::format_histogram(
            "Sonnet mean rhyme scores",
            &Histogram::from_values(&mean_scores, HISTOGRAM_BINS),
        ));

        output
    }
}

//! Datamuse API client
//!
//! Rhyme lookups via `GET /words?rel_rhy=<word>`, rate limited to one request
//! per configured interval. Responses are JSON arrays of
//! `{"word": .., "score": .., "numSyllables": ..}` records.

use super::{ProviderError, RhymeProvider};
use crate::models::ProviderRhyme;
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use serde::Deserialize;
use sonnet_common::config::ProviderConfig;
use std::time::Duration;

/// One entry of a Datamuse `/words` response
///
/// Datamuse omits `score` and `numSyllables` for some results.
#[derive(Debug, Clone, Deserialize)]
struct DatamuseWord {
    word: String,
    #[serde(default)]
    score: f64,
    #[serde(default, rename = "numSyllables")]
    num_syllables: i64,
}

impl From<DatamuseWord> for ProviderRhyme {
    fn from(entry: DatamuseWord) -> Self {
        ProviderRhyme {
            word: entry.word,
            score: entry.score,
            num_syllables: entry.num_syllables,
        }
    }
}

/// Parse a `/words` response body
pub fn parse_rhymes(body: &str) -> Result<Vec<ProviderRhyme>, ProviderError> {
    let entries: Vec<DatamuseWord> =
        serde_json::from_str(body).map_err(|e| ProviderError::ParseError(e.to_string()))?;

    Ok(entries.into_iter().map(ProviderRhyme::from).collect())
}

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// One request per `min_interval_ms`; `None` when the interval is zero
fn build_rate_limiter(min_interval_ms: u64) -> Option<DirectRateLimiter> {
    Quota::with_period(Duration::from_millis(min_interval_ms)).map(RateLimiter::direct)
}

/// Datamuse API client
pub struct DatamuseClient {
    http_client: reqwest::Client,
    base_url: String,
    rate_limiter: Option<DirectRateLimiter>,
}

impl DatamuseClient {
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            rate_limiter: build_rate_limiter(config.rate_limit_ms),
        })
    }
}

#[async_trait]
impl RhymeProvider for DatamuseClient {
    fn name(&self) -> &'static str {
        "datamuse"
    }

    async fn lookup_rhymes(&self, word: &str) -> Result<Vec<ProviderRhyme>, ProviderError> {
        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }

        let url = format!("{}/words", self.base_url);
        tracing::debug!(word = %word, url = %url, "Querying Datamuse API");

        let response = self
            .http_client
            .get(&url)
            .query(&[("rel_rhy", word)])
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimitExceeded);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError(status.as_u16(), error_text));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;
        let rhymes = parse_rhymes(&body)?;

        tracing::info!(
            word = %word,
            results = rhymes.len(),
            "Retrieved rhymes from Datamuse"
        );

        Ok(rhymes)
    }
}

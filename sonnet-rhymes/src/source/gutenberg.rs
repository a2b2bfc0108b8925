//! Project Gutenberg HTML source
//!
//! The Gutenberg edition of the sonnets wraps each poem in a
//! `<p class="poem">` element with one text node per line.

use super::{PoemSource, SourceError};
use crate::models::Poem;
use async_trait::async_trait;
use scraper::{Html, Selector};
use sonnet_common::config::{ProviderConfig, SourceConfig};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Split every element matching `selector` into a poem of trimmed lines
pub fn extract_poems(html: &str, selector: &str) -> Result<Vec<Poem>, SourceError> {
    let selector = Selector::parse(selector)
        .map_err(|e| SourceError::InvalidSelector(selector.to_string(), format!("{:?}", e)))?;
    let document = Html::parse_document(html);

    Ok(document
        .select(&selector)
        .map(|element| {
            element
                .text()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect::<Poem>()
        })
        .filter(|poem| !poem.is_empty())
        .collect())
}

/// Fetches poems from a remote HTML document
pub struct GutenbergSource {
    http_client: reqwest::Client,
    url: String,
    selector: String,
}

impl GutenbergSource {
    pub fn new(source: &SourceConfig, provider: &ProviderConfig) -> Result<Self, SourceError> {
        let http_client = reqwest::Client::builder()
            .user_agent(provider.user_agent.as_str())
            .timeout(Duration::from_secs(provider.timeout_secs))
            .build()
            .map_err(|e| SourceError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            url: source.url.clone(),
            selector: source.poem_selector.clone(),
        })
    }
}

#[async_trait]
impl PoemSource for GutenbergSource {
    async fn fetch_poems(&self) -> Result<Vec<Poem>, SourceError> {
        tracing::debug!(url = %self.url, "Fetching poem document");

        let response = self
            .http_client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SourceError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::HttpError(status.as_u16()));
        }

        let html = response
            .text()
            .await
            .map_err(|e| SourceError::NetworkError(e.to_string()))?;
        let poems = extract_poems(&html, &self.selector)?;

        info!(url = %self.url, poems = poems.len(), "Poems retrieved");
        Ok(poems)
    }
}

/// Reads poems from a local copy of the HTML document
pub struct HtmlFileSource {
    path: PathBuf,
    selector: String,
}

impl HtmlFileSource {
    pub fn new(path: PathBuf, selector: impl Into<String>) -> Self {
        Self {
            path,
            selector: selector.into(),
        }
    }
}

#[async_trait]
impl PoemSource for HtmlFileSource {
    async fn fetch_poems(&self) -> Result<Vec<Poem>, SourceError> {
        let html = tokio::fs::read_to_string(&self.path).await?;
        let poems = extract_poems(&html, &self.selector)?;

        info!(path = %self.path.display(), poems = poems.len(), "Poems loaded");
        Ok(poems)
    }
}

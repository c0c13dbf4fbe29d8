//! Careerjet Scraping Pipeline
//!
//! Careerjet changes its search URLs from time to time, so a search is run
//! against an ordered list of [`Strategy`]s:
//!
//! 1. **Modern search** (`/search/results.html`, sorted by date)
//! 2. **Classic WS search** (`/ws/suche/l/s.html`)
//!
//! The first strategy that answers `200 OK` with at least one parsable
//! listing wins and the rest are never requested. Timeouts, connection
//! errors, other status codes and empty pages all just move on to the next
//! strategy. Running out of strategies yields an empty list.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};
use url::Url;

use super::extract::{Extractor, RecordDefaults};
use super::ScrapeError;
use crate::config::{SearchConfig, DEFAULT_USER_AGENT};
use crate::models::{JobRecord, SearchQuery};

pub const ACCEPT_LANGUAGE_VALUE: &str = "de-CH,de;q=0.9,en-US;q=0.8,en;q=0.7";

/// One way of asking the upstream for the same search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strategy {
    pub name: String,
    pub url: Url,
    /// Sent after the `s` (keywords) and `l` (location) parameters
    pub extra_params: Vec<(String, String)>,
}

impl Strategy {
    pub fn new(name: impl Into<String>, url: Url) -> Self {
        Self {
            name: name.into(),
            url,
            extra_params: Vec::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_params.push((key.into(), value.into()));
        self
    }

    /// The Careerjet search endpoints, in priority order
    pub fn careerjet_defaults(base: &Url) -> Result<Vec<Strategy>, ScrapeError> {
        Ok(vec![
            Strategy::new("modern-search", base.join("/search/results.html")?)
                .with_param("sort", "date"),
            Strategy::new("classic-ws-search", base.join("/ws/suche/l/s.html")?),
        ])
    }

    fn params(&self, query: &SearchQuery) -> Vec<(String, String)> {
        let mut params = vec![
            ("s".to_string(), query.keywords.clone()),
            ("l".to_string(), query.location.clone()),
        ];
        params.extend(self.extra_params.iter().cloned());
        params
    }
}

/// Scraper for Careerjet result pages
pub struct JobScraper {
    client: Client,
    base_url: Url,
    strategies: Vec<Strategy>,
    extractor: Extractor,
}

impl JobScraper {
    /// Create a scraper for the site at `base_url` using the default
    /// strategies. Every request is bounded by `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ScrapeError> {
        // Links resolve against the site origin, not any configured path
        let base_url = Url::parse(base_url)?.join("/")?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            strategies: Strategy::careerjet_defaults(&base_url)?,
            base_url,
            extractor: Extractor::new()?,
        })
    }

    pub fn from_config(config: &SearchConfig) -> Result<Self, ScrapeError> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    /// Replace the strategy list. Links are still resolved against the
    /// scraper's base URL.
    pub fn with_strategies(mut self, strategies: Vec<Strategy>) -> Self {
        self.strategies = strategies;
        self
    }

    /// Run the search, returning the listings of the first strategy that
    /// produced any. Never fails; "nothing found" is an empty vector.
    pub async fn fetch_jobs(&self, query: &SearchQuery) -> Vec<JobRecord> {
        let defaults = RecordDefaults::for_location(&query.location);

        for strategy in &self.strategies {
            info!(strategy = %strategy.name, url = %strategy.url, "Trying search strategy");

            match self.attempt(strategy, query, &defaults).await {
                Ok(records) if !records.is_empty() => {
                    info!(strategy = %strategy.name, count = records.len(), "Search strategy succeeded");
                    return records;
                }
                Ok(_) => {
                    info!(strategy = %strategy.name, "Search strategy returned no listings");
                }
                Err(e) => {
                    warn!(strategy = %strategy.name, error = %e, "Search strategy failed");
                }
            }
        }

        warn!(
            keywords = %query.keywords,
            location = %query.location,
            "All search strategies exhausted without listings"
        );
        Vec::new()
    }

    async fn attempt(
        &self,
        strategy: &Strategy,
        query: &SearchQuery,
        defaults: &RecordDefaults,
    ) -> Result<Vec<JobRecord>, ScrapeError> {
        let response = self
            .client
            .get(strategy.url.clone())
            .query(&strategy.params(query))
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ScrapeError::UnexpectedStatus(status));
        }

        let body = response.text().await?;
        debug!(strategy = %strategy.name, bytes = body.len(), "Received result page");

        Ok(self.extractor.extract(&body, &self.base_url, defaults))
    }
}

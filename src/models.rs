use std::sync::Arc;

use crate::config::Config;
use crate::proxy::CareerjetApi;
use crate::search::JobScraper;

/// Shared, read-only state handed to every route
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub scraper: Arc<JobScraper>,
    pub api: Arc<CareerjetApi>,
}

impl AppState {
    /// Build both upstream clients from `config`
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let scraper = JobScraper::from_config(&config.search)?;
        let api = CareerjetApi::new(&config.proxy, config.search.query())?;

        Ok(Self {
            scraper: Arc::new(scraper),
            api: Arc::new(api),
            config,
        })
    }
}

/// A normalized job listing, ready for presentation
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct JobRecord {
    pub title: String,
    /// Always an absolute URL
    pub link: String,
    pub company: String,
    pub location: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SearchQuery {
    pub keywords: String,
    pub location: String,
}

impl SearchQuery {
    pub fn new(keywords: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            location: location.into(),
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub mode: String,
}

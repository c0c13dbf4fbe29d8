//! Search Module
//!
//! Scrapes Careerjet's HTML result pages into normalized job records:
//! - `pipeline` - ordered upstream strategies with silent fallback
//! - `extract` - selector lists with per-field defaults

pub mod extract;
pub mod pipeline;

pub use extract::{Extractor, RecordDefaults};
pub use pipeline::{JobScraper, Strategy};

use thiserror::Error;

/// Errors from a single scraping attempt. The pipeline logs these and moves
/// on; they never reach a caller of [`JobScraper::fetch_jobs`].
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected status: {0}")]
    UnexpectedStatus(reqwest::StatusCode),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
}

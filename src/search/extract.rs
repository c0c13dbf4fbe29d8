//! Job Card Extraction
//!
//! Turns a Careerjet result page into [`JobRecord`]s. The markup drifts over
//! time, so every lookup is an ordered list of CSS selectors:
//!
//! - containers match if *any* selector matches (document order, no duplicates)
//! - each field takes the first selector that yields non-empty text
//!
//! A container without a usable title link is skipped. Every other missing
//! field falls back to [`RecordDefaults`].

use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use super::ScrapeError;
use crate::models::JobRecord;

pub const CONTAINER_SELECTORS: &[&str] = &["article.job", ".job", ".job-display"];
pub const TITLE_SELECTORS: &[&str] = &["h2 a", ".title a", "a.job-title"];
pub const COMPANY_SELECTORS: &[&str] = &[".company_name", ".company"];
pub const LOCATION_SELECTORS: &[&str] = &[".location"];
pub const DESCRIPTION_SELECTORS: &[&str] = &[".desc", ".description", ".job-snippet"];

pub const DEFAULT_COMPANY: &str = "Firma unbekannt";
pub const DEFAULT_DESCRIPTION: &str = "Klicken für Details...";

/// Values used for fields the listing markup does not provide
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDefaults {
    pub company: String,
    pub location: String,
    pub description: String,
}

impl RecordDefaults {
    /// Defaults for a search in `location`; the searched region stands in
    /// for listings without their own location.
    pub fn for_location(location: &str) -> Self {
        Self {
            company: DEFAULT_COMPANY.to_string(),
            location: location.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
        }
    }
}

/// Ordered candidate selectors for one field
struct FieldLocator {
    selectors: Vec<Selector>,
}

impl FieldLocator {
    fn compile(raw: &[&str]) -> Result<Self, ScrapeError> {
        let selectors = raw
            .iter()
            .map(|s| parse_selector(s))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { selectors })
    }

    /// First element (by selector priority) under `scope` with non-empty
    /// text that `accept` maps to a value
    fn locate_with<'a, T, F>(&self, scope: ElementRef<'a>, accept: F) -> Option<T>
    where
        F: Fn(ElementRef<'a>, String) -> Option<T>,
    {
        self.selectors.iter().find_map(|selector| {
            scope.select(selector).find_map(|element| {
                let text = normalized_text(element);
                if text.is_empty() {
                    None
                } else {
                    accept(element, text)
                }
            })
        })
    }

    fn text(&self, scope: ElementRef<'_>) -> Option<String> {
        self.locate_with(scope, |_, text| Some(text))
    }
}

pub struct Extractor {
    containers: Selector,
    title: FieldLocator,
    company: FieldLocator,
    location: FieldLocator,
    description: FieldLocator,
}

impl Extractor {
    /// Compile the Careerjet selector set
    pub fn new() -> Result<Self, ScrapeError> {
        Ok(Self {
            containers: parse_selector(&CONTAINER_SELECTORS.join(", "))?,
            title: FieldLocator::compile(TITLE_SELECTORS)?,
            company: FieldLocator::compile(COMPANY_SELECTORS)?,
            location: FieldLocator::compile(LOCATION_SELECTORS)?,
            description: FieldLocator::compile(DESCRIPTION_SELECTORS)?,
        })
    }

    /// Extract every resolvable listing from `html`, in document order.
    /// Relative links are resolved against `base`.
    pub fn extract(&self, html: &str, base: &Url, defaults: &RecordDefaults) -> Vec<JobRecord> {
        let document = Html::parse_document(html);

        let mut records = Vec::new();
        let mut skipped = 0usize;
        for container in document.select(&self.containers) {
            match self.extract_record(container, base, defaults) {
                Some(record) => records.push(record),
                None => skipped += 1,
            }
        }

        debug!(found = records.len(), skipped, "Extracted job cards");
        records
    }

    fn extract_record(
        &self,
        container: ElementRef<'_>,
        base: &Url,
        defaults: &RecordDefaults,
    ) -> Option<JobRecord> {
        let (title, link) = self.title.locate_with(container, |element, text| {
            let link = element
                .value()
                .attr("href")
                .and_then(|href| resolve_link(base, href))?;
            Some((text, link))
        })?;

        Some(JobRecord {
            title,
            link,
            company: self
                .company
                .text(container)
                .unwrap_or_else(|| defaults.company.clone()),
            location: self
                .location
                .text(container)
                .unwrap_or_else(|| defaults.location.clone()),
            description: self
                .description
                .text(container)
                .unwrap_or_else(|| defaults.description.clone()),
        })
    }
}

/// Resolve an `href` to an absolute http(s) URL
pub fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    base.join(href)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
        .map(|url| url.to_string())
}

/// All text below `element`, whitespace collapsed to single spaces
fn normalized_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_selector(raw: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(raw).map_err(|e| ScrapeError::InvalidSelector(format!("{raw}: {e:?}")))
}

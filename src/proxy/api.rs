//! Careerjet Public Search API client
//!
//! A single fixed query against the structured JSON endpoint. The request
//! parameters (including the caller identification the API requires) all
//! come from [`ProxyConfig`].

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::ProxyError;
use crate::config::ProxyConfig;
use crate::models::SearchQuery;

/// What the upstream answered
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamReply {
    /// `200 OK`, with the `jobs` field (or `[]` when absent)
    Jobs(Value),
    /// Any other status code
    Unavailable(StatusCode),
}

pub struct CareerjetApi {
    client: Client,
    endpoint: String,
    query: SearchQuery,
    locale_code: String,
    page_size: u32,
    affid: String,
    user_ip: String,
    user_agent: String,
    referer: String,
}

impl CareerjetApi {
    pub fn new(config: &ProxyConfig, query: SearchQuery) -> Result<Self, ProxyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.api_url.clone(),
            query,
            locale_code: config.locale_code.clone(),
            page_size: config.page_size,
            affid: config.affid.clone(),
            user_ip: config.user_ip.clone(),
            user_agent: config.user_agent.clone(),
            referer: config.referer.clone(),
        })
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("keywords", self.query.keywords.clone()),
            ("location", self.query.location.clone()),
            ("locale_code", self.locale_code.clone()),
            ("pagesize", self.page_size.to_string()),
            ("sort", "date".to_string()),
            ("affid", self.affid.clone()),
            ("user_ip", self.user_ip.clone()),
            ("user_agent", self.user_agent.clone()),
            ("url", self.referer.clone()),
        ]
    }

    /// Run the search once. Transport and decoding problems are errors; a
    /// non-200 answer is a normal [`UpstreamReply::Unavailable`].
    pub async fn search(&self) -> Result<UpstreamReply, ProxyError> {
        info!(endpoint = %self.endpoint, keywords = %self.query.keywords, "Querying Careerjet API");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&self.params())
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = %status, "Careerjet API returned an error status");
            return Ok(UpstreamReply::Unavailable(status));
        }

        let Value::Object(mut payload) = response.json::<Value>().await? else {
            return Err(ProxyError::UnexpectedPayload(
                "expected a JSON object".to_string(),
            ));
        };
        let jobs = match payload.remove("jobs") {
            None | Some(Value::Null) => Value::Array(Vec::new()),
            Some(jobs) => jobs,
        };

        debug!(
            count = jobs.as_array().map(Vec::len).unwrap_or_default(),
            "Careerjet API answered"
        );
        Ok(UpstreamReply::Jobs(jobs))
    }
}

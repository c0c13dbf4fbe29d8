use serde::Deserialize;
use std::env;
use std::str::FromStr;
use thiserror::Error;

use crate::models::SearchQuery;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub search: SearchConfig,
    pub proxy: ProxyConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

/// Settings for the HTML scraping pipeline behind the page server
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    pub keywords: String,
    pub location: String,
    /// Origin that relative listing links are resolved against
    pub base_url: String,
    pub timeout_secs: u64,
}

/// Settings for the structured JSON endpoint behind the proxy function
#[derive(Debug, Clone, Deserialize)]
pub struct ProxyConfig {
    pub api_url: String,
    pub locale_code: String,
    pub page_size: u32,
    pub affid: String,
    pub user_ip: String,
    pub user_agent: String,
    pub referer: String,
    pub timeout_secs: u64,
}

impl SearchConfig {
    pub fn query(&self) -> SearchQuery {
        SearchQuery::new(&self.keywords, &self.location)
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup, falling back to
    /// the built-in defaults for every missing key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            server: ServerConfig {
                port: parse_or(&lookup, "PORT", 5000)?,
                host: text("HOST", "0.0.0.0"),
            },
            search: SearchConfig {
                keywords: text("SEARCH_QUERY", "Software Entwickler"),
                location: text("SEARCH_LOCATION", "Schweiz"),
                base_url: text("CAREERJET_BASE_URL", "https://www.careerjet.ch"),
                timeout_secs: parse_or(&lookup, "SCRAPE_TIMEOUT_SECS", 15)?,
            },
            proxy: ProxyConfig {
                api_url: text("CAREERJET_API_URL", "https://public.api.careerjet.net/search"),
                locale_code: text("CAREERJET_LOCALE", "de_CH"),
                page_size: parse_or(&lookup, "CAREERJET_PAGE_SIZE", 20)?,
                affid: text("CAREERJET_AFFID", ""),
                user_ip: text("CAREERJET_USER_IP", "127.0.0.1"),
                user_agent: text("CAREERJET_USER_AGENT", DEFAULT_USER_AGENT),
                referer: text("CAREERJET_REFERER", "https://www.careerjet.ch"),
                timeout_secs: parse_or(&lookup, "PROXY_TIMEOUT_SECS", 10)?,
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_with(&[]).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.search.keywords, "Software Entwickler");
        assert_eq!(config.search.location, "Schweiz");
        assert_eq!(config.search.base_url, "https://www.careerjet.ch");
        assert_eq!(config.search.timeout_secs, 15);
        assert_eq!(config.proxy.timeout_secs, 10);
        assert_eq!(config.proxy.locale_code, "de_CH");
        assert_eq!(config.proxy.page_size, 20);
    }

    #[test]
    fn test_overrides() {
        let config = config_with(&[
            ("PORT", "8080"),
            ("SEARCH_QUERY", "Rust"),
            ("SEARCH_LOCATION", "Zürich"),
            ("SCRAPE_TIMEOUT_SECS", " 3 "),
        ])
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.search.query(), SearchQuery::new("Rust", "Zürich"));
        assert_eq!(config.search.timeout_secs, 3);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = config_with(&[("PORT", "fivethousand")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}

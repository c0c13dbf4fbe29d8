// Job Radar - Careerjet job board scraper and JSON proxy

pub mod config;
pub mod middleware;
pub mod models;
pub mod proxy;     // Serverless-style JSON proxy for the Careerjet API
pub mod routes;
pub mod search;    // Fallback-tolerant HTML scraping pipeline
pub mod types;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use models::{AppState, JobRecord, SearchQuery};

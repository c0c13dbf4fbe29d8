//! Careerjet JSON Proxy
//!
//! A serverless-style request/response handler: every invocation runs one
//! Careerjet API query and answers with `{statusCode, headers, body}`, where
//! `body` is JSON text. Outcomes:
//!
//! - upstream `200` → `200`, body is the raw `jobs` array
//! - upstream error status → same status, `{"error": "Careerjet API nicht erreichbar"}`
//! - transport or decoding failure → `500`, `{"error": "<error text>"}`
//!
//! Every response carries `Access-Control-Allow-Origin: *`.

pub mod api;

pub use api::{CareerjetApi, UpstreamReply};

use std::collections::BTreeMap;

use axum::body::Body;
use axum::http::{Response as HttpResponse, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::error;

use crate::types::AppError;

pub const UNAVAILABLE_MESSAGE: &str = "Careerjet API nicht erreichbar";

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected Careerjet payload: {0}")]
    UnexpectedPayload(String),
}

/// Gateway-style response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ProxyResponse {
    fn json(status_code: u16, payload: &Value) -> Self {
        let headers = BTreeMap::from([
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
        ]);

        match serde_json::to_string(payload) {
            Ok(body) => Self { status_code, headers, body },
            Err(e) => Self {
                status_code: 500,
                headers,
                body: serde_json::json!({ "error": e.to_string() }).to_string(),
            },
        }
    }

    fn error(status_code: u16, message: &str) -> Self {
        Self::json(status_code, &serde_json::json!({ "error": message }))
    }

    /// Decode the body back into JSON
    pub fn body_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Handle one proxy invocation. The event is accepted for gateway
/// compatibility; the search itself is fixed server-side.
pub async fn handle(api: &CareerjetApi, _event: &Value) -> ProxyResponse {
    match api.search().await {
        Ok(UpstreamReply::Jobs(jobs)) => ProxyResponse::json(200, &jobs),
        Ok(UpstreamReply::Unavailable(status)) => {
            ProxyResponse::error(status.as_u16(), UNAVAILABLE_MESSAGE)
        }
        Err(e) => {
            error!(error = %e, "Careerjet proxy request failed");
            ProxyResponse::error(500, &e.to_string())
        }
    }
}

impl IntoResponse for ProxyResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut builder = HttpResponse::builder().status(status);
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        match builder.body(Body::from(self.body)) {
            Ok(response) => response,
            Err(e) => AppError::Internal(e.to_string()).into_response(),
        }
    }
}

//! HTTP front door for the proxy function
//!
//! `GET /api/jobs` wraps the request in a gateway-style event, runs
//! [`crate::proxy::handle`] and replays its envelope as an HTTP response.

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};

use crate::middleware::apply_cors;
use crate::models::AppState;
use crate::proxy::{self, ProxyResponse};

pub fn router(state: AppState) -> Router {
    apply_cors(
        Router::new()
            .route("/api/jobs", get(proxy_jobs))
            .with_state(state),
    )
}

async fn proxy_jobs(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ProxyResponse {
    let event = serde_json::json!({
        "httpMethod": "GET",
        "path": "/api/jobs",
        "queryStringParameters": params,
    });
    proxy::handle(&state.api, &event).await
}

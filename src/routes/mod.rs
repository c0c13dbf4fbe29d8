//! HTTP Routes
//!
//! The two variants are served by separate routers:
//! - page server: `/` (job board) and `/api/health`
//! - proxy front door: `/api/jobs` and `/api/health`

pub mod health;
pub mod proxy;
pub mod ui;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::models::AppState;

/// Router for the rendered job board
pub fn create_page_router(state: AppState) -> Router {
    info!("Creating page router");

    Router::new()
        .merge(ui::router(state))
        .merge(health::router("page"))
        .layer(TraceLayer::new_for_http())
}

/// Router for the JSON proxy
pub fn create_proxy_router(state: AppState) -> Router {
    info!("Creating proxy router");

    Router::new()
        .merge(proxy::router(state))
        .merge(health::router("proxy"))
        .layer(TraceLayer::new_for_http())
}

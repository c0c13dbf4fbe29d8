// Allow-all CORS for the proxy front door

use axum::http::{header, Method};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

/// Answer preflights from any origin and expose the content type to
/// cross-origin readers of the job feed
pub fn apply_cors(router: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE])
        .expose_headers([header::CONTENT_TYPE]);

    router.layer(cors)
}

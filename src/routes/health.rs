use axum::{routing::get, Json, Router};

use crate::models::HealthResponse;

/// `/api/health`, reporting which variant this process serves
pub fn router(mode: &'static str) -> Router {
    Router::new().route("/api/health", get(move || health_check(mode)))
}

async fn health_check(mode: &'static str) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        mode: mode.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_reports_mode() {
        let response = router("proxy")
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["mode"], "proxy");
    }
}

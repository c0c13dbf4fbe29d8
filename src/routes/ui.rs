//! Job board page
//!
//! `GET /` runs the scraping pipeline for the configured search and renders
//! the listings. An empty result (including every upstream failure) shows
//! the empty-state panel instead.

use askama::Template;
use axum::{extract::State, response::Html, routing::get, Router};
use tracing::info;

use crate::models::{AppState, JobRecord};
use crate::types::AppResult;

#[derive(Template)]
#[template(path = "index.html")]
pub struct JobBoardPage<'a> {
    pub region: &'a str,
    pub jobs: Vec<JobRecord>,
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/", get(index)).with_state(state)
}

async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let query = state.config.search.query();
    let jobs = state.scraper.fetch_jobs(&query).await;
    info!(count = jobs.len(), "Rendering job board");

    let page = JobBoardPage {
        region: &query.location,
        jobs,
    };
    Ok(Html(page.render()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use mockito::Matcher;
    use tower::ServiceExt;

    fn record(title: &str) -> JobRecord {
        JobRecord {
            title: title.to_string(),
            link: "https://www.careerjet.ch/jobad/1".to_string(),
            company: "Acme AG".to_string(),
            location: "Basel".to_string(),
            description: "Kurzbeschreibung".to_string(),
        }
    }

    fn state_for(server: &mockito::ServerGuard) -> AppState {
        let mut config = Config::from_lookup(|_| None).unwrap();
        config.search.base_url = server.url();
        config.search.timeout_secs = 2;
        AppState::new(config).unwrap()
    }

    async fn get_page(state: AppState) -> (StatusCode, String) {
        let response = router(state)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[test]
    fn test_renders_cards() {
        let page = JobBoardPage {
            region: "Schweiz",
            jobs: vec![record("Rust Entwickler"), record("Go Entwickler")],
        };
        let html = page.render().unwrap();

        assert_eq!(html.matches("class=\"job-card\"").count(), 2);
        assert!(html.contains("Rust Entwickler"));
        assert!(html.contains("Acme AG"));
        assert!(html.contains("Basel"));
        assert!(html.contains("Kurzbeschreibung"));
        assert!(html.contains("Zum Inserat"));
        assert!(!html.contains("Keine Ergebnisse gefunden"));
    }

    #[test]
    fn test_escapes_record_text() {
        let mut job = record("<script>alert(1)</script>");
        job.company = "Tom & Jerry \"GmbH\"".to_string();
        let html = JobBoardPage { region: "Schweiz", jobs: vec![job] }
            .render()
            .unwrap();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Tom &amp; Jerry"));
    }

    #[test]
    fn test_empty_state() {
        let html = JobBoardPage { region: "Schweiz", jobs: Vec::new() }
            .render()
            .unwrap();

        assert!(html.contains("Keine Ergebnisse gefunden"));
        assert!(html.contains("Careerjet blockiert die Anfrage momentan"));
        assert!(!html.contains("class=\"job-card\""));
    }

    #[tokio::test]
    async fn test_page_shows_scraped_jobs() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/search/results.html")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r#"<article class="job"><h2><a href="/jobad/7">Platform Engineer</a></h2></article>"#,
            )
            .create_async()
            .await;

        let (status, html) = get_page(state_for(&server)).await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Platform Engineer"));
        assert!(html.contains("Firma unbekannt"));
    }

    #[tokio::test]
    async fn test_page_without_matches_shows_empty_state() {
        let mut server = mockito::Server::new_async().await;
        let modern = server
            .mock("GET", "/search/results.html")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html><body><div class=\"teaser\">nothing</div></body></html>")
            .create_async()
            .await;
        let classic = server
            .mock("GET", "/ws/suche/l/s.html")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html><body></body></html>")
            .create_async()
            .await;

        let (status, html) = get_page(state_for(&server)).await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Keine Ergebnisse gefunden"));
        modern.assert_async().await;
        classic.assert_async().await;
    }
}

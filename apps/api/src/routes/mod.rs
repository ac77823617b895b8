pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::matching::handlers::handle_match_jobs;
use crate::resume::handlers::handle_upload_resume;
use crate::state::AppState;

/// Résumé uploads above this size are rejected before parsing.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/upload_resume", post(handle_upload_resume))
        .route("/match-jobs", post(handle_match_jobs))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::advice::NoAdvice;
    use crate::config::Config;
    use crate::scraping::site::Timeouts;
    use crate::scraping::{JobDetailScraper, JobListingScraper, SiteProfile};
    use crate::snapshot::SnapshotWriter;

    const BOUNDARY: &str = "X-SKILLMATCH-BOUNDARY";

    fn app(dir: &tempfile::TempDir) -> Router {
        // nothing listens on the discard port, so the listing fetch is refused
        let site = SiteProfile {
            listing_url: "http://127.0.0.1:9/jobs".to_string(),
            timeouts: Timeouts {
                navigation_ms: 2_000,
                ..Timeouts::default()
            },
            ..SiteProfile::default()
        };

        build_router(AppState {
            config: Config {
                port: 0,
                rust_log: "info".to_string(),
                gemini_api_key: None,
                output_dir: dir.path().to_path_buf(),
                max_jobs: 1,
                site_profile: None,
                user_agent: "Mozilla/5.0".to_string(),
            },
            listing: Arc::new(JobListingScraper::new(site.clone()).unwrap()),
            detail: Arc::new(JobDetailScraper::new(site).unwrap()),
            advisor: Arc::new(NoAdvice),
            snapshots: SnapshotWriter::new(dir.path()),
        })
    }

    fn upload(field: &str, content_type: &str, content: &[u8]) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"resume.pdf\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/upload_resume")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_root_reports_running() {
        let dir = tempfile::tempdir().unwrap();
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        let (status, body) = send(app(&dir), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Scraper API is running");
    }

    #[tokio::test]
    async fn test_upload_rejects_non_pdf() {
        let dir = tempfile::tempdir().unwrap();

        let (status, body) = send(app(&dir), upload("file", "text/plain", b"hello")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("text/plain"));
    }

    #[tokio::test]
    async fn test_upload_rejects_empty_file() {
        let dir = tempfile::tempdir().unwrap();

        let (status, body) = send(app(&dir), upload("file", "application/pdf", b"")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Uploaded file is empty");
    }

    #[tokio::test]
    async fn test_upload_requires_file_field() {
        let dir = tempfile::tempdir().unwrap();

        let (status, body) = send(app(&dir), upload("resume", "application/pdf", b"%PDF")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Missing multipart field 'file'");
    }

    #[tokio::test]
    async fn test_upload_unreadable_pdf_is_unprocessable() {
        let dir = tempfile::tempdir().unwrap();

        let (status, body) = send(
            app(&dir),
            upload("file", "application/pdf", b"this is not a pdf document"),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");
    }

    #[tokio::test]
    async fn test_match_jobs_with_unreachable_board_is_bad_gateway() {
        let dir = tempfile::tempdir().unwrap();
        let request = Request::builder()
            .method("POST")
            .uri("/match-jobs")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"name": "Jane Doe", "technical_skills": ["Python"]}"#,
            ))
            .unwrap();

        let (status, body) = send(app(&dir), request).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "UPSTREAM_UNAVAILABLE");
        assert_eq!(
            body["error"]["message"],
            "The job board could not be reached"
        );
    }
}

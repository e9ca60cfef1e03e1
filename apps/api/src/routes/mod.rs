pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Match API
        .route(
            "/api/v1/match",
            post(handlers::handle_match_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/v1/match/text", post(handlers::handle_match_text))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::llm_client::stub::ScriptedGenerator;
    use crate::matching::keywords::KeywordExtractor;
    use crate::matching::pipeline::MatchPipeline;
    use crate::matching::tagger::LexiconTagger;

    const BOUNDARY: &str = "matcher-test-boundary";

    fn test_router() -> Router {
        let config = Config {
            anthropic_api_key: "test-key".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            collaborator_timeout: Duration::from_secs(5),
            max_upload_bytes: 1024 * 1024,
        };
        let pipeline = MatchPipeline::new(
            KeywordExtractor::new(Arc::new(LexiconTagger::new())),
            Arc::new(ScriptedGenerator::failing()),
            config.collaborator_timeout,
        );
        build_router(AppState { config, pipeline })
    }

    enum Part<'a> {
        File {
            name: &'a str,
            filename: &'a str,
            content: &'a [u8],
        },
        Text {
            name: &'a str,
            value: &'a str,
        },
    }

    fn file<'a>(name: &'a str, filename: &'a str, content: &'a [u8]) -> Part<'a> {
        Part::File {
            name,
            filename,
            content,
        }
    }

    fn text<'a>(name: &'a str, value: &'a str) -> Part<'a> {
        Part::Text { name, value }
    }

    fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::File {
                    name,
                    filename,
                    content,
                } => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                             Content-Type: application/octet-stream\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(content);
                }
                Part::Text { name, value } => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n")
                            .as_bytes(),
                    );
                    body.extend_from_slice(value.as_bytes());
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload_request(parts: &[Part<'_>]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/match")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap()
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = test_router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn error_message(body: &Value) -> &str {
        body["error"]["message"].as_str().unwrap_or_default()
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::get("/health").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_text_match_returns_full_report_with_fallbacks() {
        let request = Request::post("/api/v1/match/text")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "resume_text": "Experienced Python developer with SQL skills. Education: BS Computer Science.",
                    "job_description": "Looking for a Python and SQL developer with AWS experience."
                })
                .to_string(),
            ))
            .unwrap();

        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 60);
        assert_eq!(body["domain"], "general");
        assert!(body["missing_keywords"]
            .as_array()
            .unwrap()
            .contains(&json!("aws")));
        assert_eq!(body["details"]["name"], Value::Null);
        assert_eq!(body["assessment"]["swot"]["strengths"], "N/A");
    }

    #[tokio::test]
    async fn test_text_match_rejects_blank_job_description() {
        let request = Request::post("/api/v1/match/text")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({"resume_text": "resume", "job_description": "   "}).to_string(),
            ))
            .unwrap();

        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_upload_without_file_is_rejected() {
        let (status, body) =
            send(upload_request(&[text("job_description", "Rust engineer")])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_message(&body), "No file uploaded");
    }

    #[tokio::test]
    async fn test_upload_with_empty_filename_is_rejected() {
        let (status, body) = send(upload_request(&[
            file("resume", "", b"%PDF-1.4"),
            text("job_description", "Rust engineer"),
        ]))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_message(&body), "No file selected");
    }

    #[tokio::test]
    async fn test_upload_non_pdf_is_rejected() {
        let (status, body) = send(upload_request(&[
            file("resume", "resume.docx", b"PK\x03\x04"),
            text("job_description", "Rust engineer"),
        ]))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_message(&body), "Invalid file type");
    }

    #[tokio::test]
    async fn test_upload_without_job_description_is_rejected() {
        let (status, _) = send(upload_request(&[file("resume", "resume.pdf", b"%PDF-1.4")])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_over_body_limit_is_payload_too_large() {
        let oversized = vec![b'x'; 2 * 1024 * 1024];
        let (status, body) = send(upload_request(&[
            text("job_description", "Rust engineer"),
            file("resume", "resume.pdf", &oversized),
        ]))
        .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
    }

    #[tokio::test]
    async fn test_upload_corrupt_pdf_is_a_processing_error() {
        let (status, body) = send(upload_request(&[
            file("resume", "resume.pdf", b"not really a pdf"),
            text("job_description", "Rust engineer"),
        ]))
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "DOCUMENT_PROCESSING_ERROR");
    }
}

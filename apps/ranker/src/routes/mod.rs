pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::ranking::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Rankings API
        .route("/api/v1/rankings", post(handlers::handle_rank))
        .route("/api/v1/rankings/export", get(handlers::handle_export))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::extraction::{ExtractionError, TextExtractor};
    use crate::ranking::export::tests::read_rows;
    use crate::scoring::evaluator::tests::ScriptedCompletion;
    use crate::scoring::{ResponseFormat, ResumeScorer, ScorerConfig};

    const BOUNDARY: &str = "ranker-test-boundary";

    struct Utf8Extractor;

    impl TextExtractor for Utf8Extractor {
        fn extract(&self, pdf: &[u8]) -> Result<String, ExtractionError> {
            Ok(String::from_utf8_lossy(pdf).trim().to_string())
        }
    }

    fn test_state(export_path: &Path, completions: &[&str]) -> AppState {
        AppState {
            config: Config {
                gemini_api_key: "test-key".to_string(),
                gemini_model: "test-model".to_string(),
                response_format: ResponseFormat::Labeled,
                export_path: export_path.to_path_buf(),
                max_upload_bytes: 1024 * 1024,
                port: 0,
                rust_log: "debug".to_string(),
            },
            scorer: ResumeScorer::new(
                Arc::new(ScriptedCompletion::ok(completions)),
                ScorerConfig::default(),
            ),
            extractor: Arc::new(Utf8Extractor),
        }
    }

    /// (field name, optional file name, content)
    fn multipart_body(parts: &[(&str, Option<&str>, &str)]) -> String {
        let mut body = String::new();
        for (name, file_name, content) in parts {
            body.push_str(&format!("--{BOUNDARY}\r\n"));
            match file_name {
                Some(file_name) => {
                    body.push_str(&format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/pdf\r\n\r\n"
                    ));
                }
                None => {
                    body.push_str(&format!(
                        "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                    ));
                }
            }
            body.push_str(content);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body
    }

    fn rank_request(body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/rankings")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_ok() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(&dir.path().join("out.csv"), &[]));

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_export_before_any_run_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(&dir.path().join("out.csv"), &[]));

        let response = app
            .oneshot(
                Request::get("/api/v1/rankings/export")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_missing_job_description_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(&dir.path().join("out.csv"), &[]));

        let body = multipart_body(&[
            ("job_description", None, "   "),
            ("resumes", Some("a.pdf"), "resume"),
        ]);
        let response = app.oneshot(rank_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["error"]["message"], "Please enter a job description!");
    }

    #[tokio::test]
    async fn test_missing_resumes_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(test_state(&dir.path().join("out.csv"), &[]));

        let body = multipart_body(&[("job_description", None, "Backend engineer")]);
        let response = app.oneshot(rank_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["error"]["message"], "Please upload at least one resume!");
    }

    #[tokio::test]
    async fn test_rank_then_export_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let export_path = dir.path().join("out.csv");
        let completions = [
            // weak.pdf
            "Score: 30\nExplanation: little overlap",
            "Score: 30\nExplanation: unrelated degree",
            "Score: 30\nExplanation: junior",
            "Score: 30\nExplanation: none",
            // strong.pdf
            "Score: 90\nExplanation: all keywords",
            "Score: 90\nExplanation: MSc CS",
            "Score: 90\nExplanation: 8 years",
            "Score: 90\nExplanation: AWS Professional",
        ];
        let app = build_router(test_state(&export_path, &completions));

        let body = multipart_body(&[
            ("job_description", None, "Senior backend engineer, 5+ years Go, AWS"),
            ("resumes", Some("weak.pdf"), "Frontend developer"),
            ("resumes", Some("blank.pdf"), "   "),
            ("resumes", Some("strong.pdf"), "Go and AWS veteran"),
        ]);
        let response = app.clone().oneshot(rank_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        let rows = json["report"]["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["document_name"], "strong.pdf");
        assert_eq!(rows[0]["rank"], 1);
        assert_eq!(rows[1]["document_name"], "weak.pdf");
        assert_eq!(rows[1]["rank"], 2);
        assert_eq!(json["skipped"][0]["document_name"], "blank.pdf");

        let response = app
            .oneshot(
                Request::get("/api/v1/rankings/export")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .contains("resume_analysis_results.csv"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let exported = read_rows(&bytes[..]).unwrap();
        assert_eq!(exported.len(), 2);
        assert_eq!(exported[0].file_name, "strong.pdf");
        assert_eq!(exported[0].total_score, 90);
        assert_eq!(exported[1].rank, 2);
        assert_eq!(exported[1].semantic_explanation, "little overlap");
    }
}

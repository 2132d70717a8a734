//! HTTP server for docdiff.
//!
//! Exposes line, text, and document comparison as JSON endpoints under
//! `/v1`. Comparisons run on the blocking pool; failures come back as a
//! `success: false` report with a status code matching the error.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::{ServerConfig, DEFAULT_MAX_UNITS};
pub use error::{ServerError, ServerResult};
pub use router::{build_router, AppState};
pub use server::DocdiffServer;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    fn app() -> Router {
        DocdiffServer::new(ServerConfig::default()).router()
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_endpoint() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn info_endpoint() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/v1/info")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let info: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(info["name"], "docdiff-server");
        assert_eq!(info["config"]["max_gap"], 50);
    }

    #[tokio::test]
    async fn compare_lines_endpoint() {
        let (status, report) = post_json(
            app(),
            "/v1/compare/lines",
            json!({"lines1": ["a", "b"], "lines2": ["a", "c", "b"]}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["success"], true);
        assert_eq!(report["total_lines"], 3);
        assert_eq!(report["changes"][1], json!({"type": "addition", "content": "c", "line_number": 2}));
        assert_eq!(report["stats"]["additions"], 1);
        assert_eq!(report["stats"]["unchanged"], 2);
    }

    #[tokio::test]
    async fn compare_text_endpoint() {
        let (status, report) = post_json(
            app(),
            "/v1/compare/text",
            json!({"text1": "abc", "text2": "abXc"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            report["ranges"],
            json!([{
                "type": "addition",
                "file1": {"start": 2, "end": 2, "text": ""},
                "file2": {"start": 2, "end": 3, "text": "X"}
            }])
        );
        assert!(report["stats"].get("unchanged").is_none());
    }

    #[tokio::test]
    async fn missing_input_is_bad_request() {
        let (status, report) =
            post_json(app(), "/v1/compare/text", json!({"text1": "only one"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(report["success"], false);
        assert_eq!(
            report["error"],
            "input type mismatch: text1 and text2 are required"
        );
    }

    #[tokio::test]
    async fn compare_documents_endpoint() {
        let (status, report) = post_json(
            app(),
            "/v1/compare/documents",
            json!({
                "file1": {"name": "a.txt", "content": "one\ntwo\n"},
                "file2": {"name": "b.txt", "content": "one\n"}
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["stats"]["deletions"], 1);
    }

    #[tokio::test]
    async fn mismatched_documents_are_rejected() {
        let (status, report) = post_json(
            app(),
            "/v1/compare/documents",
            json!({
                "file1": {"name": "a.txt", "content": "x"},
                "file2": {"name": "b.pdf", "content": "x"}
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(report["success"], false);
    }

    #[tokio::test]
    async fn unsupported_document_is_unprocessable() {
        let (status, _) = post_json(
            app(),
            "/v1/compare/documents",
            json!({
                "file1": {"name": "a.docx", "content": "x"},
                "file2": {"name": "b.docx", "content": "y"}
            }),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn oversized_input_is_bad_request() {
        let mut config = ServerConfig::default();
        config.diff.max_units = Some(2);
        let (status, report) = post_json(
            DocdiffServer::new(config).router(),
            "/v1/compare/lines",
            json!({"lines1": ["a", "b", "c"], "lines2": ["a"]}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(report["success"], false);
    }

    #[tokio::test]
    async fn similarity_endpoint() {
        let (status, body) = post_json(
            app(),
            "/v1/similarity",
            json!({"text1": "abcde", "text2": "abcdx"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let response: docdiff_core::SimilarityScore = serde_json::from_value(body).unwrap();
        assert!((response.ratio - 0.8).abs() < 1e-9);
        assert!(response.similar);
    }

    #[tokio::test]
    async fn similarity_respects_unit_limit() {
        let mut config = ServerConfig::default();
        config.diff.max_units = Some(2);
        let (status, report) = post_json(
            DocdiffServer::new(config).router(),
            "/v1/similarity",
            json!({"text1": "abcdef", "text2": "abcxyz"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(report["success"], false);
        assert_eq!(report["error"], "input too large: text1 has 6 units, limit is 2");
    }

    #[tokio::test]
    async fn mistyped_body_is_a_report() {
        let (status, report) = post_json(
            app(),
            "/v1/compare/lines",
            json!({"lines1": [1, 2], "lines2": []}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(report["success"], false);
        assert!(report["error"]
            .as_str()
            .unwrap()
            .starts_with("input type mismatch"));
    }

    #[tokio::test]
    async fn unparsable_body_is_a_report() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/compare/text")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let report: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(report["success"], false);
    }

    #[tokio::test]
    async fn unknown_extension_is_bad_request() {
        let (status, report) = post_json(
            app(),
            "/v1/compare/documents",
            json!({
                "file1": {"name": "a.xyz", "content": "x"},
                "file2": {"name": "b.xyz", "content": "y"}
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            report["error"],
            "input type mismatch: unsupported file type: a.xyz"
        );
    }
}

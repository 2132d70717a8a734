use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use docdiff_core::{CompareError, CompareResult, ComparisonReport, SimilarityScore};
use docdiff_extract::{try_compare_documents, Document};
use serde::Deserialize;
use serde_json::json;
use tokio::task::JoinError;
use tracing::{debug, warn};

use crate::router::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CompareLinesRequest {
    pub lines1: Option<Vec<String>>,
    pub lines2: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CompareTextRequest {
    pub text1: Option<String>,
    pub text2: Option<String>,
}

/// An uploaded document: its file name and UTF-8 content.
#[derive(Debug, Deserialize)]
pub struct DocumentPayload {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CompareDocumentsRequest {
    pub file1: Option<DocumentPayload>,
    pub file2: Option<DocumentPayload>,
}

type ReportResponse = (StatusCode, Json<ComparisonReport>);

/// Health check handler.
pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Info handler.
pub async fn info_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "name": "docdiff-server",
        "version": env!("CARGO_PKG_VERSION"),
        "config": state.engine.config(),
    }))
}

pub async fn compare_lines_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CompareLinesRequest>, JsonRejection>,
) -> ReportResponse {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejected(rejection),
    };
    let (Some(lines1), Some(lines2)) = (request.lines1, request.lines2) else {
        return failed(missing("lines1 and lines2"));
    };
    debug!(lines1 = lines1.len(), lines2 = lines2.len(), "compare lines request");
    respond(run_blocking(move || state.engine.try_compare_lines(&lines1, &lines2)).await)
}

pub async fn compare_text_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CompareTextRequest>, JsonRejection>,
) -> ReportResponse {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejected(rejection),
    };
    let (Some(text1), Some(text2)) = (request.text1, request.text2) else {
        return failed(missing("text1 and text2"));
    };
    debug!(text1 = text1.len(), text2 = text2.len(), "compare text request");
    respond(run_blocking(move || state.engine.try_compare_text(&text1, &text2)).await)
}

pub async fn compare_documents_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CompareDocumentsRequest>, JsonRejection>,
) -> ReportResponse {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejected(rejection),
    };
    let (Some(file1), Some(file2)) = (request.file1, request.file2) else {
        return failed(missing("file1 and file2"));
    };
    debug!(file1 = %file1.name, file2 = %file2.name, "compare documents request");
    let result = run_blocking(move || {
        let doc1 = Document::from_bytes(file1.name, file1.content)?;
        let doc2 = Document::from_bytes(file2.name, file2.content)?;
        try_compare_documents(&state.engine, &state.registry, &doc1, &doc2)
    })
    .await;
    respond(result)
}

pub async fn similarity_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CompareTextRequest>, JsonRejection>,
) -> Result<Json<SimilarityScore>, ReportResponse> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return Err(rejected(rejection)),
    };
    let (Some(text1), Some(text2)) = (request.text1, request.text2) else {
        return Err(failed(missing("text1 and text2")));
    };
    match run_blocking(move || state.engine.try_similarity(&text1, &text2)).await {
        Ok(Ok(score)) => Ok(Json(score)),
        Ok(Err(e)) => Err(failed(e)),
        Err(e) => Err(task_failed(e)),
    }
}

fn missing(fields: &str) -> CompareError {
    CompareError::TypeMismatch(format!("{fields} are required"))
}

/// Run a comparison off the async executor.
async fn run_blocking<T, F>(job: F) -> Result<CompareResult<T>, JoinError>
where
    T: Send + 'static,
    F: FnOnce() -> CompareResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(job).await
}

fn respond(result: Result<CompareResult<ComparisonReport>, JoinError>) -> ReportResponse {
    match result {
        Ok(Ok(report)) => (StatusCode::OK, Json(report)),
        Ok(Err(e)) => failed(e),
        Err(e) => task_failed(e),
    }
}

fn failed(error: CompareError) -> ReportResponse {
    warn!(error = %error, "comparison rejected");
    (status_for(&error), Json(ComparisonReport::failure(&error)))
}

fn task_failed(error: JoinError) -> ReportResponse {
    warn!(error = %error, "comparison task failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ComparisonReport::failure_message(format!(
            "comparison task failed: {error}"
        ))),
    )
}

/// Unreadable, mistyped, or oversized request bodies.
fn rejected(rejection: JsonRejection) -> ReportResponse {
    failed(CompareError::TypeMismatch(rejection.body_text()))
}

pub fn status_for(error: &CompareError) -> StatusCode {
    match error {
        CompareError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
        e if e.is_input_error() => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

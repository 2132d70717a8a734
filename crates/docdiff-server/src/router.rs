use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use docdiff_core::DiffEngine;
use docdiff_extract::ExtractorRegistry;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handler;

/// Shared state handed to every handler.
#[derive(Debug)]
pub struct AppState {
    pub engine: DiffEngine,
    pub registry: ExtractorRegistry,
}

/// Build the axum router with all docdiff endpoints.
pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/info", get(handler::info_handler))
        .route("/v1/compare/lines", post(handler::compare_lines_handler))
        .route("/v1/compare/text", post(handler::compare_text_handler))
        .route("/v1/compare/documents", post(handler::compare_documents_handler))
        .route("/v1/similarity", post(handler::similarity_handler))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

use docdiff_core::DiffEngine;
use docdiff_extract::ExtractorRegistry;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::{build_router, AppState};

/// docdiff HTTP server.
pub struct DocdiffServer {
    config: ServerConfig,
    registry: ExtractorRegistry,
}

impl DocdiffServer {
    /// A server with the default extractors (plain text only).
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            registry: ExtractorRegistry::with_defaults(),
        }
    }

    /// Replace the extractor registry, e.g. to add DOCX or PDF support.
    pub fn with_registry(mut self, registry: ExtractorRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(self) -> axum::Router {
        let state = AppState {
            engine: DiffEngine::new(self.config.diff.clone()),
            registry: self.registry,
        };
        build_router(state, self.config.max_body_bytes)
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        self.config
            .diff
            .validate()
            .map_err(|e| ServerError::Config(e.to_string()))?;
        let bind_addr = self.config.bind_addr;
        let listener = TcpListener::bind(bind_addr).await?;
        tracing::info!("docdiff server listening on {}", bind_addr);
        axum::serve(listener, self.router())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_construction() {
        let server = DocdiffServer::new(ServerConfig::default());
        assert_eq!(server.config().bind_addr, "127.0.0.1:5000".parse().unwrap());
    }

    #[test]
    fn router_builds() {
        let server = DocdiffServer::new(ServerConfig::default());
        let _router = server.router();
    }

    #[tokio::test]
    async fn invalid_config_refuses_to_serve() {
        let mut config = ServerConfig::default();
        config.diff.modification_similarity_threshold = 3.0;
        let err = DocdiffServer::new(config).serve().await.unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }
}

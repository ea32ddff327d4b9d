//! Claimwell API
//!
//! The HTTP surface of the claim processor: a multipart PDF upload
//! endpoint backed by the orchestrator, plus liveness and health checks.
//!
//! The service is stateless across requests. If the Gemini provider
//! cannot be constructed at startup (missing API key) the server still
//! comes up, reports itself degraded on `/health`, and refuses claim
//! processing with 503 until restarted with credentials.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod upload;

use claimwell_llm::GeminiProvider;
use claimwell_orchestrator::ClaimOrchestrator;
use config::ApiConfig;
use handlers::{create_router, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

/// The production orchestrator: Gemini serves both the language model and
/// the document text source
pub type GeminiOrchestrator = ClaimOrchestrator<GeminiProvider, GeminiProvider>;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the HTTP server.
///
/// Initializes tracing, constructs the Gemini-backed orchestrator (or
/// degrades when credentials are missing) and serves until shutdown.
pub async fn start_server(config: ApiConfig) -> Result<(), ServiceError> {
    tracing_subscriber::fmt::init();

    info!("Starting claimwell API");
    info!("Bind address: {}", config.bind_addr());
    info!("Gemini model: {}", config.gemini_model);

    let orchestrator = match GeminiProvider::from_env() {
        Ok(provider) => {
            let provider = Arc::new(provider.with_model(config.gemini_model.clone()));
            info!("Orchestrator initialized");
            Some(Arc::new(ClaimOrchestrator::new(
                Arc::clone(&provider),
                provider,
            )))
        }
        Err(e) => {
            error!(error = %e, "Provider initialization failed, claim processing disabled");
            None
        }
    };

    let state: AppState<GeminiProvider, GeminiProvider> = AppState { orchestrator };
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("API listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServiceError::Server(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default_test_config();
        assert_eq!(config.bind_port, 8000);
    }
}

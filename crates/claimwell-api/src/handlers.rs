//! HTTP request handlers for the claim processing service.
//!
//! Implements the liveness, health and claim-upload endpoints using axum.
//! Upload validation runs before any staging or processing; a request
//! either yields a full `ClaimProcessingResponse` or an error, never
//! partial results.

use crate::upload::{validate_upload_batch, UploadError, UploadedFile};
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use claimwell_domain::traits::{DocumentSource, LanguageModel};
use claimwell_domain::ClaimProcessingResponse;
use claimwell_orchestrator::{ClaimOrchestrator, FileEntry};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Ceiling for one multipart request body (the whole batch)
const MAX_REQUEST_BYTES: usize = 256 * 1024 * 1024;

/// Shared application state.
///
/// `orchestrator` is `None` when provider initialization failed at
/// startup; the service then serves liveness and health but refuses
/// claim processing.
pub struct AppState<L, S>
where
    L: LanguageModel,
    S: DocumentSource,
{
    /// The claim pipeline, absent in degraded mode
    pub orchestrator: Option<Arc<ClaimOrchestrator<L, S>>>,
}

impl<L, S> Clone for AppState<L, S>
where
    L: LanguageModel,
    S: DocumentSource,
{
    fn clone(&self) -> Self {
        Self {
            orchestrator: self.orchestrator.clone(),
        }
    }
}

/// Root endpoint response
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// Liveness flag
    pub status: String,
    /// Service name
    pub service: String,
    /// Crate version
    pub version: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// "healthy" or "degraded"
    pub status: String,
    /// "initialized" or "failed"
    pub orchestrator: String,
    /// Per-component readiness
    pub components: ComponentsStatus,
}

/// Readiness of the pipeline components
#[derive(Debug, Serialize, Deserialize)]
pub struct ComponentsStatus {
    /// Document classifier
    pub classifier: String,
    /// Field extractor
    pub extractor: String,
    /// Consistency validator
    pub validator: String,
    /// Decision policy
    pub decision: String,
}

impl ComponentsStatus {
    fn ready() -> Self {
        Self {
            classifier: "ready".to_string(),
            extractor: "ready".to_string(),
            validator: "ready".to_string(),
            decision: "ready".to_string(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type mapped onto HTTP statuses
#[derive(Debug)]
pub enum ApiError {
    /// Service started degraded; claim processing is refused
    Unavailable,
    /// The upload batch failed validation
    Upload(UploadError),
    /// The request itself was malformed
    BadRequest(String),
    /// Pipeline failure; details stay in the logs
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Claim processing unavailable. Check API keys and configuration.".to_string(),
            ),
            ApiError::Upload(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<UploadError> for ApiError {
    fn from(e: UploadError) -> Self {
        ApiError::Upload(e)
    }
}

/// GET / - liveness
async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        status: "active".to_string(),
        service: "claimwell".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /health - component readiness
async fn health_check<L, S>(State(state): State<AppState<L, S>>) -> Json<HealthCheckResponse>
where
    L: LanguageModel + 'static,
    S: DocumentSource + 'static,
{
    let initialized = state.orchestrator.is_some();
    Json(HealthCheckResponse {
        status: if initialized { "healthy" } else { "degraded" }.to_string(),
        orchestrator: if initialized { "initialized" } else { "failed" }.to_string(),
        components: ComponentsStatus::ready(),
    })
}

/// POST /process-claim - process an uploaded batch of claim PDFs
///
/// Reads every file part of the multipart body, validates the batch,
/// stages the bytes into a per-request scratch directory and runs the
/// claim pipeline. The scratch directory is discarded when the request
/// finishes, whatever the outcome.
async fn process_claim<L, S>(
    State(state): State<AppState<L, S>>,
    mut multipart: Multipart,
) -> Result<Json<ClaimProcessingResponse>, ApiError>
where
    L: LanguageModel + 'static,
    S: DocumentSource + 'static,
{
    let Some(orchestrator) = state.orchestrator else {
        return Err(ApiError::Unavailable);
    };

    let mut files: Vec<UploadedFile> = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::BadRequest(format!("Malformed multipart request: {}", e))
    })? {
        // non-file fields are ignored
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content = field.bytes().await.map_err(|e| {
            ApiError::BadRequest(format!("Failed to read upload '{}': {}", filename, e))
        })?;
        files.push((filename, content.to_vec()));
    }

    info!(files = files.len(), "Received claim upload");
    validate_upload_batch(&files)?;

    let staging = tempfile::tempdir().map_err(|e| {
        error!(error = %e, "Failed to create staging directory");
        ApiError::Internal(e.to_string())
    })?;

    let mut entries = Vec::with_capacity(files.len());
    for (filename, content) in &files {
        // staging path uses the final name component only
        let basename = Path::new(filename)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| filename.clone());
        let path = staging.path().join(&basename);
        tokio::fs::write(&path, content).await.map_err(|e| {
            error!(%filename, error = %e, "Failed to stage upload");
            ApiError::Internal(e.to_string())
        })?;
        debug!(%filename, bytes = content.len(), "Staged upload");
        entries.push(FileEntry::new(path, filename.clone()));
    }

    let response = orchestrator.process_claim(&entries).await.map_err(|e| {
        error!(error = %e, "Claim processing failed");
        ApiError::Internal(e.to_string())
    })?;

    Ok(Json(response))
}

/// Create the axum router with all routes
pub fn create_router<L, S>(state: AppState<L, S>) -> Router
where
    L: LanguageModel + 'static,
    S: DocumentSource + 'static,
{
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check::<L, S>))
        .route("/process-claim", post(process_claim::<L, S>))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use claimwell_llm::MockProvider;
    use http_body_util::BodyExt;
    use tower::ServiceExt; // for oneshot

    const BOUNDARY: &str = "claimwell-test-boundary";

    fn degraded_state() -> AppState<MockProvider, MockProvider> {
        AppState { orchestrator: None }
    }

    fn mock_state(provider: MockProvider) -> AppState<MockProvider, MockProvider> {
        AppState {
            orchestrator: Some(Arc::new(ClaimOrchestrator::new(
                Arc::new(provider.clone()),
                Arc::new(provider),
            ))),
        }
    }

    fn multipart_body(files: &[(&str, &[u8])]) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, content) in files {
            body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{}\"\r\nContent-Type: application/pdf\r\n\r\n",
                    BOUNDARY, name
                )
                .as_bytes(),
            );
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    fn claim_request(files: &[(&str, &[u8])]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/process-claim")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(multipart_body(files)))
            .unwrap()
    }

    #[tokio::test]
    async fn test_root() {
        let app = create_router(mock_state(MockProvider::default()));
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let info: ServiceInfo = serde_json::from_slice(&body).unwrap();
        assert_eq!(info.status, "active");
        assert_eq!(info.service, "claimwell");
    }

    #[tokio::test]
    async fn test_health_when_initialized() {
        let app = create_router(mock_state(MockProvider::default()));
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let health: HealthCheckResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.orchestrator, "initialized");
        assert_eq!(health.components.classifier, "ready");
    }

    #[tokio::test]
    async fn test_health_when_degraded() {
        let app = create_router(degraded_state());
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let health: HealthCheckResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(health.status, "degraded");
        assert_eq!(health.orchestrator, "failed");
    }

    #[tokio::test]
    async fn test_process_claim_unavailable_when_degraded() {
        let app = create_router(degraded_state());
        let response = app
            .oneshot(claim_request(&[("bill.pdf", b"%PDF-1.4 bill")]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_process_claim_rejects_non_pdf() {
        let app = create_router(mock_state(MockProvider::default()));
        let response = app
            .oneshot(claim_request(&[("notes.docx", b"not a pdf")]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(error.error.contains("notes.docx"));
    }

    #[tokio::test]
    async fn test_process_claim_rejects_empty_file_before_processing() {
        let provider = MockProvider::default();
        let app = create_router(mock_state(provider.clone()));
        let response = app
            .oneshot(claim_request(&[("bill.pdf", b"")]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(error.error.contains("bill.pdf"));

        // rejected before any model work
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_process_claim_rejects_batch_without_files() {
        let app = create_router(mock_state(MockProvider::default()));
        let response = app.oneshot(claim_request(&[])).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

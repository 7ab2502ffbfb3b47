//! Health endpoint.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use crate::AppState;
use crate::models::HealthResponse;

/// `GET /api/health`: reports local wiring and probes the research backend.
///
/// Always answers 200; an unreachable backend shows up as
/// `backendReachable: false`.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let (backend_reachable, backend_status) = match state.research.health().await {
        Ok(status) => (true, Some(status)),
        Err(e) => {
            warn!("research backend health check failed: {e}");
            (false, None)
        }
    };

    Json(HealthResponse {
        version: researcher_core::version().to_string(),
        endpoint: state.endpoint.path().to_string(),
        adapter: state.service_adapter.name().to_string(),
        backend_reachable,
        backend_status,
    })
}

//! One-shot research handler.

use axum::Json;
use axum::extract::State;
use researcher_core::research::{ResearchRequest, ResearchResponse};
use tracing::info;

use crate::AppState;
use crate::error::AppResult;

/// `POST /api/research`: run a research request through the backend REST API.
///
/// A missing `request_id` is filled with a fresh UUID.
pub async fn research_handler(
    State(state): State<AppState>,
    Json(mut request): Json<ResearchRequest>,
) -> AppResult<Json<ResearchResponse>> {
    request.validate()?;
    let request_id = request
        .request_id
        .get_or_insert_with(|| uuid::Uuid::new_v4().to_string())
        .clone();

    info!(%request_id, topic = %request.research_topic, "research requested");

    let response = state.research.execute(&request).await?;
    Ok(Json(response))
}

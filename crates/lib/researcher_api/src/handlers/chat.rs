//! Chat page handler.

use axum::extract::State;
use axum::response::Html;

use crate::AppState;
use crate::error::AppResult;

/// `GET /`: page shell hosting the research chat widget.
pub async fn chat_page(State(state): State<AppState>) -> AppResult<Html<String>> {
    Ok(Html(state.chat_widget().render_page()?))
}

//! Assistant endpoint handler.
//!
//! Converts the axum request into a [`RawRequest`], forwards it through the
//! handler built from the shared runtime, adapter and mount path, and
//! converts the result back. Streaming bodies are passed through as
//! streams.

use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::response::Response;
use http_body_util::LengthLimitError;
use researcher_core::endpoint::{HandlerError, forward};
use researcher_core::raw::{RawRequest, RawResponse, ResponseBody};

use crate::AppState;
use crate::error::AppError;

/// `POST /api/langgraph4j`: hand the request to the assistant runtime.
pub async fn assistant_endpoint(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, AppError> {
    let limit = state.runtime.config().max_body_bytes;
    let (parts, body) = request.into_parts();

    // Read one byte past the limit so an oversized body reaches the
    // runtime's own size check.
    let bytes = to_bytes(body, limit.saturating_add(1))
        .await
        .map_err(|e| match e.into_inner().downcast::<LengthLimitError>() {
            Ok(_) => AppError::Handler(HandlerError::PayloadTooLarge { limit }),
            Err(e) => AppError::Validation(format!("Failed to read request body: {e}")),
        })?;

    let raw = RawRequest::from_parts(parts, bytes);
    let response = forward(state.handler_factory.as_ref(), state.endpoint_options(), raw).await?;
    Ok(into_axum_response(response))
}

fn into_axum_response(response: RawResponse) -> Response {
    response.map(|body| match body {
        ResponseBody::Full(bytes) => Body::from(bytes),
        ResponseBody::Stream(stream) => Body::from_stream(stream),
    })
}

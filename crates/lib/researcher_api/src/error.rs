//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use researcher_core::adapter::AdapterError;
use researcher_core::endpoint::HandlerError;
use researcher_core::research::ResearchError;
use researcher_core::widget::WidgetError;
use thiserror::Error;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Internal server error")]
    Internal(String),

    /// Failure reported by the assistant endpoint's handler. Rendered with
    /// the handler's own status, code and message.
    #[error(transparent)]
    Handler(#[from] HandlerError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, "validation_error", m.clone()),
            AppError::BackendUnavailable(m) => {
                (StatusCode::SERVICE_UNAVAILABLE, "backend_unavailable", m.clone())
            }
            AppError::Backend(m) => (StatusCode::BAD_GATEWAY, "backend_error", m.clone()),
            AppError::Internal(m) => {
                tracing::error!("internal error: {m}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error".to_string(),
                )
            }
            AppError::Handler(e) => (e.status(), e.code(), e.to_string()),
        };
        let body = Json(ErrorResponse {
            error: error.to_string(),
            message,
        });
        (status, body).into_response()
    }
}

impl From<ResearchError> for AppError {
    fn from(e: ResearchError) -> Self {
        match e {
            ResearchError::Validation(msg) => AppError::Validation(msg),
            ResearchError::Unavailable(msg) => AppError::BackendUnavailable(msg),
            ResearchError::Backend { code, message } => {
                AppError::Backend(format!("{code}: {message}"))
            }
            ResearchError::Protocol(msg) => AppError::Backend(msg),
            ResearchError::Config(msg) => AppError::Internal(msg),
        }
    }
}

impl From<WidgetError> for AppError {
    fn from(e: WidgetError) -> Self {
        AppError::Internal(e.to_string())
    }
}

/// Errors raised while assembling [`crate::AppState`] at startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Service adapter: {0}")]
    Adapter(#[from] AdapterError),

    #[error("Research client: {0}")]
    Research(#[from] ResearchError),
}

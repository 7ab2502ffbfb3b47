//! Assistant endpoint wiring.
//!
//! Every request to the assistant endpoint is served the same way: a
//! [`HandlerFactory`] is handed the long-lived runtime, the service adapter
//! and the mount path, and the handler it builds gets the request. The
//! handler's result (success or failure) goes back to the caller untouched.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use http::{Method, StatusCode};
use thiserror::Error;

use crate::adapter::{AdapterError, ServiceAdapter};
use crate::raw::{RawRequest, RawResponse};
use crate::runtime::AssistantRuntime;

/// Mount path of the assistant endpoint. The chat widget posts here.
pub const LANGGRAPH4J_ENDPOINT: &str = "/api/langgraph4j";

/// Invalid mount path.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EndpointConfigError {
    #[error("Endpoint path must start with '/': {0}")]
    NotAbsolute(String),

    #[error("Endpoint path contains invalid characters: {0}")]
    InvalidCharacters(String),
}

/// Immutable mount path shared by the server route and the chat widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    path: Cow<'static, str>,
}

impl EndpointConfig {
    /// The langgraph4j assistant endpoint.
    pub const fn langgraph4j() -> Self {
        Self {
            path: Cow::Borrowed(LANGGRAPH4J_ENDPOINT),
        }
    }

    /// Custom mount path. Must be absolute and free of whitespace, query,
    /// fragment and markup characters.
    pub fn new(path: impl Into<String>) -> Result<Self, EndpointConfigError> {
        let path = path.into();
        if !path.starts_with('/') {
            return Err(EndpointConfigError::NotAbsolute(path));
        }
        let invalid =
            |c: char| c.is_whitespace() || matches!(c, '?' | '#' | '"' | '\'' | '<' | '>' | '&');
        if path.chars().any(invalid) {
            return Err(EndpointConfigError::InvalidCharacters(path));
        }
        Ok(Self {
            path: Cow::Owned(path),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Exact match against a request path.
    pub fn matches(&self, request_path: &str) -> bool {
        self.path == request_path
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self::langgraph4j()
    }
}

impl fmt::Display for EndpointConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// The three values a request handler is built from.
#[derive(Clone)]
pub struct EndpointOptions {
    pub runtime: Arc<AssistantRuntime>,
    pub service_adapter: Arc<dyn ServiceAdapter>,
    pub endpoint: EndpointConfig,
}

impl fmt::Debug for EndpointOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointOptions")
            .field("runtime", &self.runtime)
            .field("service_adapter", &self.service_adapter.name())
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Errors surfaced by a request handler. Each carries the HTTP status the
/// caller should see.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("No handler mounted at {0}")]
    RouteNotFound(String),

    #[error("Method {0} not allowed")]
    MethodNotAllowed(Method),

    #[error("Request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Backend did not respond within {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Adapter(#[from] AdapterError),
}

impl HandlerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::RouteNotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::Adapter(AdapterError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Adapter(AdapterError::Protocol(_)) => StatusCode::BAD_GATEWAY,
            Self::Adapter(AdapterError::Config(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::RouteNotFound(_) => "not_found",
            Self::MethodNotAllowed(_) => "method_not_allowed",
            Self::PayloadTooLarge { .. } => "payload_too_large",
            Self::MalformedPayload(_) => "malformed_payload",
            Self::Timeout(_) => "backend_timeout",
            Self::Adapter(AdapterError::Unavailable(_)) => "backend_unavailable",
            Self::Adapter(AdapterError::Protocol(_)) => "backend_protocol_error",
            Self::Adapter(AdapterError::Config(_)) => "adapter_config_error",
        }
    }
}

/// Handles a single request to the assistant endpoint.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    async fn handle_request(&self, request: RawRequest) -> Result<RawResponse, HandlerError>;
}

/// Builds request handlers from endpoint options.
pub trait HandlerFactory: Send + Sync {
    fn build(&self, options: EndpointOptions) -> Arc<dyn RequestHandler>;
}

/// Build a handler for `options` and hand it `request`.
///
/// The handler's result is returned as-is.
pub async fn forward(
    factory: &dyn HandlerFactory,
    options: EndpointOptions,
    request: RawRequest,
) -> Result<RawResponse, HandlerError> {
    let handler = factory.build(options);
    handler.handle_request(request).await
}

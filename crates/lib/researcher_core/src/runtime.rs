//! Assistant runtime and its endpoint handler.
//!
//! The runtime owns request admission (mount path, method, size, JSON
//! framing, deadline) and hands everything else to the service adapter.
//! It does not interpret the payload schema.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use http::Method;
use tracing::{debug, warn};

use crate::adapter::ServiceAdapter;
use crate::endpoint::{EndpointOptions, HandlerError, HandlerFactory, RequestHandler};
use crate::raw::{RawRequest, RawResponse};

/// Default request body limit (10 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Runtime settings. The default is the empty configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Largest accepted request body.
    pub max_body_bytes: usize,
    /// Deadline for the adapter to produce response headers. `None` waits
    /// indefinitely; streamed bodies are never cut off.
    pub request_timeout: Option<Duration>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            request_timeout: None,
        }
    }
}

/// Orchestration engine sitting between the endpoint and the adapter.
#[derive(Debug, Default)]
pub struct AssistantRuntime {
    config: RuntimeConfig,
}

impl AssistantRuntime {
    pub fn new(config: RuntimeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Admit `request` and pass it to `adapter`.
    pub async fn process(
        &self,
        adapter: &dyn ServiceAdapter,
        request: RawRequest,
    ) -> Result<RawResponse, HandlerError> {
        self.admit(&request)?;

        let call = adapter.process(request);
        let response = match self.config.request_timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
                warn!(adapter = adapter.name(), ?limit, "adapter timed out");
                HandlerError::Timeout(limit)
            })??,
            None => call.await?,
        };

        debug!(
            adapter = adapter.name(),
            status = %response.status(),
            streaming = response.body().is_stream(),
            "adapter responded"
        );
        Ok(response)
    }

    fn admit(&self, request: &RawRequest) -> Result<(), HandlerError> {
        let body = request.body();
        if body.len() > self.config.max_body_bytes {
            return Err(HandlerError::PayloadTooLarge {
                limit: self.config.max_body_bytes,
            });
        }
        serde_json::from_slice::<serde::de::IgnoredAny>(body)
            .map_err(|e| HandlerError::MalformedPayload(e.to_string()))?;
        Ok(())
    }
}

/// Default [`HandlerFactory`]: builds handlers that route admitted POSTs on
/// the mount path through the runtime.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuntimeEndpoint;

impl HandlerFactory for RuntimeEndpoint {
    fn build(&self, options: EndpointOptions) -> Arc<dyn RequestHandler> {
        Arc::new(RuntimeEndpointHandler { options })
    }
}

struct RuntimeEndpointHandler {
    options: EndpointOptions,
}

#[async_trait]
impl RequestHandler for RuntimeEndpointHandler {
    async fn handle_request(&self, request: RawRequest) -> Result<RawResponse, HandlerError> {
        let path = request.uri().path();
        if !self.options.endpoint.matches(path) {
            return Err(HandlerError::RouteNotFound(path.to_string()));
        }
        if request.method() != Method::POST {
            return Err(HandlerError::MethodNotAllowed(request.method().clone()));
        }

        debug!(
            endpoint = %self.options.endpoint,
            adapter = self.options.service_adapter.name(),
            "handling assistant request"
        );

        self.options
            .runtime
            .process(self.options.service_adapter.as_ref(), request)
            .await
    }
}

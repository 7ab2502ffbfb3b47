//! Service adapters: bridge the assistant runtime to a concrete backend.
//!
//! The runtime never looks inside an adapter; it only needs
//! `process(request) -> response`. [`Langgraph4jAdapter`] forwards the
//! runtime's traffic to the langgraph4j research agent over HTTP and
//! streams the agent's reply straight back.

use async_trait::async_trait;
use http::StatusCode;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::raw::{RawRequest, RawResponse, ResponseBody};

/// Default base URL of the research agent backend.
pub const DEFAULT_LANGGRAPH4J_URL: &str = "http://localhost:8080";

/// Default path of the agent endpoint on the research backend.
pub const DEFAULT_AGENT_PATH: &str = "/langgraph4j/copilotkit";

/// Request headers copied to the backend. Everything else (host, cookie,
/// connection, auth) stays behind.
const FORWARDED_REQUEST_HEADERS: &[&str] = &["content-type", "accept", "x-request-id"];

/// Response headers copied back from the backend. Framing headers
/// (transfer-encoding, content-length) are left to the server since the
/// body is re-streamed.
const FORWARDED_RESPONSE_HEADERS: &[&str] = &["content-type", "cache-control", "x-request-id"];

/// Errors raised by a service adapter.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("Backend protocol error: {0}")]
    Protocol(String),

    #[error("Adapter configuration error: {0}")]
    Config(String),
}

/// A pluggable bridge between the runtime and an assistant backend.
#[async_trait]
pub trait ServiceAdapter: Send + Sync {
    /// Process one runtime request and produce the backend's response.
    async fn process(&self, request: RawRequest) -> Result<RawResponse, AdapterError>;

    /// Adapter identifier for logging.
    fn name(&self) -> &str;
}

/// Adapter for the langgraph4j deep-research agent.
#[derive(Debug, Clone)]
pub struct Langgraph4jAdapter {
    client: reqwest::Client,
    agent_url: Url,
}

impl Langgraph4jAdapter {
    /// Adapter pointing at the default local backend.
    pub fn new() -> Result<Self, AdapterError> {
        Self::with_base_url(DEFAULT_LANGGRAPH4J_URL, DEFAULT_AGENT_PATH)
    }

    /// Adapter pointing at `base_url` + `agent_path`.
    pub fn with_base_url(base_url: &str, agent_path: &str) -> Result<Self, AdapterError> {
        Self::with_client(reqwest::Client::new(), base_url, agent_path)
    }

    /// Adapter with a caller-supplied reqwest client.
    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
        agent_path: &str,
    ) -> Result<Self, AdapterError> {
        let base: Url = base_url
            .parse()
            .map_err(|e| AdapterError::Config(format!("Invalid backend URL '{base_url}': {e}")))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(AdapterError::Config(format!(
                "Backend URL must use http or https: {base_url}"
            )));
        }
        let agent_url = base
            .join(agent_path)
            .map_err(|e| AdapterError::Config(format!("Invalid agent path '{agent_path}': {e}")))?;
        Ok(Self { client, agent_url })
    }

    /// Fully resolved agent endpoint URL.
    pub fn agent_url(&self) -> &Url {
        &self.agent_url
    }
}

#[async_trait]
impl ServiceAdapter for Langgraph4jAdapter {
    async fn process(&self, request: RawRequest) -> Result<RawResponse, AdapterError> {
        let (parts, body) = request.into_parts();

        let mut req_builder = self.client.post(self.agent_url.as_str());
        for (name, value) in parts.headers.iter() {
            if FORWARDED_REQUEST_HEADERS.contains(&name.as_str())
                && let Ok(v) = value.to_str()
            {
                req_builder = req_builder.header(name.as_str(), v);
            }
        }

        debug!(url = %self.agent_url, bytes = body.len(), "forwarding to langgraph4j agent");

        let upstream = req_builder.body(body).send().await.map_err(|e| {
            warn!(url = %self.agent_url, "langgraph4j agent unreachable: {e}");
            AdapterError::Unavailable(format!("Upstream request failed: {e}"))
        })?;

        let status = StatusCode::from_u16(upstream.status().as_u16())
            .map_err(|e| AdapterError::Protocol(format!("Invalid upstream status: {e}")))?;

        let mut response_builder = http::Response::builder().status(status);
        for (name, value) in upstream.headers() {
            if FORWARDED_RESPONSE_HEADERS.contains(&name.as_str()) {
                response_builder = response_builder.header(name.clone(), value.clone());
            }
        }

        response_builder
            .body(ResponseBody::from_stream(upstream.bytes_stream()))
            .map_err(|e| AdapterError::Protocol(format!("Response build failed: {e}")))
    }

    fn name(&self) -> &str {
        "langgraph4j"
    }
}

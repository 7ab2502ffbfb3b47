//! API server configuration.

use std::time::Duration;

pub use researcher_core::adapter::{DEFAULT_AGENT_PATH, DEFAULT_LANGGRAPH4J_URL};
pub use researcher_core::research::DEFAULT_RESEARCH_BACKEND_URL;
use researcher_core::runtime::RuntimeConfig;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Configuration for the API server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3000").
    pub bind_addr: String,
    /// Base URL of the langgraph4j agent backend.
    pub langgraph4j_url: String,
    /// Path of the agent endpoint on that backend.
    pub langgraph4j_agent_path: String,
    /// Base URL of the research backend REST API.
    pub research_backend_url: String,
    /// Deadline for the agent to start responding.
    pub request_timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.into(),
            langgraph4j_url: DEFAULT_LANGGRAPH4J_URL.into(),
            langgraph4j_agent_path: DEFAULT_AGENT_PATH.into(),
            research_backend_url: DEFAULT_RESEARCH_BACKEND_URL.into(),
            request_timeout: None,
        }
    }
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                 | Default                   |
    /// |--------------------------|---------------------------|
    /// | `BIND_ADDR`              | `127.0.0.1:3000`          |
    /// | `LANGGRAPH4J_URL`        | `http://localhost:8080`   |
    /// | `LANGGRAPH4J_AGENT_PATH` | `/langgraph4j/copilotkit` |
    /// | `RESEARCH_BACKEND_URL`   | `http://localhost:8080`   |
    /// | `REQUEST_TIMEOUT_SECS`   | unset (no deadline)       |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            langgraph4j_url: lookup("LANGGRAPH4J_URL").unwrap_or(defaults.langgraph4j_url),
            langgraph4j_agent_path: lookup("LANGGRAPH4J_AGENT_PATH")
                .unwrap_or(defaults.langgraph4j_agent_path),
            research_backend_url: lookup("RESEARCH_BACKEND_URL")
                .unwrap_or(defaults.research_backend_url),
            request_timeout: lookup("REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }

    /// Runtime settings derived from this configuration.
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            request_timeout: self.request_timeout,
            ..RuntimeConfig::default()
        }
    }
}

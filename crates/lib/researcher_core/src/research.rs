//! Client for the deep-research backend's REST API.
//!
//! Besides the streaming agent endpoint, the backend exposes a one-shot
//! research call and a health probe:
//!
//! - `POST /api/v1/research/execute`: run a full research loop
//! - `GET /api/v1/research/health`: liveness
//!
//! Both wrap their payload in an [`ApiEnvelope`].

use chrono::NaiveDateTime;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

/// Default base URL of the research backend.
pub const DEFAULT_RESEARCH_BACKEND_URL: &str = "http://localhost:8080";

const EXECUTE_PATH: &str = "/api/v1/research/execute";
const HEALTH_PATH: &str = "/api/v1/research/health";

pub const MAX_TOPIC_CHARS: usize = 500;
pub const RESEARCH_LOOPS_RANGE: std::ops::RangeInclusive<u32> = 1..=10;
pub const SEARCH_RESULTS_RANGE: std::ops::RangeInclusive<u32> = 1..=10;

/// Errors from the research backend client.
#[derive(Debug, Error)]
pub enum ResearchError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Research backend unavailable: {0}")]
    Unavailable(String),

    #[error("Research backend error {code}: {message}")]
    Backend { code: i32, message: String },

    #[error("Research backend protocol error: {0}")]
    Protocol(String),

    #[error("Research client configuration error: {0}")]
    Config(String),
}

fn default_max_research_loops() -> u32 {
    3
}

fn default_search_engine() -> String {
    "tavily".into()
}

fn default_fetch_full_page() -> bool {
    true
}

fn default_max_search_results() -> u32 {
    3
}

/// A request to research one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchRequest {
    pub research_topic: String,
    #[serde(default = "default_max_research_loops")]
    pub max_research_loops: u32,
    #[serde(default = "default_search_engine")]
    pub search_engine: String,
    #[serde(default = "default_fetch_full_page")]
    pub fetch_full_page: bool,
    #[serde(default = "default_max_search_results")]
    pub max_search_results: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl ResearchRequest {
    /// Request for `topic` with backend defaults for everything else.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            research_topic: topic.into(),
            max_research_loops: default_max_research_loops(),
            search_engine: default_search_engine(),
            fetch_full_page: default_fetch_full_page(),
            max_search_results: default_max_search_results(),
            request_id: None,
            user_id: None,
        }
    }

    /// Check the bounds the backend enforces.
    pub fn validate(&self) -> Result<(), ResearchError> {
        if self.research_topic.trim().is_empty() {
            return Err(ResearchError::Validation(
                "Research topic cannot be empty".into(),
            ));
        }
        if self.research_topic.chars().count() > MAX_TOPIC_CHARS {
            return Err(ResearchError::Validation(format!(
                "Research topic cannot exceed {MAX_TOPIC_CHARS} characters"
            )));
        }
        if !RESEARCH_LOOPS_RANGE.contains(&self.max_research_loops) {
            return Err(ResearchError::Validation(format!(
                "Research loop count must be between {} and {}",
                RESEARCH_LOOPS_RANGE.start(),
                RESEARCH_LOOPS_RANGE.end()
            )));
        }
        if !SEARCH_RESULTS_RANGE.contains(&self.max_search_results) {
            return Err(ResearchError::Validation(format!(
                "Search result count must be between {} and {}",
                SEARCH_RESULTS_RANGE.start(),
                SEARCH_RESULTS_RANGE.end()
            )));
        }
        Ok(())
    }
}

/// Lifecycle of a research run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResearchStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
    Cancelled,
}

/// Outcome of a research run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchResponse {
    pub request_id: Option<String>,
    pub research_topic: Option<String>,
    /// Final report, Markdown.
    pub final_summary: Option<String>,
    pub actual_loops: Option<u32>,
    #[serde(default)]
    pub sources_gathered: Vec<String>,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub duration_ms: Option<i64>,
    pub success: Option<bool>,
    pub error_message: Option<String>,
    pub status: Option<ResearchStatus>,
}

/// Response wrapper used by every backend REST call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
    pub request_id: Option<String>,
    pub timestamp: Option<NaiveDateTime>,
    pub duration_ms: Option<i64>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the payload, turning a non-200 code into an error.
    pub fn into_data(self) -> Result<T, ResearchError> {
        if self.code != 200 {
            return Err(ResearchError::Backend {
                code: self.code,
                message: self.message,
            });
        }
        self.data
            .ok_or_else(|| ResearchError::Protocol("Envelope has no data".into()))
    }
}

/// HTTP client for the research backend.
#[derive(Debug, Clone)]
pub struct ResearchClient {
    client: Client,
    base_url: Url,
}

impl ResearchClient {
    pub fn new(base_url: &str) -> Result<Self, ResearchError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, ResearchError> {
        let base_url: Url = base_url
            .parse()
            .map_err(|e| ResearchError::Config(format!("Invalid backend URL '{base_url}': {e}")))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ResearchError::Config(format!(
                "Backend URL must use http or https: {base_url}"
            )));
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Run a research request to completion.
    pub async fn execute(
        &self,
        request: &ResearchRequest,
    ) -> Result<ResearchResponse, ResearchError> {
        request.validate()?;
        info!(
            topic = %request.research_topic,
            request_id = request.request_id.as_deref().unwrap_or(""),
            "submitting research request"
        );

        let url = self.url(EXECUTE_PATH)?;
        let resp = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| ResearchError::Unavailable(format!("Research request failed: {e}")))?;

        let response: ResearchResponse = decode_envelope(resp).await?;
        if response.success == Some(false) {
            return Err(ResearchError::Backend {
                code: 500,
                message: response
                    .error_message
                    .unwrap_or_else(|| "Research failed".into()),
            });
        }
        Ok(response)
    }

    /// Probe the backend's health endpoint.
    pub async fn health(&self) -> Result<String, ResearchError> {
        let url = self.url(HEALTH_PATH)?;
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ResearchError::Unavailable(format!("Health check failed: {e}")))?;
        decode_envelope(resp).await
    }

    fn url(&self, path: &str) -> Result<Url, ResearchError> {
        self.base_url
            .join(path)
            .map_err(|e| ResearchError::Config(format!("Invalid path '{path}': {e}")))
    }
}

async fn decode_envelope<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ResearchError> {
    let status = resp.status();
    let body = resp
        .bytes()
        .await
        .map_err(|e| ResearchError::Unavailable(format!("Failed to read backend body: {e}")))?;
    debug!(%status, bytes = body.len(), "research backend replied");

    // The backend reports failures inside the envelope even on 5xx.
    match serde_json::from_slice::<ApiEnvelope<T>>(&body) {
        Ok(envelope) => envelope.into_data(),
        Err(e) if status.is_success() => Err(ResearchError::Protocol(format!(
            "Invalid envelope: {e}"
        ))),
        Err(_) => Err(ResearchError::Backend {
            code: i32::from(status.as_u16()),
            message: String::from_utf8_lossy(&body).into_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::test_support::{json_reply, local_client, one_shot_server};

    fn local_research_client(base: &str) -> ResearchClient {
        ResearchClient::with_client(local_client(), base).unwrap()
    }

    #[test]
    fn request_defaults() {
        let req: ResearchRequest =
            serde_json::from_str(r#"{"research_topic":"rust async runtimes"}"#).unwrap();
        assert_eq!(req, ResearchRequest::new("rust async runtimes"));
        assert_eq!(req.max_research_loops, 3);
        assert_eq!(req.search_engine, "tavily");
        assert!(req.fetch_full_page);
        assert_eq!(req.max_search_results, 3);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn request_serializes_snake_case_without_empty_ids() {
        let json = serde_json::to_value(ResearchRequest::new("llm evals")).unwrap();
        assert_eq!(json["research_topic"], "llm evals");
        assert_eq!(json["max_research_loops"], 3);
        assert!(json.get("request_id").is_none());
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn blank_topic_rejected() {
        let err = ResearchRequest::new("   ").validate().unwrap_err();
        assert!(matches!(err, ResearchError::Validation(m) if m.contains("empty")));
    }

    #[test]
    fn topic_length_limit_counts_chars() {
        assert!(ResearchRequest::new("é".repeat(500)).validate().is_ok());
        assert!(ResearchRequest::new("é".repeat(501)).validate().is_err());
    }

    #[test]
    fn loop_and_result_bounds() {
        let mut req = ResearchRequest::new("topic");
        req.max_research_loops = 0;
        assert!(req.validate().is_err());
        req.max_research_loops = 10;
        assert!(req.validate().is_ok());
        req.max_research_loops = 11;
        assert!(req.validate().is_err());

        let mut req = ResearchRequest::new("topic");
        req.max_search_results = 0;
        assert!(req.validate().is_err());
        req.max_search_results = 11;
        assert!(req.validate().is_err());
    }

    #[test]
    fn response_envelope_decodes() {
        let json = r#"{
            "code": 200,
            "message": "success",
            "data": {
                "request_id": "r-1",
                "research_topic": "quantum error correction",
                "final_summary": "Summary",
                "actual_loops": 3,
                "sources_gathered": ["* A - https://a.example"],
                "start_time": "2025-01-02T03:04:05.123",
                "end_time": "2025-01-02T03:05:05",
                "duration_ms": 60000,
                "success": true,
                "status": "COMPLETED"
            },
            "request_id": "Research execution successful",
            "timestamp": "2025-01-02T03:05:05.5"
        }"#;
        let envelope: ApiEnvelope<ResearchResponse> = serde_json::from_str(json).unwrap();
        let data = envelope.into_data().unwrap();
        assert_eq!(data.status, Some(ResearchStatus::Completed));
        assert_eq!(data.actual_loops, Some(3));
        assert_eq!(data.sources_gathered.len(), 1);
        assert!(data.start_time.is_some());
    }

    #[test]
    fn error_envelope_is_backend_error() {
        let envelope: ApiEnvelope<ResearchResponse> = serde_json::from_str(
            r#"{"code":500,"message":"Internal system error: boom","data":null}"#,
        )
        .unwrap();
        let err = envelope.into_data().unwrap_err();
        assert!(matches!(
            err,
            ResearchError::Backend { code: 500, ref message } if message.contains("boom")
        ));
    }

    #[test]
    fn status_uses_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&ResearchStatus::InProgress).unwrap(),
            r#""IN_PROGRESS""#
        );
    }

    #[test]
    fn client_rejects_bad_base_url() {
        assert!(matches!(
            ResearchClient::new("localhost:8080"),
            Err(ResearchError::Config(_))
        ));
        let client = ResearchClient::new(DEFAULT_RESEARCH_BACKEND_URL).unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8080/");
    }

    #[tokio::test]
    async fn execute_validates_before_sending() {
        // Nothing listens here; validation must fail first.
        let client = ResearchClient::new("http://127.0.0.1:9").unwrap();
        let err = client.execute(&ResearchRequest::new("")).await.unwrap_err();
        assert!(matches!(err, ResearchError::Validation(_)));
    }

    #[tokio::test]
    async fn execute_posts_request_and_unwraps_envelope() {
        let (base, server) = one_shot_server(json_reply(
            "200 OK",
            r#"{"code":200,"message":"success","data":{"request_id":"r-42","research_topic":"rust","final_summary":"Done","actual_loops":2,"sources_gathered":[],"success":true,"status":"COMPLETED"}}"#,
        ))
        .await;
        let client = local_research_client(&base);

        let mut request = ResearchRequest::new("rust");
        request.request_id = Some("r-42".into());
        let response = client.execute(&request).await.unwrap();
        assert_eq!(response.request_id.as_deref(), Some("r-42"));
        assert_eq!(response.final_summary.as_deref(), Some("Done"));
        assert_eq!(response.status, Some(ResearchStatus::Completed));

        let seen = server.await.unwrap();
        assert!(seen.starts_with("POST /api/v1/research/execute "));
        assert!(seen.contains(r#""research_topic":"rust""#));
        assert!(seen.contains(r#""request_id":"r-42""#));
    }

    #[tokio::test]
    async fn unsuccessful_run_is_backend_error() {
        let (base, _server) = one_shot_server(json_reply(
            "200 OK",
            r#"{"code":200,"message":"success","data":{"success":false,"error_message":"search quota exhausted","status":"FAILED"}}"#,
        ))
        .await;
        let client = local_research_client(&base);

        let err = client.execute(&ResearchRequest::new("rust")).await.unwrap_err();
        assert!(matches!(
            err,
            ResearchError::Backend { code: 500, ref message } if message == "search quota exhausted"
        ));
    }

    #[tokio::test]
    async fn envelope_on_server_error_keeps_its_message() {
        let (base, _server) = one_shot_server(json_reply(
            "500 Internal Server Error",
            r#"{"code":500,"message":"Internal system error: boom","data":null}"#,
        ))
        .await;
        let client = local_research_client(&base);

        let err = client.execute(&ResearchRequest::new("rust")).await.unwrap_err();
        assert!(matches!(
            err,
            ResearchError::Backend { code: 500, ref message } if message == "Internal system error: boom"
        ));
    }

    #[tokio::test]
    async fn non_envelope_error_body_uses_http_status() {
        let (base, _server) = one_shot_server(
            "HTTP/1.1 502 Bad Gateway\r\ncontent-type: text/plain\r\ncontent-length: 11\r\n\r\nbad gateway",
        )
        .await;
        let client = local_research_client(&base);

        let err = client.execute(&ResearchRequest::new("rust")).await.unwrap_err();
        assert!(matches!(
            err,
            ResearchError::Backend { code: 502, ref message } if message == "bad gateway"
        ));
    }

    #[tokio::test]
    async fn invalid_envelope_on_success_is_protocol_error() {
        let (base, _server) = one_shot_server(json_reply("200 OK", r#"{"unexpected":true}"#)).await;
        let client = local_research_client(&base);

        let err = client.health().await.unwrap_err();
        assert!(matches!(err, ResearchError::Protocol(_)));
    }

    #[tokio::test]
    async fn health_returns_backend_status() {
        let (base, server) = one_shot_server(json_reply(
            "200 OK",
            r#"{"code":200,"message":"success","data":"OK"}"#,
        ))
        .await;
        let client = local_research_client(&base);

        assert_eq!(client.health().await.unwrap(), "OK");
        assert!(server.await.unwrap().starts_with("GET /api/v1/research/health "));
    }

    #[tokio::test]
    async fn unreachable_backend_is_unavailable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = local_research_client(&format!("http://{addr}"));
        let err = client.health().await.unwrap_err();
        assert!(matches!(err, ResearchError::Unavailable(_)));
    }
}

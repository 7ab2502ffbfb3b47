//! # researcher_api
//!
//! HTTP API library for Researcher.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use researcher_core::adapter::{Langgraph4jAdapter, ServiceAdapter};
use researcher_core::endpoint::{EndpointConfig, EndpointOptions, HandlerFactory};
use researcher_core::labels::ChatLabels;
use researcher_core::research::ResearchClient;
use researcher_core::runtime::{AssistantRuntime, RuntimeEndpoint};
use researcher_core::widget::ChatWidget;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::ApiConfig;
use crate::error::StartupError;
use crate::handlers::{chat, copilot, health, research};

/// Shared application state passed to all handlers.
///
/// Runtime and adapter are built once at startup and shared by every
/// request.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: ApiConfig,
    /// Assistant runtime.
    pub runtime: Arc<AssistantRuntime>,
    /// Bridge from the runtime to the assistant backend.
    pub service_adapter: Arc<dyn ServiceAdapter>,
    /// Builds the per-request handler of the assistant endpoint.
    pub handler_factory: Arc<dyn HandlerFactory>,
    /// Mount path of the assistant endpoint.
    pub endpoint: EndpointConfig,
    /// Research backend REST client.
    pub research: ResearchClient,
}

impl AppState {
    /// Assemble the production state from configuration.
    pub fn from_config(config: ApiConfig) -> Result<Self, StartupError> {
        let runtime = Arc::new(AssistantRuntime::new(config.runtime_config()));
        let service_adapter: Arc<dyn ServiceAdapter> = Arc::new(Langgraph4jAdapter::with_base_url(
            &config.langgraph4j_url,
            &config.langgraph4j_agent_path,
        )?);
        let research = ResearchClient::new(&config.research_backend_url)?;

        info!(
            adapter = service_adapter.name(),
            backend = %config.langgraph4j_url,
            "assistant runtime ready"
        );

        Ok(Self {
            config,
            runtime,
            service_adapter,
            handler_factory: Arc::new(RuntimeEndpoint),
            endpoint: EndpointConfig::langgraph4j(),
            research,
        })
    }

    /// The values the assistant endpoint's handler is built from.
    pub fn endpoint_options(&self) -> EndpointOptions {
        EndpointOptions {
            runtime: self.runtime.clone(),
            service_adapter: self.service_adapter.clone(),
            endpoint: self.endpoint.clone(),
        }
    }

    /// The chat widget, pointed at this server's assistant endpoint.
    pub fn chat_widget(&self) -> ChatWidget {
        ChatWidget::new(ChatLabels::researcher(), self.endpoint.clone())
    }
}

/// Builds the Axum router with all routes and shared state.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(routes::GET_ROOT, get(chat::chat_page))
        .route(routes::GET_API_HEALTH, get(health::health))
        .route(routes::POST_API_RESEARCH, post(research::research_handler))
        .route(state.endpoint.path(), post(copilot::assistant_endpoint))
        .layer(cors)
        .with_state(state)
}

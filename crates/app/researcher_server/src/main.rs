//! Researcher web server binary.
//!
//! Serves the chat page and the assistant endpoint, forwarding assistant
//! traffic to the langgraph4j research agent.

use std::time::Duration;

use clap::Parser;
use researcher_api::config::{
    ApiConfig, DEFAULT_AGENT_PATH, DEFAULT_BIND_ADDR, DEFAULT_LANGGRAPH4J_URL,
    DEFAULT_RESEARCH_BACKEND_URL,
};
use tracing::info;

/// CLI arguments for the web server.
#[derive(Parser, Debug)]
#[command(name = "researcher_server", about = "Researcher web server")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "BIND_ADDR", default_value = DEFAULT_BIND_ADDR)]
    bind_addr: String,

    /// Base URL of the langgraph4j agent backend.
    #[arg(long, env = "LANGGRAPH4J_URL", default_value = DEFAULT_LANGGRAPH4J_URL)]
    langgraph4j_url: String,

    /// Path of the agent endpoint on the backend.
    #[arg(long, env = "LANGGRAPH4J_AGENT_PATH", default_value = DEFAULT_AGENT_PATH)]
    agent_path: String,

    /// Base URL of the research backend REST API.
    #[arg(
        long,
        env = "RESEARCH_BACKEND_URL",
        default_value = DEFAULT_RESEARCH_BACKEND_URL
    )]
    research_backend_url: String,

    /// Seconds to wait for the agent to start responding (0 = no deadline).
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 0)]
    request_timeout_secs: u64,
}

impl From<Args> for ApiConfig {
    fn from(args: Args) -> Self {
        Self {
            bind_addr: args.bind_addr,
            langgraph4j_url: args.langgraph4j_url,
            langgraph4j_agent_path: args.agent_path,
            research_backend_url: args.research_backend_url,
            request_timeout: (args.request_timeout_secs > 0)
                .then(|| Duration::from_secs(args.request_timeout_secs)),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,researcher_api=debug,researcher_core=debug")
            }),
        )
        .init();

    let config = ApiConfig::from(Args::parse());

    info!(
        bind_addr = %config.bind_addr,
        langgraph4j_url = %config.langgraph4j_url,
        research_backend_url = %config.research_backend_url,
        "starting researcher_server"
    );

    let bind_addr = config.bind_addr.clone();
    let state = researcher_api::AppState::from_config(config)?;
    let app = researcher_api::router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    Ok(())
}

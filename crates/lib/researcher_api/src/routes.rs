//! Route path constants.

/// GET /: page hosting the chat widget
pub const GET_ROOT: &str = "/";

/// GET /api/health: local status and research backend health
pub const GET_API_HEALTH: &str = "/api/health";

/// POST /api/research: one-shot research through the backend REST API
pub const POST_API_RESEARCH: &str = "/api/research";

/// POST /api/langgraph4j: assistant endpoint
pub const POST_API_LANGGRAPH4J: &str = researcher_core::endpoint::LANGGRAPH4J_ENDPOINT;

//! # researcher_core
//!
//! Core wiring for the Researcher web front door: the assistant endpoint,
//! its runtime and service adapters, the chat widget, and the research
//! backend client.

pub mod adapter;
pub mod endpoint;
pub mod labels;
pub mod raw;
pub mod research;
pub mod runtime;
pub mod widget;

#[cfg(test)]
mod test_support;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

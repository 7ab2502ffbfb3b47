//! Request handlers.

pub mod chat;
pub mod copilot;
pub mod health;
pub mod research;

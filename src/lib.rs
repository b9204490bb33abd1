//! ai-service: HTTP facade over an external chat-completions API.
pub mod config;
pub mod error;
pub mod handlers;
pub mod observability;
pub mod services;
pub mod startup;

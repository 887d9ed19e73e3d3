//! taskmate - task management client library
//!
//! This library provides the core functionality behind the `taskmate` CLI:
//! a REST client for the task backend, a month calendar view, and the chat
//! assistant that turns month/year questions into suggested schedules.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `api`: HTTP client, wire types, auth and task endpoints
//! - `calendar`: six-week month grid of due tasks
//! - `chat`: assistant pipeline (classify, request, format, render)
//! - `credentials`: session token storage
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use taskmate::api::ApiClient;
//! use taskmate::chat::{ChatSession, ReplyPacing};
//! use taskmate::credentials::MemoryTokenStore;
//! use taskmate::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let client = ApiClient::new(&config.api, Arc::new(MemoryTokenStore::new()))?;
//!     let mut session = ChatSession::new(Arc::new(client), ReplyPacing::none());
//!     if let Some((reply, _)) = session.submit("Plan September 2025").await {
//!         println!("{}", reply.content());
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod calendar;
pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod error;

// Re-export commonly used types
pub use api::ApiClient;
pub use chat::{ChatMessage, ChatSession, ScheduleEntry};
pub use config::Config;
pub use error::{Result, TaskmateError};

#[cfg(test)]
pub mod test_utils;

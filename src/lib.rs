//! Todo MCP Server Library
//!
//! A todo list service with two surfaces over one shared store: a REST API
//! for ordinary HTTP clients and an MCP tool surface for AI agents.
//!
//! # Architecture
//!
//! - **core**: configuration, errors, database bootstrap, the MCP server and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **todos**: model, validation, repository and `TodoService`
//!   - **tools**: MCP tools over `TodoService`
//!   - **prompts**: prompt templates for consistent interactions
//! - **api**: REST handlers under `/api/todo` (feature `http`)
//! - **client**: typed HTTP client for the REST API
//!
//! # Example
//!
//! ```rust,no_run
//! use todo_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::open(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

#[cfg(feature = "http")]
pub mod api;
pub mod client;
pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use client::{ClientError, TodoClient};
pub use core::{Config, Error, McpServer, Result};
pub use domains::todos::{NewTodo, Priority, Todo, TodoError, TodoPatch, TodoService, TodoState};

//! Domains module containing business logic organized by bounded contexts.
//!
//! - `todos` - the Todo entity, its store and the rules every surface shares
//! - `tools` - MCP tools over the todo service
//! - `prompts` - MCP prompt templates

pub mod prompts;
pub mod todos;
pub mod tools;

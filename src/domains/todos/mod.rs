//! Todos domain module.
//!
//! Everything about the Todo entity lives here: the model and its shape
//! validation, the repository that owns persisted state, and the service
//! that enforces ownership and merge-update rules for every surface.
//!
//! ## Architecture
//!
//! - `model.rs` - `Todo`, `NewTodo`, `TodoPatch` and the state/priority enums
//! - `validation.rs` - required fields and length limits
//! - `tags.rs` - comma-joined tag column codec
//! - `repository.rs` - `TodoRepository` trait and SQLite implementation
//! - `service.rs` - `TodoService`, shared by the REST API and MCP tools
//! - `error.rs` - `TodoError`

mod error;
pub mod model;
pub mod repository;
pub mod service;
pub mod tags;
pub mod validation;

pub use error::{TodoError, TodoResult};
pub use model::{NewTodo, ParseEnumError, Priority, Todo, TodoId, TodoPatch, TodoState};
pub use repository::{SqliteTodoRepository, TodoRepository};
pub use service::{TodoService, merge};

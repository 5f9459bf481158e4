//! Tool definitions module.
//!
//! One file per tool. Every todo tool goes through `TodoService`, so the
//! MCP surface shares validation and ownership rules with the REST API.

pub mod common;
pub mod create_todo;
pub mod delete_todo;
pub mod echo;
pub mod list_todos;
pub mod update_todo;

pub use create_todo::{CreateTodoParams, CreateTodoTool};
pub use delete_todo::{DeleteTodoParams, DeleteTodoTool};
pub use echo::{EchoParams, EchoTool};
pub use list_todos::{ListTodosParams, ListTodosTool};
pub use update_todo::{UpdateTodoParams, UpdateTodoTool};

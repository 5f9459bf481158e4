//! Tool Router - builds the rmcp ToolRouter for the STDIO transport.
//!
//! Each tool knows how to create its own route; this module only lists them.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{CreateTodoTool, DeleteTodoTool, EchoTool, ListTodosTool, UpdateTodoTool};
use crate::domains::todos::TodoService;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(todos: Arc<TodoService>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(ListTodosTool::create_route(todos.clone()))
        .with_route(CreateTodoTool::create_route(todos.clone()))
        .with_route(UpdateTodoTool::create_route(todos.clone()))
        .with_route(DeleteTodoTool::create_route(todos))
        .with_route(EchoTool::create_route())
}

//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when http feature is enabled)
//! - Tool metadata for listing

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;

use super::definitions::{CreateTodoTool, DeleteTodoTool, EchoTool, ListTodosTool, UpdateTodoTool};
use crate::domains::todos::TodoService;

#[cfg(feature = "http")]
use super::ToolError;
#[cfg(feature = "http")]
use rmcp::ErrorData as McpError;

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    todos: Arc<TodoService>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(todos: Arc<TodoService>) -> Self {
        Self { todos }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            ListTodosTool::NAME,
            CreateTodoTool::NAME,
            UpdateTodoTool::NAME,
            DeleteTodoTool::NAME,
            EchoTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            ListTodosTool::to_tool(),
            CreateTodoTool::to_tool(),
            UpdateTodoTool::to_tool(),
            DeleteTodoTool::to_tool(),
            EchoTool::to_tool(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    ///
    /// Errors keep their MCP code so the JSON-RPC layer can forward them.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, McpError> {
        let todos = self.todos.clone();
        match name {
            ListTodosTool::NAME => ListTodosTool::http_handler(arguments, todos).await,
            CreateTodoTool::NAME => CreateTodoTool::http_handler(arguments, todos).await,
            UpdateTodoTool::NAME => UpdateTodoTool::http_handler(arguments, todos).await,
            DeleteTodoTool::NAME => DeleteTodoTool::http_handler(arguments, todos).await,
            EchoTool::NAME => EchoTool::http_handler(arguments),
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name).into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::test_support::service;

    #[test]
    fn test_registry_tool_names() {
        let registry = ToolRegistry::new(service());
        let names = registry.tool_names();
        assert_eq!(names.len(), 5);
        assert!(names.contains(&"list_todos"));
        assert!(names.contains(&"create_todo"));
        assert!(names.contains(&"update_todo"));
        assert!(names.contains(&"delete_todo"));
        assert!(names.contains(&"echo"));
    }

    #[test]
    fn test_get_all_tools_have_schemas() {
        for tool in ToolRegistry::get_all_tools() {
            assert!(tool.description.is_some());
            assert_eq!(tool.input_schema.get("type").unwrap(), "object");
        }
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_create_then_list() {
        let registry = ToolRegistry::new(service());
        registry
            .call_tool(
                "create_todo",
                serde_json::json!({ "title": "Buy milk", "creator": "alice" }),
            )
            .await
            .unwrap();

        let listed = registry
            .call_tool("list_todos", serde_json::json!({ "creator": "alice" }))
            .await
            .unwrap();
        assert_eq!(listed["structuredContent"]["count"], 1);
        assert_eq!(listed["isError"], false);
        assert!(listed["content"][0]["text"].as_str().unwrap().contains("1 todo"));
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_unknown() {
        let registry = ToolRegistry::new(service());
        let err = registry
            .call_tool("unknown", serde_json::json!({}))
            .await
            .unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::METHOD_NOT_FOUND);
    }
}

//! List todos tool.
//!
//! Returns every todo created by the given creator, newest first.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use super::common::{parse_params, structured_result, tool_error};
use crate::domains::todos::{Todo, TodoService};

/// Parameters for listing todos.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListTodosParams {
    /// Creator whose todos are listed.
    #[schemars(description = "Name of the creator whose todos should be listed")]
    pub creator: String,
}

/// Structured output of `list_todos`.
#[derive(Debug, Clone, Serialize)]
pub struct ListTodosResult {
    pub creator: String,
    pub count: usize,
    pub todos: Vec<Todo>,
}

/// List Todos Tool implementation.
#[derive(Debug, Clone, Default)]
pub struct ListTodosTool;

impl ListTodosTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "list_todos";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List all todos created by the given creator, newest first. Each todo includes its ID, title, description, state, priority, dates and tags.";

    /// Execute the tool logic.
    #[instrument(skip(todos))]
    pub async fn execute(
        params: ListTodosParams,
        todos: &TodoService,
    ) -> Result<CallToolResult, McpError> {
        let items = todos
            .list_for_creator(&params.creator)
            .await
            .map_err(tool_error)?;
        info!("Listed {} todo(s)", items.len());

        let summary = format!("Found {} todo(s) for {}", items.len(), params.creator);
        structured_result(
            summary,
            &ListTodosResult {
                creator: params.creator,
                count: items.len(),
                todos: items,
            },
        )
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        todos: Arc<TodoService>,
    ) -> Result<serde_json::Value, McpError> {
        let params: ListTodosParams = parse_params(arguments)?;
        let result = Self::execute(params, &todos).await?;
        super::common::result_to_json(result)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<ListTodosParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: Some("List todos".into()),
        }
    }

    /// Create a ToolRoute for STDIO transport.
    pub fn create_route<S>(todos: Arc<TodoService>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let todos = todos.clone();
            async move {
                let params: ListTodosParams = parse_params(serde_json::Value::Object(args))?;
                Self::execute(params, &todos).await
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::test_support::service;
    use crate::domains::todos::NewTodo;

    #[tokio::test]
    async fn test_lists_only_the_creators_todos() {
        let todos = service();
        todos.create(NewTodo::new("Buy milk", "alice")).await.unwrap();
        todos.create(NewTodo::new("Walk dog", "alice")).await.unwrap();
        todos.create(NewTodo::new("Fix bike", "bob")).await.unwrap();

        let result = ListTodosTool::execute(
            ListTodosParams {
                creator: "alice".into(),
            },
            &todos,
        )
        .await
        .unwrap();

        let data = result.structured_content.unwrap();
        assert_eq!(data["count"], 2);
        assert_eq!(data["todos"][0]["title"], "Walk dog");
        assert_eq!(data["todos"][1]["title"], "Buy milk");
    }

    #[tokio::test]
    async fn test_unknown_creator_is_empty() {
        let todos = service();
        let result = ListTodosTool::execute(
            ListTodosParams {
                creator: "nobody".into(),
            },
            &todos,
        )
        .await
        .unwrap();
        assert_eq!(result.structured_content.unwrap()["count"], 0);
    }

    #[tokio::test]
    async fn test_blank_creator_is_invalid() {
        let todos = service();
        let err = ListTodosTool::execute(
            ListTodosParams {
                creator: "   ".into(),
            },
            &todos,
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
    }
}

//! Delete todo tool.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;

use super::common::{parse_params, structured_result, tool_error};
use crate::domains::todos::validation::parse_id;
use crate::domains::todos::{TodoId, TodoService};

/// Parameters for deleting a todo.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteTodoParams {
    #[schemars(description = "ID of the todo to delete")]
    pub id: String,

    #[schemars(description = "Name of the creator; must match the todo's creator")]
    pub creator: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteTodoResult {
    pub id: TodoId,
    pub deleted: bool,
}

/// Delete Todo Tool implementation.
#[derive(Debug, Clone, Default)]
pub struct DeleteTodoTool;

impl DeleteTodoTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "delete_todo";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Permanently delete a todo. The creator must match the todo's creator.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(id = %params.id))]
    pub async fn execute(
        params: DeleteTodoParams,
        todos: &TodoService,
    ) -> Result<CallToolResult, McpError> {
        let id = parse_id(&params.id).map_err(tool_error)?;
        todos
            .delete_owned(id, &params.creator)
            .await
            .map_err(tool_error)?;

        structured_result(
            format!("Deleted todo {id}"),
            &DeleteTodoResult { id, deleted: true },
        )
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        todos: Arc<TodoService>,
    ) -> Result<serde_json::Value, McpError> {
        let params: DeleteTodoParams = parse_params(arguments)?;
        let result = Self::execute(params, &todos).await?;
        super::common::result_to_json(result)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<DeleteTodoParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: Some("Delete todo".into()),
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
                let params: DeleteTodoParams = parse_params(serde_json::Value::Object(args))?;
                Self::execute(params, &todos).await
            }
            .boxed()
        })
    }
}

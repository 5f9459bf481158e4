//! Update todo tool.
//!
//! Merge semantics: only the supplied fields change, everything omitted keeps
//! its stored value. Only the todo's creator may update it.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use super::common::{parse_date, parse_params, structured_result, tool_error};
use crate::domains::todos::validation::parse_id;
use crate::domains::todos::{Priority, TodoError, TodoId, TodoPatch, TodoService, TodoState};

/// Parameters for updating a todo.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoParams {
    #[schemars(description = "ID of the todo to update")]
    pub id: String,

    #[schemars(description = "Name of the creator; must match the todo's creator")]
    pub creator: String,

    #[schemars(description = "New title (max 200 characters)")]
    #[serde(default)]
    pub title: Option<String>,

    #[schemars(description = "New description (max 2000 characters)")]
    #[serde(default)]
    pub description: Option<String>,

    #[schemars(description = "New state: Todo, InProgress or Done")]
    #[serde(default)]
    pub state: Option<TodoState>,

    #[schemars(description = "New priority: Low, Medium or High")]
    #[serde(default)]
    pub priority: Option<Priority>,

    #[schemars(description = "New start date as RFC 3339")]
    #[serde(default)]
    pub start_date: Option<String>,

    #[schemars(description = "New due date as RFC 3339")]
    #[serde(default)]
    pub due_date: Option<String>,

    #[schemars(description = "New completion date as RFC 3339")]
    #[serde(default)]
    pub end_date: Option<String>,

    #[schemars(description = "Replacement tag list")]
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl UpdateTodoParams {
    fn into_parts(self) -> Result<(TodoId, String, TodoPatch), TodoError> {
        let id = parse_id(&self.id)?;
        let patch = TodoPatch {
            title: self.title,
            description: self.description,
            state: self.state,
            priority: self.priority,
            start_date: parse_date("startDate", self.start_date.as_deref())?,
            due_date: parse_date("dueDate", self.due_date.as_deref())?,
            end_date: parse_date("endDate", self.end_date.as_deref())?,
            tags: self.tags,
        };
        Ok((id, self.creator, patch))
    }
}

/// Update Todo Tool implementation.
#[derive(Debug, Clone, Default)]
pub struct UpdateTodoTool;

impl UpdateTodoTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "update_todo";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Update selected fields of an existing todo. Only the fields provided are changed; omitted fields keep their current value. The creator must match the todo's creator.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(id = %params.id))]
    pub async fn execute(
        params: UpdateTodoParams,
        todos: &TodoService,
    ) -> Result<CallToolResult, McpError> {
        let (id, creator, patch) = params.into_parts().map_err(tool_error)?;
        let updated = todos
            .merge_update(id, &creator, patch)
            .await
            .map_err(tool_error)?;
        info!("Todo updated via tool");

        let summary = format!("Updated todo '{}' ({})", updated.title, updated.id);
        structured_result(summary, &updated)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        todos: Arc<TodoService>,
    ) -> Result<serde_json::Value, McpError> {
        let params: UpdateTodoParams = parse_params(arguments)?;
        let result = Self::execute(params, &todos).await?;
        super::common::result_to_json(result)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<UpdateTodoParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: Some("Update todo".into()),
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
                let params: UpdateTodoParams = parse_params(serde_json::Value::Object(args))?;
                Self::execute(params, &todos).await
            }
            .boxed()
        })
    }
}

//! Create todo tool.

use chrono::Local;
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
use crate::domains::todos::{NewTodo, Priority, TodoError, TodoService, TodoState};

/// Parameters for creating a todo.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoParams {
    #[schemars(description = "Short title of the todo (required, max 200 characters)")]
    pub title: String,

    #[schemars(description = "Name of the person creating the todo (required)")]
    pub creator: String,

    #[schemars(description = "Longer description (max 2000 characters)")]
    #[serde(default)]
    pub description: Option<String>,

    #[schemars(description = "Workflow state: Todo, InProgress or Done (default: Todo)")]
    #[serde(default)]
    pub state: Option<TodoState>,

    #[schemars(description = "Priority: Low, Medium or High (default: Medium)")]
    #[serde(default)]
    pub priority: Option<Priority>,

    #[schemars(description = "Start date as RFC 3339 (default: now)")]
    #[serde(default)]
    pub start_date: Option<String>,

    #[schemars(description = "Due date as RFC 3339")]
    #[serde(default)]
    pub due_date: Option<String>,

    #[schemars(description = "Completion date as RFC 3339")]
    #[serde(default)]
    pub end_date: Option<String>,

    #[schemars(description = "Free-form labels; a tag may not contain a comma")]
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl CreateTodoParams {
    fn into_new_todo(self) -> Result<NewTodo, TodoError> {
        let start_date = parse_date("startDate", self.start_date.as_deref())?
            .unwrap_or_else(|| Local::now().fixed_offset());

        Ok(NewTodo {
            title: self.title,
            description: self.description,
            creator: self.creator,
            state: self.state.unwrap_or_default(),
            priority: self.priority.unwrap_or_default(),
            start_date: Some(start_date),
            due_date: parse_date("dueDate", self.due_date.as_deref())?,
            end_date: parse_date("endDate", self.end_date.as_deref())?,
            tags: self.tags.unwrap_or_default(),
        })
    }
}

/// Create Todo Tool implementation.
#[derive(Debug, Clone, Default)]
pub struct CreateTodoTool;

impl CreateTodoTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "create_todo";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Create a new todo. Title and creator are required; state defaults to Todo, priority to Medium and the start date to now. Returns the stored todo including its generated ID.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(creator = %params.creator))]
    pub async fn execute(
        params: CreateTodoParams,
        todos: &TodoService,
    ) -> Result<CallToolResult, McpError> {
        let new_todo = params.into_new_todo().map_err(tool_error)?;
        let created = todos.create(new_todo).await.map_err(tool_error)?;
        info!(id = %created.id, "Todo created via tool");

        let summary = format!("Created todo '{}' ({})", created.title, created.id);
        structured_result(summary, &created)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        todos: Arc<TodoService>,
    ) -> Result<serde_json::Value, McpError> {
        let params: CreateTodoParams = parse_params(arguments)?;
        let result = Self::execute(params, &todos).await?;
        super::common::result_to_json(result)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<CreateTodoParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: Some("Create todo".into()),
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
                let params: CreateTodoParams = parse_params(serde_json::Value::Object(args))?;
                Self::execute(params, &todos).await
            }
            .boxed()
        })
    }
}

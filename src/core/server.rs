//! MCP server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the todo service and the prompt service.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool.
//! Each tool defines:
//! - Parameters struct (for rmcp)
//! - `execute()` method (core logic, calls `TodoService`)
//! - `http_handler()` method (called via ToolRegistry for HTTP transport)
//!
//! The ToolRouter is built dynamically in `domains/tools/router.rs`.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use super::database::open_database;
use super::error::Result as CoreResult;
use crate::domains::{
    prompts::PromptService,
    todos::{SqliteTodoRepository, TodoService},
    tools::build_tool_router,
};

#[cfg(feature = "http")]
use crate::domains::tools::ToolRegistry;

/// Instructions sent to MCP clients on initialization.
pub const SERVER_INSTRUCTIONS: &str = "This server manages todo items. Use list_todos to see a \
     creator's todos, create_todo to add one, update_todo to change selected fields and \
     delete_todo to remove one. Only the creator of a todo may update or delete it.";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and coordinates
/// between the todo service and the prompt service.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Shared todo service (also used by the REST API).
    todos: Arc<TodoService>,

    /// Service for handling prompt-related requests.
    prompt_service: Arc<PromptService>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server around an existing todo service.
    pub fn new(config: Config, todos: Arc<TodoService>) -> Self {
        let config = Arc::new(config);
        let prompt_service = Arc::new(PromptService::new());

        Self {
            tool_router: build_tool_router::<Self>(todos.clone()),
            config,
            todos,
            prompt_service,
        }
    }

    /// Open the configured database and build a server on top of it.
    pub fn open(config: Config) -> CoreResult<Self> {
        let conn = open_database(&config.storage.database_path)?;
        let repo = SqliteTodoRepository::new(conn);
        let todos = Arc::new(TodoService::new(Arc::new(repo)));
        Ok(Self::new(config, todos))
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the shared todo service.
    pub fn todos(&self) -> &Arc<TodoService> {
        &self.todos
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema,
                    "outputSchema": t.output_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// Dispatches through the ToolRegistry; each tool's http_handler is
    /// defined in its own file under `domains/tools/definitions/`.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, McpError> {
        let registry = ToolRegistry::new(self.todos.clone());
        registry.call_tool(name, arguments).await
    }

    /// List all available prompts (for HTTP transport).
    pub async fn list_prompts(&self) -> Vec<serde_json::Value> {
        let prompts = self.prompt_service.list_prompts().await;

        prompts
            .into_iter()
            .map(|p| {
                serde_json::json!({
                    "name": p.name,
                    "description": p.description,
                    "arguments": p.arguments
                })
            })
            .collect()
    }

    /// Get a prompt by name (for HTTP transport).
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, String> {
        let args = arguments.and_then(|v| {
            v.as_object().map(|obj| {
                obj.iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect()
            })
        });

        match self.prompt_service.get_prompt(name, args).await {
            Ok(result) => Ok(serde_json::json!({
                "description": result.description,
                "messages": result.messages
            })),
            Err(e) => Err(e.to_string()),
        }
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        info!("Listing prompts");
        let prompts = self.prompt_service.list_prompts().await;
        Ok(ListPromptsResult {
            prompts,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        info!("Getting prompt: {}", request.name);
        let arguments = request.arguments.map(|map| {
            map.into_iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k, s.to_string())))
                .collect()
        });
        self.prompt_service
            .get_prompt(&request.name, arguments)
            .await
            .map_err(|e| McpError::invalid_params(e.to_string(), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::IN_MEMORY_PATH;

    fn in_memory_server() -> McpServer {
        let mut config = Config::default();
        config.storage.database_path = IN_MEMORY_PATH.to_string();
        McpServer::open(config).unwrap()
    }

    #[test]
    fn test_open_reports_database_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.storage.database_path = dir
            .path()
            .join("missing")
            .join("todos.db")
            .to_string_lossy()
            .into_owned();

        let err = McpServer::open(config).err().unwrap();
        assert!(matches!(err, crate::core::error::Error::Database(_)));
    }

    #[test]
    fn test_server_info_advertises_tools_and_prompts() {
        let info = in_memory_server().get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.prompts.is_some());
        assert!(info.capabilities.resources.is_none());
    }

    #[test]
    fn test_list_tools_for_http() {
        let tools = in_memory_server().list_tools();
        let names: Vec<_> = tools.iter().filter_map(|t| t["name"].as_str()).collect();
        assert!(names.contains(&"list_todos"));
        assert!(names.contains(&"echo"));
    }

    #[tokio::test]
    async fn test_get_prompt_for_http() {
        let server = in_memory_server();
        let result = server
            .get_prompt("compact_list", Some(serde_json::json!({ "creator": "alice" })))
            .await
            .unwrap();
        let text = result["messages"][0]["content"]["text"].as_str().unwrap();
        assert!(text.contains("alice"));
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_call_tool_for_http() {
        let server = in_memory_server();
        let result = server
            .call_tool("echo", serde_json::json!({ "message": "world" }))
            .await
            .unwrap();
        assert_eq!(result["content"][0]["text"], "hello world");
    }
}

//! Echo tool, a connectivity check for MCP clients.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Content, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::common::parse_params;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EchoParams {
    #[schemars(description = "Text to echo back")]
    pub message: String,
}

/// Echo Tool implementation.
#[derive(Debug, Clone, Default)]
pub struct EchoTool;

impl EchoTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "echo";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Echo a message back as 'hello {message}'.";

    pub fn execute(params: &EchoParams) -> CallToolResult {
        CallToolResult::success(vec![Content::text(format!("hello {}", params.message))])
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, McpError> {
        let params: EchoParams = parse_params(arguments)?;
        super::common::result_to_json(Self::execute(&params))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<EchoParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO transport.
    pub fn create_route<S>() -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            async move {
                let params: EchoParams = parse_params(serde_json::Value::Object(args))?;
                Ok(Self::execute(&params))
            }
            .boxed()
        })
    }
}

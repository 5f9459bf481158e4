//! Tool-specific error types.

use rmcp::ErrorData as McpError;
use thiserror::Error;

/// Errors raised by the tool layer itself, before a tool runs.
///
/// Domain failures inside a tool are `TodoError`s and are mapped by
/// `definitions::common::tool_error`.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }
}

impl From<ToolError> for McpError {
    fn from(value: ToolError) -> Self {
        match value {
            ToolError::NotFound(_) => McpError::new(
                rmcp::model::ErrorCode::METHOD_NOT_FOUND,
                value.to_string(),
                None,
            ),
        }
    }
}

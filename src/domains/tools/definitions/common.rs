//! Helpers shared by the todo tools.
//!
//! Argument parsing, result formatting and the mapping of `TodoError` onto
//! MCP error codes.

use chrono::{DateTime, FixedOffset};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content, ErrorCode},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::json;
use tracing::error;

use crate::domains::todos::TodoError;

/// Error code for a todo that does not exist.
pub const NOT_FOUND: ErrorCode = ErrorCode(-32002);

/// Error code for a caller that does not own the todo.
pub const UNAUTHORIZED: ErrorCode = ErrorCode(-32003);

/// Translate a domain failure into an MCP error.
///
/// `data.kind` always carries the machine-readable failure kind.
pub fn tool_error(err: TodoError) -> McpError {
    let message = err.to_string();
    let kind = err.kind();

    match err {
        TodoError::Validation(_) => McpError::invalid_params(message, Some(json!({ "kind": kind }))),
        TodoError::NotFound(id) => {
            McpError::new(NOT_FOUND, message, Some(json!({ "kind": kind, "id": id })))
        }
        TodoError::Unauthorized { id, creator } => McpError::new(
            UNAUTHORIZED,
            message,
            Some(json!({ "kind": kind, "id": id, "creator": creator })),
        ),
        TodoError::StoreUnavailable(_) => {
            error!("Tool call failed: {}", message);
            McpError::internal_error(message, Some(json!({ "kind": kind })))
        }
    }
}

/// Deserialize tool arguments into their params struct.
pub fn parse_params<T: DeserializeOwned>(arguments: serde_json::Value) -> Result<T, McpError> {
    serde_json::from_value(arguments)
        .map_err(|e| tool_error(TodoError::validation(format!("Invalid arguments: {e}"))))
}

/// Parse an optional RFC 3339 date argument.
pub fn parse_date(
    field: &str,
    raw: Option<&str>,
) -> Result<Option<DateTime<FixedOffset>>, TodoError> {
    raw.map(|value| {
        DateTime::parse_from_rfc3339(value.trim()).map_err(|e| {
            TodoError::validation(format!("{field} '{value}' is not an RFC 3339 date: {e}"))
        })
    })
    .transpose()
}

/// Build a success result with a text summary and a structured payload.
pub fn structured_result<T: Serialize>(
    summary: impl Into<String>,
    data: &T,
) -> Result<CallToolResult, McpError> {
    let structured = serde_json::to_value(data)
        .map_err(|e| McpError::internal_error(format!("Failed to encode result: {e}"), None))?;

    Ok(CallToolResult {
        content: vec![Content::text(summary.into())],
        structured_content: Some(structured),
        is_error: Some(false),
        meta: None,
    })
}

/// Wire form of a tool result for the HTTP JSON-RPC endpoint.
#[cfg(feature = "http")]
pub fn result_to_json(result: CallToolResult) -> Result<serde_json::Value, McpError> {
    serde_json::to_value(result)
        .map_err(|e| McpError::internal_error(format!("Failed to encode result: {e}"), None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_error_codes() {
        let id = Uuid::new_v4();

        let err = tool_error(TodoError::validation("Title is required"));
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(err.data.unwrap()["kind"], "validation");

        let err = tool_error(TodoError::NotFound(id));
        assert_eq!(err.code, NOT_FOUND);
        assert_eq!(err.data.unwrap()["kind"], "not_found");

        let err = tool_error(TodoError::unauthorized(id, "mallory"));
        assert_eq!(err.code, UNAUTHORIZED);
        let data = err.data.unwrap();
        assert_eq!(data["kind"], "unauthorized");
        assert_eq!(data["creator"], "mallory");

        let err = tool_error(TodoError::store("disk full"));
        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
        assert_eq!(err.data.unwrap()["kind"], "store_unavailable");
    }

    #[test]
    fn test_parse_date_keeps_offset() {
        let date = parse_date("dueDate", Some("2025-03-01T09:30:00+02:00"))
            .unwrap()
            .unwrap();
        assert_eq!(date.offset().local_minus_utc(), 2 * 3600);

        assert!(parse_date("dueDate", None).unwrap().is_none());
        assert!(parse_date("dueDate", Some("next week")).is_err());
    }
}

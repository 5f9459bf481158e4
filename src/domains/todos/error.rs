//! Todo-specific error types.

use thiserror::Error;

use super::model::TodoId;

/// Result type for todo operations.
pub type TodoResult<T> = Result<T, TodoError>;

/// Errors that can occur during todo operations.
#[derive(Debug, Error)]
pub enum TodoError {
    /// Malformed or missing input, or a path/body id mismatch.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The referenced todo does not exist.
    #[error("Todo with ID {0} not found")]
    NotFound(TodoId),

    /// The asserted creator does not own the todo.
    #[error("Creator '{creator}' is not allowed to modify todo {id}")]
    Unauthorized { id: TodoId, creator: String },

    /// The backing store failed. Never retried.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl TodoError {
    /// Create a new validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new unauthorized error.
    pub fn unauthorized(id: TodoId, creator: impl Into<String>) -> Self {
        Self::Unauthorized {
            id,
            creator: creator.into(),
        }
    }

    /// Create a new store error.
    pub fn store(msg: impl Into<String>) -> Self {
        Self::StoreUnavailable(msg.into())
    }

    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::Unauthorized { .. } => "unauthorized",
            Self::StoreUnavailable(_) => "store_unavailable",
        }
    }
}

impl From<rusqlite::Error> for TodoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::StoreUnavailable(value.to_string())
    }
}

impl From<crate::core::database::DbError> for TodoError {
    fn from(value: crate::core::database::DbError) -> Self {
        Self::StoreUnavailable(value.to_string())
    }
}

impl From<tokio::task::JoinError> for TodoError {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::StoreUnavailable(format!("storage task failed: {value}"))
    }
}

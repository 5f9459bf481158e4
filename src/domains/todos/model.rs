//! Todo entity model.
//!
//! `Todo` is the stored shape. `NewTodo` is what callers may supply at
//! creation time (no identity or timestamps), and `TodoPatch` is the sparse
//! set of fields used by merge updates.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a todo.
pub type TodoId = Uuid;

/// Workflow state of a todo. Stored and serialized by symbolic name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "String")]
pub enum TodoState {
    #[default]
    Todo,
    InProgress,
    Done,
}

/// Priority of a todo. Stored and serialized by symbolic name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "String")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// Error returned when a symbolic enum name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{value}`")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl TodoState {
    pub const ALL: [TodoState; 3] = [TodoState::Todo, TodoState::InProgress, TodoState::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "Todo",
            Self::InProgress => "InProgress",
            Self::Done => "Done",
        }
    }
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for TodoState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Names match case-insensitively so `inprogress` in a URL still resolves.
impl FromStr for TodoState {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ParseEnumError {
                kind: "state",
                value: value.to_string(),
            })
    }
}

impl TryFrom<String> for TodoState {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ParseEnumError {
                kind: "priority",
                value: value.to_string(),
            })
    }
}

impl TryFrom<String> for Priority {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A stored todo item.
///
/// Everything but `id`, `title` and `creator` may be omitted when a todo is
/// submitted for full replacement; the repository overwrites the timestamps
/// anyway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub creator: String,
    #[serde(default)]
    pub state: TodoState,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub start_date: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub due_date: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub end_date: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Caller-supplied fields for a todo that does not exist yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub creator: String,
    #[serde(default)]
    pub state: TodoState,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub start_date: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub due_date: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub end_date: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewTodo {
    /// A todo with only the required fields set; everything else defaults.
    pub fn new(title: impl Into<String>, creator: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            creator: creator.into(),
            state: TodoState::default(),
            priority: Priority::default(),
            start_date: None,
            due_date: None,
            end_date: None,
            tags: Vec::new(),
        }
    }
}

impl From<Todo> for NewTodo {
    fn from(todo: Todo) -> Self {
        Self {
            title: todo.title,
            description: todo.description,
            creator: todo.creator,
            state: todo.state,
            priority: todo.priority,
            start_date: todo.start_date,
            due_date: todo.due_date,
            end_date: todo.end_date,
            tags: todo.tags,
        }
    }
}

/// Sparse field set for a merge update.
///
/// `None` means "omitted, keep the stored value". There is no way to clear an
/// optional field through a patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub state: Option<TodoState>,
    pub priority: Option<Priority>,
    pub start_date: Option<DateTime<FixedOffset>>,
    pub due_date: Option<DateTime<FixedOffset>>,
    pub end_date: Option<DateTime<FixedOffset>>,
    pub tags: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_parses_case_insensitively() {
        assert_eq!("todo".parse::<TodoState>().unwrap(), TodoState::Todo);
        assert_eq!("InProgress".parse::<TodoState>().unwrap(), TodoState::InProgress);
        assert_eq!("DONE".parse::<TodoState>().unwrap(), TodoState::Done);
        assert!("finished".parse::<TodoState>().is_err());
    }

    #[test]
    fn test_priority_parse_error_message() {
        let err = "urgent".parse::<Priority>().unwrap_err();
        assert_eq!(err.to_string(), "unknown priority `urgent`");
    }

    #[test]
    fn test_json_enum_names_are_case_insensitive() {
        let todo: NewTodo = serde_json::from_value(serde_json::json!({
            "title": "t",
            "creator": "c",
            "state": "inprogress",
            "priority": "HIGH"
        }))
        .unwrap();
        assert_eq!(todo.state, TodoState::InProgress);
        assert_eq!(todo.priority, Priority::High);

        let err = serde_json::from_value::<NewTodo>(serde_json::json!({
            "title": "t",
            "creator": "c",
            "state": "finished"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("unknown state `finished`"));
    }

    #[test]
    fn test_defaults() {
        let todo = NewTodo::new("Buy milk", "alice");
        assert_eq!(todo.state, TodoState::Todo);
        assert_eq!(todo.priority, Priority::Medium);
        assert!(todo.tags.is_empty());
    }

    #[test]
    fn test_new_todo_json_uses_defaults_and_camel_case() {
        let todo: NewTodo = serde_json::from_value(serde_json::json!({
            "title": "Write report",
            "creator": "bob",
            "dueDate": "2026-03-01T09:00:00+01:00",
            "priority": "High"
        }))
        .unwrap();

        assert_eq!(todo.state, TodoState::Todo);
        assert_eq!(todo.priority, Priority::High);
        assert_eq!(
            todo.due_date.unwrap().to_rfc3339(),
            "2026-03-01T09:00:00+01:00"
        );
    }

    #[test]
    fn test_todo_serializes_symbolic_enum_names() {
        let todo = Todo {
            id: Uuid::nil(),
            title: "t".into(),
            description: None,
            creator: "c".into(),
            state: TodoState::InProgress,
            priority: Priority::Low,
            start_date: None,
            due_date: None,
            end_date: None,
            tags: vec!["a".into()],
            created_at: Utc::now(),
            updated_at: None,
        };

        let value = serde_json::to_value(&todo).unwrap();
        assert_eq!(value["state"], "InProgress");
        assert_eq!(value["priority"], "Low");
        assert!(value["updatedAt"].is_null());
        assert!(value.get("createdAt").is_some());
    }
}

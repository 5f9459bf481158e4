//! Shape validation for todos coming from untrusted callers.
//!
//! Lengths are counted in characters, not bytes. No ordering is enforced
//! between `startDate`, `dueDate` and `endDate`.

use super::error::{TodoError, TodoResult};
use super::model::{NewTodo, Todo, TodoId, TodoPatch};
use super::tags;

pub const TITLE_MAX_LEN: usize = 200;
pub const DESCRIPTION_MAX_LEN: usize = 2000;
pub const CREATOR_MAX_LEN: usize = 100;

fn required(field: &str, value: &str, max: usize) -> TodoResult<()> {
    if value.trim().is_empty() {
        return Err(TodoError::validation(format!("{field} is required")));
    }
    bounded(field, value, max)
}

fn bounded(field: &str, value: &str, max: usize) -> TodoResult<()> {
    let len = value.chars().count();
    if len > max {
        return Err(TodoError::validation(format!(
            "{field} must be at most {max} characters (got {len})"
        )));
    }
    Ok(())
}

/// Parse a todo ID supplied as text. Surrounding whitespace is ignored.
pub fn parse_id(raw: &str) -> TodoResult<TodoId> {
    raw.trim()
        .parse()
        .map_err(|_| TodoError::validation(format!("'{raw}' is not a valid todo ID")))
}

/// Reject a blank or oversized creator.
pub fn require_creator(creator: &str) -> TodoResult<()> {
    required("creator", creator, CREATOR_MAX_LEN)
}

pub fn validate_new(todo: &NewTodo) -> TodoResult<()> {
    required("title", &todo.title, TITLE_MAX_LEN)?;
    if let Some(description) = &todo.description {
        bounded("description", description, DESCRIPTION_MAX_LEN)?;
    }
    require_creator(&todo.creator)?;
    tags::check(&todo.tags)
}

pub fn validate_todo(todo: &Todo) -> TodoResult<()> {
    required("title", &todo.title, TITLE_MAX_LEN)?;
    if let Some(description) = &todo.description {
        bounded("description", description, DESCRIPTION_MAX_LEN)?;
    }
    require_creator(&todo.creator)?;
    tags::check(&todo.tags)
}

/// Validate only the fields a patch supplies.
pub fn validate_patch(patch: &TodoPatch) -> TodoResult<()> {
    if let Some(title) = &patch.title {
        required("title", title, TITLE_MAX_LEN)?;
    }
    if let Some(description) = &patch.description {
        bounded("description", description, DESCRIPTION_MAX_LEN)?;
    }
    if let Some(tags) = &patch.tags {
        tags::check(tags)?;
    }
    Ok(())
}

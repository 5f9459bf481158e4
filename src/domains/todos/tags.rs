//! Tag list codec for the single `tags` text column.
//!
//! Tags are joined with [`DELIMITER`]. Reading splits on the delimiter and
//! drops empty entries, so an empty list round-trips through the empty
//! string. A tag that contains the delimiter or is blank would not survive
//! the round-trip and is rejected.

use super::error::{TodoError, TodoResult};

pub const DELIMITER: char = ',';

/// Check that every tag can be stored without corruption.
pub fn check(tags: &[String]) -> TodoResult<()> {
    for (index, tag) in tags.iter().enumerate() {
        if tag.trim().is_empty() {
            return Err(TodoError::validation(format!("tags[{index}] must not be blank")));
        }
        if tag.contains(DELIMITER) {
            return Err(TodoError::validation(format!(
                "tags[{index}] must not contain '{DELIMITER}'"
            )));
        }
    }
    Ok(())
}

/// Join tags into their column value.
pub fn encode(tags: &[String]) -> TodoResult<String> {
    check(tags)?;
    Ok(tags.join(&DELIMITER.to_string()))
}

/// Split a column value back into tags.
pub fn decode(value: &str) -> Vec<String> {
    value
        .split(DELIMITER)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

//! Todo use-case service.
//!
//! The one place where creator ownership and merge updates are enforced.
//! Both the REST API and the MCP tools call through here and never touch the
//! repository directly.
//!
//! Ownership is nominal: `creator` is whatever the caller asserts. There is
//! no authentication behind it.
//!
//! Guarded operations check, in order: input shape, existence, ownership,
//! then merge and persist. The first failure wins.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::error::{TodoError, TodoResult};
use super::model::{NewTodo, Todo, TodoId, TodoPatch, TodoState};
use super::repository::TodoRepository;
use super::validation::{require_creator, validate_new, validate_patch, validate_todo};

/// Shared todo service consumed by every surface adapter.
#[derive(Clone)]
pub struct TodoService {
    repo: Arc<dyn TodoRepository>,
}

impl TodoService {
    pub fn new(repo: Arc<dyn TodoRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_all(&self) -> TodoResult<Vec<Todo>> {
        self.repo.get_all().await
    }

    /// Look up a todo; `None` when the id is unknown.
    pub async fn get(&self, id: TodoId) -> TodoResult<Option<Todo>> {
        self.repo.get_by_id(id).await
    }

    pub async fn list_by_creator(&self, creator: &str) -> TodoResult<Vec<Todo>> {
        self.repo.get_by_creator(creator).await
    }

    /// Like [`Self::list_by_creator`] but a blank creator is an error.
    pub async fn list_for_creator(&self, creator: &str) -> TodoResult<Vec<Todo>> {
        require_creator(creator)?;
        self.repo.get_by_creator(creator).await
    }

    pub async fn list_by_state(&self, state: TodoState) -> TodoResult<Vec<Todo>> {
        self.repo.get_by_state(state).await
    }

    pub async fn exists(&self, id: TodoId) -> TodoResult<bool> {
        self.repo.exists(id).await
    }

    #[instrument(skip_all, fields(creator = %todo.creator))]
    pub async fn create(&self, todo: NewTodo) -> TodoResult<Todo> {
        validate_new(&todo)?;
        let created = self.repo.create(todo).await?;
        info!(id = %created.id, "Created todo");
        Ok(created)
    }

    /// Full replacement of a todo addressed by `id`.
    ///
    /// `todo.id` must equal `id`. The stored `creator` and `createdAt` are
    /// kept whatever the body says.
    #[instrument(skip(self, todo))]
    pub async fn replace(&self, id: TodoId, todo: Todo) -> TodoResult<Todo> {
        if todo.id != id {
            return Err(TodoError::validation("ID in URL does not match ID in body"));
        }
        validate_todo(&todo)?;

        let updated = self.repo.update(todo).await?.ok_or(TodoError::NotFound(id))?;
        info!("Replaced todo");
        Ok(updated)
    }

    /// Unconditional hard delete.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: TodoId) -> TodoResult<()> {
        if !self.repo.delete(id).await? {
            return Err(TodoError::NotFound(id));
        }
        info!("Deleted todo");
        Ok(())
    }

    /// Delete a todo on behalf of its creator.
    #[instrument(skip(self))]
    pub async fn delete_owned(&self, id: TodoId, creator: &str) -> TodoResult<()> {
        require_creator(creator)?;
        self.owned(id, creator).await?;

        if !self.repo.delete(id).await? {
            // Removed by someone else between the lookup and the delete.
            return Err(TodoError::NotFound(id));
        }
        info!("Deleted todo");
        Ok(())
    }

    /// Apply a partial update on behalf of the todo's creator.
    #[instrument(skip(self, patch))]
    pub async fn merge_update(
        &self,
        id: TodoId,
        creator: &str,
        patch: TodoPatch,
    ) -> TodoResult<Todo> {
        require_creator(creator)?;
        validate_patch(&patch)?;

        let existing = self.owned(id, creator).await?;
        let merged = merge(existing, patch);

        let updated = self.repo.update(merged).await?.ok_or(TodoError::NotFound(id))?;
        info!("Updated todo");
        Ok(updated)
    }

    /// Existence first, then ownership.
    async fn owned(&self, id: TodoId, creator: &str) -> TodoResult<Todo> {
        let existing = self.repo.get_by_id(id).await?.ok_or(TodoError::NotFound(id))?;

        if existing.creator != creator {
            warn!(owner = %existing.creator, "Creator does not own todo");
            return Err(TodoError::unauthorized(id, creator));
        }

        Ok(existing)
    }
}

/// Overlay the supplied patch fields onto an existing todo.
///
/// Identity, ownership and timestamps always come from `existing`.
pub fn merge(existing: Todo, patch: TodoPatch) -> Todo {
    Todo {
        id: existing.id,
        creator: existing.creator,
        created_at: existing.created_at,
        updated_at: existing.updated_at,
        title: patch.title.unwrap_or(existing.title),
        description: patch.description.or(existing.description),
        state: patch.state.unwrap_or(existing.state),
        priority: patch.priority.unwrap_or(existing.priority),
        start_date: patch.start_date.or(existing.start_date),
        due_date: patch.due_date.or(existing.due_date),
        end_date: patch.end_date.or(existing.end_date),
        tags: patch.tags.unwrap_or(existing.tags),
    }
}

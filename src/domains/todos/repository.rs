//! Todo repository contract and SQLite implementation.
//!
//! The repository is the only owner of persisted state and the only place
//! that assigns ids and timestamps. `create` ignores any caller identity,
//! `update` replaces every field except `creator` and `createdAt`, which are
//! restored from the stored row. Unknown ids are reported as `None`/`false`,
//! never as errors.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::error::{TodoError, TodoResult};
use super::model::{NewTodo, Todo, TodoId, TodoState};
use super::tags;

const TODO_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    creator,
    state,
    priority,
    start_date,
    due_date,
    end_date,
    tags,
    created_at,
    updated_at
FROM todos";

// rowid breaks ties between todos created within the same microsecond.
const NEWEST_FIRST: &str = "ORDER BY created_at DESC, rowid DESC";

/// Async CRUD contract over the todo store.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// All todos, newest first.
    async fn get_all(&self) -> TodoResult<Vec<Todo>>;

    async fn get_by_id(&self, id: TodoId) -> TodoResult<Option<Todo>>;

    /// Todos whose creator matches exactly, newest first.
    async fn get_by_creator(&self, creator: &str) -> TodoResult<Vec<Todo>>;

    /// Todos in the given state, newest first.
    async fn get_by_state(&self, state: TodoState) -> TodoResult<Vec<Todo>>;

    /// Store a new todo with a fresh id and `createdAt = now`.
    async fn create(&self, todo: NewTodo) -> TodoResult<Todo>;

    /// Replace a stored todo. Returns `None` if `todo.id` is unknown.
    async fn update(&self, todo: Todo) -> TodoResult<Option<Todo>>;

    /// Hard delete. Returns whether a row was removed.
    async fn delete(&self, id: TodoId) -> TodoResult<bool>;

    async fn exists(&self, id: TodoId) -> TodoResult<bool>;
}

/// SQLite-backed todo repository.
///
/// Holds a single connection; every statement runs on the blocking pool.
#[derive(Clone)]
pub struct SqliteTodoRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteTodoRepository {
    /// Wrap an already migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    async fn with_connection<F, T>(&self, f: F) -> TodoResult<T>
    where
        F: FnOnce(&mut Connection) -> TodoResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| TodoError::store("connection lock poisoned"))?;
            f(&mut guard)
        })
        .await?
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    #[instrument(skip(self))]
    async fn get_all(&self) -> TodoResult<Vec<Todo>> {
        self.with_connection(|conn| {
            query_todos(conn, &format!("{TODO_SELECT_SQL} {NEWEST_FIRST}"), [])
        })
        .await
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: TodoId) -> TodoResult<Option<Todo>> {
        self.with_connection(move |conn| find_todo(conn, id)).await
    }

    #[instrument(skip(self))]
    async fn get_by_creator(&self, creator: &str) -> TodoResult<Vec<Todo>> {
        let creator = creator.to_string();
        self.with_connection(move |conn| {
            query_todos(
                conn,
                &format!("{TODO_SELECT_SQL} WHERE creator = ?1 {NEWEST_FIRST}"),
                [creator],
            )
        })
        .await
    }

    #[instrument(skip(self))]
    async fn get_by_state(&self, state: TodoState) -> TodoResult<Vec<Todo>> {
        self.with_connection(move |conn| {
            query_todos(
                conn,
                &format!("{TODO_SELECT_SQL} WHERE state = ?1 {NEWEST_FIRST}"),
                [state.as_str()],
            )
        })
        .await
    }

    #[instrument(skip_all, fields(creator = %todo.creator))]
    async fn create(&self, todo: NewTodo) -> TodoResult<Todo> {
        let tag_column = tags::encode(&todo.tags)?;

        let created = Todo {
            id: Uuid::new_v4(),
            title: todo.title,
            description: todo.description,
            creator: todo.creator,
            state: todo.state,
            priority: todo.priority,
            start_date: todo.start_date,
            due_date: todo.due_date,
            end_date: todo.end_date,
            tags: todo.tags,
            created_at: now(),
            updated_at: None,
        };

        self.with_connection(move |conn| {
            conn.execute(
                "INSERT INTO todos (
                    id,
                    title,
                    description,
                    creator,
                    state,
                    priority,
                    start_date,
                    due_date,
                    end_date,
                    tags,
                    created_at,
                    updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, NULL);",
                params![
                    created.id.to_string(),
                    created.title,
                    created.description,
                    created.creator,
                    created.state.as_str(),
                    created.priority.as_str(),
                    created.start_date.map(offset_to_db),
                    created.due_date.map(offset_to_db),
                    created.end_date.map(offset_to_db),
                    tag_column,
                    utc_to_db(created.created_at),
                ],
            )?;
            debug!(id = %created.id, "Inserted todo");
            Ok(created)
        })
        .await
    }

    #[instrument(skip_all, fields(id = %todo.id))]
    async fn update(&self, todo: Todo) -> TodoResult<Option<Todo>> {
        let tag_column = tags::encode(&todo.tags)?;

        self.with_connection(move |conn| {
            let tx = conn.transaction()?;

            let Some(existing) = find_todo(&tx, todo.id)? else {
                return Ok(None);
            };

            let updated = Todo {
                creator: existing.creator,
                created_at: existing.created_at,
                updated_at: Some(now()),
                ..todo
            };

            tx.execute(
                "UPDATE todos
                 SET
                    title = ?1,
                    description = ?2,
                    state = ?3,
                    priority = ?4,
                    start_date = ?5,
                    due_date = ?6,
                    end_date = ?7,
                    tags = ?8,
                    updated_at = ?9
                 WHERE id = ?10;",
                params![
                    updated.title,
                    updated.description,
                    updated.state.as_str(),
                    updated.priority.as_str(),
                    updated.start_date.map(offset_to_db),
                    updated.due_date.map(offset_to_db),
                    updated.end_date.map(offset_to_db),
                    tag_column,
                    updated.updated_at.map(utc_to_db),
                    updated.id.to_string(),
                ],
            )?;
            tx.commit()?;

            debug!("Updated todo");
            Ok(Some(updated))
        })
        .await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: TodoId) -> TodoResult<bool> {
        self.with_connection(move |conn| {
            let removed = conn.execute("DELETE FROM todos WHERE id = ?1;", [id.to_string()])?;
            Ok(removed > 0)
        })
        .await
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: TodoId) -> TodoResult<bool> {
        self.with_connection(move |conn| {
            let found = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM todos WHERE id = ?1);",
                [id.to_string()],
                |row| row.get::<_, bool>(0),
            )?;
            Ok(found)
        })
        .await
    }
}

/// Current UTC time truncated to the stored precision.
fn now() -> DateTime<Utc> {
    let stamp = utc_to_db(Utc::now());
    parse_utc(&stamp).unwrap_or_else(|_| Utc::now())
}

fn find_todo(conn: &Connection, id: TodoId) -> TodoResult<Option<Todo>> {
    let mut stmt = conn.prepare(&format!("{TODO_SELECT_SQL} WHERE id = ?1;"))?;
    let row = stmt
        .query_row([id.to_string()], |row| Ok(parse_todo_row(row)))
        .optional()?;
    row.transpose()
}

fn query_todos<P: rusqlite::Params>(conn: &Connection, sql: &str, params: P) -> TodoResult<Vec<Todo>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut todos = Vec::new();

    while let Some(row) = rows.next()? {
        todos.push(parse_todo_row(row)?);
    }

    Ok(todos)
}

fn parse_todo_row(row: &Row<'_>) -> TodoResult<Todo> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text)
        .map_err(|_| invalid_data(format!("invalid id `{id_text}` in todos.id")))?;

    let state_text: String = row.get("state")?;
    let state = state_text
        .parse()
        .map_err(|_| invalid_data(format!("invalid state `{state_text}` in todos.state")))?;

    let priority_text: String = row.get("priority")?;
    let priority = priority_text.parse().map_err(|_| {
        invalid_data(format!("invalid priority `{priority_text}` in todos.priority"))
    })?;

    let created_text: String = row.get("created_at")?;

    Ok(Todo {
        id,
        title: row.get("title")?,
        description: row.get("description")?,
        creator: row.get("creator")?,
        state,
        priority,
        start_date: optional_offset(row, "start_date")?,
        due_date: optional_offset(row, "due_date")?,
        end_date: optional_offset(row, "end_date")?,
        tags: tags::decode(&row.get::<_, String>("tags")?),
        created_at: parse_utc(&created_text)?,
        updated_at: row
            .get::<_, Option<String>>("updated_at")?
            .map(|text| parse_utc(&text))
            .transpose()?,
    })
}

fn optional_offset(row: &Row<'_>, column: &str) -> TodoResult<Option<DateTime<FixedOffset>>> {
    row.get::<_, Option<String>>(column)?
        .map(|text| {
            DateTime::parse_from_rfc3339(&text)
                .map_err(|_| invalid_data(format!("invalid timestamp `{text}` in todos.{column}")))
        })
        .transpose()
}

// Fixed-width UTC text keeps lexical order equal to chronological order.
fn utc_to_db(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn offset_to_db(value: DateTime<FixedOffset>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

fn parse_utc(text: &str) -> TodoResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|value| value.with_timezone(&Utc))
        .map_err(|_| invalid_data(format!("invalid timestamp `{text}`")))
}

fn invalid_data(message: String) -> TodoError {
    TodoError::store(format!("invalid persisted todo data: {message}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::database::open_db_in_memory;
    use crate::domains::todos::model::Priority;
    use std::collections::HashSet;

    fn repo() -> SqliteTodoRepository {
        SqliteTodoRepository::new(open_db_in_memory().unwrap())
    }

    #[tokio::test]
    async fn test_create_assigns_defaults() {
        let repo = repo();

        let created = repo.create(NewTodo::new("Buy milk", "alice")).await.unwrap();
        let loaded = repo.get_by_id(created.id).await.unwrap().unwrap();

        assert_eq!(loaded.title, "Buy milk");
        assert_eq!(loaded.creator, "alice");
        assert_eq!(loaded.state, TodoState::Todo);
        assert_eq!(loaded.priority, Priority::Medium);
        assert!(loaded.tags.is_empty());
        assert!(loaded.updated_at.is_none());
        assert_eq!(loaded, created);
    }

    #[tokio::test]
    async fn test_create_assigns_fresh_ids_and_monotonic_timestamps() {
        let repo = repo();
        let mut ids = HashSet::new();
        let mut last = None;

        for i in 0..20 {
            let todo = repo.create(NewTodo::new(format!("todo {i}"), "alice")).await.unwrap();
            assert!(ids.insert(todo.id));
            if let Some(previous) = last {
                assert!(todo.created_at >= previous);
            }
            last = Some(todo.created_at);
        }
    }

    #[tokio::test]
    async fn test_create_stamps_current_time() {
        let repo = repo();
        let before = Utc::now() - chrono::Duration::seconds(1);

        let created = repo.create(NewTodo::new("t", "c")).await.unwrap();

        assert!(created.created_at >= before);
        assert!(created.created_at <= Utc::now());
    }

    #[tokio::test]
    async fn test_tags_roundtrip_in_order() {
        let repo = repo();
        let mut todo = NewTodo::new("Tagged", "alice");
        todo.tags = vec!["a".into(), "b".into()];

        let created = repo.create(todo).await.unwrap();
        let loaded = repo.get_by_id(created.id).await.unwrap().unwrap();

        assert_eq!(loaded.tags, vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn test_create_rejects_delimiter_in_tag() {
        let repo = repo();
        let mut todo = NewTodo::new("Tagged", "alice");
        todo.tags = vec!["a,b".into()];

        let err = repo.create(todo).await.unwrap_err();
        assert!(matches!(err, TodoError::Validation(_)));
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dates_keep_their_offset() {
        let repo = repo();
        let mut todo = NewTodo::new("Dated", "alice");
        todo.start_date = Some(DateTime::parse_from_rfc3339("2026-01-02T08:30:00+02:00").unwrap());

        let created = repo.create(todo).await.unwrap();
        let loaded = repo.get_by_id(created.id).await.unwrap().unwrap();

        assert_eq!(
            loaded.start_date.unwrap().to_rfc3339(),
            "2026-01-02T08:30:00+02:00"
        );
    }

    #[tokio::test]
    async fn test_get_by_id_unknown_is_none() {
        assert!(repo().get_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_by_creator_newest_first() {
        let repo = repo();
        let first = repo.create(NewTodo::new("first", "alice")).await.unwrap();
        repo.create(NewTodo::new("other", "bob")).await.unwrap();
        let second = repo.create(NewTodo::new("second", "alice")).await.unwrap();

        let todos = repo.get_by_creator("alice").await.unwrap();
        let ids: Vec<_> = todos.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);

        assert!(repo.get_by_creator("Alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_by_state_filters() {
        let repo = repo();
        let mut done = NewTodo::new("done", "alice");
        done.state = TodoState::Done;
        let done = repo.create(done).await.unwrap();
        repo.create(NewTodo::new("open", "alice")).await.unwrap();

        let todos = repo.get_by_state(TodoState::Done).await.unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].id, done.id);
        assert!(repo.get_by_state(TodoState::InProgress).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_all_newest_first() {
        let repo = repo();
        let a = repo.create(NewTodo::new("a", "alice")).await.unwrap();
        let b = repo.create(NewTodo::new("b", "bob")).await.unwrap();

        let ids: Vec<_> = repo.get_all().await.unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }

    #[tokio::test]
    async fn test_update_preserves_creator_and_created_at() {
        let repo = repo();
        let created = repo.create(NewTodo::new("Buy milk", "alice")).await.unwrap();

        let mut replacement = created.clone();
        replacement.title = "Buy oat milk".into();
        replacement.creator = "mallory".into();
        replacement.created_at = Utc::now() - chrono::Duration::days(30);
        replacement.state = TodoState::InProgress;

        let updated = repo.update(replacement).await.unwrap().unwrap();
        assert_eq!(updated.title, "Buy oat milk");
        assert_eq!(updated.creator, "alice");
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.state, TodoState::InProgress);
        assert!(updated.updated_at.unwrap() >= created.created_at);

        let loaded = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(loaded, updated);
    }

    #[tokio::test]
    async fn test_update_advances_updated_at() {
        let repo = repo();
        let created = repo.create(NewTodo::new("t", "c")).await.unwrap();

        let first = repo.update(created.clone()).await.unwrap().unwrap();
        let second = repo.update(first.clone()).await.unwrap().unwrap();

        assert!(second.updated_at.unwrap() >= first.updated_at.unwrap());
    }

    #[tokio::test]
    async fn test_update_unknown_is_none() {
        let repo = repo();
        let mut ghost = repo.create(NewTodo::new("t", "c")).await.unwrap();
        ghost.id = Uuid::new_v4();

        assert!(repo.update(ghost).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let repo = repo();
        let created = repo.create(NewTodo::new("t", "c")).await.unwrap();

        assert!(repo.exists(created.id).await.unwrap());
        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
        assert!(!repo.exists(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_row_surfaces_as_store_error() {
        let conn = open_db_in_memory().unwrap();
        conn.execute(
            "INSERT INTO todos (id, title, creator, state, created_at)
             VALUES ('not-a-uuid', 't', 'c', 'Todo', '2026-01-01T00:00:00.000000Z')",
            [],
        )
        .unwrap();
        let repo = SqliteTodoRepository::new(conn);

        let err = repo.get_all().await.unwrap_err();
        assert!(matches!(err, TodoError::StoreUnavailable(_)));
    }
}

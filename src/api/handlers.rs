//! REST handlers for `/api/todo`.
//!
//! Handlers only translate between HTTP and `TodoService`; all rules live in
//! the service.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::IntoResponse,
};
use http::{StatusCode, header};
use tracing::instrument;

use super::error::ApiError;
use crate::domains::todos::{
    NewTodo, ParseEnumError, Todo, TodoError, TodoService, TodoState, validation::parse_id,
};

/// Base path of the REST resource.
pub const TODO_BASE_PATH: &str = "/api/todo";

/// State shared by the REST handlers.
#[derive(Clone)]
pub struct ApiState {
    pub todos: Arc<TodoService>,
}

type ApiResult<T> = Result<T, ApiError>;

/// `GET /api/todo`
#[instrument(skip_all)]
pub async fn list_all(State(state): State<ApiState>) -> ApiResult<Json<Vec<Todo>>> {
    Ok(Json(state.todos.list_all().await?))
}

/// `GET /api/todo/{id}`
#[instrument(skip(state))]
pub async fn get_by_id(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Todo>> {
    let id = parse_id(&id)?;
    let todo = state.todos.get(id).await?.ok_or(TodoError::NotFound(id))?;
    Ok(Json(todo))
}

/// `GET /api/todo/creator/{creator}`
#[instrument(skip(state))]
pub async fn list_by_creator(
    State(state): State<ApiState>,
    Path(creator): Path<String>,
) -> ApiResult<Json<Vec<Todo>>> {
    Ok(Json(state.todos.list_by_creator(&creator).await?))
}

/// `GET /api/todo/state/{state}`
#[instrument(skip(state))]
pub async fn list_by_state(
    State(state): State<ApiState>,
    Path(todo_state): Path<String>,
) -> ApiResult<Json<Vec<Todo>>> {
    let todo_state: TodoState = todo_state
        .parse()
        .map_err(|e: ParseEnumError| TodoError::validation(e.to_string()))?;
    Ok(Json(state.todos.list_by_state(todo_state).await?))
}

/// `POST /api/todo`
///
/// Any `id`, `createdAt` or `updatedAt` in the body is ignored.
#[instrument(skip_all)]
pub async fn create(
    State(state): State<ApiState>,
    payload: Result<Json<NewTodo>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(todo) = payload?;
    let created = state.todos.create(todo).await?;
    let location = format!("{TODO_BASE_PATH}/{}", created.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

/// `PUT /api/todo/{id}`
#[instrument(skip(state, payload))]
pub async fn replace(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    payload: Result<Json<Todo>, JsonRejection>,
) -> ApiResult<Json<Todo>> {
    let id = parse_id(&id)?;
    let Json(todo) = payload?;
    Ok(Json(state.todos.replace(id, todo).await?))
}

/// `DELETE /api/todo/{id}`
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;
    state.todos.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `HEAD /api/todo/{id}`
#[instrument(skip(state))]
pub async fn exists(State(state): State<ApiState>, Path(id): Path<String>) -> StatusCode {
    let Ok(id) = parse_id(&id) else {
        return StatusCode::NOT_FOUND;
    };

    match state.todos.exists(id).await {
        Ok(true) => StatusCode::OK,
        Ok(false) => StatusCode::NOT_FOUND,
        Err(e) => ApiError(e).status(),
    }
}

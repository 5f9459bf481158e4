//! REST API for todos.
//!
//! | method | path | success | failure |
//! |---|---|---|---|
//! | GET | `/api/todo` | 200 | |
//! | GET | `/api/todo/{id}` | 200 | 404 |
//! | GET | `/api/todo/creator/{creator}` | 200 | |
//! | GET | `/api/todo/state/{state}` | 200 | 400 |
//! | POST | `/api/todo` | 201 + `Location` | 400 |
//! | PUT | `/api/todo/{id}` | 200 | 400, 404 |
//! | DELETE | `/api/todo/{id}` | 204 | 404 |
//! | HEAD | `/api/todo/{id}` | 200 | 404 |

mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{Router, routing::get};

use crate::domains::todos::TodoService;

pub use error::ApiError;
pub use handlers::{ApiState, TODO_BASE_PATH};

/// Build the REST router for the given todo service.
pub fn router(todos: Arc<TodoService>) -> Router {
    Router::new()
        .route(
            TODO_BASE_PATH,
            get(handlers::list_all).post(handlers::create),
        )
        .route(
            &format!("{TODO_BASE_PATH}/{{id}}"),
            get(handlers::get_by_id)
                .put(handlers::replace)
                .delete(handlers::delete)
                .head(handlers::exists),
        )
        .route(
            &format!("{TODO_BASE_PATH}/creator/{{creator}}"),
            get(handlers::list_by_creator),
        )
        .route(
            &format!("{TODO_BASE_PATH}/state/{{state}}"),
            get(handlers::list_by_state),
        )
        .with_state(ApiState { todos })
}

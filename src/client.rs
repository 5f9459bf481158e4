//! Typed HTTP client for the todo REST API.
//!
//! ```rust,no_run
//! use todo_mcp_server::{NewTodo, TodoClient};
//!
//! # async fn demo() -> Result<(), todo_mcp_server::ClientError> {
//! let client = TodoClient::new("http://127.0.0.1:8080")?;
//! let todo = client.create(&NewTodo::new("Buy milk", "alice")).await?;
//! assert!(client.exists(todo.id).await?);
//! # Ok(())
//! # }
//! ```

use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::domains::todos::{NewTodo, Todo, TodoId, TodoState};

const TODO_PATH: &str = "/api/todo";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors returned by [`TodoClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Client for a remote todo server.
#[derive(Debug, Clone)]
pub struct TodoClient {
    http: Client,
    base_url: String,
}

impl TodoClient {
    /// Create a client for the server at `base_url`, e.g. `http://localhost:8080`.
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        let http = Client::builder().timeout(DEFAULT_TIMEOUT).build()?;
        Ok(Self::with_http_client(http, base_url))
    }

    /// Create a client that reuses an existing `reqwest::Client`.
    pub fn with_http_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, suffix: &str) -> String {
        format!("{}{}{}", self.base_url, TODO_PATH, suffix)
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> ClientResult<Vec<Todo>> {
        let response = self.http.get(self.url("")).send().await?;
        decode(response).await
    }

    /// Fetch one todo; `None` when the server answers 404.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: TodoId) -> ClientResult<Option<Todo>> {
        let response = self.http.get(self.url(&format!("/{id}"))).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(response).await.map(Some)
    }

    #[instrument(skip(self))]
    pub async fn get_by_creator(&self, creator: &str) -> ClientResult<Vec<Todo>> {
        // Creator names are free text; let the URL type percent-encode them.
        let mut url = reqwest::Url::parse(&self.url("/creator/"))
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push(creator);

        let response = self.http.get(url).send().await?;
        decode(response).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_state(&self, state: TodoState) -> ClientResult<Vec<Todo>> {
        let response = self
            .http
            .get(self.url(&format!("/state/{state}")))
            .send()
            .await?;
        decode(response).await
    }

    #[instrument(skip_all, fields(creator = %todo.creator))]
    pub async fn create(&self, todo: &NewTodo) -> ClientResult<Todo> {
        let response = self.http.post(self.url("")).json(todo).send().await?;
        decode(response).await
    }

    /// Replace the todo addressed by `todo.id`.
    #[instrument(skip_all, fields(id = %todo.id))]
    pub async fn update(&self, todo: &Todo) -> ClientResult<Todo> {
        let response = self
            .http
            .put(self.url(&format!("/{}", todo.id)))
            .json(todo)
            .send()
            .await?;
        decode(response).await
    }

    /// Delete a todo; `false` when it did not exist.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: TodoId) -> ClientResult<bool> {
        let response = self.http.delete(self.url(&format!("/{id}"))).send().await?;
        match response.status() {
            StatusCode::NO_CONTENT => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(status_error(response).await),
        }
    }

    #[instrument(skip(self))]
    pub async fn exists(&self, id: TodoId) -> ClientResult<bool> {
        let response = self.http.head(self.url(&format!("/{id}"))).send().await?;
        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(status_error(response).await),
        }
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    if !response.status().is_success() {
        return Err(status_error(response).await);
    }
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

async fn status_error(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    debug!(status, "Unexpected response: {}", body);

    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.message)
        .unwrap_or(body);
    ClientError::Status { status, message }
}

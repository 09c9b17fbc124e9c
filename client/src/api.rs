use async_trait::async_trait;
use doable_shared::{CreateTodoRequest, Todo, TodoStatus, UpdateTodoRequest};
use thiserror::Error;
use uuid::Uuid;

/// Errors from a `TodoApi` round-trip.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success status. `message` carries the
    /// server's `{"message"}` body when one was present.
    #[error("api error {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never produced a usable response (connect failure,
    /// undecodable body, ...).
    #[error("transport error: {0}")]
    Transport(String),
}

impl ApiError {
    /// The server-provided message when there is one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Api { message, .. } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Transport capability the state container calls through, one method per
/// service operation. Injected so the container can be exercised against a
/// fake without a live server.
#[async_trait]
pub trait TodoApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Todo>, ApiError>;
    async fn create(&self, input: CreateTodoRequest) -> Result<(), ApiError>;
    async fn update(&self, id: Uuid, input: UpdateTodoRequest) -> Result<Todo, ApiError>;
    async fn update_status(&self, id: Uuid, status: TodoStatus) -> Result<Todo, ApiError>;
    async fn delete(&self, id: Uuid) -> Result<(), ApiError>;
}

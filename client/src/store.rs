use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use doable_shared::{CreateTodoRequest, Todo, TodoStatus, UpdateTodoRequest};
use thiserror::Error;
use uuid::Uuid;

use crate::api::{ApiError, TodoApi};

/// Error surfaced to the presentation layer, ready to show as a
/// notification: the server's message when it sent one, a per-operation
/// fallback otherwise.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TodoError {
    message: String,
    #[source]
    source: ApiError,
}

impl TodoError {
    fn new(source: ApiError, fallback: &str) -> Self {
        Self {
            message: source.user_message(fallback),
            source,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Snapshot of the client-side mirror plus the per-operation busy flags.
/// The flags are independent so unrelated operations do not block each
/// other's UI state.
#[derive(Debug, Clone, Default)]
pub struct TodoState {
    pub todos: Vec<Todo>,
    pub is_loading_todos: bool,
    pub is_creating_todo: bool,
    pub is_updating_todo: bool,
    pub is_deleting_todo: bool,
}

/// In-memory mirror of the caller's todos. Every mutation goes through the
/// injected `TodoApi`; the state lock is held only across synchronous edits,
/// never across an await, so in-flight operations overlap freely. There is
/// no queuing, cancellation, or retry: when two operations race on the same
/// record, whichever response lands last wins in the mirror.
pub struct TodoStore {
    api: Arc<dyn TodoApi>,
    state: Mutex<TodoState>,
}

impl TodoStore {
    pub fn new(api: Arc<dyn TodoApi>) -> Self {
        Self {
            api,
            state: Mutex::new(TodoState::default()),
        }
    }

    /// Current state, cloned. Authoritative only immediately after a fetch.
    pub fn state(&self) -> TodoState {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, TodoState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the whole mirror with a fresh list. On failure the mirror is
    /// left as it was.
    pub async fn fetch_todos(&self) -> Result<(), TodoError> {
        self.lock().is_loading_todos = true;
        let result = self.api.list().await;
        let mut state = self.lock();
        state.is_loading_todos = false;
        match result {
            Ok(todos) => {
                state.todos = todos;
                Ok(())
            }
            Err(err) => Err(TodoError::new(err, "Failed to load tasks")),
        }
    }

    /// Create, then resync the whole mirror rather than inserting locally.
    /// The creating flag stays set until the resync finishes.
    pub async fn add_todo(&self, input: CreateTodoRequest) -> Result<(), TodoError> {
        self.lock().is_creating_todo = true;
        let outcome = match self.api.create(input).await {
            Ok(()) => self.fetch_todos().await,
            Err(err) => Err(TodoError::new(err, "Failed to add task")),
        };
        self.lock().is_creating_todo = false;
        outcome
    }

    /// Update title/description, replacing the one matching local element
    /// with the server's record. No resync.
    pub async fn update_todo(&self, id: Uuid, input: UpdateTodoRequest) -> Result<(), TodoError> {
        self.lock().is_updating_todo = true;
        let result = self.api.update(id, input).await;
        let mut state = self.lock();
        state.is_updating_todo = false;
        match result {
            Ok(updated) => {
                if let Some(slot) = state.todos.iter_mut().find(|t| t.id == id) {
                    *slot = updated;
                }
                Ok(())
            }
            Err(err) => Err(TodoError::new(err, "Failed to update task")),
        }
    }

    /// Flip the status, patching only the local `status` field once the
    /// server confirms. Status flips carry no busy flag; the dashboard
    /// toggles them inline.
    pub async fn update_status(&self, id: Uuid, status: TodoStatus) -> Result<(), TodoError> {
        match self.api.update_status(id, status).await {
            Ok(_) => {
                let mut state = self.lock();
                if let Some(slot) = state.todos.iter_mut().find(|t| t.id == id) {
                    slot.status = status;
                }
                Ok(())
            }
            Err(err) => Err(TodoError::new(err, "Failed to update status")),
        }
    }

    /// Delete, removing the matching local element on confirmation.
    pub async fn delete_todo(&self, id: Uuid) -> Result<(), TodoError> {
        self.lock().is_deleting_todo = true;
        let result = self.api.delete(id).await;
        let mut state = self.lock();
        state.is_deleting_todo = false;
        match result {
            Ok(()) => {
                state.todos.retain(|t| t.id != id);
                Ok(())
            }
            Err(err) => Err(TodoError::new(err, "Failed to delete task")),
        }
    }
}

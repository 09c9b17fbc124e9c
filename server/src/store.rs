use chrono::Utc;
use doable_shared::{Todo, TodoStatus};
use std::sync::{PoisonError, RwLock};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),
    #[error("todo collection lock poisoned")]
    Poisoned,
}

impl<T> From<PoisonError<T>> for StoreError {
    fn from(_: PoisonError<T>) -> Self {
        StoreError::Poisoned
    }
}

/// Field changes for `find_one_and_update`. `None` leaves a field untouched.
#[derive(Debug, Default)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TodoStatus>,
}

/// In-process document collection for todo records.
///
/// Each primitive except `insert` filters on `(id, owner_id)`, so a lookup
/// by id alone can never observe another owner's record. Updates and deletes
/// are atomic under the collection lock.
#[derive(Debug, Default)]
pub struct TodoStore {
    todos: RwLock<Vec<Todo>>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Persist a new record for `owner_id`, status defaulted to `Todo`.
    pub fn insert(
        &self,
        owner_id: Uuid,
        title: &str,
        description: &str,
    ) -> Result<Todo, StoreError> {
        validate_text("title", title)?;
        validate_text("description", description)?;
        let now = Utc::now();
        let todo = Todo {
            id: Uuid::new_v4(),
            owner_id,
            title: title.to_string(),
            description: description.to_string(),
            status: TodoStatus::default(),
            created_at: now,
            updated_at: now,
        };
        self.todos.write()?.push(todo.clone());
        Ok(todo)
    }

    /// All records for `owner_id`, in insertion order. Empty is not an error
    /// at this layer.
    pub fn find_all_by_owner(&self, owner_id: Uuid) -> Result<Vec<Todo>, StoreError> {
        Ok(self
            .todos
            .read()?
            .iter()
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .collect())
    }

    /// Apply `changes` to the record matching `(id, owner_id)` and return the
    /// post-update record, or `None` if nothing matched. Validation runs
    /// before any field is written, so a rejected update leaves the record
    /// untouched.
    pub fn find_one_and_update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        changes: TodoChanges,
    ) -> Result<Option<Todo>, StoreError> {
        let mut todos = self.todos.write()?;
        let Some(todo) = todos
            .iter_mut()
            .find(|t| t.id == id && t.owner_id == owner_id)
        else {
            return Ok(None);
        };
        if let Some(title) = &changes.title {
            validate_text("title", title)?;
        }
        if let Some(description) = &changes.description {
            validate_text("description", description)?;
        }
        if let Some(title) = changes.title {
            todo.title = title;
        }
        if let Some(description) = changes.description {
            todo.description = description;
        }
        if let Some(status) = changes.status {
            todo.status = status;
        }
        todo.updated_at = Utc::now();
        Ok(Some(todo.clone()))
    }

    /// Remove the record matching `(id, owner_id)`. Returns whether anything
    /// was removed; a miss is a no-op, not an error.
    pub fn find_one_and_delete(&self, id: Uuid, owner_id: Uuid) -> Result<bool, StoreError> {
        let mut todos = self.todos.write()?;
        let before = todos.len();
        todos.retain(|t| !(t.id == id && t.owner_id == owner_id));
        Ok(todos.len() != before)
    }
}

fn validate_text(field: &str, value: &str) -> Result<(), StoreError> {
    if value.is_empty() {
        return Err(StoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}

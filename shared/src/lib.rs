use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Workflow state of a todo. The wire names are fixed; anything else is
/// rejected at the service boundary before it can reach storage.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
pub enum TodoStatus {
    #[default]
    Todo,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoStatus::Todo => write!(f, "Todo"),
            TodoStatus::InProgress => write!(f, "In Progress"),
            TodoStatus::Completed => write!(f, "Completed"),
        }
    }
}

/// Error for a status string outside the enumeration.
#[derive(Debug, PartialEq, Eq)]
pub struct InvalidStatus(pub String);

impl fmt::Display for InvalidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid status: {}", self.0)
    }
}

impl std::error::Error for InvalidStatus {}

impl FromStr for TodoStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Todo" => Ok(TodoStatus::Todo),
            "In Progress" => Ok(TodoStatus::InProgress),
            "Completed" => Ok(TodoStatus::Completed),
            other => Err(InvalidStatus(other.to_string())),
        }
    }
}

/// A todo record, permanently bound to the owner that created it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub status: TodoStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /todo/add`. Fields are optional here so the service can
/// answer "title is required" itself instead of a generic decode failure.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct CreateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Body of `PUT /todo/update/{id}`.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Body of `PUT /todo/status/{id}`. The status travels as a plain string
/// and is checked against the enumeration by the service.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

/// The `{"message": ...}` envelope used for confirmations and errors.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ApiMessage {
    pub message: String,
}

impl ApiMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

use actix_web::{web, HttpResponse};
use doable_shared::{
    ApiMessage, CreateTodoRequest, TodoStatus, UpdateStatusRequest, UpdateTodoRequest,
};
use uuid::Uuid;

use crate::error::ServiceError;
use crate::identity::Identity;
use crate::store::{TodoChanges, TodoStore};

pub async fn index() -> &'static str {
    "API is running..."
}

/// GET /todo/show: every todo owned by the caller. Zero records is the
/// reportable `no todo found` condition, not an empty-array success.
pub async fn show_todos(
    store: web::Data<TodoStore>,
    identity: Identity,
) -> Result<HttpResponse, ServiceError> {
    let todos = store.find_all_by_owner(identity.owner_id())?;
    if todos.is_empty() {
        return Err(ServiceError::Empty);
    }
    Ok(HttpResponse::Ok().json(todos))
}

/// POST /todo/add
pub async fn add_todo(
    store: web::Data<TodoStore>,
    identity: Identity,
    body: web::Json<CreateTodoRequest>,
) -> Result<HttpResponse, ServiceError> {
    let title = require("title", &body.title)?;
    let description = require("description", &body.description)?;
    store.insert(identity.owner_id(), title, description)?;
    Ok(HttpResponse::Ok().json(ApiMessage::new("A todo is added")))
}

/// PUT /todo/update/{id}: title and description are both required; the
/// status is not touched by this operation.
pub async fn update_todo(
    store: web::Data<TodoStore>,
    identity: Identity,
    path: web::Path<String>,
    body: web::Json<UpdateTodoRequest>,
) -> Result<HttpResponse, ServiceError> {
    let id = parse_id(&path)?;
    let title = require("title", &body.title)?;
    let description = require("description", &body.description)?;

    let changes = TodoChanges {
        title: Some(title.to_string()),
        description: Some(description.to_string()),
        status: None,
    };
    let updated = match id {
        Some(id) => store.find_one_and_update(id, identity.owner_id(), changes)?,
        None => None,
    };
    let todo = updated.ok_or(ServiceError::NotFound)?;
    Ok(HttpResponse::Ok().json(todo))
}

/// PUT /todo/status/{id}: the only operation that may change the status.
pub async fn update_status(
    store: web::Data<TodoStore>,
    identity: Identity,
    path: web::Path<String>,
    body: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, ServiceError> {
    let id = parse_id(&path)?;
    let status: TodoStatus = require("status", &body.status)?
        .parse()
        .map_err(|err: doable_shared::InvalidStatus| ServiceError::Validation(err.to_string()))?;

    let changes = TodoChanges {
        title: None,
        description: None,
        status: Some(status),
    };
    let updated = match id {
        Some(id) => store.find_one_and_update(id, identity.owner_id(), changes)?,
        None => None,
    };
    let todo = updated.ok_or(ServiceError::NotFound)?;
    Ok(HttpResponse::Ok().json(todo))
}

/// DELETE /todo/delete/{id}: confirms unconditionally. A miss (unknown id,
/// or an id owned by someone else) is reported as success, so callers cannot
/// probe for another owner's records.
pub async fn delete_todo(
    store: web::Data<TodoStore>,
    identity: Identity,
    path: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    if let Some(id) = parse_id(&path)? {
        store.find_one_and_delete(id, identity.owner_id())?;
    }
    Ok(HttpResponse::Ok().json(ApiMessage::new("todo is removed")))
}

fn require<'a>(field: &'static str, value: &'a Option<String>) -> Result<&'a str, ServiceError> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ServiceError::MissingField(field)),
    }
}

/// An empty id segment is a missing field; a segment that is not a valid id
/// can match nothing and behaves as a miss.
fn parse_id(raw: &str) -> Result<Option<Uuid>, ServiceError> {
    if raw.is_empty() {
        return Err(ServiceError::MissingField("id"));
    }
    Ok(Uuid::parse_str(raw).ok())
}

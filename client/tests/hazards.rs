//! Interleaving tests for the two known consistency gaps in the client
//! mirror: concurrent operations on one record (last response wins) and a
//! full resync racing a local patch (the resync's older snapshot wins).
//! These document observed behavior; the mirror has no request
//! serialization or cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use doable_client::{ApiError, TodoApi, TodoStore};
use doable_shared::{CreateTodoRequest, Todo, TodoStatus, UpdateTodoRequest};
use tokio::sync::Notify;
use uuid::Uuid;

fn sample(title: &str) -> Todo {
    let now = Utc::now();
    Todo {
        id: Uuid::new_v4(),
        owner_id: Uuid::new_v4(),
        title: title.to_string(),
        description: "d".to_string(),
        status: TodoStatus::Todo,
        created_at: now,
        updated_at: now,
    }
}

/// Fake service whose list/update responses can be held at the gate, so a
/// test can decide exactly when each response lands. List snapshots are
/// taken when the call starts, like a real server would.
#[derive(Default)]
struct GatedApi {
    todos: Mutex<Vec<Todo>>,
    gate_list: AtomicBool,
    list_started: Notify,
    release_list: Notify,
    gate_update: AtomicBool,
    update_started: Notify,
    release_update: Notify,
}

impl GatedApi {
    fn seeded(todos: Vec<Todo>) -> Arc<Self> {
        Arc::new(Self {
            todos: Mutex::new(todos),
            ..Self::default()
        })
    }
}

#[async_trait]
impl TodoApi for GatedApi {
    async fn list(&self) -> Result<Vec<Todo>, ApiError> {
        let snapshot = self.todos.lock().unwrap().clone();
        if self.gate_list.load(Ordering::SeqCst) {
            self.list_started.notify_one();
            self.release_list.notified().await;
        }
        Ok(snapshot)
    }

    async fn create(&self, input: CreateTodoRequest) -> Result<(), ApiError> {
        let todo = sample(input.title.as_deref().unwrap_or_default());
        self.todos.lock().unwrap().push(todo);
        Ok(())
    }

    async fn update(&self, id: Uuid, input: UpdateTodoRequest) -> Result<Todo, ApiError> {
        if self.gate_update.load(Ordering::SeqCst) {
            self.update_started.notify_one();
            self.release_update.notified().await;
        }
        let mut todos = self.todos.lock().unwrap();
        let Some(todo) = todos.iter_mut().find(|t| t.id == id) else {
            return Err(ApiError::Api {
                status: 400,
                message: "todo not found".to_string(),
            });
        };
        if let Some(title) = input.title {
            todo.title = title;
        }
        if let Some(description) = input.description {
            todo.description = description;
        }
        Ok(todo.clone())
    }

    async fn update_status(&self, id: Uuid, status: TodoStatus) -> Result<Todo, ApiError> {
        let mut todos = self.todos.lock().unwrap();
        let Some(todo) = todos.iter_mut().find(|t| t.id == id) else {
            return Err(ApiError::Api {
                status: 400,
                message: "todo not found".to_string(),
            });
        };
        todo.status = status;
        Ok(todo.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.todos.lock().unwrap().retain(|t| t.id != id);
        Ok(())
    }
}

#[tokio::test]
async fn busy_flag_is_set_while_a_fetch_is_in_flight() {
    let api = GatedApi::seeded(vec![sample("a")]);
    let store = Arc::new(TodoStore::new(Arc::clone(&api) as Arc<dyn TodoApi>));

    api.gate_list.store(true, Ordering::SeqCst);
    let in_flight = tokio::spawn({
        let store = Arc::clone(&store);
        async move { store.fetch_todos().await }
    });

    api.list_started.notified().await;
    assert!(store.state().is_loading_todos);

    api.release_list.notify_one();
    in_flight.await.unwrap().unwrap();
    assert!(!store.state().is_loading_todos);
    assert_eq!(store.state().todos.len(), 1);
}

#[tokio::test]
async fn slower_update_response_overwrites_the_faster_one() {
    let todo = sample("original");
    let id = todo.id;
    let api = GatedApi::seeded(vec![todo]);
    let store = Arc::new(TodoStore::new(Arc::clone(&api) as Arc<dyn TodoApi>));
    store.fetch_todos().await.unwrap();

    // first update is held at the gate
    api.gate_update.store(true, Ordering::SeqCst);
    let slow = tokio::spawn({
        let store = Arc::clone(&store);
        async move {
            store
                .update_todo(
                    id,
                    UpdateTodoRequest {
                        title: Some("slow".to_string()),
                        description: None,
                    },
                )
                .await
        }
    });
    api.update_started.notified().await;

    // second update is issued later but completes first
    api.gate_update.store(false, Ordering::SeqCst);
    store
        .update_todo(
            id,
            UpdateTodoRequest {
                title: Some("fast".to_string()),
                description: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(store.state().todos[0].title, "fast");

    api.release_update.notify_one();
    slow.await.unwrap().unwrap();

    // the response that landed last wins, not the one issued last
    assert_eq!(store.state().todos[0].title, "slow");
}

#[tokio::test]
async fn in_flight_resync_overwrites_a_completed_local_patch() {
    let todo = sample("a");
    let id = todo.id;
    let api = GatedApi::seeded(vec![todo]);
    let store = Arc::new(TodoStore::new(Arc::clone(&api) as Arc<dyn TodoApi>));
    store.fetch_todos().await.unwrap();

    // a resync starts and snapshots the list before the patch below
    api.gate_list.store(true, Ordering::SeqCst);
    let resync = tokio::spawn({
        let store = Arc::clone(&store);
        async move { store.fetch_todos().await }
    });
    api.list_started.notified().await;

    // the status patch completes while the resync is still in flight
    store
        .update_status(id, TodoStatus::Completed)
        .await
        .unwrap();
    assert_eq!(store.state().todos[0].status, TodoStatus::Completed);

    // the resync lands last, carrying the pre-patch snapshot
    api.release_list.notify_one();
    resync.await.unwrap().unwrap();
    assert_eq!(store.state().todos[0].status, TodoStatus::Todo);
}

#[tokio::test]
async fn update_landing_after_a_local_delete_does_not_resurrect_the_record() {
    let todo = sample("a");
    let id = todo.id;
    let api = GatedApi::seeded(vec![todo]);
    let store = Arc::new(TodoStore::new(Arc::clone(&api) as Arc<dyn TodoApi>));
    store.fetch_todos().await.unwrap();

    api.gate_update.store(true, Ordering::SeqCst);
    let slow_update = tokio::spawn({
        let store = Arc::clone(&store);
        async move {
            store
                .update_todo(
                    id,
                    UpdateTodoRequest {
                        title: Some("late".to_string()),
                        description: None,
                    },
                )
                .await
        }
    });
    api.update_started.notified().await;

    store.delete_todo(id).await.unwrap();
    assert!(store.state().todos.is_empty());

    api.release_update.notify_one();
    // the record is gone server-side too, so the late update reports a miss
    let err = slow_update.await.unwrap().unwrap_err();
    assert_eq!(err.message(), "todo not found");
    assert!(store.state().todos.is_empty());
}

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use uuid::Uuid;

const MAX_PRIORITY: u8 = 3;
const MAX_STATUS: u8 = 2;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskList {
    pub id: Uuid,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: Uuid,
    pub list_id: Uuid,
    pub name: String,
    pub description: String,
    pub priority: u8,
    pub status: u8,
}

#[derive(Deserialize)]
pub struct CreateList {
    pub name: String,
}

#[derive(Deserialize)]
pub struct CreateTask {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: u8,
    #[serde(default)]
    pub status: u8,
}

#[derive(Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

#[derive(Deserialize)]
pub struct NameUpdate {
    pub new_name: String,
}

#[derive(Deserialize)]
pub struct DescriptionUpdate {
    pub new_description: String,
}

#[derive(Deserialize)]
pub struct PriorityUpdate {
    pub new_priority: u8,
}

#[derive(Deserialize)]
pub struct StatusUpdate {
    pub new_status: u8,
}

/// Lists and tasks in creation order.
#[derive(Default)]
pub struct Store {
    lists: Vec<TaskList>,
    tasks: Vec<Task>,
}

impl Store {
    fn has_list(&self, id: Uuid) -> bool {
        self.lists.iter().any(|l| l.id == id)
    }

    fn task_mut(&mut self, list_id: Uuid, task_id: Uuid) -> Option<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == task_id && t.list_id == list_id)
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/lists", get(list_lists).post(create_list))
        .route("/lists/{list_id}", delete(delete_list))
        .route("/lists/{list_id}/tasks", get(list_tasks).post(create_task))
        .route(
            "/lists/{list_id}/tasks/{task_id}",
            get(get_task).delete(delete_task),
        )
        .route("/lists/{list_id}/tasks/{task_id}/name", put(update_name))
        .route(
            "/lists/{list_id}/tasks/{task_id}/description",
            put(update_description),
        )
        .route(
            "/lists/{list_id}/tasks/{task_id}/priority",
            put(update_priority),
        )
        .route("/lists/{list_id}/tasks/{task_id}/status", put(update_status))
        .layer(cors)
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock server listening");
    }
    axum::serve(listener, app()).await
}

// --- lists ---

async fn list_lists(State(db): State<Db>) -> Json<Vec<TaskList>> {
    Json(db.read().await.lists.clone())
}

async fn create_list(
    State(db): State<Db>,
    Json(input): Json<CreateList>,
) -> Result<Json<TaskList>, StatusCode> {
    if input.name.is_empty() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let list = TaskList {
        id: Uuid::new_v4(),
        name: input.name,
    };
    db.write().await.lists.push(list.clone());
    info!(list_id = %list.id, "list created");
    Ok(Json(list))
}

/// Deleting a list takes its tasks with it.
async fn delete_list(
    State(db): State<Db>,
    Path(list_id): Path<Uuid>,
) -> Result<Json<Message>, StatusCode> {
    let mut store = db.write().await;
    if !store.has_list(list_id) {
        return Err(StatusCode::NOT_FOUND);
    }
    store.lists.retain(|l| l.id != list_id);
    store.tasks.retain(|t| t.list_id != list_id);
    info!(%list_id, "list deleted");
    Ok(Json(Message {
        message: "List deleted successfully".to_string(),
    }))
}

// --- tasks ---

/// An unknown list simply has no tasks.
async fn list_tasks(State(db): State<Db>, Path(list_id): Path<Uuid>) -> Json<Vec<Task>> {
    let store = db.read().await;
    Json(
        store
            .tasks
            .iter()
            .filter(|t| t.list_id == list_id)
            .cloned()
            .collect(),
    )
}

async fn create_task(
    State(db): State<Db>,
    Path(list_id): Path<Uuid>,
    Json(input): Json<CreateTask>,
) -> Result<Json<Task>, StatusCode> {
    if input.name.is_empty() || input.priority > MAX_PRIORITY || input.status > MAX_STATUS {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let mut store = db.write().await;
    if !store.has_list(list_id) {
        return Err(StatusCode::NOT_FOUND);
    }
    let task = Task {
        id: Uuid::new_v4(),
        list_id,
        name: input.name,
        description: input.description.unwrap_or_default(),
        priority: input.priority,
        status: input.status,
    };
    store.tasks.push(task.clone());
    info!(%list_id, task_id = %task.id, "task created");
    Ok(Json(task))
}

async fn get_task(
    State(db): State<Db>,
    Path((list_id, task_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Task>, StatusCode> {
    let store = db.read().await;
    store
        .tasks
        .iter()
        .find(|t| t.id == task_id && t.list_id == list_id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn delete_task(
    State(db): State<Db>,
    Path((list_id, task_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Message>, StatusCode> {
    let mut store = db.write().await;
    let before = store.tasks.len();
    store
        .tasks
        .retain(|t| !(t.id == task_id && t.list_id == list_id));
    if store.tasks.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    info!(%list_id, %task_id, "task deleted");
    Ok(Json(Message {
        message: "Task deleted successfully".to_string(),
    }))
}

async fn update_name(
    State(db): State<Db>,
    Path((list_id, task_id)): Path<(Uuid, Uuid)>,
    Query(update): Query<NameUpdate>,
) -> Result<Json<Task>, StatusCode> {
    if update.new_name.is_empty() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    update_task(&db, list_id, task_id, |task| task.name = update.new_name).await
}

async fn update_description(
    State(db): State<Db>,
    Path((list_id, task_id)): Path<(Uuid, Uuid)>,
    Query(update): Query<DescriptionUpdate>,
) -> Result<Json<Task>, StatusCode> {
    update_task(&db, list_id, task_id, |task| {
        task.description = update.new_description
    })
    .await
}

async fn update_priority(
    State(db): State<Db>,
    Path((list_id, task_id)): Path<(Uuid, Uuid)>,
    Query(update): Query<PriorityUpdate>,
) -> Result<Json<Task>, StatusCode> {
    if update.new_priority > MAX_PRIORITY {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    update_task(&db, list_id, task_id, |task| task.priority = update.new_priority).await
}

async fn update_status(
    State(db): State<Db>,
    Path((list_id, task_id)): Path<(Uuid, Uuid)>,
    Query(update): Query<StatusUpdate>,
) -> Result<Json<Task>, StatusCode> {
    if update.new_status > MAX_STATUS {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    update_task(&db, list_id, task_id, |task| task.status = update.new_status).await
}

async fn update_task(
    db: &Db,
    list_id: Uuid,
    task_id: Uuid,
    apply: impl FnOnce(&mut Task),
) -> Result<Json<Task>, StatusCode> {
    let mut store = db.write().await;
    let task = store
        .task_mut(list_id, task_id)
        .ok_or(StatusCode::NOT_FOUND)?;
    apply(task);
    Ok(Json(task.clone()))
}

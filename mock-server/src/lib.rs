use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

pub const DEMO_EMAIL: &str = "free@samuraijs.com";
pub const DEMO_PASSWORD: &str = "free";
pub const MAX_TITLE_LEN: usize = 100;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todolist {
    pub id: String,
    pub title: String,
    pub added_date: String,
    pub order: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub todo_list_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: u8,
    pub priority: u8,
    pub start_date: Option<String>,
    pub deadline: Option<String>,
    pub order: i64,
    pub added_date: String,
}

#[derive(Deserialize)]
pub struct TitleInput {
    pub title: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskInput {
    pub title: String,
    pub description: Option<String>,
    pub status: u8,
    pub priority: u8,
    pub start_date: Option<String>,
    pub deadline: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginInput {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
    pub captcha: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TasksPage {
    pub items: Vec<Task>,
    pub total_count: usize,
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub result_code: i32,
    pub messages: Vec<String>,
    pub data: serde_json::Value,
}

impl Envelope {
    fn success(data: impl Serialize) -> Json<Self> {
        Json(Self {
            result_code: 0,
            messages: Vec::new(),
            data: serde_json::to_value(data).unwrap_or_default(),
        })
    }

    fn failure(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            result_code: 1,
            messages: vec![message.into()],
            data: serde_json::json!({}),
        })
    }
}

#[derive(Default)]
pub struct Store {
    todolists: Vec<Todolist>,
    tasks: HashMap<String, Vec<Task>>,
    logged_in: bool,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/todo-lists", get(list_todolists).post(create_todolist))
        .route("/todo-lists/{id}", put(update_todolist).delete(delete_todolist))
        .route("/todo-lists/{id}/tasks", get(list_tasks).post(create_task))
        .route(
            "/todo-lists/{id}/tasks/{task_id}",
            put(update_task).delete(delete_task),
        )
        .route("/auth/me", get(me))
        .route("/auth/login", post(login).delete(logout))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn now() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3f").to_string()
}

fn validate_title(title: &str) -> Result<(), Json<Envelope>> {
    if title.trim().is_empty() {
        return Err(Envelope::failure("Title is required"));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(Envelope::failure(format!(
            "Title must not be longer than {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

/// New records go first, so their order sorts below every existing one.
fn next_order<'a>(orders: impl Iterator<Item = &'a i64>) -> i64 {
    orders.min().map_or(0, |min| min - 1)
}

async fn list_todolists(State(db): State<Db>) -> Json<Vec<Todolist>> {
    Json(db.read().await.todolists.clone())
}

async fn create_todolist(State(db): State<Db>, Json(input): Json<TitleInput>) -> Json<Envelope> {
    if let Err(rejection) = validate_title(&input.title) {
        return rejection;
    }
    let mut store = db.write().await;
    let todolist = Todolist {
        id: Uuid::new_v4().to_string(),
        title: input.title,
        added_date: now(),
        order: next_order(store.todolists.iter().map(|tl| &tl.order)),
    };
    info!(id = %todolist.id, "todolist created");
    store.tasks.insert(todolist.id.clone(), Vec::new());
    store.todolists.insert(0, todolist.clone());
    Envelope::success(serde_json::json!({ "item": todolist }))
}

async fn update_todolist(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<TitleInput>,
) -> Json<Envelope> {
    if let Err(rejection) = validate_title(&input.title) {
        return rejection;
    }
    let mut store = db.write().await;
    match store.todolists.iter_mut().find(|tl| tl.id == id) {
        Some(todolist) => {
            todolist.title = input.title;
            Envelope::success(serde_json::json!({}))
        }
        None => Envelope::failure("Todolist not found"),
    }
}

async fn delete_todolist(State(db): State<Db>, Path(id): Path<String>) -> Json<Envelope> {
    let mut store = db.write().await;
    let Some(index) = store.todolists.iter().position(|tl| tl.id == id) else {
        return Envelope::failure("Todolist not found");
    };
    store.todolists.remove(index);
    store.tasks.remove(&id);
    info!(%id, "todolist deleted");
    Envelope::success(serde_json::json!({}))
}

async fn list_tasks(State(db): State<Db>, Path(id): Path<String>) -> Json<TasksPage> {
    let store = db.read().await;
    match store.tasks.get(&id) {
        Some(items) => Json(TasksPage {
            total_count: items.len(),
            items: items.clone(),
            error: None,
        }),
        None => Json(TasksPage {
            items: Vec::new(),
            total_count: 0,
            error: Some("Todolist not found".to_string()),
        }),
    }
}

async fn create_task(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<TitleInput>,
) -> Json<Envelope> {
    if let Err(rejection) = validate_title(&input.title) {
        return rejection;
    }
    let mut store = db.write().await;
    let Some(tasks) = store.tasks.get_mut(&id) else {
        return Envelope::failure("Todolist not found");
    };
    let task = Task {
        id: Uuid::new_v4().to_string(),
        todo_list_id: id,
        title: input.title,
        description: None,
        status: 0,
        priority: 1,
        start_date: None,
        deadline: None,
        order: next_order(tasks.iter().map(|t| &t.order)),
        added_date: now(),
    };
    tasks.insert(0, task.clone());
    Envelope::success(serde_json::json!({ "item": task }))
}

async fn update_task(
    State(db): State<Db>,
    Path((id, task_id)): Path<(String, String)>,
    Json(input): Json<UpdateTaskInput>,
) -> Json<Envelope> {
    if let Err(rejection) = validate_title(&input.title) {
        return rejection;
    }
    let mut store = db.write().await;
    let task = store
        .tasks
        .get_mut(&id)
        .and_then(|tasks| tasks.iter_mut().find(|t| t.id == task_id));
    let Some(task) = task else {
        return Envelope::failure("Task not found");
    };
    task.title = input.title;
    task.description = input.description;
    task.status = input.status;
    task.priority = input.priority;
    task.start_date = input.start_date;
    task.deadline = input.deadline;
    Envelope::success(task.clone())
}

async fn delete_task(
    State(db): State<Db>,
    Path((id, task_id)): Path<(String, String)>,
) -> Json<Envelope> {
    let mut store = db.write().await;
    let Some(tasks) = store.tasks.get_mut(&id) else {
        return Envelope::failure("Todolist not found");
    };
    match tasks.iter().position(|t| t.id == task_id) {
        Some(index) => {
            tasks.remove(index);
            Envelope::success(serde_json::json!({}))
        }
        None => Envelope::failure("Task not found"),
    }
}

async fn me(State(db): State<Db>) -> Json<Envelope> {
    if db.read().await.logged_in {
        Envelope::success(serde_json::json!({ "id": 1, "email": DEMO_EMAIL, "login": "free" }))
    } else {
        Envelope::failure("You are not authorized")
    }
}

async fn login(State(db): State<Db>, Json(input): Json<LoginInput>) -> Json<Envelope> {
    if input.email != DEMO_EMAIL || input.password != DEMO_PASSWORD {
        return Envelope::failure("Incorrect Email or Password");
    }
    info!(remember_me = input.remember_me, captcha = input.captcha.is_some(), "login");
    db.write().await.logged_in = true;
    Envelope::success(serde_json::json!({ "userId": 1 }))
}

async fn logout(State(db): State<Db>) -> Json<Envelope> {
    db.write().await.logged_in = false;
    Envelope::success(serde_json::json!({}))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_serializes_camel_case() {
        let task = Task {
            id: "t".into(),
            todo_list_id: "tl".into(),
            title: "Test".into(),
            description: None,
            status: 2,
            priority: 1,
            start_date: None,
            deadline: None,
            order: 0,
            added_date: now(),
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["todoListId"], "tl");
        assert_eq!(json["status"], 2);
        assert!(json["deadline"].is_null());
    }

    #[test]
    fn failure_envelope_carries_message() {
        let Json(env) = Envelope::failure("nope");
        assert_eq!(env.result_code, 1);
        assert_eq!(env.messages, vec!["nope".to_string()]);
        assert_eq!(env.data, serde_json::json!({}));
    }

    #[test]
    fn title_validation() {
        assert!(validate_title("ok").is_ok());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"x".repeat(MAX_TITLE_LEN)).is_ok());
        assert!(validate_title(&"x".repeat(MAX_TITLE_LEN + 1)).is_err());
    }

    #[test]
    fn next_order_goes_below_minimum() {
        assert_eq!(next_order([].iter()), 0);
        assert_eq!(next_order([3, -2, 5].iter()), -3);
    }

    #[test]
    fn login_input_defaults_remember_me() {
        let input: LoginInput =
            serde_json::from_str(r#"{"email":"a","password":"b"}"#).unwrap();
        assert!(!input.remember_me);
        assert!(input.captcha.is_none());
    }
}

//! In-memory implementation of the todo REST contract.
//!
//! Serves `/api/v1/items`, `/api/v1/items/{id}` and `/api/v1/user` behind a
//! `todo-session` cookie. Ids are 24 lowercase hex characters; an id of any
//! other shape is answered with 500, the way the real server's database
//! rejects it.

use std::{collections::HashMap, future::Future, sync::Arc};

use axum::{
    extract::{FromRequestParts, Path, State},
    http::{header, request::Parts, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

/// Session token accepted for the primary test user.
pub const TEST_SESSION: &str = "s%3Atest-session.mock";
/// Session token accepted for a second user, for ownership checks.
pub const OTHER_SESSION: &str = "s%3Aother-session.mock";

const SESSION_COOKIE: &str = "todo-session";
const ID_LEN: usize = 24;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Task {
    #[serde(rename = "_id")]
    pub id: String,
    pub text: String,
    pub date: String,
    pub done: bool,
    pub user_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    pub id: String,
    pub user_name: String,
    pub email: String,
}

/// Body of `POST /api/v1/items`. Missing fields deserialize as empty and are
/// rejected by the handler.
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateTask {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub date: String,
}

/// Body of `PUT /api/v1/items/{id}`. Only the fields present are applied.
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateTask {
    pub text: Option<String>,
    pub date: Option<String>,
    pub done: Option<bool>,
}

#[derive(Default)]
pub struct Store {
    tasks: HashMap<String, Task>,
    sessions: HashMap<String, User>,
}

pub type Db = Arc<RwLock<Store>>;

/// A router with two seeded users, reachable through `TEST_SESSION` and
/// `OTHER_SESSION`.
pub fn app() -> Router {
    let mut store = Store::default();
    store.sessions.insert(TEST_SESSION.to_string(), user("5e8f0c2a9b1d4e3f2a1b0c9d", "tester"));
    store.sessions.insert(OTHER_SESSION.to_string(), user("5e8f0c2a9b1d4e3f2a1b0c9e", "other"));
    router(Arc::new(RwLock::new(store)))
}

pub fn router(db: Db) -> Router {
    Router::new()
        .route("/api/v1/items", get(list_tasks).post(create_task))
        .route("/api/v1/items/{id}", get(get_task).put(update_task).delete(delete_task))
        .route("/api/v1/user", get(current_user))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Serve until `shutdown` resolves, then drain open connections and return.
pub async fn run_until<F>(listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app()).with_graceful_shutdown(shutdown).await
}

fn user(id: &str, name: &str) -> User {
    User {
        id: id.to_string(),
        user_name: name.to_string(),
        email: format!("{name}@example.com"),
    }
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()[..ID_LEN].to_string()
}

fn is_well_formed_id(id: &str) -> bool {
    id.len() == ID_LEN && id.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Extract the `todo-session` value from a `Cookie` header.
fn session_token(cookie_header: &str) -> Option<&str> {
    cookie_header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
}

/// The user owning the request's session. Rejects with 401 otherwise.
pub struct CurrentUser(pub User);

impl FromRequestParts<Db> for CurrentUser {
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, db: &Db) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(session_token)
            .filter(|token| !token.is_empty())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let store = db.read().await;
        store
            .sessions
            .get(token)
            .cloned()
            .map(CurrentUser)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}

/// Validate `id` and return the caller's task with that id.
fn owned_task<'a>(store: &'a Store, user: &User, id: &str) -> Result<&'a Task, StatusCode> {
    if !is_well_formed_id(id) {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    store
        .tasks
        .get(id)
        .filter(|task| task.user_id == user.id)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_tasks(State(db): State<Db>, CurrentUser(user): CurrentUser) -> Json<Vec<Task>> {
    let store = db.read().await;
    Json(
        store
            .tasks
            .values()
            .filter(|task| task.user_id == user.id)
            .cloned()
            .collect(),
    )
}

async fn create_task(
    State(db): State<Db>,
    CurrentUser(user): CurrentUser,
    Json(input): Json<CreateTask>,
) -> Result<(StatusCode, Json<Task>), StatusCode> {
    if input.text.is_empty() || input.date.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let task = Task {
        id: new_id(),
        text: input.text,
        date: input.date,
        done: false,
        user_id: user.id,
    };
    db.write().await.tasks.insert(task.id.clone(), task.clone());
    Ok((StatusCode::CREATED, Json(task)))
}

async fn get_task(
    State(db): State<Db>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Task>, StatusCode> {
    let store = db.read().await;
    owned_task(&store, &user, &id).cloned().map(Json)
}

async fn update_task(
    State(db): State<Db>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Json(input): Json<UpdateTask>,
) -> Result<Json<Task>, StatusCode> {
    let mut store = db.write().await;
    owned_task(&store, &user, &id)?;
    let task = store.tasks.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(text) = input.text {
        task.text = text;
    }
    if let Some(date) = input.date {
        task.date = date;
    }
    if let Some(done) = input.done {
        task.done = done;
    }
    Ok(Json(task.clone()))
}

async fn delete_task(
    State(db): State<Db>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Task>, StatusCode> {
    let mut store = db.write().await;
    owned_task(&store, &user, &id)?;
    store.tasks.remove(&id).map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn current_user(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}

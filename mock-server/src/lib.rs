//! In-memory stand-in for the jobflow REST API.
//!
//! Documents are stored as raw JSON so the server stays independent of the
//! client's models; integration tests catch schema drift between the two.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

const DEMO_FIXTURES: &str = include_str!("../fixtures/demo.json");

/// Everything the server knows about, grouped by resource.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Store {
    #[serde(default)]
    pub flows: Vec<Value>,
    #[serde(default)]
    pub queued_jobs: Vec<Value>,
    #[serde(default)]
    pub completed_jobs: Vec<Value>,
    #[serde(default)]
    pub scripts: Vec<Value>,
    #[serde(default)]
    pub tokens: Vec<Value>,
    #[serde(default)]
    pub hub_flows: HashMap<String, Value>,
}

impl Store {
    /// The bundled demo workspace (`fixtures/demo.json`).
    pub fn demo() -> Result<Self, serde_json::Error> {
        serde_json::from_str(DEMO_FIXTURES)
    }
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
struct AppState {
    db: Db,
    token: Option<String>,
}

/// Build the router. When `token` is set, every request must carry
/// `Authorization: Bearer <token>` or it is rejected with 401.
pub fn app(store: Store, token: Option<String>) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(store)),
        token,
    };
    Router::new()
        .route("/w/{workspace}/flows/get/{*path}", get(get_flow))
        .route("/w/{workspace}/flows/list", get(list_flows))
        .route("/w/{workspace}/flows/update/{*path}", post(update_flow))
        .route("/hub/flows/get/{id}", get(get_hub_flow))
        .route("/w/{workspace}/jobs/list", get(list_jobs))
        .route("/w/{workspace}/jobs/queue/list", get(list_queue))
        .route("/w/{workspace}/jobs/completed/list", get(list_completed))
        .route("/w/{workspace}/jobs/completed/get/{id}", get(get_completed))
        .route("/w/{workspace}/jobs/completed/delete/{id}", post(delete_completed))
        .route("/w/{workspace}/jobs/run/preview_flow", post(run_flow_preview))
        .route("/w/{workspace}/scripts/get/p/{*path}", get(get_script))
        .route("/users/tokens/list", get(list_tokens))
        .route("/users/tokens/create", post(create_token))
        .layer(middleware::from_fn_with_state(state.clone(), require_token))
        .with_state(state)
}

pub async fn run(listener: TcpListener, store: Store, token: Option<String>) -> Result<(), std::io::Error> {
    axum::serve(listener, app(store, token)).await
}

async fn require_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if let Some(token) = &state.token {
        let expected = format!("Bearer {token}");
        let provided = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        if provided != Some(expected.as_str()) {
            tracing::debug!(uri = %request.uri(), "rejecting request without valid token");
            return Err(StatusCode::UNAUTHORIZED);
        }
    }
    Ok(next.run(request).await)
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn str_field<'a>(doc: &'a Value, key: &str) -> Option<&'a str> {
    doc.get(key).and_then(Value::as_str)
}

fn in_workspace(doc: &Value, workspace: &str) -> bool {
    str_field(doc, "workspace_id") == Some(workspace)
}

fn created_at(doc: &Value) -> Option<DateTime<Utc>> {
    str_field(doc, "created_at").and_then(|raw| raw.parse().ok())
}

// --- flows ---

#[derive(Debug, Default, Deserialize)]
struct FlowQuery {
    page: Option<usize>,
    per_page: Option<usize>,
    order_desc: Option<bool>,
    created_by: Option<String>,
    path_start: Option<String>,
    path_exact: Option<String>,
    show_archived: Option<bool>,
}

async fn get_flow(
    State(state): State<AppState>,
    Path((workspace, path)): Path<(String, String)>,
) -> Result<Json<Value>, StatusCode> {
    let store = state.db.read().await;
    store
        .flows
        .iter()
        .find(|flow| in_workspace(flow, &workspace) && str_field(flow, "path") == Some(path.as_str()))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_flows(
    State(state): State<AppState>,
    Path(workspace): Path<String>,
    Query(q): Query<FlowQuery>,
) -> Json<Vec<Value>> {
    let store = state.db.read().await;
    let mut flows: Vec<Value> = store
        .flows
        .iter()
        .filter(|flow| in_workspace(flow, &workspace))
        .filter(|flow| q.show_archived.unwrap_or(false) || flow.get("archived") != Some(&json!(true)))
        .filter(|flow| q.created_by.as_deref().is_none_or(|by| str_field(flow, "edited_by") == Some(by)))
        .filter(|flow| q.path_exact.as_deref().is_none_or(|p| str_field(flow, "path") == Some(p)))
        .filter(|flow| {
            q.path_start
                .as_deref()
                .is_none_or(|p| str_field(flow, "path").is_some_and(|path| path.starts_with(p)))
        })
        .cloned()
        .collect();
    flows.sort_by(|a, b| str_field(a, "path").cmp(&str_field(b, "path")));
    if q.order_desc.unwrap_or(false) {
        flows.reverse();
    }
    let per_page = q.per_page.unwrap_or(100).max(1);
    let skip = q.page.unwrap_or(1).saturating_sub(1) * per_page;
    Json(flows.into_iter().skip(skip).take(per_page).collect())
}

async fn update_flow(
    State(state): State<AppState>,
    Path((workspace, path)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<String, StatusCode> {
    let Some(update) = body.as_object() else {
        return Err(StatusCode::BAD_REQUEST);
    };
    if !update.contains_key("summary") || !update.contains_key("value") {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut store = state.db.write().await;
    let flow = store
        .flows
        .iter_mut()
        .find(|flow| in_workspace(flow, &workspace) && str_field(flow, "path") == Some(path.as_str()))
        .ok_or(StatusCode::NOT_FOUND)?;
    let Some(stored) = flow.as_object_mut() else {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    };
    for key in ["summary", "description", "value", "schema"] {
        if let Some(value) = update.get(key) {
            stored.insert(key.to_string(), value.clone());
        }
    }
    stored.insert("edited_at".to_string(), json!(now()));
    Ok(format!("updated flow {path}"))
}

async fn get_hub_flow(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, StatusCode> {
    let store = state.db.read().await;
    store
        .hub_flows
        .get(&id.to_string())
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

// --- jobs ---

#[derive(Debug, Default, Deserialize)]
struct JobQuery {
    order_desc: Option<bool>,
    created_by: Option<String>,
    parent_job: Option<Uuid>,
    script_path_exact: Option<String>,
    script_path_start: Option<String>,
    script_hash: Option<String>,
    created_before: Option<DateTime<Utc>>,
    created_after: Option<DateTime<Utc>>,
    job_kinds: Option<String>,
    success: Option<bool>,
    is_skipped: Option<bool>,
    is_flow_step: Option<bool>,
    running: Option<bool>,
}

impl JobQuery {
    fn matches(&self, job: &Value) -> bool {
        let eq = |key: &str, wanted: &Option<String>| {
            wanted.as_deref().is_none_or(|w| str_field(job, key) == Some(w))
        };
        let flag = |key: &str, wanted: Option<bool>| {
            wanted.is_none_or(|w| job.get(key).and_then(Value::as_bool) == Some(w))
        };
        // absent on queued jobs, where it means false
        let lenient = |key: &str, wanted: Option<bool>| {
            wanted.is_none_or(|w| job.get(key).and_then(Value::as_bool).unwrap_or(false) == w)
        };
        eq("created_by", &self.created_by)
            && self
                .parent_job
                .is_none_or(|p| str_field(job, "parent_job") == Some(p.to_string().as_str()))
            && eq("script_path", &self.script_path_exact)
            && self.script_path_start.as_deref().is_none_or(|start| {
                str_field(job, "script_path").is_some_and(|path| path.starts_with(start))
            })
            && eq("script_hash", &self.script_hash)
            && self
                .created_before
                .is_none_or(|t| created_at(job).is_some_and(|at| at < t))
            && self
                .created_after
                .is_none_or(|t| created_at(job).is_some_and(|at| at > t))
            && self.job_kinds.as_deref().is_none_or(|kinds| {
                str_field(job, "job_kind").is_some_and(|kind| kinds.split(',').any(|k| k.trim() == kind))
            })
            && flag("success", self.success)
            && lenient("is_skipped", self.is_skipped)
            && lenient("is_flow_step", self.is_flow_step)
            && flag("running", self.running)
    }

    fn select<'a>(&self, workspace: &str, jobs: impl Iterator<Item = &'a Value>) -> Vec<Value> {
        let mut selected: Vec<Value> = jobs
            .filter(|job| in_workspace(job, workspace) && self.matches(job))
            .cloned()
            .collect();
        selected.sort_by_key(created_at);
        if self.order_desc.unwrap_or(true) {
            selected.reverse();
        }
        selected
    }
}

fn tagged(mut job: Value, kind: &str) -> Value {
    if let Some(fields) = job.as_object_mut() {
        fields.insert("type".to_string(), json!(kind));
    }
    job
}

async fn list_jobs(
    State(state): State<AppState>,
    Path(workspace): Path<String>,
    Query(q): Query<JobQuery>,
) -> Json<Vec<Value>> {
    let store = state.db.read().await;
    let queued = store.queued_jobs.iter().map(|job| tagged(job.clone(), "QueuedJob"));
    let completed = store
        .completed_jobs
        .iter()
        .map(|job| tagged(job.clone(), "CompletedJob"));
    let all: Vec<Value> = queued.chain(completed).collect();
    Json(q.select(&workspace, all.iter()))
}

async fn list_queue(
    State(state): State<AppState>,
    Path(workspace): Path<String>,
    Query(q): Query<JobQuery>,
) -> Json<Vec<Value>> {
    let store = state.db.read().await;
    Json(q.select(&workspace, store.queued_jobs.iter()))
}

async fn list_completed(
    State(state): State<AppState>,
    Path(workspace): Path<String>,
    Query(q): Query<JobQuery>,
) -> Json<Vec<Value>> {
    let store = state.db.read().await;
    Json(q.select(&workspace, store.completed_jobs.iter()))
}

async fn get_completed(
    State(state): State<AppState>,
    Path((workspace, id)): Path<(String, Uuid)>,
) -> Result<Json<Value>, StatusCode> {
    let store = state.db.read().await;
    let id = id.to_string();
    store
        .completed_jobs
        .iter()
        .find(|job| in_workspace(job, &workspace) && str_field(job, "id") == Some(id.as_str()))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn delete_completed(
    State(state): State<AppState>,
    Path((workspace, id)): Path<(String, Uuid)>,
) -> Result<Json<Value>, StatusCode> {
    let mut store = state.db.write().await;
    let id = id.to_string();
    let job = store
        .completed_jobs
        .iter_mut()
        .find(|job| in_workspace(job, &workspace) && str_field(job, "id") == Some(id.as_str()))
        .ok_or(StatusCode::NOT_FOUND)?;
    if let Some(fields) = job.as_object_mut() {
        fields.insert("args".to_string(), Value::Null);
        fields.insert("result".to_string(), Value::Null);
        fields.insert("logs".to_string(), json!("##DELETED##"));
        fields.insert("deleted".to_string(), json!(true));
    }
    Ok(Json(job.clone()))
}

async fn run_flow_preview(
    State(state): State<AppState>,
    Path(workspace): Path<String>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, String), StatusCode> {
    let Some(value) = body.get("value").filter(|v| v.is_object()) else {
        return Err(StatusCode::BAD_REQUEST);
    };
    let id = Uuid::new_v4();
    let job = json!({
        "workspace_id": workspace,
        "id": id,
        "created_by": "mock",
        "created_at": now(),
        "running": false,
        "script_path": body.get("path").cloned().unwrap_or(Value::Null),
        "args": body.get("args").cloned().unwrap_or_else(|| json!({})),
        "canceled": false,
        "job_kind": "flowpreview",
        "permissioned_as": "u/mock",
        "raw_flow": value,
        "is_flow_step": false
    });
    state.db.write().await.queued_jobs.push(job);
    Ok((StatusCode::CREATED, id.to_string()))
}

// --- scripts ---

async fn get_script(
    State(state): State<AppState>,
    Path((workspace, path)): Path<(String, String)>,
) -> Result<Json<Value>, StatusCode> {
    let store = state.db.read().await;
    store
        .scripts
        .iter()
        .find(|script| in_workspace(script, &workspace) && str_field(script, "path") == Some(path.as_str()))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

// --- tokens ---

async fn list_tokens(State(state): State<AppState>) -> Json<Vec<Value>> {
    Json(state.db.read().await.tokens.clone())
}

async fn create_token(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    if !body.is_object() {
        return StatusCode::BAD_REQUEST.into_response();
    }
    let token = format!("tok_{}", Uuid::new_v4().simple());
    let mut listed = json!({
        "token_prefix": token[..10].to_string(),
        "created_at": now(),
        "last_used_at": now(),
    });
    if let Some(fields) = listed.as_object_mut() {
        for key in ["label", "expiration"] {
            if let Some(value) = body.get(key) {
                fields.insert(key.to_string(), value.clone());
            }
        }
    }
    state.db.write().await.tokens.push(listed);
    (StatusCode::CREATED, token).into_response()
}

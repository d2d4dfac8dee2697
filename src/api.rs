// REST API over the task store
//
// Routes live under /api; failures carry {"error": {"message", "code"}}.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, ValidationError, VALIDATION_ERROR};
use crate::filter::TaskQuery;
use crate::models::{Task, TaskStats};
use crate::store::TaskStore;
use crate::validate::{CreateTask, UpdateTask};

/// The store behind the one lock that serializes every operation
#[derive(Debug, Default)]
pub struct AppState {
    store: Mutex<TaskStore>,
}

impl AppState {
    pub fn new(store: TaskStore) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    /// Run a closure with exclusive access to the store
    pub fn with_store<R>(&self, f: impl FnOnce(&mut TaskStore) -> R) -> R {
        f(&mut self.store.lock())
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error body returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

/// An error already mapped to an HTTP status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: ErrorBody,
}

impl ApiError {
    fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            error: ErrorBody {
                message: message.into(),
                code: code.to_string(),
            },
        }
    }

    /// Generic server fault; the detail is logged, not returned
    pub fn internal(detail: &str) -> Self {
        tracing::error!(detail, "internal error");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", "Internal server error")
    }

    fn route_not_found(path: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", format!("Route not found: {path}"))
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let status = match err {
            StoreError::Validation(_) => StatusCode::BAD_REQUEST,
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        };
        Self::new(status, err.code(), err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        StoreError::from(err).into()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            VALIDATION_ERROR,
            ValidationError::InvalidBody(rejection.body_text()).to_string(),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorEnvelope { error: self.error })).into_response()
    }
}

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Raw list filters as they arrive on the query string
#[derive(Debug, Default)]
pub struct ListParams {
    pub completed: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub search: Option<String>,
}

// Repeated keys are allowed; the last occurrence wins. Unknown keys are ignored.
impl FromIterator<(String, String)> for ListParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "completed" => params.completed = Some(value),
                "category" => params.category = Some(value),
                "priority" => params.priority = Some(value),
                "search" => params.search = Some(value),
                _ => {}
            }
        }
        params
    }
}

impl ListParams {
    /// Convert to a typed query.
    ///
    /// Returns `None` when a category or priority names no known value, since
    /// such a filter can match no task. `completed` is true only for the
    /// literal string `true`.
    pub fn to_query(&self) -> Option<TaskQuery> {
        let category = match self.category.as_deref() {
            Some(raw) => Some(raw.parse().ok()?),
            None => None,
        };
        let priority = match self.priority.as_deref() {
            Some(raw) => Some(raw.parse().ok()?),
            None => None,
        };
        Some(TaskQuery {
            completed: self.completed.as_deref().map(|v| v == "true"),
            category,
            priority,
            search: self.search.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
}

async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

// Never fails: a query string that cannot be decoded is treated as no filters.
async fn list_tasks(
    State(state): State<Arc<AppState>>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Json<Vec<Task>> {
    let params: ListParams = match pairs {
        Ok(Query(pairs)) => pairs.into_iter().collect(),
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "list: ignoring undecodable query string");
            ListParams::default()
        }
    };
    let tasks = match params.to_query() {
        Some(query) => state.with_store(|store| store.list(&query)),
        None => Vec::new(),
    };
    Json(tasks)
}

async fn get_task(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Result<Json<Task>, ApiError> {
    let task = state.with_store(|store| store.get(&id))?;
    Ok(Json(task))
}

async fn create_task(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateTask>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let Json(input) = body?;
    let task = state.with_store(|store| store.create(input))?;
    tracing::info!(id = %task.id, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<UpdateTask>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let Json(patch) = body?;
    let task = state.with_store(|store| store.update(&id, patch))?;
    Ok(Json(task))
}

async fn delete_task(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    state.with_store(|store| store.delete(&id))?;
    tracing::info!(id = %id, "task deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn task_stats(State(state): State<Arc<AppState>>) -> Json<TaskStats> {
    Json(state.with_store(|store| store.stats()))
}

async fn not_found(request: Request) -> ApiError {
    ApiError::route_not_found(request.uri().path())
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let response = next.run(request).await;
    tracing::info!(%method, %path, status = response.status().as_u16(), "request");
    response
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

/// Build the application router
pub fn router(state: Arc<AppState>) -> axum::Router {
    axum::Router::new()
        .route("/api/health", get(health))
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/stats", get(task_stats))
        .route(
            "/api/tasks/{id}",
            get(get_task).put(update_task).patch(update_task).delete(delete_task),
        )
        .fallback(not_found)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Bind and serve the API, returning the bound address and the server task
///
/// Binding to port 0 picks a free port.
pub async fn start_server(
    addr: &str,
    state: Arc<AppState>,
) -> Result<(std::net::SocketAddr, tokio::task::JoinHandle<()>), std::io::Error> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "api server error");
        }
    });

    Ok((bound_addr, handle))
}

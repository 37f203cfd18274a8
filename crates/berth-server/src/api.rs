//! API routes and handlers.
//!
//! The surface mirrors what the UI consumes:
//!
//! - `GET  /api/data` — all containers plus the registry state
//! - `POST /api/container/{start|stop}/{name}` — direct container action
//! - `POST /api/alias/add` — register an alias
//! - `POST /api/alias/{start|stop|delete}/{alias}` — alias action
//! - `POST /api/project/add` — add a container to a project
//! - `POST /api/project/{start|stop|delete}/{project}` — project action
//!
//! Group actions respond with per-member detail; the UI only looks at
//! the overall `success` flag.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use berth_registry::{Registry, RegistryState};
use berth_runtime::{Action, ContainerRuntime, ContainerView, Engine, MemberOutcome};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::ui;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Persisted alias/project registry.
    pub registry: Arc<Registry>,
    /// Runtime adapter, used directly by the read-side.
    pub runtime: Arc<dyn ContainerRuntime>,
    /// Group operations engine.
    pub engine: Arc<Engine>,
}

impl AppState {
    /// Builds the state, wiring an engine over the given registry and
    /// runtime.
    #[must_use]
    pub fn new(registry: Arc<Registry>, runtime: Arc<dyn ContainerRuntime>) -> Self {
        let engine = Arc::new(Engine::new(Arc::clone(&registry), Arc::clone(&runtime)));
        Self {
            registry,
            runtime,
            engine,
        }
    }
}

/// Payload of `GET /api/data`.
#[derive(Debug, Serialize)]
struct DataResponse {
    containers: Vec<ContainerView>,
    data: RegistryState,
}

/// Minimal acknowledgement for non-group operations.
#[derive(Debug, Serialize)]
struct AckResponse {
    success: bool,
}

/// Group-action response with per-member detail.
#[derive(Debug, Serialize)]
struct GroupResponse {
    success: bool,
    members: Vec<MemberOutcome>,
}

#[derive(Debug, Deserialize)]
struct AliasAddRequest {
    alias: String,
    container: String,
}

#[derive(Debug, Deserialize)]
struct ProjectAddRequest {
    project: String,
    container: String,
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/data", get(data))
        .route("/api/container/{action}/{name}", post(container_action))
        .route("/api/alias/add", post(alias_add))
        .route("/api/alias/{action}/{alias}", post(alias_action))
        .route("/api/project/add", post(project_add))
        .route("/api/project/{action}/{project}", post(project_action))
        .with_state(state)
}

/// Binds the listener and serves until the process exits.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(
    addr: &str,
    state: AppState,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "web UI listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(ui::INDEX_HTML)
}

async fn data(State(state): State<AppState>) -> Result<Json<DataResponse>, ApiError> {
    let containers = state.runtime.list_all().await?;
    let data = state.registry.snapshot()?;
    Ok(Json(DataResponse { containers, data }))
}

async fn container_action(
    State(state): State<AppState>,
    Path((action, name)): Path<(String, String)>,
) -> Result<Json<AckResponse>, ApiError> {
    let action = parse_action(&action)?;
    state.engine.run_container(&name, action).await?;
    Ok(Json(AckResponse { success: true }))
}

async fn alias_add(
    State(state): State<AppState>,
    Json(req): Json<AliasAddRequest>,
) -> Result<Json<AckResponse>, ApiError> {
    let alias = non_empty("alias", &req.alias)?;
    let container = non_empty("container", &req.container)?;
    state.registry.add_alias(alias, container)?;
    Ok(Json(AckResponse { success: true }))
}

async fn alias_action(
    State(state): State<AppState>,
    Path((action, alias)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    if action == "delete" {
        let _ = state.registry.remove_alias(&alias)?;
        return Ok(Json(AckResponse { success: true }).into_response());
    }
    let report = state.engine.run_alias(&alias, parse_action(&action)?).await?;
    Ok(Json(GroupResponse {
        success: report.all_succeeded(),
        members: report.members,
    })
    .into_response())
}

async fn project_add(
    State(state): State<AppState>,
    Json(req): Json<ProjectAddRequest>,
) -> Result<Json<AckResponse>, ApiError> {
    let project = non_empty("project", &req.project)?;
    let container = non_empty("container", &req.container)?;
    state.registry.add_to_project(project, container)?;
    Ok(Json(AckResponse { success: true }))
}

async fn project_action(
    State(state): State<AppState>,
    Path((action, project)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    if action == "delete" {
        let _ = state.registry.remove_project(&project)?;
        return Ok(Json(AckResponse { success: true }).into_response());
    }
    let report = state
        .engine
        .run_project(&project, parse_action(&action)?)
        .await?;
    Ok(Json(GroupResponse {
        success: report.all_succeeded(),
        members: report.members,
    })
    .into_response())
}

fn parse_action(segment: &str) -> Result<Action, ApiError> {
    match segment {
        "start" => Ok(Action::Start),
        "stop" => Ok(Action::Stop),
        other => Err(ApiError::InvalidAction(other.to_string())),
    }
}

fn non_empty<'a>(field: &str, value: &'a str) -> Result<&'a str, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidParameter(format!("{field} must not be empty")));
    }
    Ok(trimmed)
}

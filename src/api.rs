/// HTTP API поверх движка портфеля

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use crate::assistant::{AssistantTool, TextGenerator, ToolBridge, ToolCall, ToolResponse};
use crate::error::EngineError;
use crate::models::comparison::{MAX_SELECTION, MIN_SELECTION};
use crate::models::{ComparisonRanker, MetricsAggregator, ProjectFilter};
use crate::preprocessing::FinanceExtractor;
use crate::store::ProjectStore;
use crate::types::{
    AnalysisResult, DashboardOutput, NewProject, Project, ProjectDetail, ProjectQuery,
    ProjectUpdate,
};

#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn ProjectStore>,
    ranker: Arc<ComparisonRanker>,
    tools: Arc<ToolBridge>,
}

impl AppState {
    pub fn new(store: Arc<dyn ProjectStore>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            ranker: Arc::new(ComparisonRanker::new(generator)),
            tools: Arc::new(ToolBridge::new(store.clone())),
            store,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareRequest {
    pub ids: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for EngineError {
    fn into_response(self) -> Response {
        let status = match &self {
            EngineError::InvalidSelection { .. }
            | EngineError::Validation(_)
            | EngineError::UnknownTool(_)
            | EngineError::InvalidToolArgs { .. } => StatusCode::BAD_REQUEST,
            EngineError::ProjectNotFound(_) => StatusCode::NOT_FOUND,
            EngineError::AnalysisFailed(_) => StatusCode::BAD_GATEWAY,
            EngineError::Config(_) | EngineError::Seed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::warn!("Request failed: {}", self);
        }

        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    // CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/projects", get(list_projects).post(create_project))
        .route("/api/projects/:id", get(get_project).patch(update_project))
        .route("/api/projects/:id/favorite", post(toggle_favorite))
        .route("/api/dashboard", get(dashboard))
        .route("/api/compare", post(compare))
        .route("/api/assistant/tools", post(call_tool))
        .layer(cors)
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Portfolio Engine API",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ProjectQuery>,
) -> Json<Vec<Project>> {
    let projects = state.store.list_all().await;
    let filtered = ProjectFilter::filter_and_sort(&projects, &query);

    tracing::info!("List request: {} of {} projects", filtered.len(), projects.len());
    Json(filtered)
}

async fn create_project(
    State(state): State<AppState>,
    Json(input): Json<NewProject>,
) -> Result<(StatusCode, Json<Project>), EngineError> {
    let project = state.store.create(input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProjectDetail>, EngineError> {
    let project = state
        .store
        .get_by_id(&id)
        .await
        .ok_or(EngineError::ProjectNotFound(id))?;

    Ok(Json(ProjectDetail {
        finance: FinanceExtractor::summarize(&project),
        project,
    }))
}

async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<ProjectUpdate>,
) -> Result<Json<Project>, EngineError> {
    let project = state.store.update(&id, update).await?;
    Ok(Json(project))
}

async fn toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Project>, EngineError> {
    let project = state.store.toggle_favorite(&id).await?;
    Ok(Json(project))
}

async fn dashboard(State(state): State<AppState>) -> Json<DashboardOutput> {
    let projects = state.store.list_all().await;
    tracing::info!("Dashboard request: {} projects", projects.len());
    Json(MetricsAggregator::dashboard(&projects))
}

async fn compare(
    State(state): State<AppState>,
    Json(request): Json<CompareRequest>,
) -> Result<Json<AnalysisResult>, EngineError> {
    tracing::info!("Compare request: {:?}", request.ids);

    // Выборка - множество: повторы отбрасываются с сохранением порядка
    let mut ids: Vec<&String> = Vec::with_capacity(request.ids.len());
    for id in &request.ids {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    if !(MIN_SELECTION..=MAX_SELECTION).contains(&ids.len()) {
        return Err(EngineError::InvalidSelection { count: ids.len() });
    }

    let mut selected = Vec::with_capacity(ids.len());
    for id in ids {
        let project = state
            .store
            .get_by_id(id)
            .await
            .ok_or_else(|| EngineError::ProjectNotFound(id.clone()))?;
        selected.push(project);
    }

    let result = state.ranker.analyze(&selected).await?;
    Ok(Json(result))
}

/// Неизвестное имя инструмента или отсутствующий аргумент `name` отклоняются
/// на границе с 400; проект, не найденный по имени, - это обычный ответ
/// `{ok: false, error}` со статусом 200.
async fn call_tool(
    State(state): State<AppState>,
    Json(call): Json<ToolCall>,
) -> Result<Json<ToolResponse>, EngineError> {
    let tool = AssistantTool::from_call(&call)?;
    Ok(Json(state.tools.execute(tool).await))
}

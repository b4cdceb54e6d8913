//! Axum route handlers for submissions, the status dashboard and the admin workflow.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::applications::repository::NewApplication;
use crate::applications::store::{AdminAction, ApplicationStatus, WorkLogEntry};
use crate::errors::AppError;
use crate::state::AppState;

/// Minimum number of answered questions for a complete application.
pub const MIN_ANSWERS: usize = 3;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub user_id: String,
    pub job_id: Option<String>,
    pub answers: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct ApplyResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApplyResponse {
    fn failed(message: &str) -> Self {
        Self {
            success: false,
            id: None,
            error: Some(message.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStatusRequest {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Serialize)]
pub struct NewStatusResponse {
    pub success: bool,
    pub id: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct AdminActionRequest {
    pub id: String,
    pub action: AdminAction,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkLogRequest {
    pub user_id: String,
    pub job: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct WorkLogResponse {
    pub success: bool,
    pub log: WorkLogEntry,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/apply
///
/// Stores a submitted application with a server-side timestamp.
pub async fn handle_apply(
    State(state): State<AppState>,
    Json(request): Json<ApplyRequest>,
) -> (StatusCode, Json<ApplyResponse>) {
    let Some(repository) = state.applications.as_ref() else {
        warn!("Application submitted but no document store is configured");
        return (
            StatusCode::OK,
            Json(ApplyResponse::failed("Database not initialized on server.")),
        );
    };

    if request.answers.len() < MIN_ANSWERS {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApplyResponse::failed("Incomplete application.")),
        );
    }

    let application = NewApplication {
        user_id: request.user_id,
        job_id: request.job_id.unwrap_or_else(|| "general".to_string()),
        answers: request.answers,
        status: "received".to_string(),
        submitted_at: Utc::now(),
    };

    match repository.insert(application).await {
        Ok(id) => {
            info!("Application {id} stored");
            (
                StatusCode::OK,
                Json(ApplyResponse {
                    success: true,
                    id: Some(id),
                    error: None,
                }),
            )
        }
        Err(e) => {
            error!("Failed to store application: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApplyResponse::failed("Failed to save application.")),
            )
        }
    }
}

/// GET /api/v1/status
pub async fn handle_get_status(
    State(state): State<AppState>,
) -> Result<Json<ApplicationStatus>, AppError> {
    state
        .status_store
        .primary()
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No application found".to_string()))
}

/// POST /api/v1/status
pub async fn handle_create_status(
    State(state): State<AppState>,
    Json(request): Json<NewStatusRequest>,
) -> Json<NewStatusResponse> {
    let app = state
        .status_store
        .create(request.first_name, request.last_name)
        .await;
    info!("Created application {}", app.id);
    Json(NewStatusResponse {
        success: true,
        id: app.id,
        message: "Application successfully saved".to_string(),
    })
}

/// GET /api/v1/admin
pub async fn handle_list_applications(
    State(state): State<AppState>,
) -> Json<Vec<ApplicationStatus>> {
    Json(state.status_store.all().await)
}

/// PATCH /api/v1/admin
pub async fn handle_admin_action(
    State(state): State<AppState>,
    Json(request): Json<AdminActionRequest>,
) -> Result<Json<ApplicationStatus>, AppError> {
    let app = state
        .status_store
        .apply_action(&request.id, &request.action)
        .await
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;
    info!(
        "Admin action {:?} on {}: step {} ({})",
        request.action, app.id, app.step, app.status
    );
    Ok(Json(app))
}

/// POST /api/v1/work-log
pub async fn handle_work_log(
    State(state): State<AppState>,
    Json(request): Json<WorkLogRequest>,
) -> Result<Json<WorkLogResponse>, AppError> {
    let field = |key: &str| {
        request
            .job
            .get(key)
            .and_then(|v| v.as_str())
            .map(String::from)
    };

    let log = state
        .status_store
        .log_work(&request.user_id, field("title"), field("company"))
        .await
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(WorkLogResponse { success: true, log }))
}

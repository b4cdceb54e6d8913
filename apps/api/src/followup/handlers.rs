//! Axum route handler for follow-up generation.

use axum::{extract::State, Json};

use crate::followup::{generate_followup, FollowUpRequest, FollowUpResponse};
use crate::state::AppState;

/// POST /api/v1/generate-followup
///
/// Always answers with a draft: generated when possible, templated otherwise.
pub async fn handle_generate_followup(
    State(state): State<AppState>,
    Json(request): Json<FollowUpRequest>,
) -> Json<FollowUpResponse> {
    Json(generate_followup(state.llm.as_ref(), &request).await)
}

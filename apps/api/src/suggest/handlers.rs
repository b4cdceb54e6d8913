//! Axum route handler for job-title suggestions.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::state::AppState;
use crate::suggest::{suggest_jobs, JobSuggestions};

#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub query: String,
}

/// GET /api/v1/suggest-jobs
pub async fn handle_suggest_jobs(
    State(state): State<AppState>,
    Query(params): Query<SuggestQuery>,
) -> Json<JobSuggestions> {
    Json(suggest_jobs(state.llm.as_ref(), &params.query).await)
}

//! Axum route handler for the job search API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;
use tracing::warn;

use crate::search::aggregator::{aggregate, SearchResults};
use crate::search::normalize::NormalizedJob;
use crate::search::query::SearchQuery;
use crate::state::AppState;

/// Body of `GET /api/v1/search`: either results or an empty list with the
/// reason no search was attempted.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SearchResponse {
    Results(SearchResults),
    Unavailable {
        data: Vec<NormalizedJob>,
        error: String,
    },
}

/// GET /api/v1/search
pub async fn handle_search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<SearchResponse> {
    let Some(serp) = state.serp.as_ref() else {
        warn!("Job search requested but SERPAPI_KEY is not configured");
        return Json(SearchResponse::Unavailable {
            data: Vec::new(),
            error: "SERPAPI_KEY not configured on server".to_string(),
        });
    };

    Json(SearchResponse::Results(aggregate(serp, &query).await))
}

//! Contact discovery: recruiter and hiring-manager profiles found via web search.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::search::provider::{OrganicResult, SearchError, SerpApiClient};
use crate::state::AppState;
use crate::text::truncate_chars;

const MAX_CONTACTS: u32 = 5;
const SNIPPET_LIMIT: usize = 100;
const PROFILE_MARKER: &str = "linkedin.com/in";

#[derive(Debug, Deserialize)]
pub struct FindContactQuery {
    pub company: String,
    #[serde(default)]
    pub job_title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub name: String,
    pub title: String,
    pub linkedin_url: String,
}

#[derive(Debug, Serialize)]
pub struct FindContactResponse {
    pub contacts: Vec<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /api/v1/find-contact
pub async fn handle_find_contact(
    State(state): State<AppState>,
    Query(params): Query<FindContactQuery>,
) -> Json<FindContactResponse> {
    let Some(serp) = state.serp.as_ref() else {
        return Json(FindContactResponse {
            contacts: Vec::new(),
            error: Some("SERPAPI_KEY not configured".to_string()),
        });
    };

    match find_contacts(serp, &params.company, &params.job_title).await {
        Ok(contacts) => Json(FindContactResponse {
            contacts,
            error: None,
        }),
        // A refused search is reported as "no contacts", not as a failure.
        Err(SearchError::Status { status, .. }) => {
            warn!("Contact search returned status {status}");
            Json(FindContactResponse {
                contacts: Vec::new(),
                error: None,
            })
        }
        Err(e) => {
            warn!("Contact search error: {e}");
            Json(FindContactResponse {
                contacts: Vec::new(),
                error: Some(e.to_string()),
            })
        }
    }
}

fn contact_query(company: &str, job_title: &str) -> String {
    format!("site:{PROFILE_MARKER} {company} recruiter OR hiring manager {job_title}")
        .trim_end()
        .to_string()
}

pub async fn find_contacts(
    serp: &SerpApiClient,
    company: &str,
    job_title: &str,
) -> Result<Vec<Contact>, SearchError> {
    let page = serp
        .web_search(&contact_query(company, job_title), MAX_CONTACTS)
        .await?;
    Ok(extract_contacts(&page.organic_results))
}

/// Keeps profile links among the first results; the name is the title up
/// to the first " - " separator.
fn extract_contacts(results: &[OrganicResult]) -> Vec<Contact> {
    results
        .iter()
        .take(MAX_CONTACTS as usize)
        .filter(|r| r.link.contains(PROFILE_MARKER))
        .map(|r| Contact {
            name: r
                .title
                .split_once(" - ")
                .map(|(name, _)| name)
                .unwrap_or(&r.title)
                .to_string(),
            title: truncate_chars(&r.snippet, SNIPPET_LIMIT),
            linkedin_url: r.link.clone(),
        })
        .collect()
}

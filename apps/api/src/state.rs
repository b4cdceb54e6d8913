use std::sync::Arc;

use reqwest::Client;
use sqlx::PgPool;

use crate::applications::repository::{ApplicationRepository, PgApplicationRepository};
use crate::applications::store::StatusStore;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::search::provider::SerpApiClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// `None` when SERPAPI_KEY is unset; search and contact discovery degrade.
    pub serp: Option<SerpApiClient>,
    /// `None` when GROQ_API_KEY is unset; generation endpoints use templates.
    pub llm: Option<LlmClient>,
    /// `None` when no document store is reachable; submissions are refused.
    pub applications: Option<Arc<dyn ApplicationRepository>>,
    pub status_store: StatusStore,
}

impl AppState {
    pub fn new(config: &Config, http: Client, db: Option<PgPool>) -> Self {
        let serp = config
            .serpapi_key
            .clone()
            .map(|key| SerpApiClient::new(http.clone(), config.serpapi_url.clone(), key));
        let llm = config
            .groq_api_key
            .clone()
            .map(|key| LlmClient::new(http.clone(), key, config.groq_api_url.clone()));
        let applications = db.map(|pool| {
            Arc::new(PgApplicationRepository::new(pool)) as Arc<dyn ApplicationRepository>
        });

        Self {
            serp,
            llm,
            applications,
            status_store: StatusStore::seeded(),
        }
    }
}

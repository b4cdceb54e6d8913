pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::applications::handlers as applications;
use crate::state::AppState;
use crate::{chat, contacts, followup, resume, search, suggest};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Job discovery
        .route("/api/v1/search", get(search::handlers::handle_search))
        .route("/api/v1/find-contact", get(contacts::handle_find_contact))
        .route(
            "/api/v1/suggest-jobs",
            get(suggest::handlers::handle_suggest_jobs),
        )
        // Generation
        .route(
            "/api/v1/generate-followup",
            post(followup::handlers::handle_generate_followup),
        )
        .route("/api/v1/ai/chat-assist", post(chat::handle_chat_assist))
        .route("/api/v1/parse-resume", post(resume::handle_parse_resume))
        // Applications
        .route("/api/v1/apply", post(applications::handle_apply))
        .route(
            "/api/v1/status",
            get(applications::handle_get_status).post(applications::handle_create_status),
        )
        .route(
            "/api/v1/admin",
            get(applications::handle_list_applications).patch(applications::handle_admin_action),
        )
        .route("/api/v1/work-log", post(applications::handle_work_log))
        .with_state(state)
}

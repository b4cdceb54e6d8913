//! Chat assist. Canned replies picked by keyword; the first matching rule wins.

use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    pub user_name: String,
    /// What the user is looking at, e.g. "Browsing Job: Software Engineer".
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// POST /api/v1/ai/chat-assist
pub async fn handle_chat_assist(Json(request): Json<ChatRequest>) -> Json<ChatResponse> {
    Json(ChatResponse {
        reply: reply_for(&request),
    })
}

fn reply_for(request: &ChatRequest) -> String {
    let msg = request.message.to_lowercase();
    let ctx = request.context.as_deref().unwrap_or_default();

    // Context matching is case-sensitive; message matching is not.
    if ctx.contains("Software Engineer") && (msg.contains("salary") || msg.contains("pay")) {
        "Software Engineer roles in MN typically range from $90k - $140k depending on experience."
            .to_string()
    } else if msg.contains("resume") {
        format!(
            "Hi {}, strictly format your resume for ATS systems. \
            Use standard headings like 'Experience' and 'Education'.",
            request.user_name
        )
    } else if msg.contains("interview") {
        format!(
            "For {ctx} interviews, be ready to discuss your past projects in depth using the STAR method."
        )
    } else if msg.contains("job") || msg.contains("search") {
        "I recommend checking the 'Job Feed' for the latest tech openings in Minnesota.".to_string()
    } else {
        let topic = if ctx.is_empty() { "career advice" } else { ctx };
        format!("I see you're interested in {topic}. How can the community help?")
    }
}

//! Follow-up message generation: an LLM draft with deterministic template fallbacks.

pub mod handlers;
pub mod prompts;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::followup::prompts::{FOLLOWUP_PROMPT_TEMPLATE, FOLLOWUP_SYSTEM};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{CallOptions, LlmClient};
use crate::text::truncate_chars;

const FOLLOWUP_OPTIONS: CallOptions = CallOptions {
    max_tokens: 1000,
    temperature: 0.7,
    timeout: Duration::from_secs(15),
};

const DESCRIPTION_EXCERPT: usize = 1000;
const RESUME_EXCERPT: usize = 2000;
/// Resume text shorter than this is not worth sending as context.
const MIN_RESUME_CONTEXT: usize = 50;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpRequest {
    pub job_title: String,
    pub company: String,
    pub job_description: String,
    pub resume_text: Option<String>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailDraft {
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpDraft {
    pub email: EmailDraft,
    pub linkedin_message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FollowUpResponse {
    #[serde(flatten)]
    pub draft: FollowUpDraft,
    pub ai_powered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Produces a follow-up draft. Without a client the long template is used;
/// a failed generation falls back to the short template and reports why.
pub async fn generate_followup(
    llm: Option<&LlmClient>,
    request: &FollowUpRequest,
) -> FollowUpResponse {
    let Some(llm) = llm else {
        info!("GROQ_API_KEY not configured; using follow-up template");
        return FollowUpResponse {
            draft: unconfigured_template(request),
            ai_powered: false,
            error: None,
        };
    };

    let prompt = build_prompt(request);
    match llm
        .call_json::<FollowUpDraft>(FOLLOWUP_SYSTEM, &prompt, FOLLOWUP_OPTIONS)
        .await
    {
        Ok(draft) => FollowUpResponse {
            draft,
            ai_powered: true,
            error: None,
        },
        Err(e) => {
            warn!("Follow-up generation failed: {e}");
            FollowUpResponse {
                draft: failure_template(request),
                ai_powered: false,
                error: Some(e.to_string()),
            }
        }
    }
}

fn build_prompt(request: &FollowUpRequest) -> String {
    let resume_context = match request.resume_text.as_deref() {
        Some(resume) if resume.chars().count() > MIN_RESUME_CONTEXT => format!(
            "\nCandidate's Resume/Background:\n{}",
            truncate_chars(resume, RESUME_EXCERPT)
        ),
        _ => String::new(),
    };

    let contact = match (request.contact_name.as_deref(), request.contact_email.as_deref()) {
        (Some(name), Some(email)) => format!("{name} <{email}>"),
        (Some(name), None) => name.to_string(),
        _ => "the hiring team".to_string(),
    };

    let prompt = FOLLOWUP_PROMPT_TEMPLATE
        .replace("{job_title}", &request.job_title)
        .replace("{company}", &request.company)
        .replace(
            "{job_description}",
            &truncate_chars(&request.job_description, DESCRIPTION_EXCERPT),
        )
        .replace("{contact}", &contact)
        .replace("{resume_context}", &resume_context);

    format!("{prompt}\n{JSON_ONLY_INSTRUCTION}")
}

fn contact_or_default(request: &FollowUpRequest) -> &str {
    request.contact_name.as_deref().unwrap_or("Hiring Manager")
}

/// Used when no generation provider is configured.
fn unconfigured_template(request: &FollowUpRequest) -> FollowUpDraft {
    let contact = contact_or_default(request);
    let (title, company) = (&request.job_title, &request.company);

    FollowUpDraft {
        email: EmailDraft {
            subject: format!("Following Up - {title} Application at {company}"),
            body: format!(
                "Dear {contact},\n\n\
                I hope this email finds you well. I recently applied for the {title} position at {company} \
                and wanted to follow up on my application.\n\n\
                I am very excited about this opportunity and believe my skills and experience align well \
                with the role. I would welcome the chance to discuss how I can contribute to your team.\n\n\
                Please let me know if you need any additional information from me. \
                I look forward to hearing from you.\n\n\
                Best regards"
            ),
        },
        linkedin_message: format!(
            "Hi {contact},\n\n\
            I recently applied for the {title} role at {company} and wanted to connect. \
            I'm very interested in this opportunity and would love to learn more about the team and role. \
            Would you be open to a brief conversation?\n\n\
            Thank you!"
        ),
    }
}

/// Used when the generation call fails or returns unusable output.
fn failure_template(request: &FollowUpRequest) -> FollowUpDraft {
    let contact = contact_or_default(request);
    let (title, company) = (&request.job_title, &request.company);

    FollowUpDraft {
        email: EmailDraft {
            subject: format!("Following Up - {title} Application"),
            body: format!(
                "Dear {contact},\n\n\
                I wanted to follow up on my application for the {title} position at {company}. \
                I remain very interested in this opportunity and would welcome the chance to discuss \
                how I can contribute to your team.\n\n\
                Best regards"
            ),
        },
        linkedin_message: format!(
            "Hi! I recently applied for the {title} role at {company} and wanted to connect. \
            Would love to learn more about the opportunity!"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Client;

    fn request() -> FollowUpRequest {
        FollowUpRequest {
            job_title: "Data Analyst".to_string(),
            company: "North Star Co".to_string(),
            job_description: "Analyze data.".to_string(),
            resume_text: None,
            contact_name: None,
            contact_email: None,
        }
    }

    #[tokio::test]
    async fn test_unconfigured_uses_long_template() {
        let response = generate_followup(None, &request()).await;
        assert!(!response.ai_powered);
        assert!(response.error.is_none());
        assert_eq!(
            response.draft.email.subject,
            "Following Up - Data Analyst Application at North Star Co"
        );
        assert!(response.draft.email.body.starts_with("Dear Hiring Manager,"));
        assert!(response.draft.linkedin_message.contains("North Star Co"));
    }

    #[tokio::test]
    async fn test_ai_draft_returned_when_provider_answers() {
        let mut server = mockito::Server::new_async().await;
        let content = r#"{\"email\": {\"subject\": \"Hello\", \"body\": \"Body\"}, \"linkedinMessage\": \"Hi\"}"#;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body(format!(
                r#"{{"choices":[{{"message":{{"content":"{content}"}}}}]}}"#
            ))
            .create_async()
            .await;

        let llm = LlmClient::new(Client::new(), "k".to_string(), server.url());
        let response = generate_followup(Some(&llm), &request()).await;
        assert!(response.ai_powered);
        assert_eq!(response.draft.email.subject, "Hello");
        assert_eq!(response.draft.linkedin_message, "Hi");
    }

    #[tokio::test]
    async fn test_unparseable_output_falls_back_with_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":"I cannot help with that."}}]}"#)
            .create_async()
            .await;

        let llm = LlmClient::new(Client::new(), "k".to_string(), server.url());
        let response = generate_followup(Some(&llm), &request()).await;
        assert!(!response.ai_powered);
        assert!(response.error.is_some());
        assert_eq!(
            response.draft.email.subject,
            "Following Up - Data Analyst Application"
        );
    }

    #[test]
    fn test_prompt_includes_resume_only_when_substantial() {
        let mut req = request();
        req.resume_text = Some("short".to_string());
        assert!(!build_prompt(&req).contains("Resume/Background"));

        req.resume_text = Some("x".repeat(3000));
        let prompt = build_prompt(&req);
        assert!(prompt.contains("Resume/Background"));
        assert!(!prompt.contains(&"x".repeat(2001)));
    }

    #[test]
    fn test_prompt_contact_defaults_to_hiring_team() {
        let prompt = build_prompt(&request());
        assert!(prompt.contains("Contact: the hiring team"));
        assert!(prompt.ends_with(JSON_ONLY_INSTRUCTION));
    }

    #[test]
    fn test_response_wire_shape() {
        let response = FollowUpResponse {
            draft: failure_template(&request()),
            ai_powered: false,
            error: None,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("email").is_some());
        assert!(value.get("linkedinMessage").is_some());
        assert_eq!(value["ai_powered"], false);
        assert!(value.get("error").is_none());
    }
}

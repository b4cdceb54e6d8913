// Prompt constants for follow-up message generation.

pub const FOLLOWUP_SYSTEM: &str = "You are a professional career coach helping job seekers \
    write compelling follow-up messages. Always respond with valid JSON only.";

/// Follow-up prompt template. Replace `{job_title}`, `{company}`,
/// `{job_description}`, `{contact}` and `{resume_context}` before sending.
pub const FOLLOWUP_PROMPT_TEMPLATE: &str = r#"Generate a professional follow-up email and LinkedIn message for a job application.

Job Details:
- Position: {job_title}
- Company: {company}
- Job Description (excerpt): {job_description}

Contact: {contact}
{resume_context}

Generate TWO things:
1. A professional follow-up EMAIL with subject line and body. The email should:
   - Be concise (under 200 words)
   - Reference specific skills/experience matching the role
   - Express genuine interest
   - Have a clear call-to-action

2. A short LinkedIn connection/follow-up MESSAGE (under 100 words) that is:
   - Friendly and professional
   - Personalized to the role
   - Appropriate for LinkedIn's informal tone

Respond in this exact JSON format:
{"email": {"subject": "...", "body": "..."}, "linkedinMessage": "..."}
"#;

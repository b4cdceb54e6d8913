// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts alongside it.

/// Closing instruction appended to every prompt that expects a JSON object back.
pub const JSON_ONLY_INSTRUCTION: &str = "Only output the JSON, nothing else.";

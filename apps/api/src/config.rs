use anyhow::{Context, Result};

pub const DEFAULT_SERPAPI_URL: &str = "https://serpapi.com/search";
pub const DEFAULT_GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Application configuration loaded from environment variables.
/// Provider credentials are optional: a missing key degrades the endpoints
/// that need it to their fallback responses instead of failing startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub serpapi_key: Option<String>,
    pub serpapi_url: String,
    pub groq_api_key: Option<String>,
    pub groq_api_url: String,
    pub database_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            serpapi_key: optional_env("SERPAPI_KEY"),
            serpapi_url: optional_env("SERPAPI_URL")
                .unwrap_or_else(|| DEFAULT_SERPAPI_URL.to_string()),
            groq_api_key: optional_env("GROQ_API_KEY"),
            groq_api_url: optional_env("GROQ_API_URL")
                .unwrap_or_else(|| DEFAULT_GROQ_API_URL.to_string()),
            database_url: optional_env("DATABASE_URL"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an environment variable, treating unset and blank values alike.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
impl Config {
    /// Configuration with every provider unconfigured.
    pub fn unconfigured() -> Self {
        Config {
            serpapi_key: None,
            serpapi_url: DEFAULT_SERPAPI_URL.to_string(),
            groq_api_key: None,
            groq_api_url: DEFAULT_GROQ_API_URL.to_string(),
            database_url: None,
            port: 8000,
            rust_log: "info".to_string(),
        }
    }
}

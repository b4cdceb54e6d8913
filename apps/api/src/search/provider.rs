//! Job-search provider seam and the SerpApi HTTP client behind it.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;
use tracing::debug;

/// Timeout for every SerpApi request (job pages and web search alike).
pub const SEARCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },
}

/// One provider response. Records stay as raw JSON so that a single
/// malformed record cannot fail the whole page.
#[derive(Debug, Default, Deserialize)]
pub struct ResultPage {
    #[serde(default)]
    pub jobs_results: Vec<serde_json::Value>,
}

/// Result of a generic web search (`engine=google`).
#[derive(Debug, Default, Deserialize)]
pub struct WebSearchPage {
    #[serde(default)]
    pub organic_results: Vec<OrganicResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrganicResult {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

/// A source of job listing pages.
///
/// The aggregator only depends on this trait; `SerpApiClient` is the
/// production implementation.
#[async_trait]
pub trait JobSearchProvider: Send + Sync {
    async fn fetch_page(&self, params: &[(&'static str, String)])
        -> Result<ResultPage, SearchError>;
}

/// SerpApi client. Holds the credential so callers never handle it.
#[derive(Clone)]
pub struct SerpApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SerpApiClient {
    pub fn new(client: Client, base_url: String, api_key: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        params: &[(&'static str, String)],
    ) -> Result<T, SearchError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(params)
            .query(&[("api_key", self.api_key.as_str())])
            .timeout(SEARCH_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }

    /// Google web search, used for contact discovery.
    pub async fn web_search(&self, q: &str, num: u32) -> Result<WebSearchPage, SearchError> {
        debug!("SerpApi web search: {q}");
        self.get(&[
            ("engine", "google".to_string()),
            ("q", q.to_string()),
            ("num", num.to_string()),
        ])
        .await
    }
}

#[async_trait]
impl JobSearchProvider for SerpApiClient {
    async fn fetch_page(
        &self,
        params: &[(&'static str, String)],
    ) -> Result<ResultPage, SearchError> {
        self.get(params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client(server: &mockito::Server) -> SerpApiClient {
        SerpApiClient::new(Client::new(), server.url(), "secret".to_string())
    }

    #[tokio::test]
    async fn test_fetch_page_sends_params_and_key() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("engine".into(), "google_jobs".into()),
                Matcher::UrlEncoded("q".into(), "Rust remote".into()),
                Matcher::UrlEncoded("api_key".into(), "secret".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"jobs_results": [{"job_id": "a"}, {"job_id": "b"}]}"#)
            .create_async()
            .await;

        let page = client(&server)
            .fetch_page(&[
                ("engine", "google_jobs".to_string()),
                ("q", "Rust remote".to_string()),
            ])
            .await
            .unwrap();
        assert_eq!(page.jobs_results.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_page_missing_results_is_empty() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", Matcher::Any)
            .with_status(200)
            .with_body(r#"{"error": "Google hasn't returned any results for this query."}"#)
            .create_async()
            .await;

        let page = client(&server).fetch_page(&[]).await.unwrap();
        assert!(page.jobs_results.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_page_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", Matcher::Any)
            .with_status(429)
            .with_body("slow down")
            .create_async()
            .await;

        let err = client(&server).fetch_page(&[]).await.unwrap_err();
        match err {
            SearchError::Status { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "slow down");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_web_search_decodes_organic_results() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .match_query(Matcher::UrlEncoded("engine".into(), "google".into()))
            .with_status(200)
            .with_body(
                r#"{"organic_results": [
                    {"title": "Jane Roe - Recruiter", "link": "https://www.linkedin.com/in/jane"},
                    {"title": "Careers", "link": "https://acme.com/careers", "snippet": "Join us"}
                ]}"#,
            )
            .create_async()
            .await;

        let page = client(&server).web_search("acme", 5).await.unwrap();
        assert_eq!(page.organic_results.len(), 2);
        assert_eq!(page.organic_results[0].snippet, "");
    }
}

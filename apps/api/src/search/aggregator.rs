//! Job result aggregation: pagination, deduplication and ranking.
//!
//! Flow: build provider params once → fetch pages 0..MAX_PAGES sequentially →
//!       decode + dedup + normalize each record → stable sort by freshness →
//!       truncate to MAX_RESULTS.
//!
//! Pages are fetched one at a time and a page is only requested when the
//! previous one produced results. Nothing in here returns an error; provider
//! failures end the loop early and the caller receives whatever was
//! collected so far.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{info, warn};

use crate::search::normalize::{normalize, NormalizedJob, RawJobRecord};
use crate::search::provider::JobSearchProvider;
use crate::search::query::SearchQuery;

pub const MAX_PAGES: u32 = 3;
pub const MAX_RESULTS: usize = 50;

/// Outcome of one aggregated search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    #[serde(rename = "data")]
    pub jobs: Vec<NormalizedJob>,
    pub total: usize,
    /// Provider pages that returned at least one record.
    pub pages_fetched: u32,
}

/// Accumulates normalized jobs across pages, dropping repeated ids.
struct JobCollector<'a> {
    seen_ids: HashSet<String>,
    jobs: Vec<NormalizedJob>,
    fallback_location: &'a str,
}

impl<'a> JobCollector<'a> {
    fn new(fallback_location: &'a str) -> Self {
        Self {
            seen_ids: HashSet::new(),
            jobs: Vec::new(),
            fallback_location,
        }
    }

    fn extend(&mut self, records: Vec<serde_json::Value>) {
        for value in records {
            let raw: RawJobRecord = match serde_json::from_value(value) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!("Skipping undecodable job record: {e}");
                    continue;
                }
            };
            if !self.seen_ids.insert(raw.dedup_key().to_string()) {
                continue;
            }
            self.jobs.push(normalize(raw, self.fallback_location));
        }
    }

    /// Stable sort by freshness, then cap.
    fn finish(mut self) -> Vec<NormalizedJob> {
        self.jobs.sort_by_key(|job| job.freshness_score);
        self.jobs.truncate(MAX_RESULTS);
        self.jobs
    }
}

/// Runs the full search against `provider`. Never fails: a page-0 failure
/// yields an empty result set, a later failure keeps the earlier pages.
pub async fn aggregate(provider: &dyn JobSearchProvider, query: &SearchQuery) -> SearchResults {
    let params = query.provider_params();
    let mut collector = JobCollector::new(query.effective_location());
    let mut pages_fetched = 0;

    for page in 0..MAX_PAGES {
        let records = match provider.fetch_page(&params.for_page(page)).await {
            Ok(result) => result.jobs_results,
            Err(e) => {
                warn!("Job search page {page} failed: {e}");
                break;
            }
        };
        if records.is_empty() {
            break;
        }
        pages_fetched += 1;
        collector.extend(records);
    }

    let jobs = collector.finish();
    info!(
        "Job search for '{}' in '{}': {} results from {} pages",
        query.effective_term(),
        query.effective_location(),
        jobs.len(),
        pages_fetched
    );

    SearchResults {
        total: jobs.len(),
        jobs,
        pages_fetched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::provider::{ResultPage, SearchError};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    /// Serves scripted pages in order and records the params it was called with.
    struct ScriptedProvider {
        pages: Mutex<Vec<Result<Vec<Value>, u16>>>,
        calls: Mutex<Vec<Vec<(&'static str, String)>>>,
    }

    impl ScriptedProvider {
        fn new(pages: Vec<Result<Vec<Value>, u16>>) -> Self {
            Self {
                pages: Mutex::new(pages.into_iter().rev().collect()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<Vec<(&'static str, String)>> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl JobSearchProvider for ScriptedProvider {
        async fn fetch_page(
            &self,
            params: &[(&'static str, String)],
        ) -> Result<ResultPage, SearchError> {
            self.calls.lock().unwrap().push(params.to_vec());
            match self.pages.lock().unwrap().pop() {
                Some(Ok(jobs_results)) => Ok(ResultPage { jobs_results }),
                Some(Err(status)) => Err(SearchError::Status {
                    status,
                    body: String::new(),
                }),
                None => Ok(ResultPage::default()),
            }
        }
    }

    fn job(id: &str, posted: &str) -> Value {
        json!({
            "job_id": id,
            "title": format!("Job {id}"),
            "detected_extensions": {"posted_at": posted}
        })
    }

    fn page(prefix: &str, n: usize, posted: &str) -> Vec<Value> {
        (0..n).map(|i| job(&format!("{prefix}{i}"), posted)).collect()
    }

    fn ids(results: &SearchResults) -> Vec<&str> {
        results.jobs.iter().map(|j| j.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_fetches_three_pages_with_offsets() {
        let provider = ScriptedProvider::new(vec![
            Ok(page("a", 10, "1 day ago")),
            Ok(page("b", 10, "1 day ago")),
            Ok(page("c", 10, "1 day ago")),
        ]);
        let results = aggregate(&provider, &SearchQuery::default()).await;

        assert_eq!(results.total, 30);
        assert_eq!(results.pages_fetched, 3);

        let calls = provider.calls();
        assert_eq!(calls.len(), 3);
        assert!(calls[0].iter().all(|(k, _)| *k != "start"));
        assert!(calls[1].contains(&("start", "10".to_string())));
        assert!(calls[2].contains(&("start", "20".to_string())));
    }

    #[tokio::test]
    async fn test_page_one_failure_keeps_page_zero() {
        let provider =
            ScriptedProvider::new(vec![Ok(page("a", 10, "2 days ago")), Err(500)]);
        let results = aggregate(&provider, &SearchQuery::default()).await;

        assert_eq!(results.total, 10);
        assert_eq!(results.jobs.len(), 10);
        assert_eq!(results.pages_fetched, 1);
        assert_eq!(provider.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_page_zero_failure_is_empty_not_error() {
        let provider = ScriptedProvider::new(vec![Err(401)]);
        let results = aggregate(&provider, &SearchQuery::default()).await;

        assert!(results.jobs.is_empty());
        assert_eq!(results.total, 0);
        assert_eq!(results.pages_fetched, 0);
    }

    #[tokio::test]
    async fn test_empty_page_stops_loop() {
        let provider = ScriptedProvider::new(vec![
            Ok(page("a", 4, "today")),
            Ok(vec![]),
            Ok(page("c", 10, "today")),
        ]);
        let results = aggregate(&provider, &SearchQuery::default()).await;

        assert_eq!(results.total, 4);
        assert_eq!(provider.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_duplicates_dropped_first_occurrence_kept() {
        let provider = ScriptedProvider::new(vec![
            Ok(vec![
                job("x", "3 days ago"),
                json!({"job_id": "x", "title": "Impostor", "detected_extensions": {"posted_at": "1 hour ago"}}),
                job("y", "3 days ago"),
            ]),
            Ok(vec![job("y", "1 hour ago"), job("z", "1 week ago")]),
        ]);
        let results = aggregate(&provider, &SearchQuery::default()).await;

        assert_eq!(ids(&results), vec!["x", "y", "z"]);
        assert_eq!(results.jobs[0].title, "Job x");
    }

    #[tokio::test]
    async fn test_missing_ids_deduplicated_as_one_key() {
        let provider = ScriptedProvider::new(vec![Ok(vec![
            json!({"title": "first"}),
            json!({"title": "second"}),
            job("a", "today"),
        ])]);
        let results = aggregate(&provider, &SearchQuery::default()).await;

        assert_eq!(results.total, 2);
        assert!(results.jobs.iter().any(|j| j.title == "first"));
        assert!(!results.jobs.iter().any(|j| j.title == "second"));
    }

    #[tokio::test]
    async fn test_sorted_by_freshness_and_stable() {
        let provider = ScriptedProvider::new(vec![Ok(vec![
            job("old", "2 weeks ago"),
            job("tie1", "1 day ago"),
            job("new", "5 hours ago"),
            job("unknown", "sometime"),
            job("tie2", "yesterday"),
        ])]);
        let results = aggregate(&provider, &SearchQuery::default()).await;

        assert_eq!(ids(&results), vec!["new", "tie1", "tie2", "old", "unknown"]);
        assert!(results
            .jobs
            .windows(2)
            .all(|w| w[0].freshness_score <= w[1].freshness_score));
    }

    #[tokio::test]
    async fn test_bounded_to_fifty() {
        let provider = ScriptedProvider::new(vec![
            Ok(page("a", 20, "2 weeks ago")),
            Ok(page("b", 20, "3 days ago")),
            Ok(page("c", 20, "1 hour ago")),
        ]);
        let results = aggregate(&provider, &SearchQuery::default()).await;

        assert_eq!(results.jobs.len(), MAX_RESULTS);
        assert_eq!(results.total, MAX_RESULTS);
        // Freshest records survive truncation.
        assert_eq!(results.jobs.iter().filter(|j| j.id.starts_with('a')).count(), 10);
        assert_eq!(results.jobs.iter().filter(|j| j.id.starts_with('c')).count(), 20);
        assert_eq!(results.jobs.iter().filter(|j| j.id.starts_with('b')).count(), 20);
    }

    #[tokio::test]
    async fn test_undecodable_record_skipped() {
        let provider = ScriptedProvider::new(vec![Ok(vec![
            json!({"job_id": "bad", "extensions": "not-a-list"}),
            job("good", "today"),
        ])]);
        let results = aggregate(&provider, &SearchQuery::default()).await;

        assert_eq!(ids(&results), vec!["good"]);
    }

    #[tokio::test]
    async fn test_null_containers_and_numeric_salary_kept() {
        let provider = ScriptedProvider::new(vec![Ok(vec![
            json!({"job_id": "e", "extensions": null}),
            json!({"job_id": "h", "job_highlights": null}),
            json!({"job_id": "a", "apply_options": null}),
            json!({"job_id": "d", "detected_extensions": null}),
            json!({"job_id": "s", "detected_extensions": {"salary": 90000}}),
            job("ok", "today"),
        ])]);
        let results = aggregate(&provider, &SearchQuery::default()).await;

        assert_eq!(results.total, 6);
        let salary = results
            .jobs
            .iter()
            .find(|j| j.id == "s")
            .and_then(|j| j.salary.as_deref());
        assert_eq!(salary, Some("90000"));
    }

    #[tokio::test]
    async fn test_missing_location_uses_effective_search_location() {
        let provider = ScriptedProvider::new(vec![Ok(vec![job("a", "today")])]);
        let query = SearchQuery {
            location: "Rochester".to_string(),
            ..SearchQuery::default()
        };
        let results = aggregate(&provider, &query).await;
        assert_eq!(results.jobs[0].location, "Rochester");
    }
}

//! Tolerant decode of provider job records into the fixed `NormalizedJob` shape.
//!
//! Every provider field is optional; defaults for missing fields live here and
//! nowhere else. The keyword classifiers below are first-match-wins and their
//! order is part of the observable behaviour.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::text::truncate_chars;

pub const DESCRIPTION_LIMIT: usize = 800;
const MAX_APPLY_SOURCES: usize = 3;
const MAX_QUALIFICATIONS: usize = 5;
const MAX_BENEFITS: usize = 5;
const MAX_RESPONSIBILITIES: usize = 3;

/// Score given to postings whose age could not be read.
pub const UNKNOWN_FRESHNESS: u32 = 100;

// ────────────────────────────────────────────────────────────────────────────
// Provider shape
// ────────────────────────────────────────────────────────────────────────────

/// One entry of SerpApi's `jobs_results`. A `null` container decodes to its
/// default and numeric scalars are kept as text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawJobRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub job_id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub company_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub share_link: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub thumbnail: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub via: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub extensions: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub detected_extensions: DetectedExtensions,
    #[serde(deserialize_with = "null_as_default")]
    pub apply_options: Vec<ApplyOption>,
    #[serde(deserialize_with = "null_as_default")]
    pub job_highlights: Vec<Highlight>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DetectedExtensions {
    #[serde(deserialize_with = "lenient_string")]
    pub posted_at: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub salary: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub schedule_type: Option<String>,
    pub work_from_home: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApplyOption {
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Highlight {
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Strings pass through; numbers and booleans are rendered as text; `null`
/// and nested values read as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

impl RawJobRecord {
    /// Key used for per-request deduplication. A missing id is its own key.
    pub fn dedup_key(&self) -> &str {
        self.job_id.as_deref().unwrap_or("")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Normalized shape
// ────────────────────────────────────────────────────────────────────────────

/// A job as returned to the frontend. Field names on the wire follow the
/// frontend's existing contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedJob {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "postedDate")]
    pub posted_date_text: String,
    #[serde(rename = "freshnessScore")]
    pub freshness_score: u32,
    #[serde(rename = "easyApply")]
    pub easy_apply: bool,
    #[serde(rename = "description")]
    pub description_excerpt: String,
    #[serde(rename = "url")]
    pub apply_url: Option<String>,
    #[serde(rename = "logoUrl")]
    pub logo_url: Option<String>,
    pub salary: Option<String>,
    #[serde(rename = "jobType")]
    pub job_type: Option<String>,
    #[serde(rename = "workFromHome")]
    pub is_remote: bool,
    #[serde(rename = "applySources")]
    pub apply_source_names: Vec<String>,
    pub qualifications: Vec<String>,
    pub benefits: Vec<String>,
    pub responsibilities: Vec<String>,
    #[serde(rename = "via")]
    pub via_source: String,
}

/// Builds the normalized job. `fallback_location` is the effective search
/// location, used when the record carries none.
pub fn normalize(raw: RawJobRecord, fallback_location: &str) -> NormalizedJob {
    let ext = &raw.detected_extensions;
    let posted_date_text = ext
        .posted_at
        .clone()
        .unwrap_or_else(|| "Recently".to_string());
    let freshness_score = freshness_score(&posted_date_text);
    let job_type = job_type(ext.schedule_type.as_deref(), &raw.extensions);
    let highlights = classify_highlights(&raw.job_highlights);

    let apply_url = match raw.apply_options.first() {
        Some(opt) => opt.link.clone(),
        None => raw.share_link.clone(),
    };

    let apply_source_names = raw
        .apply_options
        .iter()
        .take(MAX_APPLY_SOURCES)
        .map(|opt| opt.title.clone().unwrap_or_else(|| "Apply".to_string()))
        .collect();

    let description_excerpt = match raw.description.as_deref() {
        Some(d) => truncate_chars(d, DESCRIPTION_LIMIT),
        None => "View details.".to_string(),
    };

    NormalizedJob {
        id: raw.job_id.clone().unwrap_or_else(|| "N/A".to_string()),
        title: raw.title.unwrap_or_else(|| "Unknown Role".to_string()),
        company: raw
            .company_name
            .unwrap_or_else(|| "Unknown Company".to_string()),
        location: raw
            .location
            .unwrap_or_else(|| fallback_location.to_string()),
        posted_date_text,
        freshness_score,
        easy_apply: !raw.apply_options.is_empty(),
        description_excerpt,
        apply_url,
        logo_url: raw.thumbnail,
        salary: ext.salary.clone(),
        job_type,
        is_remote: ext.work_from_home.unwrap_or(false),
        apply_source_names,
        qualifications: highlights.qualifications,
        benefits: highlights.benefits,
        responsibilities: highlights.responsibilities,
        via_source: raw.via.unwrap_or_default(),
    }
}

/// Recency proxy: lower is newer. Matching is case-insensitive and the
/// first rule that matches wins, so "2 days" never reaches the generic "day".
pub fn freshness_score(posted: &str) -> u32 {
    let posted = posted.to_lowercase();
    let has = |needle: &str| posted.contains(needle);

    if has("hour") {
        1
    } else if has("today") || has("just") {
        2
    } else if has("1 day") || has("yesterday") {
        3
    } else if has("2 day") {
        4
    } else if has("3 day") {
        5
    } else if has("day") {
        10
    } else if has("week") {
        20
    } else {
        UNKNOWN_FRESHNESS
    }
}

/// Explicit schedule type wins; otherwise scan the generic extension list.
fn job_type(schedule_type: Option<&str>, extensions: &[String]) -> Option<String> {
    if let Some(schedule) = schedule_type {
        return Some(schedule.to_string());
    }
    ["Full-time", "Part-time", "Contract"]
        .into_iter()
        .find(|kind| extensions.iter().any(|e| e.contains(kind)))
        .map(str::to_string)
}

#[derive(Debug, Default)]
struct HighlightBuckets {
    qualifications: Vec<String>,
    benefits: Vec<String>,
    responsibilities: Vec<String>,
}

/// Sorts highlight groups into buckets by title. A later group that lands
/// in the same bucket replaces the earlier one.
fn classify_highlights(highlights: &[Highlight]) -> HighlightBuckets {
    let mut buckets = HighlightBuckets::default();
    for group in highlights {
        let title = group.title.as_deref().unwrap_or_default().to_lowercase();
        let capped = |cap: usize| -> Vec<String> {
            group.items.iter().take(cap).cloned().collect()
        };

        if title.contains("qualif") || title.contains("require") {
            buckets.qualifications = capped(MAX_QUALIFICATIONS);
        } else if title.contains("benefit") {
            buckets.benefits = capped(MAX_BENEFITS);
        } else if title.contains("responsib") || title.contains("duties") {
            buckets.responsibilities = capped(MAX_RESPONSIBILITIES);
        }
    }
    buckets
}

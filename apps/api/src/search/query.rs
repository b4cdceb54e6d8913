//! Search query model and translation into SerpApi Google Jobs parameters.

use serde::Deserialize;

pub const DEFAULT_TERM: &str = "Software";
pub const DEFAULT_LOCATION: &str = "Minnesota";

/// Jobs per provider page; also the offset stride between pages.
pub const PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum DateFilter {
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "3days")]
    ThreeDays,
    #[default]
    #[serde(rename = "week")]
    Week,
    #[serde(rename = "month")]
    Month,
    #[serde(other)]
    Any,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkType {
    Remote,
    Hybrid,
    Onsite,
    #[default]
    #[serde(other)]
    Any,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
    #[default]
    #[serde(other)]
    Any,
}

impl DateFilter {
    fn chip(self) -> Option<&'static str> {
        match self {
            DateFilter::Today => Some("date_posted:today"),
            DateFilter::ThreeDays => Some("date_posted:3days"),
            DateFilter::Week => Some("date_posted:week"),
            DateFilter::Month => Some("date_posted:month"),
            DateFilter::Any => None,
        }
    }
}

impl WorkType {
    fn term_suffix(self) -> &'static str {
        match self {
            WorkType::Remote => " remote",
            WorkType::Hybrid => " hybrid",
            WorkType::Onsite => " on-site",
            WorkType::Any => "",
        }
    }
}

impl ExperienceLevel {
    fn chip(self) -> Option<&'static str> {
        match self {
            ExperienceLevel::Entry => Some("requirements:no_experience"),
            ExperienceLevel::Mid => Some("requirements:years3under"),
            ExperienceLevel::Senior => Some("requirements:years3plus"),
            ExperienceLevel::Any => None,
        }
    }
}

fn default_radius() -> String {
    "50".to_string()
}

/// Query string of `GET /api/v1/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    #[serde(default, rename = "query")]
    pub free_text: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub date_filter: DateFilter,
    #[serde(default)]
    pub work_type: WorkType,
    /// Passed to the provider verbatim.
    #[serde(default = "default_radius", rename = "radius")]
    pub radius_miles: String,
    #[serde(default, rename = "exp_level")]
    pub experience_level: ExperienceLevel,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            free_text: String::new(),
            location: String::new(),
            date_filter: DateFilter::default(),
            work_type: WorkType::default(),
            radius_miles: default_radius(),
            experience_level: ExperienceLevel::default(),
        }
    }
}

impl SearchQuery {
    /// Free-text term after defaulting, without the work-type suffix.
    pub fn effective_term(&self) -> &str {
        non_blank(&self.free_text).unwrap_or(DEFAULT_TERM)
    }

    pub fn effective_location(&self) -> &str {
        non_blank(&self.location).unwrap_or(DEFAULT_LOCATION)
    }

    /// Comma-joined filter chips, or `None` when no filter applies.
    pub fn chips(&self) -> Option<String> {
        let chips: Vec<&str> = [self.date_filter.chip(), self.experience_level.chip()]
            .into_iter()
            .flatten()
            .collect();
        (!chips.is_empty()).then(|| chips.join(","))
    }

    /// Provider parameters shared by every page of one search.
    /// Built once per request so the work-type suffix is applied exactly once.
    /// Credentials are added by the provider client.
    pub fn provider_params(&self) -> ProviderParams {
        let mut params = vec![
            ("engine", "google_jobs".to_string()),
            (
                "q",
                format!("{}{}", self.effective_term(), self.work_type.term_suffix()),
            ),
            ("location", self.effective_location().to_string()),
            ("hl", "en".to_string()),
            ("lrad", self.radius_miles.clone()),
        ];
        if let Some(chips) = self.chips() {
            params.push(("chips", chips));
        }
        ProviderParams(params)
    }
}

fn non_blank(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}

/// Ordered key/value pairs sent to the job-search provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderParams(pub Vec<(&'static str, String)>);

impl ProviderParams {
    /// Parameters for one page. Page 0 carries no offset.
    pub fn for_page(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut params = self.0.clone();
        if page > 0 {
            params.push(("start", (page * PAGE_SIZE).to_string()));
        }
        params
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

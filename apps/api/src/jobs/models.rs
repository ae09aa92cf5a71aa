use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Recency window for a job search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostedWithin {
    #[default]
    #[serde(rename = "Any time")]
    AnyTime,
    #[serde(rename = "Today")]
    Today,
    #[serde(rename = "Past 3 days")]
    PastThreeDays,
    #[serde(rename = "Past week")]
    PastWeek,
    #[serde(rename = "Past month")]
    PastMonth,
}

impl PostedWithin {
    /// Maximum posting age in whole days; `None` means no limit.
    pub fn max_age_days(self) -> Option<i64> {
        match self {
            PostedWithin::AnyTime => None,
            PostedWithin::Today => Some(0),
            PostedWithin::PastThreeDays => Some(3),
            PostedWithin::PastWeek => Some(7),
            PostedWithin::PastMonth => Some(30),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Adzuna,
    Jsearch,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobSearchRequest {
    #[serde(default = "default_query")]
    pub query: String,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default = "default_page_size", alias = "results_per_page")]
    pub page_size: u32,
    #[serde(default)]
    pub posted_within: PostedWithin,
    #[serde(default, alias = "source")]
    pub provider: Provider,
}

fn default_query() -> String {
    "data analyst".to_string()
}

fn default_location() -> String {
    "San Diego".to_string()
}

fn default_page_size() -> u32 {
    10
}

/// A job posting in the provider-independent shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    pub url: String,
    pub posted_timestamp: Option<DateTime<Utc>>,
    /// Human-readable age: `Today`, `1 day ago`, `N days ago` or `Unknown`.
    pub posted: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSearchResponse {
    pub query: String,
    pub location: String,
    pub results: Vec<JobPosting>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_and_aliases() {
        let req: JobSearchRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.query, "data analyst");
        assert_eq!(req.page_size, 10);
        assert_eq!(req.posted_within, PostedWithin::AnyTime);
        assert_eq!(req.provider, Provider::Adzuna);

        let req: JobSearchRequest = serde_json::from_str(
            r#"{"query": "rust", "results_per_page": 5, "posted_within": "Past 3 days", "source": "jsearch"}"#,
        )
        .unwrap();
        assert_eq!(req.page_size, 5);
        assert_eq!(req.posted_within, PostedWithin::PastThreeDays);
        assert_eq!(req.provider, Provider::Jsearch);
    }

    #[test]
    fn test_window_days() {
        assert_eq!(PostedWithin::AnyTime.max_age_days(), None);
        assert_eq!(PostedWithin::Today.max_age_days(), Some(0));
        assert_eq!(PostedWithin::PastWeek.max_age_days(), Some(7));
        assert_eq!(PostedWithin::PastMonth.max_age_days(), Some(30));
    }
}

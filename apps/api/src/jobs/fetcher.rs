//! Job Posting Fetcher: one REST GET per search against Adzuna or JSearch,
//! mapped into `JobPosting` records.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::jobs::models::{JobPosting, JobSearchRequest, JobSearchResponse, Provider};
use crate::jobs::recency::{filter_and_sort, parse_timestamp, recency_label};

const ADZUNA_API_BASE: &str = "https://api.adzuna.com/v1/api/jobs";
const JSEARCH_API_URL: &str = "https://jsearch.p.rapidapi.com/search";
const JSEARCH_HOST: &str = "jsearch.p.rapidapi.com";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Missing {0} in environment")]
    MissingCredentials(&'static str),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Job API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Provider credentials. Absent credentials are only an error for the
/// provider that needs them, at call time.
#[derive(Debug, Clone, Default)]
pub struct JobApiCredentials {
    pub adzuna_app_id: Option<String>,
    pub adzuna_app_key: Option<String>,
    pub adzuna_country: String,
    pub jsearch_api_key: Option<String>,
}

#[derive(Clone)]
pub struct JobFetcher {
    client: Client,
    credentials: JobApiCredentials,
}

impl JobFetcher {
    pub fn new(credentials: JobApiCredentials) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, credentials })
    }

    /// Fetches, maps, filters and sorts postings for one search.
    pub async fn search(
        &self,
        request: &JobSearchRequest,
        now: DateTime<Utc>,
    ) -> Result<JobSearchResponse, FetchError> {
        let postings = match request.provider {
            Provider::Adzuna => {
                let body = self.get_adzuna(request).await?;
                map_adzuna(&body, now)
            }
            Provider::Jsearch => {
                let body = self.get_jsearch(request).await?;
                map_jsearch(&body, now)
            }
        };

        let fetched = postings.len();
        let results = filter_and_sort(postings, request.posted_within, now);
        info!(
            "Job search '{}' in '{}' via {:?}: {} fetched, {} kept",
            request.query,
            request.location,
            request.provider,
            fetched,
            results.len()
        );

        Ok(JobSearchResponse {
            query: request.query.clone(),
            location: request.location.clone(),
            results,
        })
    }

    async fn get_adzuna(&self, request: &JobSearchRequest) -> Result<Value, FetchError> {
        let (Some(app_id), Some(app_key)) = (
            self.credentials.adzuna_app_id.as_deref(),
            self.credentials.adzuna_app_key.as_deref(),
        ) else {
            return Err(FetchError::MissingCredentials("ADZUNA_APP_ID or ADZUNA_APP_KEY"));
        };

        let url = format!(
            "{ADZUNA_API_BASE}/{}/search/1",
            self.credentials.adzuna_country
        );
        let page_size = request.page_size.to_string();
        debug!("GET {url} what='{}' where='{}'", request.query, request.location);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("app_id", app_id),
                ("app_key", app_key),
                ("results_per_page", page_size.as_str()),
                ("what", request.query.as_str()),
                ("where", request.location.as_str()),
                ("content-type", "application/json"),
            ])
            .send()
            .await?;
        read_json(response).await
    }

    async fn get_jsearch(&self, request: &JobSearchRequest) -> Result<Value, FetchError> {
        let Some(api_key) = self.credentials.jsearch_api_key.as_deref() else {
            return Err(FetchError::MissingCredentials("JSEARCH_API_KEY"));
        };

        let query = format!("{} in {}", request.query, request.location);
        debug!("GET {JSEARCH_API_URL} query='{query}'");

        let response = self
            .client
            .get(JSEARCH_API_URL)
            .header("X-RapidAPI-Key", api_key)
            .header("X-RapidAPI-Host", JSEARCH_HOST)
            .query(&[
                ("query", query.as_str()),
                ("page", "1"),
                ("num_pages", "1"),
            ])
            .send()
            .await?;
        read_json(response).await
    }
}

async fn read_json(response: reqwest::Response) -> Result<Value, FetchError> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(FetchError::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response.json().await?)
}

// ────────────────────────────────────────────────────────────────────────────
// Response mapping
// ────────────────────────────────────────────────────────────────────────────

fn text_at<'a>(value: &'a Value, pointer: &str) -> Option<&'a str> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn posting(
    title: Option<&str>,
    company: Option<&str>,
    location: String,
    url: Option<&str>,
    created: Option<&str>,
    description: Option<&str>,
    now: DateTime<Utc>,
) -> JobPosting {
    let posted_timestamp = created.and_then(parse_timestamp);
    JobPosting {
        title: title.unwrap_or("No Title").to_string(),
        company: company.unwrap_or("N/A").to_string(),
        location,
        url: url.unwrap_or("#").to_string(),
        posted_timestamp,
        posted: recency_label(posted_timestamp, now),
        description: description.unwrap_or_default().to_string(),
    }
}

/// Maps an Adzuna search response (`results[]`).
pub fn map_adzuna(body: &Value, now: DateTime<Utc>) -> Vec<JobPosting> {
    let Some(results) = body.get("results").and_then(Value::as_array) else {
        return vec![];
    };
    results
        .iter()
        .map(|job| {
            posting(
                text_at(job, "/title"),
                text_at(job, "/company/display_name"),
                text_at(job, "/location/display_name")
                    .unwrap_or("N/A")
                    .to_string(),
                text_at(job, "/redirect_url"),
                text_at(job, "/created"),
                text_at(job, "/description"),
                now,
            )
        })
        .collect()
}

/// Maps a JSearch response (`data[]`). Location is assembled from the city,
/// state and country fields that are present.
pub fn map_jsearch(body: &Value, now: DateTime<Utc>) -> Vec<JobPosting> {
    let Some(data) = body.get("data").and_then(Value::as_array) else {
        return vec![];
    };
    data.iter()
        .map(|job| {
            let parts: Vec<&str> = ["/job_city", "/job_state", "/job_country"]
                .iter()
                .filter_map(|p| text_at(job, p))
                .collect();
            let location = if parts.is_empty() {
                "N/A".to_string()
            } else {
                parts.join(", ")
            };
            posting(
                text_at(job, "/job_title"),
                text_at(job, "/employer_name"),
                location,
                text_at(job, "/job_apply_link"),
                text_at(job, "/job_posted_at_datetime_utc"),
                text_at(job, "/job_description"),
                now,
            )
        })
        .collect()
}

//! Posting timestamps: parsing, recency labels, window filtering, ordering.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::debug;

use crate::jobs::models::{JobPosting, PostedWithin};

/// Naive layouts tried after RFC 3339; all are read as UTC.
const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// Parses a provider timestamp. Returns `None` when no known layout fits.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// Whole days elapsed since `posted`, never negative.
fn age_days(posted: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - posted).num_days().max(0)
}

pub fn recency_label(posted: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    match posted.map(|p| age_days(p, now)) {
        None => "Unknown".to_string(),
        Some(0) => "Today".to_string(),
        Some(1) => "1 day ago".to_string(),
        Some(n) => format!("{n} days ago"),
    }
}

/// Undated postings always pass.
pub fn within_window(posted: Option<DateTime<Utc>>, window: PostedWithin, now: DateTime<Utc>) -> bool {
    match (window.max_age_days(), posted) {
        (None, _) | (_, None) => true,
        (Some(max), Some(p)) => age_days(p, now) <= max,
    }
}

/// Applies the recency window and orders newest first, undated last.
pub fn filter_and_sort(
    postings: Vec<JobPosting>,
    window: PostedWithin,
    now: DateTime<Utc>,
) -> Vec<JobPosting> {
    let total = postings.len();
    let mut kept: Vec<JobPosting> = postings
        .into_iter()
        .filter(|p| within_window(p.posted_timestamp, window, now))
        .collect();

    kept.sort_by(|a, b| match (a.posted_timestamp, b.posted_timestamp) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    debug!("Recency filter {:?}: kept {} of {}", window, kept.len(), total);
    kept
}

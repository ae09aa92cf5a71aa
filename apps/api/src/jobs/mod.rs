// Job search: provider fetch (Adzuna, JSearch), uniform postings,
// recency filtering and ordering.

pub mod fetcher;
pub mod handlers;
pub mod models;
pub mod recency;

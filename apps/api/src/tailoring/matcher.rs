//! Text Matcher: ranks resume rows by TF-IDF cosine similarity to a job
//! description.
//!
//! The vocabulary is fitted on the JD plus every row. Weights use smooth idf,
//! `ln((1 + n) / (1 + df)) + 1`, and each vector is L2-normalized, so the
//! cosine is a plain dot product. Tokens are runs of two or more characters
//! after cleaning.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::resume::models::ResumeRow;

/// Rows scoring at or below this are not reported.
pub const MIN_SCORE: f64 = 0.05;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRow {
    #[serde(flatten)]
    pub row: ResumeRow,
    pub score: f64,
}

/// Lower-cases and strips everything but ASCII letters, digits and spaces.
/// Other whitespace becomes a space first so that line breaks still separate
/// words.
pub fn clean_text(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}

fn tokenize(cleaned: &str) -> Vec<&str> {
    cleaned
        .split_whitespace()
        .filter(|t| t.chars().count() >= 2)
        .collect()
}

type SparseVector = HashMap<String, f64>;

/// Fitted document frequencies for one corpus.
struct TfIdfModel {
    documents: usize,
    document_frequency: HashMap<String, usize>,
}

impl TfIdfModel {
    fn fit(documents: &[Vec<&str>]) -> Self {
        let mut document_frequency: HashMap<String, usize> = HashMap::new();
        for doc in documents {
            let mut terms: Vec<&str> = doc.clone();
            terms.sort_unstable();
            terms.dedup();
            for term in terms {
                *document_frequency.entry(term.to_string()).or_default() += 1;
            }
        }
        Self {
            documents: documents.len(),
            document_frequency,
        }
    }

    fn idf(&self, term: &str) -> f64 {
        let df = self.document_frequency.get(term).copied().unwrap_or(0) as f64;
        ((1.0 + self.documents as f64) / (1.0 + df)).ln() + 1.0
    }

    fn transform(&self, tokens: &[&str]) -> SparseVector {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for token in tokens {
            *counts.entry(*token).or_default() += 1;
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(term, count)| (term.to_string(), count as f64 * self.idf(term)))
            .collect();

        let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            vector.values_mut().for_each(|w| *w /= norm);
        }
        vector
    }
}

fn dot(a: &SparseVector, b: &SparseVector) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .iter()
        .filter_map(|(term, w)| large.get(term).map(|v| w * v))
        .sum()
}

/// Scores every row against the JD and returns those above `MIN_SCORE`,
/// best first.
pub fn match_rows(job_description: &str, rows: &[ResumeRow]) -> Vec<ScoredRow> {
    let cleaned: Vec<String> = std::iter::once(job_description)
        .chain(rows.iter().map(|r| r.content.as_str()))
        .map(clean_text)
        .collect();
    let documents: Vec<Vec<&str>> = cleaned.iter().map(|d| tokenize(d)).collect();

    let model = TfIdfModel::fit(&documents);
    let jd_vector = model.transform(&documents[0]);

    let mut scored: Vec<ScoredRow> = rows
        .iter()
        .zip(&documents[1..])
        .map(|(row, tokens)| ScoredRow {
            row: row.clone(),
            score: dot(&jd_vector, &model.transform(tokens)),
        })
        .filter(|s| s.score > MIN_SCORE)
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    debug!("Matched {} of {} rows against JD", scored.len(), rows.len());
    scored
}

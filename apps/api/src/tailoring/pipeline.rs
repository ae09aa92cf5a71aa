//! Tailoring pipeline: oracle text → Block Normalizer → Resume Sanitizer.
//!
//! Output that carries no parseable JSON array never reaches the sanitizer;
//! it becomes the single `error / parse_fail` row instead. Transport errors
//! from the oracle are returned to the caller untouched.

use serde_json::Value;
use tracing::{info, warn};

use crate::llm_client::{extract_json_array, LlmError, TextOracle};
use crate::resume::codec::format_resume_rows;
use crate::resume::models::ResumeRow;
use crate::resume::normalizer::normalize_blocks;
use crate::resume::sanitizer::{sanitize_resume, MasterResume};
use crate::tailoring::prompts::build_tailor_prompt;

/// Parses the JSON array embedded in oracle output.
pub fn parse_oracle_blocks(raw: &str) -> Result<Vec<Value>, String> {
    let span = extract_json_array(raw).ok_or_else(|| "No JSON array found in model output".to_string())?;
    serde_json::from_str::<Vec<Value>>(span).map_err(|e| e.to_string())
}

/// Runs raw oracle text through normalization and sanitization.
pub fn sanitize_oracle_output(
    raw: &str,
    master: MasterResume<'_>,
    row_cap: usize,
) -> Vec<ResumeRow> {
    let blocks = match parse_oracle_blocks(raw) {
        Ok(blocks) => blocks,
        Err(message) => {
            warn!("Oracle output could not be parsed: {message}");
            return vec![ResumeRow::parse_failure(message)];
        }
    };

    let normalized = normalize_blocks(&blocks);
    info!(
        "Normalized {} oracle block(s) into {} row(s)",
        blocks.len(),
        normalized.len()
    );
    sanitize_resume(&normalized, master, row_cap)
}

/// Asks the oracle for a tailored rewrite of the master resume, then
/// canonicalizes the answer.
pub async fn tailor_resume(
    oracle: &dyn TextOracle,
    job_description: &str,
    master: MasterResume<'_>,
    row_cap: usize,
) -> Result<Vec<ResumeRow>, LlmError> {
    let prompt = build_tailor_prompt(job_description, &format_resume_rows(master.rows));
    let raw = oracle.complete(&prompt).await?;
    Ok(sanitize_oracle_output(&raw, master, row_cap))
}

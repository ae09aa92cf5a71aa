//! Per-block rewriting: the target-roles line, the professional summary, or
//! the bullets of a single experience or project entry.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{info, warn};

use crate::llm_client::{LlmError, TextOracle};
use crate::resume::models::Section;
use crate::resume::sanitizer::{JOB_BULLETS, PROJECT_BULLETS};
use crate::resume::text::{bulletize, non_empty_lines, pad_bullets, pipe_items, split_block, BULLET};
use crate::tailoring::prompts::{build_bullets_prompt, build_roles_prompt, build_summary_prompt};

/// Most roles kept on the target-roles line.
pub const MAX_TARGET_ROLES: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewrittenBlock {
    pub content: String,
    /// Bullets or roles the model actually returned, before cutting or
    /// padding. Absent for summaries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returned: Option<usize>,
}

/// Bullet limit for a block: the `[4, 4, 2]` experience slots by job number,
/// 2 for projects and anything else.
pub fn bullet_limit(section: Section, subsection: &str) -> usize {
    match section {
        Section::ProfessionalExperience => subsection
            .strip_prefix("job_")
            .and_then(|n| n.parse::<usize>().ok())
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| JOB_BULLETS.get(i).copied())
            .unwrap_or(PROJECT_BULLETS),
        _ => PROJECT_BULLETS,
    }
}

/// Bullet lines of model output, marker stripped.
pub fn extract_bullets(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| l.starts_with(BULLET))
        .map(|l| l.trim_start_matches(BULLET).trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

pub async fn rewrite_block(
    oracle: &dyn TextOracle,
    job_description: &str,
    block: &str,
    limit: usize,
) -> Result<RewrittenBlock, LlmError> {
    let (header, bullets) = split_block(block);
    let bullets: Vec<String> = bullets.iter().map(|b| bulletize(b)).collect();

    let prompt = build_bullets_prompt(job_description, &header, &bullets, limit);
    let raw = oracle.complete(&prompt).await?;

    let rewritten = extract_bullets(&raw);
    if rewritten.is_empty() {
        warn!("Bullet rewrite returned no bullet lines; block will be filler-padded");
    }
    let returned = rewritten.len();

    let content = std::iter::once(header)
        .chain(pad_bullets(&rewritten, limit))
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    info!("Rewrote block bullets: {returned} returned, {limit} kept");
    Ok(RewrittenBlock {
        content,
        returned: Some(returned),
    })
}

/// Drops a leading `Rewritten X:` echo of the prompt's last line.
fn strip_echo<'a>(line: &'a str, echo: &str) -> &'a str {
    line.strip_prefix(echo).map(str::trim).unwrap_or(line)
}

/// Rewrites the ` | `-separated target-roles line. Keeps the first line that
/// carries roles, drops repeats, and caps it at `MAX_TARGET_ROLES`. An answer
/// with no roles leaves the original line in place.
pub async fn rewrite_target_roles(
    oracle: &dyn TextOracle,
    job_description: &str,
    roles: &str,
) -> Result<RewrittenBlock, LlmError> {
    let raw = oracle
        .complete(&build_roles_prompt(job_description, roles))
        .await?;

    let mut seen = HashSet::new();
    let mut rewritten: Vec<String> = non_empty_lines(&raw)
        .into_iter()
        .map(|l| strip_echo(l, "Rewritten Roles:"))
        .map(pipe_items)
        .find(|items| !items.is_empty())
        .unwrap_or_default()
        .into_iter()
        .filter(|role| seen.insert(role.to_lowercase()))
        .collect();
    let returned = rewritten.len();
    rewritten.truncate(MAX_TARGET_ROLES);

    let content = if rewritten.is_empty() {
        warn!("Target-roles rewrite returned no roles; keeping the original line");
        roles.trim().to_string()
    } else {
        rewritten.join(" | ")
    };

    info!("Rewrote target roles: {returned} returned");
    Ok(RewrittenBlock {
        content,
        returned: Some(returned),
    })
}

/// Rewrites the professional summary into a single paragraph.
pub async fn rewrite_summary(
    oracle: &dyn TextOracle,
    job_description: &str,
    summary: &str,
) -> Result<RewrittenBlock, LlmError> {
    let raw = oracle
        .complete(&build_summary_prompt(job_description, summary))
        .await?;

    let paragraph = non_empty_lines(&raw)
        .into_iter()
        .map(|l| strip_echo(l, "Rewritten Summary:"))
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let content = if paragraph.is_empty() {
        warn!("Summary rewrite was empty; keeping the original summary");
        summary.trim().to_string()
    } else {
        paragraph
    };

    info!("Rewrote summary: {} chars", content.len());
    Ok(RewrittenBlock {
        content,
        returned: None,
    })
}

// Prompt templates for resume tailoring.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{labelled, JSON_ARRAY_ONLY, RESUME_ASSISTANT};
use crate::resume::models::ResumeRow;

/// Output format shown to the model for whole-resume rewrites.
const TAILOR_FORMAT: &str = r#"Return ONLY valid JSON in this format:

[
  {
    "section": "professional_summary",
    "subsection": "summary",
    "content": "..."
  },
  ...
]

Guidelines:
- Skills can be a list of strings
- Experience can include nested objects with title, company, dates, and responsibilities
- Keep personal contact details exactly as given"#;

/// Rules for single-block bullet rewrites. Replace `{limit}` before sending.
const BULLET_RULES_TEMPLATE: &str = "Rules:
- Return exactly {limit} bullets
- Short, punchy, and achievement-driven
- Each bullet must start with \u{2022}";

/// Rules for the target-roles line.
const ROLES_RULES: &str = "Rules:
- Return 3 to 5 roles on a single line, separated by ` | `
- Most relevant role first
- No numbering, no explanations";

/// Rules for the professional summary.
const SUMMARY_RULES: &str = "Rules:
- Write 3 to 4 complete sentences as a single paragraph
- Emphasize the skills and outcomes the job description asks for
- No headings, no bullet points";

/// Whole-resume rewrite prompt: the JD plus the master rows as JSON.
pub fn build_tailor_prompt(job_description: &str, rows: &[ResumeRow]) -> String {
    let rows_json = serde_json::to_string_pretty(rows).unwrap_or_else(|_| "[]".to_string());

    let mut prompt = format!(
        "{RESUME_ASSISTANT} Rewrite the following resume to better match the job description.\n\n\
         {TAILOR_FORMAT}\n{JSON_ARRAY_ONLY}"
    );
    labelled(&mut prompt, "Job Description", job_description);
    labelled(&mut prompt, "Resume Blocks", &rows_json);
    prompt
}

/// Bullet rewrite prompt for one experience or project block.
pub fn build_bullets_prompt(
    job_description: &str,
    header: &str,
    bullets: &[String],
    limit: usize,
) -> String {
    let mut prompt = format!(
        "{RESUME_ASSISTANT} Rewrite the bullet points below to better align with the job description."
    );
    labelled(&mut prompt, "Job Header", header);
    labelled(&mut prompt, "Job Description", job_description);
    labelled(&mut prompt, "Original Bullets", &bullets.join("\n"));
    prompt.push_str("\n\n");
    prompt.push_str(&BULLET_RULES_TEMPLATE.replace("{limit}", &limit.to_string()));
    prompt.push_str("\n\nRewritten Bullets:");
    prompt
}

/// Target-roles rewrite prompt.
pub fn build_roles_prompt(job_description: &str, roles: &str) -> String {
    let mut prompt = format!(
        "{RESUME_ASSISTANT} Rewrite the candidate's list of target roles to align with the job description."
    );
    labelled(&mut prompt, "Job Description", job_description);
    labelled(&mut prompt, "Original Roles", roles);
    prompt.push_str("\n\n");
    prompt.push_str(ROLES_RULES);
    prompt.push_str("\n\nRewritten Roles:");
    prompt
}

/// Professional summary rewrite prompt.
pub fn build_summary_prompt(job_description: &str, summary: &str) -> String {
    let mut prompt = format!(
        "{RESUME_ASSISTANT} Rewrite the candidate's professional summary to better match the job description."
    );
    labelled(&mut prompt, "Job Description", job_description);
    labelled(&mut prompt, "Original Summary", summary);
    prompt.push_str("\n\n");
    prompt.push_str(SUMMARY_RULES);
    prompt.push_str("\n\nRewritten Summary:");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tailor_prompt_embeds_jd_and_rows() {
        let rows = vec![ResumeRow::new("professional_summary", "summary", "Analyst.")];
        let prompt = build_tailor_prompt("Senior data analyst", &rows);
        assert!(prompt.contains("Job Description:\nSenior data analyst"));
        assert!(prompt.contains("\"content\": \"Analyst.\""));
        assert!(prompt.contains("Output raw JSON only"));
    }

    #[test]
    fn test_bullets_prompt_states_limit() {
        let prompt = build_bullets_prompt(
            "JD",
            "**Analyst | Acme**",
            &["\u{2022} built".to_string()],
            2,
        );
        assert!(prompt.contains("Return exactly 2 bullets"));
        assert!(prompt.contains("Job Header:\n**Analyst | Acme**"));
        assert!(prompt.ends_with("Rewritten Bullets:"));
    }

    #[test]
    fn test_roles_and_summary_prompts_carry_original_text() {
        let roles = build_roles_prompt("BI role", "Data Analyst | BI Analyst");
        assert!(roles.contains("Original Roles:\nData Analyst | BI Analyst"));
        assert!(roles.contains("separated by ` | `"));
        assert!(roles.ends_with("Rewritten Roles:"));

        let summary = build_summary_prompt("BI role", "Analyst with five years.");
        assert!(summary.contains("Job Description:\nBI role"));
        assert!(summary.contains("Original Summary:\nAnalyst with five years."));
        assert!(summary.ends_with("Rewritten Summary:"));
    }
}

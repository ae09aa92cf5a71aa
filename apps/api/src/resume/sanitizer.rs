//! Resume Sanitizer: the rule engine that turns normalized rows plus the
//! trusted master resume into one canonical, bounded resume.
//!
//! # Output shape
//! Sections are emitted in `Section::ORDER`:
//! - `personal_info`: the 7 contact fields, always from the profile (falling
//!   back to master rows), then `target_roles` (rewrite first, then master)
//! - `professional_summary`: `summary`, rewrite first
//! - `technical_skills`: exactly 4 categories, 5 items each when non-empty
//! - `professional_experience`: ≤ 3 distinct jobs, bullets `[4, 4, 2]`
//! - `education`: at most 1 entry, none when nothing is available
//! - `certifications`: ≤ 3, no placeholders
//! - `projects`: ≤ 4 distinct entries, 2 bullets each
//!
//! The result is a fixed point: sanitizing the output again with the same
//! master resume and profile returns it unchanged.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::resume::models::{
    canonical_label, Profile, ResumeRow, Section, CONTACT_FIELDS, SKILL_CATEGORIES, SUMMARY,
    TARGET_ROLES,
};
use crate::resume::text::{
    header_key, non_empty_lines, pad_bullets, pipe_items, split_block, SKILL_PLACEHOLDER,
};

/// Canonical row cap. Earlier revisions allowed 42.
pub const DEFAULT_ROW_CAP: usize = 40;

/// Bullet counts per experience slot; its length is the job cap.
pub const JOB_BULLETS: [usize; 3] = [4, 4, 2];
pub const MAX_PROJECTS: usize = 4;
pub const PROJECT_BULLETS: usize = 2;
pub const MAX_CERTIFICATIONS: usize = 3;
pub const SKILL_ITEMS: usize = 5;

/// Trusted inputs the rewrite may never override.
#[derive(Debug, Clone, Copy)]
pub struct MasterResume<'a> {
    pub rows: &'a [ResumeRow],
    pub profile: &'a Profile,
}

/// Builds the canonical resume from rewritten rows and the master resume.
pub fn sanitize_resume(
    normalized: &[ResumeRow],
    master: MasterResume<'_>,
    row_cap: usize,
) -> Vec<ResumeRow> {
    let mut rows = Vec::new();

    rows.extend(personal_info(normalized, master));
    rows.extend(summary(normalized, master.rows));
    rows.extend(technical_skills(normalized, master.rows));
    rows.extend(experience(normalized, master.rows));
    rows.extend(education(normalized, master.rows));
    rows.extend(certifications(normalized, master.rows));
    rows.extend(projects(normalized, master.rows));

    let rows = dedup_target_roles(rows.into_iter().filter(|r| !r.is_blank()).collect());
    let rows = enforce_row_cap(rows, row_cap);

    info!(
        "Sanitized resume: {} rows ({} rewritten, {} master)",
        rows.len(),
        normalized.len(),
        master.rows.len()
    );
    rows
}

// ────────────────────────────────────────────────────────────────────────────
// Section rules
// ────────────────────────────────────────────────────────────────────────────

fn personal_info(normalized: &[ResumeRow], master: MasterResume<'_>) -> Vec<ResumeRow> {
    let section = Section::PersonalInfo;

    let mut rows: Vec<ResumeRow> = CONTACT_FIELDS
        .iter()
        .map(|&field| {
            let value = master
                .profile
                .field(field)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .or_else(|| lookup(master.rows, section, field))
                .unwrap_or_default();
            ResumeRow::new(section.as_str(), field, value)
        })
        .collect();

    let target_roles = lookup(normalized, section, TARGET_ROLES)
        .or_else(|| lookup(master.rows, section, TARGET_ROLES))
        .unwrap_or_default();
    rows.push(ResumeRow::new(section.as_str(), TARGET_ROLES, target_roles));
    rows
}

fn summary(normalized: &[ResumeRow], master: &[ResumeRow]) -> Option<ResumeRow> {
    let section = Section::ProfessionalSummary;
    lookup(normalized, section, SUMMARY)
        .or_else(|| lookup(master, section, SUMMARY))
        .map(|text| ResumeRow::new(section.as_str(), SUMMARY, text))
}

fn technical_skills(normalized: &[ResumeRow], master: &[ResumeRow]) -> Vec<ResumeRow> {
    let section = Section::TechnicalSkills;
    SKILL_CATEGORIES
        .iter()
        .map(|&category| {
            let items = skill_lookup(normalized, category)
                .or_else(|| skill_lookup(master, category))
                .map(pipe_items)
                .unwrap_or_default();
            ResumeRow::new(section.as_str(), category, pad_skills(items))
        })
        .collect()
}

/// Caps a category at `SKILL_ITEMS`, padding with placeholders. An empty
/// category stays empty.
pub fn pad_skills(mut items: Vec<String>) -> String {
    if items.is_empty() {
        return String::new();
    }
    items.resize(SKILL_ITEMS, SKILL_PLACEHOLDER.to_string());
    items.join(" | ")
}

fn experience(normalized: &[ResumeRow], master: &[ResumeRow]) -> Vec<ResumeRow> {
    let section = Section::ProfessionalExperience;
    distinct_blocks(normalized, master, section, JOB_BULLETS.len())
        .into_iter()
        .zip(JOB_BULLETS)
        .enumerate()
        .map(|(i, ((header, bullets), limit))| {
            ResumeRow::new(
                section.as_str(),
                format!("job_{}", i + 1),
                assemble(&header, &bullets, limit),
            )
        })
        .collect()
}

fn projects(normalized: &[ResumeRow], master: &[ResumeRow]) -> Vec<ResumeRow> {
    let section = Section::Projects;
    distinct_blocks(normalized, master, section, MAX_PROJECTS)
        .into_iter()
        .enumerate()
        .map(|(i, (header, bullets))| {
            ResumeRow::new(
                section.as_str(),
                format!("proj_{}", i + 1),
                assemble(&header, &bullets, PROJECT_BULLETS),
            )
        })
        .collect()
}

fn education(normalized: &[ResumeRow], master: &[ResumeRow]) -> Option<ResumeRow> {
    let section = Section::Education;
    candidates(normalized, master, section)
        .next()
        .map(|content| ResumeRow::new(section.as_str(), "edu_1", non_empty_lines(content).join("\n")))
}

fn certifications(normalized: &[ResumeRow], master: &[ResumeRow]) -> Vec<ResumeRow> {
    let section = Section::Certifications;
    let mut seen = HashSet::new();
    candidates(normalized, master, section)
        .map(str::trim)
        .filter(|content| seen.insert(content.to_string()))
        .take(MAX_CERTIFICATIONS)
        .enumerate()
        .map(|(i, content)| ResumeRow::new(section.as_str(), format!("cert_{}", i + 1), content))
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// First non-empty content for `(section, subsection)`.
fn lookup<'a>(rows: &'a [ResumeRow], section: Section, subsection: &str) -> Option<&'a str> {
    rows.iter()
        .filter(|r| r.in_section(section) && r.subsection.trim() == subsection)
        .map(|r| r.content.trim())
        .find(|c| !c.is_empty())
}

/// Skill categories are matched on their canonical label so that display
/// names such as `Programming Languages` from hand-edited files still resolve.
fn skill_lookup<'a>(rows: &'a [ResumeRow], category: &str) -> Option<&'a str> {
    rows.iter()
        .filter(|r| r.in_section(Section::TechnicalSkills) && canonical_label(&r.subsection) == category)
        .map(|r| r.content.trim())
        .find(|c| !c.is_empty())
}

/// Non-empty contents of a section, rewrite rows first, then master rows.
fn candidates<'a>(
    normalized: &'a [ResumeRow],
    master: &'a [ResumeRow],
    section: Section,
) -> impl Iterator<Item = &'a str> {
    normalized
        .iter()
        .chain(master.iter())
        .filter(move |r| r.in_section(section))
        .map(|r| r.content.as_str())
        .filter(|c| !c.trim().is_empty())
}

/// Header + bullet blocks, distinct by header, capped at `limit` entries.
fn distinct_blocks(
    normalized: &[ResumeRow],
    master: &[ResumeRow],
    section: Section,
    limit: usize,
) -> Vec<(String, Vec<String>)> {
    let mut seen = HashSet::new();
    let blocks: Vec<_> = candidates(normalized, master, section)
        .map(split_block)
        .filter(|(header, bullets)| seen.insert(block_key(header, bullets)))
        .take(limit)
        .collect();
    debug!("{}: kept {} block(s)", section.as_str(), blocks.len());
    blocks
}

/// Identity of a block. Header-less blocks are told apart by their bullets.
fn block_key(header: &str, bullets: &[String]) -> (bool, String) {
    if header.is_empty() {
        (false, header_key(&bullets.join("\n")))
    } else {
        (true, header_key(header))
    }
}

fn assemble(header: &str, bullets: &[String], limit: usize) -> String {
    let header = (!header.is_empty()).then(|| header.to_string());
    header
        .into_iter()
        .chain(pad_bullets(bullets, limit))
        .collect::<Vec<_>>()
        .join("\n")
}

fn dedup_target_roles(rows: Vec<ResumeRow>) -> Vec<ResumeRow> {
    let mut seen = false;
    rows.into_iter()
        .filter(|r| {
            if r.in_section(Section::PersonalInfo) && r.subsection == TARGET_ROLES {
                let first = !seen;
                seen = true;
                first
            } else {
                true
            }
        })
        .collect()
}

/// Drops rows from the tail until `cap` is met, never touching `personal_info`.
pub fn enforce_row_cap(rows: Vec<ResumeRow>, cap: usize) -> Vec<ResumeRow> {
    let personal = rows
        .iter()
        .filter(|r| r.in_section(Section::PersonalInfo))
        .count();
    let mut budget = cap.saturating_sub(personal);

    rows.into_iter()
        .filter(|r| {
            if r.in_section(Section::PersonalInfo) {
                return true;
            }
            if budget == 0 {
                return false;
            }
            budget -= 1;
            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::text::{BULLET, FILLER_PHRASES};

    fn profile() -> Profile {
        Profile {
            name: "Jordan Lee".to_string(),
            location: "San Diego, CA".to_string(),
            email: "jordan@example.com".to_string(),
            phone: "555-0100".to_string(),
            linkedin: "linkedin.com/in/jordan".to_string(),
            github: "github.com/jordan".to_string(),
            portfolio: "jordan.dev".to_string(),
        }
    }

    fn row(section: &str, subsection: &str, content: &str) -> ResumeRow {
        ResumeRow::new(section, subsection, content)
    }

    fn job(header: &str, bullets: usize) -> String {
        let mut lines = vec![format!("**{header}**")];
        lines.extend((1..=bullets).map(|i| format!("{BULLET} {header} win {i}")));
        lines.join("\n")
    }

    fn master_rows() -> Vec<ResumeRow> {
        vec![
            row("personal_info", "name", "Master Name"),
            row("personal_info", "email", "master@example.com"),
            row("personal_info", "target_roles", "Data Analyst | BI Analyst"),
            row("professional_summary", "summary", "Master summary."),
            row("technical_skills", "programming_languages", "Python | SQL | R"),
            row("technical_skills", "Tools Platforms", "Tableau | Excel"),
            row("professional_experience", "job_1", &job("Analyst | Acme | 2021", 3)),
            row("professional_experience", "job_2", &job("Intern | Beta | 2020", 1)),
            row("education", "edu_1", "**BS Math | UCSD | 2019**"),
            row("education", "edu_2", "**HS Diploma | Central | 2015**"),
            row("projects", "proj_1", "**Dashboard**\n\u{2022} Built it"),
        ]
    }

    fn bullets_of(content: &str) -> usize {
        content.lines().filter(|l| l.starts_with(BULLET)).count()
    }

    fn section_rows<'a>(rows: &'a [ResumeRow], section: &str) -> Vec<&'a ResumeRow> {
        rows.iter().filter(|r| r.section == section).collect()
    }

    #[test]
    fn test_personal_info_locked_to_profile_except_target_roles() {
        let profile = profile();
        let master = master_rows();
        let normalized = vec![
            row("personal_info", "name", "Hallucinated Name"),
            row("personal_info", "email", "fake@example.com"),
            row("personal_info", "target_roles", "ML Engineer | Data Scientist"),
        ];

        let out = sanitize_resume(&normalized, MasterResume { rows: &master, profile: &profile }, DEFAULT_ROW_CAP);
        let personal = section_rows(&out, "personal_info");

        let subs: Vec<_> = personal.iter().map(|r| r.subsection.as_str()).collect();
        assert_eq!(
            subs,
            vec!["name", "location", "email", "phone", "linkedin", "github", "portfolio", "target_roles"]
        );
        assert_eq!(personal[0].content, "Jordan Lee");
        assert_eq!(personal[2].content, "jordan@example.com");
        assert_eq!(personal[7].content, "ML Engineer | Data Scientist");
    }

    #[test]
    fn test_contact_falls_back_to_master_rows_when_profile_blank() {
        let profile = Profile::default();
        let master = master_rows();
        let out = sanitize_resume(&[], MasterResume { rows: &master, profile: &profile }, DEFAULT_ROW_CAP);
        assert_eq!(out[0], row("personal_info", "name", "Master Name"));
        assert_eq!(out[2], row("personal_info", "email", "master@example.com"));
        assert_eq!(out[1], row("personal_info", "location", ""));
        assert_eq!(out[7], row("personal_info", "target_roles", "Data Analyst | BI Analyst"));
    }

    #[test]
    fn test_summary_prefers_rewrite() {
        let profile = profile();
        let master = master_rows();
        let normalized = vec![row("professional_summary", "summary", "Tailored summary.")];
        let out = sanitize_resume(&normalized, MasterResume { rows: &master, profile: &profile }, DEFAULT_ROW_CAP);
        assert_eq!(section_rows(&out, "professional_summary")[0].content, "Tailored summary.");

        let out = sanitize_resume(&[], MasterResume { rows: &master, profile: &profile }, DEFAULT_ROW_CAP);
        assert_eq!(section_rows(&out, "professional_summary")[0].content, "Master summary.");
    }

    #[test]
    fn test_skills_always_four_categories_padded_to_five() {
        let profile = profile();
        let master = master_rows();
        let normalized = vec![row("technical_skills", "programming_languages", "Python | SQL")];
        let out = sanitize_resume(&normalized, MasterResume { rows: &master, profile: &profile }, DEFAULT_ROW_CAP);
        let skills = section_rows(&out, "technical_skills");

        assert_eq!(skills.len(), 4);
        assert_eq!(skills[0].content, "Python | SQL | ... | ... | ...");
        assert_eq!(skills[1].content, "");
        assert_eq!(skills[2].subsection, "tools_platforms");
        assert_eq!(skills[2].content, "Tableau | Excel | ... | ... | ...");
        assert_eq!(skills[3].content, "");
    }

    #[test]
    fn test_skills_capped_at_five() {
        assert_eq!(
            pad_skills(pipe_items("a | b | c | d | e | f | g")),
            "a | b | c | d | e"
        );
    }

    #[test]
    fn test_experience_long_job_truncated_without_filler() {
        let profile = profile();
        let master = master_rows();
        let normalized = vec![row(
            "professional_experience",
            "job_1",
            &job("Senior Analyst | Gamma | 2023", 6),
        )];

        let out = sanitize_resume(&normalized, MasterResume { rows: &master, profile: &profile }, DEFAULT_ROW_CAP);
        let jobs = section_rows(&out, "professional_experience");

        assert_eq!(jobs.len(), 3);
        let lines: Vec<_> = jobs[0].content.lines().collect();
        assert_eq!(lines[0], "**Senior Analyst | Gamma | 2023**");
        assert_eq!(&lines[1..], &[
            "\u{2022} Senior Analyst | Gamma | 2023 win 1",
            "\u{2022} Senior Analyst | Gamma | 2023 win 2",
            "\u{2022} Senior Analyst | Gamma | 2023 win 3",
            "\u{2022} Senior Analyst | Gamma | 2023 win 4",
        ]);
        assert!(FILLER_PHRASES.iter().all(|p| !jobs[0].content.contains(p)));
        assert_eq!(jobs[1].subsection, "job_2");
        assert!(jobs[1].content.starts_with("**Analyst | Acme | 2021**"));
        assert_eq!(
            jobs.iter().map(|j| bullets_of(&j.content)).collect::<Vec<_>>(),
            vec![4, 4, 2]
        );
    }

    #[test]
    fn test_experience_dedups_rewritten_master_jobs() {
        let profile = profile();
        let master = master_rows();
        let normalized = vec![row(
            "professional_experience",
            "job_1",
            &job("analyst |  Acme | 2021", 2),
        )];

        let out = sanitize_resume(&normalized, MasterResume { rows: &master, profile: &profile }, DEFAULT_ROW_CAP);
        let jobs = section_rows(&out, "professional_experience");
        assert_eq!(jobs.len(), 2);
        assert!(jobs[0].content.contains("analyst |  Acme | 2021 win 1"));
        assert!(jobs[1].content.starts_with("**Intern | Beta | 2020**"));
        assert_eq!(bullets_of(&jobs[1].content), 4);
    }

    #[test]
    fn test_education_single_entry_or_none() {
        let profile = profile();
        let master = master_rows();
        let out = sanitize_resume(&[], MasterResume { rows: &master, profile: &profile }, DEFAULT_ROW_CAP);
        let edu = section_rows(&out, "education");
        assert_eq!(edu.len(), 1);
        assert_eq!(edu[0].subsection, "edu_1");
        assert_eq!(edu[0].content, "**BS Math | UCSD | 2019**");

        let out = sanitize_resume(&[], MasterResume { rows: &[], profile: &profile }, DEFAULT_ROW_CAP);
        assert!(section_rows(&out, "education").is_empty());
    }

    #[test]
    fn test_zero_certifications_emit_no_rows() {
        let profile = profile();
        let master = master_rows();
        let out = sanitize_resume(&[], MasterResume { rows: &master, profile: &profile }, DEFAULT_ROW_CAP);
        assert!(section_rows(&out, "certifications").is_empty());
    }

    #[test]
    fn test_certifications_capped_and_deduped() {
        let profile = profile();
        let master = vec![
            row("certifications", "cert_0", "AWS | 2023"),
            row("certifications", "cert_1", "GCP | 2022"),
        ];
        let normalized = vec![
            row("certifications", "cert_1", "AWS | 2023"),
            row("certifications", "cert_2", "Azure | 2024"),
            row("certifications", "cert_3", ""),
            row("certifications", "cert_4", "Snowflake | 2021"),
        ];
        let out = sanitize_resume(&normalized, MasterResume { rows: &master, profile: &profile }, DEFAULT_ROW_CAP);
        let certs: Vec<_> = section_rows(&out, "certifications")
            .iter()
            .map(|r| (r.subsection.clone(), r.content.clone()))
            .collect();
        assert_eq!(
            certs,
            vec![
                ("cert_1".to_string(), "AWS | 2023".to_string()),
                ("cert_2".to_string(), "Azure | 2024".to_string()),
                ("cert_3".to_string(), "Snowflake | 2021".to_string()),
            ]
        );
    }

    #[test]
    fn test_projects_capped_at_four_with_two_bullets() {
        let profile = profile();
        let master = master_rows();
        let normalized: Vec<_> = (1..=6)
            .map(|i| row("projects", &format!("p{i}"), &job(&format!("Project {i}"), i % 4)))
            .chain(std::iter::once(row("projects", "empty", "  ")))
            .collect();

        let out = sanitize_resume(&normalized, MasterResume { rows: &master, profile: &profile }, DEFAULT_ROW_CAP);
        let projects = section_rows(&out, "projects");
        assert_eq!(projects.len(), 4);
        for (i, p) in projects.iter().enumerate() {
            assert_eq!(p.subsection, format!("proj_{}", i + 1));
            assert_eq!(bullets_of(&p.content), 2);
        }
        assert!(projects[0].content.starts_with("**Project 1**"));
    }

    #[test]
    fn test_sections_in_canonical_order() {
        let profile = profile();
        let master = master_rows();
        let normalized = vec![
            row("projects", "p", "**P**"),
            row("certifications", "c", "Cert"),
            row("professional_summary", "summary", "S"),
        ];
        let out = sanitize_resume(&normalized, MasterResume { rows: &master, profile: &profile }, DEFAULT_ROW_CAP);

        let rank = |s: &str| Section::ORDER.iter().position(|x| x.as_str() == s).unwrap();
        let ranks: Vec<_> = out.iter().map(|r| rank(&r.section)).collect();
        let mut sorted = ranks.clone();
        sorted.sort();
        assert_eq!(ranks, sorted);
    }

    #[test]
    fn test_bullet_only_blocks_keep_fixed_bullet_counts() {
        let profile = profile();
        let raw = serde_json::json!([
            {"section": "professional_experience", "content": ["\u{2022} Built dashboards", "\u{2022} Automated reports"]},
            {"section": "professional_experience", "content": "\u{2022} Cleaned data"},
            {"section": "professional_experience", "content": ["\u{2022} Built dashboards", "\u{2022} Automated reports"]},
            {"section": "professional_experience", "content": "\u{2022} Ran standups\n\u{2022} Wrote specs\n\u{2022} Triaged bugs"},
            {"section": "projects", "content": "\u{2022} Indexed docs\n\u{2022} Ranked results\n\u{2022} Cached queries"},
            {"section": "projects", "content": "\u{2022} Scraped postings"}
        ]);
        let normalized = crate::resume::normalizer::normalize_blocks(raw.as_array().unwrap());
        let master = MasterResume { rows: &[], profile: &profile };

        let out = sanitize_resume(&normalized, master, DEFAULT_ROW_CAP);
        let jobs = section_rows(&out, "professional_experience");
        let projects = section_rows(&out, "projects");

        assert_eq!(
            jobs.iter().map(|j| bullets_of(&j.content)).collect::<Vec<_>>(),
            vec![4, 4, 2]
        );
        assert_eq!(
            jobs[0].content,
            format!(
                "\u{2022} Built dashboards\n\u{2022} Automated reports\n\u{2022} {}\n\u{2022} {}",
                FILLER_PHRASES[2], FILLER_PHRASES[3]
            )
        );
        assert!(jobs[1].content.starts_with("\u{2022} Cleaned data\n"));
        assert!(jobs[2].content.starts_with("\u{2022} Ran standups\n\u{2022} Wrote specs"));

        assert_eq!(projects.len(), 2);
        assert!(projects.iter().all(|p| bullets_of(&p.content) == 2));
        assert!(projects
            .iter()
            .all(|p| p.content.lines().all(|l| l.starts_with(BULLET))));

        let again = sanitize_resume(&out, master, DEFAULT_ROW_CAP);
        assert_eq!(out, again);
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let profile = profile();
        let master = master_rows();
        let normalized = vec![
            row("personal_info", "target_roles", "ML Engineer"),
            row("technical_skills", "programming_languages", "Rust"),
            row("professional_experience", "job_1", &job("Lead | Delta | 2024", 1)),
            row("professional_experience", "job_2", "\u{2022} headerless bullet"),
            row("certifications", "cert_1", "AWS | 2023"),
            row("projects", "proj_1", &job("Search", 5)),
        ];

        let once = sanitize_resume(&normalized, MasterResume { rows: &master, profile: &profile }, DEFAULT_ROW_CAP);
        let twice = sanitize_resume(&once, MasterResume { rows: &master, profile: &profile }, DEFAULT_ROW_CAP);
        assert_eq!(once, twice);
        assert_eq!(
            section_rows(&once, "professional_experience")
                .iter()
                .map(|j| bullets_of(&j.content))
                .collect::<Vec<_>>(),
            vec![4, 4, 2]
        );
    }

    #[test]
    fn test_row_cap_never_drops_personal_info() {
        let profile = profile();
        let master = master_rows();
        let out = sanitize_resume(&[], MasterResume { rows: &master, profile: &profile }, 10);
        assert_eq!(out.len(), 10);
        assert_eq!(section_rows(&out, "personal_info").len(), 8);
        assert_eq!(out[8].section, "professional_summary");

        let out = sanitize_resume(&[], MasterResume { rows: &master, profile: &profile }, 3);
        assert_eq!(out.len(), 8);
        assert!(out.iter().all(|r| r.section == "personal_info"));
    }

    #[test]
    fn test_enforce_row_cap_truncates_tail() {
        let rows: Vec<_> = (0..50)
            .map(|i| row("projects", &format!("p{i}"), "x"))
            .collect();
        let capped = enforce_row_cap(rows, DEFAULT_ROW_CAP);
        assert_eq!(capped.len(), DEFAULT_ROW_CAP);
        assert_eq!(capped.last().unwrap().subsection, "p39");
    }

    #[test]
    fn test_dedup_target_roles_keeps_first() {
        let rows = vec![
            row("personal_info", "target_roles", "first"),
            row("personal_info", "target_roles", "second"),
            row("projects", "target_roles", "unrelated"),
        ];
        let out = dedup_target_roles(rows);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].content, "first");
    }
}

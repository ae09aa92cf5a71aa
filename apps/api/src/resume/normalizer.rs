//! Block Normalizer: flattens the heterogeneous blocks parsed out of oracle
//! text into `ResumeRow`s with canonical section names.
//!
//! The oracle answers each section in whatever shape it likes: `subsection`
//! and `content` may each be a string, a list of strings, a mapping, or a list
//! of mappings. Both fields are lifted into `FieldShape` first and every
//! section rule matches on that union. Nothing here can fail; unusable input is
//! skipped with a warning.
//!
//! Encounter order is preserved. Section ordering is the sanitizer's job.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::resume::models::{canonical_label, ResumeRow, Section, TARGET_ROLES};
use crate::resume::text::{bulletize, join_present, safe_str, string_list};

type Entry = Map<String, Value>;

/// The shape a `subsection` or `content` field arrived in.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldShape {
    Scalar(String),
    List(Vec<String>),
    Entries(Vec<Entry>),
}

impl FieldShape {
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Object(map)) => FieldShape::Entries(vec![map.clone()]),
            Some(Value::Array(items))
                if !items.is_empty() && items.iter().all(Value::is_object) =>
            {
                FieldShape::Entries(
                    items
                        .iter()
                        .filter_map(|item| item.as_object().cloned())
                        .collect(),
                )
            }
            Some(Value::Array(items)) => {
                let dropped = items.iter().filter(|i| i.is_object()).count();
                if dropped > 0 {
                    warn!("Dropping {dropped} mapping(s) mixed into a string list");
                }
                FieldShape::List(string_list(value))
            }
            other => FieldShape::Scalar(safe_str(other)),
        }
    }

    /// Text form of a scalar or list; mappings have no text form.
    fn text(&self, separator: &str) -> Option<String> {
        match self {
            FieldShape::Scalar(s) => Some(s.clone()),
            FieldShape::List(items) => Some(items.join(separator)),
            FieldShape::Entries(_) => None,
        }
    }

    fn scalar(&self) -> Option<&str> {
        match self {
            FieldShape::Scalar(s) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    fn entries(&self) -> Option<&[Entry]> {
        match self {
            FieldShape::Entries(entries) => Some(entries),
            _ => None,
        }
    }
}

/// Sections whose rows are numbered `{prefix}_{n}` in encounter order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Numbered {
    Job,
    Project,
    Education,
    Certification,
}

impl Numbered {
    fn section(self) -> Section {
        match self {
            Numbered::Job => Section::ProfessionalExperience,
            Numbered::Project => Section::Projects,
            Numbered::Education => Section::Education,
            Numbered::Certification => Section::Certifications,
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            Numbered::Job => "job",
            Numbered::Project => "proj",
            Numbered::Education => "edu",
            Numbered::Certification => "cert",
        }
    }
}

/// Running counters, one per numbered section.
#[derive(Default)]
struct Counters {
    job: usize,
    project: usize,
    education: usize,
    certification: usize,
}

impl Counters {
    fn next(&mut self, kind: Numbered) -> String {
        let slot = match kind {
            Numbered::Job => &mut self.job,
            Numbered::Project => &mut self.project,
            Numbered::Education => &mut self.education,
            Numbered::Certification => &mut self.certification,
        };
        *slot += 1;
        format!("{}_{slot}", kind.prefix())
    }
}

/// Normalizes raw oracle blocks into flat resume rows.
pub fn normalize_blocks(raw: &[Value]) -> Vec<ResumeRow> {
    let mut rows = Vec::new();
    let mut counters = Counters::default();

    for (index, block) in raw.iter().enumerate() {
        let Some(block) = block.as_object() else {
            warn!("Skipping block {index}: not a mapping");
            continue;
        };

        let label = canonical_label(&safe_str(block.get("section")));
        let subsection = FieldShape::from_value(block.get("subsection"));
        let content = FieldShape::from_value(block.get("content"));

        match Section::from_label(&label) {
            Some(Section::ProfessionalExperience) => expand_entries(
                Numbered::Job,
                &subsection,
                &content,
                render_job,
                &mut counters,
                &mut rows,
            ),
            Some(Section::Projects) => expand_entries(
                Numbered::Project,
                &subsection,
                &content,
                render_project,
                &mut counters,
                &mut rows,
            ),
            Some(Section::Education) => expand_entries(
                Numbered::Education,
                &subsection,
                &content,
                render_education,
                &mut counters,
                &mut rows,
            ),
            Some(Section::Certifications) => {
                expand_certifications(&subsection, &content, &mut counters, &mut rows)
            }
            Some(Section::TechnicalSkills) => expand_skills(&subsection, &content, &mut rows),
            _ => expand_keyed(&label, &subsection, &content, &mut rows),
        }
    }

    debug!("Normalized {} raw blocks into {} rows", raw.len(), rows.len());
    rows
}

/// Header + bullet sections: one row per entry, numbered in encounter order.
/// Entries may sit in either field; plain text passes through unchanged.
fn expand_entries(
    kind: Numbered,
    subsection: &FieldShape,
    content: &FieldShape,
    render: fn(&Entry) -> String,
    counters: &mut Counters,
    rows: &mut Vec<ResumeRow>,
) {
    let section = kind.section();
    if let Some(entries) = content.entries().or_else(|| subsection.entries()) {
        for entry in entries {
            let rendered = render(entry);
            if rendered.is_empty() {
                continue;
            }
            rows.push(ResumeRow::new(section.as_str(), counters.next(kind), rendered));
        }
        return;
    }

    let text = content.text("\n").unwrap_or_default();
    if !text.trim().is_empty() {
        rows.push(ResumeRow::new(section.as_str(), counters.next(kind), text));
    }
}

fn expand_certifications(
    subsection: &FieldShape,
    content: &FieldShape,
    counters: &mut Counters,
    rows: &mut Vec<ResumeRow>,
) {
    let kind = Numbered::Certification;
    let section = kind.section();
    let lines: Vec<String> = match content.entries().or_else(|| subsection.entries()) {
        Some(entries) => entries
            .iter()
            .map(|e| {
                let name = field(e, &["name", "title"]);
                let date = dates(e, &["date", "dates"]);
                join_present(&[&name, &date])
            })
            .collect(),
        None => match content {
            FieldShape::List(items) => items.clone(),
            FieldShape::Scalar(s) => vec![s.clone()],
            FieldShape::Entries(_) => vec![],
        },
    };

    for line in lines {
        let line = trim_separators(&line);
        if !line.is_empty() {
            rows.push(ResumeRow::new(section.as_str(), counters.next(kind), line));
        }
    }
}

fn expand_skills(subsection: &FieldShape, content: &FieldShape, rows: &mut Vec<ResumeRow>) {
    let section = Section::TechnicalSkills.as_str();

    if let Some(entries) = content.entries() {
        for entry in entries {
            for (category, items) in entry {
                let items = string_list(Some(items));
                rows.push(ResumeRow::new(
                    section,
                    canonical_label(category),
                    items.join(" | "),
                ));
            }
        }
        return;
    }

    if let (Some(category), Some(text)) = (subsection.scalar(), content.text(" | ")) {
        rows.push(ResumeRow::new(section, canonical_label(category), text));
    }
}

/// Single-valued sections (and anything unrecognized) need a subsection name.
/// A mapping content is read as `subsection → content` pairs.
fn expand_keyed(label: &str, subsection: &FieldShape, content: &FieldShape, rows: &mut Vec<ResumeRow>) {
    if let Some(entries) = content.entries() {
        for entry in entries {
            for (key, value) in entry {
                let key = canonical_label(key);
                let text = join_items(&key, &string_list(Some(value)));
                rows.push(ResumeRow::new(label, key, text));
            }
        }
        return;
    }

    let Some(key) = subsection.scalar() else {
        debug!("Dropping '{label}' block without a subsection");
        return;
    };

    let text = match content {
        FieldShape::List(items) => join_items(key, items),
        other => other.text("\n").unwrap_or_default(),
    };
    rows.push(ResumeRow::new(label, key, text));
}

fn join_items(key: &str, items: &[String]) -> String {
    if key == TARGET_ROLES {
        items.join(" | ")
    } else {
        items.join("\n")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entry renderers
// ────────────────────────────────────────────────────────────────────────────

fn render_job(entry: &Entry) -> String {
    let title = field(entry, &["title", "role", "position"]);
    let company = field(entry, &["company", "employer"]);
    let dates = dates(entry, &["dates", "date"]);
    let bullets = list(entry, &["responsibilities", "bullets"]);
    render_block(&join_present(&[&title, &company, &dates]), &bullets)
}

fn render_project(entry: &Entry) -> String {
    let title = field(entry, &["title", "name"]);
    let bullets = list(entry, &["description", "bullets"]);
    render_block(&title, &bullets)
}

fn render_education(entry: &Entry) -> String {
    let degree = field(entry, &["degree"]);
    let school = field(entry, &["school", "institution"]);
    let date = dates(entry, &["date", "dates"]);
    let bullets = list(entry, &["highlights", "bullets"]);
    render_block(&join_present(&[&degree, &school, &date]), &bullets)
}

fn render_block(header: &str, bullets: &[String]) -> String {
    let mut lines = Vec::with_capacity(bullets.len() + 1);
    if !header.is_empty() {
        lines.push(format!("**{header}**"));
    }
    lines.extend(bullets.iter().map(|b| bulletize(b)));
    lines.join("\n")
}

/// First present key among `keys`, coerced to a string.
fn field(entry: &Entry, keys: &[&str]) -> String {
    keys.iter()
        .map(|k| safe_str(entry.get(*k)))
        .find(|v| !v.is_empty())
        .unwrap_or_default()
}

/// Dates may be a single string or a list of tokens joined by spaces.
fn dates(entry: &Entry, keys: &[&str]) -> String {
    keys.iter()
        .map(|k| string_list(entry.get(*k)).join(" "))
        .find(|v| !v.is_empty())
        .unwrap_or_default()
}

fn list(entry: &Entry, keys: &[&str]) -> Vec<String> {
    keys.iter()
        .map(|k| string_list(entry.get(*k)))
        .find(|v| !v.is_empty())
        .unwrap_or_default()
}

fn trim_separators(line: &str) -> String {
    line.trim()
        .trim_matches(|c: char| c == '|' || c.is_whitespace())
        .to_string()
}

//! Questionnaire parser: turns the free-text intake form into resume rows.
//!
//! Recognised lines:
//! - `**Section Name**` starts a section
//! - `key | value` emits a field row immediately
//! - `- item` and any other text accumulate into the section's paragraph,
//!   flushed as one row when the next header or field line arrives

use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

use crate::resume::models::{canonical_label, ResumeRow};

fn header_pattern() -> &'static Regex {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    HEADER.get_or_init(|| Regex::new(r"^\*\*(.+?)\*\*").expect("Invalid header regex"))
}

fn bullet_pattern() -> &'static Regex {
    static BULLET: OnceLock<Regex> = OnceLock::new();
    BULLET.get_or_init(|| Regex::new(r"^- (.+)").expect("Invalid bullet regex"))
}

#[derive(Default)]
struct Parser {
    rows: Vec<ResumeRow>,
    section: Option<String>,
    buffer: Vec<String>,
}

impl Parser {
    fn flush(&mut self) {
        let content = self.buffer.join("\n").trim().to_string();
        self.buffer.clear();
        match &self.section {
            Some(section) if !content.is_empty() => {
                self.rows.push(ResumeRow::new(section.clone(), "", content));
            }
            None if !content.is_empty() => {
                warn!("Questionnaire text before any section header dropped");
            }
            _ => {}
        }
    }

    fn field(&mut self, key: &str, value: &str) {
        match &self.section {
            Some(section) => self.rows.push(ResumeRow::new(
                section.clone(),
                canonical_label(key),
                value.trim(),
            )),
            None => warn!("Questionnaire field '{key}' outside any section dropped"),
        }
    }
}

pub fn parse_questionnaire(text: &str) -> Vec<ResumeRow> {
    let mut parser = Parser::default();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(caps) = header_pattern().captures(line) {
            parser.flush();
            parser.section = Some(canonical_label(&caps[1]));
            continue;
        }

        if line.contains('|') && !line.starts_with('-') {
            parser.flush();
            if let Some((key, value)) = line.split_once('|') {
                parser.field(key.trim(), value);
            }
            continue;
        }

        match bullet_pattern().captures(line) {
            Some(caps) => parser.buffer.push(caps[1].trim().to_string()),
            None => parser.buffer.push(line.to_string()),
        }
    }

    parser.flush();
    parser.rows
}

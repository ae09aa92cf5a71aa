//! Resume file codec: CSV / JSON parsing and writing for `ResumeRow` lists.
//!
//! Both formats carry exactly the columns `section, subsection, content`.
//! Files missing any of them are rejected before any row is produced.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::resume::models::ResumeRow;
use crate::resume::text::safe_str;

pub const REQUIRED_COLUMNS: [&str; 3] = ["section", "subsection", "content"];

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Unsupported resume format: {0}")]
    UnsupportedFormat(String),

    #[error("JSON resume must be a list of row objects")]
    NotARowList,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Csv,
    Json,
}

impl ResumeFormat {
    /// Picks the format from a file name extension.
    pub fn from_filename(name: &str) -> Result<Self, CodecError> {
        let ext = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(ResumeFormat::Csv),
            "json" => Ok(ResumeFormat::Json),
            _ => Err(CodecError::UnsupportedFormat(name.to_string())),
        }
    }
}

pub fn parse_rows(format: ResumeFormat, bytes: &[u8]) -> Result<Vec<ResumeRow>, CodecError> {
    match format {
        ResumeFormat::Csv => parse_csv(bytes),
        ResumeFormat::Json => parse_json(bytes),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// CSV
// ────────────────────────────────────────────────────────────────────────────

pub fn parse_csv(bytes: &[u8]) -> Result<Vec<ResumeRow>, CodecError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_lowercase())
        .collect();
    let positions = column_positions(&headers)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cell = |i: usize| record.get(positions[i]).unwrap_or_default().to_string();
        rows.push(ResumeRow::new(cell(0), cell(1), cell(2)));
    }

    debug!("Parsed {} CSV resume rows", rows.len());
    Ok(rows)
}

fn column_positions(headers: &[String]) -> Result<[usize; 3], CodecError> {
    let mut positions = [0; 3];
    let mut missing = Vec::new();
    for (slot, column) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
        match headers.iter().position(|h| h == column) {
            Some(i) => *slot = i,
            None => missing.push(column.to_string()),
        }
    }
    if missing.is_empty() {
        Ok(positions)
    } else {
        Err(CodecError::MissingColumns(missing))
    }
}

/// Writes rows as CSV with minimal quoting; embedded newlines and bullet
/// characters are preserved inside quoted cells.
pub fn write_csv(rows: &[ResumeRow]) -> Result<Vec<u8>, CodecError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(REQUIRED_COLUMNS)?;
    for row in rows {
        writer.write_record([&row.section, &row.subsection, &row.content])?;
    }
    writer.into_inner().map_err(|e| CodecError::Io(e.into_error()))
}

// ────────────────────────────────────────────────────────────────────────────
// JSON
// ────────────────────────────────────────────────────────────────────────────

/// Parses a JSON list of row objects. Non-string cells become `""`.
pub fn parse_json(bytes: &[u8]) -> Result<Vec<ResumeRow>, CodecError> {
    let value: Value = serde_json::from_slice(bytes)?;
    let items = value.as_array().ok_or(CodecError::NotARowList)?;

    let objects = items
        .iter()
        .map(|item| item.as_object().ok_or(CodecError::NotARowList))
        .collect::<Result<Vec<_>, _>>()?;

    if !objects.is_empty() {
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|column| !objects.iter().any(|o| o.contains_key(**column)))
            .map(|column| column.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(CodecError::MissingColumns(missing));
        }
    }

    let rows: Vec<ResumeRow> = objects
        .iter()
        .map(|o| {
            ResumeRow::new(
                safe_str(o.get("section")),
                safe_str(o.get("subsection")),
                safe_str(o.get("content")),
            )
        })
        .collect();

    debug!("Parsed {} JSON resume rows", rows.len());
    Ok(rows)
}

pub fn write_json(rows: &[ResumeRow]) -> Result<Vec<u8>, CodecError> {
    Ok(serde_json::to_vec_pretty(rows)?)
}

/// Prepares rows for a prompt: fields trimmed, rows without a section or
/// without content dropped.
pub fn format_resume_rows(rows: &[ResumeRow]) -> Vec<ResumeRow> {
    rows.iter()
        .map(|r| ResumeRow::new(r.section.trim(), r.subsection.trim(), r.content.trim()))
        .filter(|r| !r.section.is_empty() && !r.content.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_round_trip_preserves_newlines_and_bullets() {
        let rows = vec![
            ResumeRow::new("personal_info", "name", "Jordan Lee"),
            ResumeRow::new(
                "professional_experience",
                "job_1",
                "**Analyst | Acme, Inc. | 2021**\n\u{2022} Built \"quoted\" dashboards",
            ),
        ];
        let bytes = write_csv(&rows).unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();

        assert!(text.starts_with("section,subsection,content\n"));
        assert!(text.contains("personal_info,name,Jordan Lee\n"));
        assert_eq!(parse_csv(&bytes).unwrap(), rows);
    }

    #[test]
    fn test_csv_missing_columns_rejected() {
        let err = parse_csv(b"section,body\nskills,Rust\n").unwrap_err();
        match err {
            CodecError::MissingColumns(cols) => assert_eq!(cols, vec!["subsection", "content"]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_csv_header_case_order_and_extra_columns() {
        let input = "\u{feff}Content,Notes,Section,SubSection\nhello,x,projects,proj_1\nshort\n";
        let rows = parse_csv(input.as_bytes()).unwrap();
        assert_eq!(rows[0], ResumeRow::new("projects", "proj_1", "hello"));
        assert_eq!(rows[1], ResumeRow::new("", "", "short"));
    }

    #[test]
    fn test_json_non_string_cells_become_empty() {
        let input = br#"[
            {"section": "education", "subsection": null, "content": 3.0},
            {"section": "projects", "subsection": "proj_1", "content": "Search", "extra": 1}
        ]"#;
        let rows = parse_json(input).unwrap();
        assert_eq!(rows[0], ResumeRow::new("education", "", ""));
        assert_eq!(rows[1], ResumeRow::new("projects", "proj_1", "Search"));
    }

    #[test]
    fn test_json_requires_list_of_objects_with_columns() {
        assert!(matches!(parse_json(br#"{"section": "x"}"#), Err(CodecError::NotARowList)));
        assert!(matches!(parse_json(br#"["x"]"#), Err(CodecError::NotARowList)));
        assert!(matches!(
            parse_json(br#"[{"section": "x"}]"#),
            Err(CodecError::MissingColumns(_))
        ));
        assert!(parse_json(b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_format_from_filename() {
        assert_eq!(ResumeFormat::from_filename("master.CSV").unwrap(), ResumeFormat::Csv);
        assert_eq!(ResumeFormat::from_filename("a.b.json").unwrap(), ResumeFormat::Json);
        assert!(ResumeFormat::from_filename("resume.docx").is_err());
        assert!(ResumeFormat::from_filename("resume").is_err());
    }

    #[test]
    fn test_format_resume_rows_drops_incomplete_rows() {
        let rows = vec![
            ResumeRow::new(" skills ", " a ", " Rust "),
            ResumeRow::new("", "b", "orphan"),
            ResumeRow::new("skills", "c", "   "),
        ];
        assert_eq!(
            format_resume_rows(&rows),
            vec![ResumeRow::new("skills", "a", "Rust")]
        );
    }
}

//! Shared text helpers for the canonicalization pipeline: bullet padding,
//! safe coercion of loosely-typed values, and block splitting.

use serde_json::Value;

/// Marker that prefixes every bullet line.
pub const BULLET: char = '\u{2022}';

/// Placeholder item used to pad skill categories.
pub const SKILL_PLACEHOLDER: &str = "...";

/// Generic achievement phrases used to fill short bullet lists.
pub const FILLER_PHRASES: [&str; 5] = [
    "Demonstrated adaptability in fast-paced environments",
    "Improved operational efficiency through data insights",
    "Collaborated across departments to meet objectives",
    "Utilized analytical tools to guide business strategy",
    "Supported project deliverables through targeted research",
];

/// Prefixes a line with the bullet marker unless it already has one.
pub fn bulletize(line: &str) -> String {
    let line = line.trim();
    if line.starts_with(BULLET) {
        line.to_string()
    } else {
        format!("{BULLET} {line}")
    }
}

/// Forces a bullet list to exactly `limit` entries.
///
/// Empty lines are dropped and every remaining line gets the bullet marker.
/// Short lists are filled from `FILLER_PHRASES`, choosing the phrase at
/// `current_len % 5` for each new slot; long lists keep their first `limit`.
pub fn pad_bullets<S: AsRef<str>>(lines: &[S], limit: usize) -> Vec<String> {
    let mut bullets: Vec<String> = lines
        .iter()
        .map(|l| l.as_ref().trim())
        .filter(|l| !l.is_empty())
        .map(bulletize)
        .collect();

    while bullets.len() < limit {
        let phrase = FILLER_PHRASES[bullets.len() % FILLER_PHRASES.len()];
        bullets.push(format!("{BULLET} {phrase}"));
    }
    bullets.truncate(limit);
    bullets
}

/// Coerces a loosely-typed JSON value to a trimmed string.
///
/// Only strings carry text; `null`, booleans, numbers, arrays and objects all
/// become `""`. Tabular sources encode missing cells as non-string sentinels,
/// so this never fails.
pub fn safe_str(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        _ => String::new(),
    }
}

/// Coerces a value that may be a string or a list of strings into a list.
pub fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                vec![]
            } else {
                vec![s.to_string()]
            }
        }
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| safe_str(Some(item)))
            .filter(|s| !s.is_empty())
            .collect(),
        _ => vec![],
    }
}

/// Trimmed, non-empty lines of a block.
pub fn non_empty_lines(content: &str) -> Vec<&str> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}

/// Splits a multi-line block into its header line and the remaining lines.
///
/// A block whose first line is already a bullet has no header: the header is
/// `""` and every line is a bullet.
pub fn split_block(content: &str) -> (String, Vec<String>) {
    let lines = non_empty_lines(content);
    match lines.split_first() {
        Some((first, _)) if first.starts_with(BULLET) => (
            String::new(),
            lines.iter().map(|l| l.to_string()).collect(),
        ),
        Some((header, rest)) => (
            header.to_string(),
            rest.iter().map(|l| l.to_string()).collect(),
        ),
        None => (String::new(), vec![]),
    }
}

/// Comparison key for a block header: bold markers removed, whitespace
/// collapsed, lower-cased.
pub fn header_key(header: &str) -> String {
    header
        .replace("**", "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Non-empty ` | `-delimited items.
pub fn pipe_items(content: &str) -> Vec<String> {
    content
        .split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Joins non-empty parts with ` | `, so missing fields never leave stray
/// separators behind.
pub fn join_present(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn count_filler(lines: &[String]) -> usize {
        lines
            .iter()
            .filter(|l| FILLER_PHRASES.iter().any(|p| l.ends_with(p)))
            .count()
    }

    #[test]
    fn test_pad_bullets_always_returns_limit() {
        for limit in 0..8 {
            for len in 0..8 {
                let lines: Vec<String> = (0..len).map(|i| format!("did thing {i}")).collect();
                assert_eq!(pad_bullets(&lines, limit).len(), limit);
            }
        }
    }

    #[test]
    fn test_pad_bullets_long_list_is_prefix_without_filler() {
        let lines = ["a", "\u{2022} b", "c", "d", "e", "f"];
        let out = pad_bullets(&lines, 4);
        assert_eq!(out, vec!["\u{2022} a", "\u{2022} b", "\u{2022} c", "\u{2022} d"]);
        assert_eq!(count_filler(&out), 0);
    }

    #[test]
    fn test_pad_bullets_drops_empty_lines_before_counting() {
        let lines = ["", "   ", "shipped v2", ""];
        let out = pad_bullets(&lines, 2);
        assert_eq!(out[0], "\u{2022} shipped v2");
        assert_eq!(out[1], format!("\u{2022} {}", FILLER_PHRASES[1]));
    }

    #[test]
    fn test_pad_bullets_filler_is_cyclic_and_ordered() {
        let empty: [&str; 0] = [];
        let out = pad_bullets(&empty, 7);
        let expected: Vec<String> = (0..7)
            .map(|i| format!("\u{2022} {}", FILLER_PHRASES[i % 5]))
            .collect();
        assert_eq!(out, expected);
    }

    #[test]
    fn test_pad_bullets_does_not_double_prefix() {
        let out = pad_bullets(&["\u{2022} already"], 1);
        assert_eq!(out, vec!["\u{2022} already"]);
    }

    #[test]
    fn test_safe_str_coerces_non_strings_to_empty() {
        assert_eq!(safe_str(None), "");
        assert_eq!(safe_str(Some(&Value::Null)), "");
        assert_eq!(safe_str(Some(&json!(3.5))), "");
        assert_eq!(safe_str(Some(&json!(true))), "");
        assert_eq!(safe_str(Some(&json!(["x"]))), "");
        assert_eq!(safe_str(Some(&json!("  hi "))), "hi");
    }

    #[test]
    fn test_string_list_accepts_scalar_and_list() {
        assert_eq!(string_list(Some(&json!("one"))), vec!["one"]);
        assert_eq!(
            string_list(Some(&json!(["a", null, "", 4, "b"]))),
            vec!["a", "b"]
        );
        assert!(string_list(Some(&json!({"a": 1}))).is_empty());
    }

    #[test]
    fn test_split_block_and_header_key() {
        let (header, rest) = split_block("\n**Engineer | Acme | 2020**\n\n\u{2022} a\n \u{2022} b ");
        assert_eq!(header, "**Engineer | Acme | 2020**");
        assert_eq!(rest, vec!["\u{2022} a", "\u{2022} b"]);
        assert_eq!(header_key(&header), "engineer | acme | 2020");
        assert_eq!(split_block("   "), (String::new(), vec![]));
    }

    #[test]
    fn test_split_block_bullet_first_has_no_header() {
        let (header, rest) = split_block("\u{2022} Built dashboards\n\u{2022} Automated reports");
        assert_eq!(header, "");
        assert_eq!(rest, vec!["\u{2022} Built dashboards", "\u{2022} Automated reports"]);
    }

    #[test]
    fn test_join_present_skips_empty_parts() {
        assert_eq!(join_present(&["AWS SA", "", " "]), "AWS SA");
        assert_eq!(join_present(&["a", "b", "c"]), "a | b | c");
    }
}

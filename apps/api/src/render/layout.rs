//! Page layout for the single-column resume, computed as a flat list of draw
//! operations. No PDF types appear here; `pdf.rs` replays the list.
//!
//! Coordinates are PDF points with the origin at the bottom-left corner.

use crate::render::font_metrics::{pdf_safe, FontMetricTable, FontStyle};
use crate::render::RenderError;
use crate::resume::models::{ResumeRow, Section, TARGET_ROLES};

pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;
pub const MARGIN: f32 = 50.0;
pub const LINE_HEIGHT: f32 = 13.5;

pub const NAME_SIZE: f32 = 12.0;
pub const SECTION_TITLE_SIZE: f32 = 10.0;
pub const BODY_SIZE: f32 = 8.0;

const TEXT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
const TITLE_RULE_GAP: f32 = 8.0;
const ROW_GAP: f32 = 3.0;
const SECTION_GAP: f32 = 8.0;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        page: usize,
        x: f32,
        y: f32,
        style: FontStyle,
        size: f32,
        text: String,
    },
    Rule {
        page: usize,
        x1: f32,
        x2: f32,
        y: f32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResumeLayout {
    pub pages: usize,
    pub ops: Vec<DrawOp>,
}

struct Cursor {
    page: usize,
    y: f32,
    ops: Vec<DrawOp>,
}

impl Cursor {
    fn new() -> Self {
        Self {
            page: 0,
            y: PAGE_HEIGHT - MARGIN,
            ops: Vec::new(),
        }
    }

    fn text(&mut self, x: f32, style: FontStyle, size: f32, text: impl Into<String>) {
        self.ops.push(DrawOp::Text {
            page: self.page,
            x,
            y: self.y,
            style,
            size,
            text: text.into(),
        });
    }

    /// Moves down by `dy`, starting a new page once less than two line
    /// heights remain.
    fn advance(&mut self, dy: f32) {
        self.y -= dy;
        if self.y < LINE_HEIGHT * 2.0 {
            self.page += 1;
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rich text
// ────────────────────────────────────────────────────────────────────────────

/// A word with its weight and whether whitespace preceded it in the source.
#[derive(Debug, Clone, PartialEq)]
struct Word {
    text: String,
    bold: bool,
    spaced: bool,
}

/// Splits a line on `**` markers into words; odd segments are bold.
fn rich_words(line: &str) -> Vec<Word> {
    let mut words = Vec::new();
    let mut pending_space = false;

    for (i, segment) in line.split("**").enumerate() {
        let bold = i % 2 == 1;
        let starts_spaced = segment.starts_with(char::is_whitespace);
        for (j, word) in segment.split_whitespace().enumerate() {
            words.push(Word {
                text: word.to_string(),
                bold,
                spaced: j > 0 || starts_spaced || pending_space,
            });
            pending_space = false;
        }
        if segment.ends_with(char::is_whitespace) {
            pending_space = true;
        }
    }
    words
}

fn style_of(bold: bool) -> FontStyle {
    if bold {
        FontStyle::Bold
    } else {
        FontStyle::Regular
    }
}

fn word_width(word: &Word, with_space: bool) -> f32 {
    let metrics = FontMetricTable::for_style(style_of(word.bold));
    let space = if with_space {
        metrics.measure_str(" ", BODY_SIZE)
    } else {
        0.0
    };
    space + metrics.measure_str(&word.text, BODY_SIZE)
}

/// Greedy word wrap at `max_width`.
fn wrap_words(words: Vec<Word>, max_width: f32) -> Vec<Vec<Word>> {
    let mut lines: Vec<Vec<Word>> = Vec::new();
    let mut current: Vec<Word> = Vec::new();
    let mut width = 0.0_f32;

    for word in words {
        let w = word_width(&word, !current.is_empty() && word.spaced);
        if !current.is_empty() && width + w > max_width {
            lines.push(std::mem::take(&mut current));
            width = word_width(&word, false);
        } else {
            width += w;
        }
        current.push(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Draws one wrapped line as runs of equal weight.
fn draw_words(cursor: &mut Cursor, line: &[Word]) {
    let mut x = MARGIN;
    let mut run = String::new();
    let mut run_bold = line.first().map(|w| w.bold).unwrap_or(false);

    for (i, word) in line.iter().enumerate() {
        if word.bold != run_bold && !run.is_empty() {
            let style = style_of(run_bold);
            x += flush_run(cursor, x, style, &mut run);
        }
        run_bold = word.bold;
        if i > 0 && word.spaced {
            run.push(' ');
        }
        run.push_str(&word.text);
    }
    if !run.is_empty() {
        flush_run(cursor, x, style_of(run_bold), &mut run);
    }
}

fn flush_run(cursor: &mut Cursor, x: f32, style: FontStyle, run: &mut String) -> f32 {
    let width = FontMetricTable::for_style(style).measure_str(run, BODY_SIZE);
    cursor.text(x, style, BODY_SIZE, std::mem::take(run));
    width
}

fn draw_rich_text(cursor: &mut Cursor, content: &str) {
    for paragraph in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
        for line in wrap_words(rich_words(&pdf_safe(paragraph)), TEXT_WIDTH) {
            draw_words(cursor, &line);
            cursor.advance(LINE_HEIGHT);
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

fn personal<'a>(rows: &'a [ResumeRow], key: &str) -> Option<&'a str> {
    rows.iter()
        .filter(|r| r.in_section(Section::PersonalInfo) && r.subsection == key)
        .map(|r| r.content.trim())
        .find(|c| !c.is_empty())
}

fn portfolio_footer(portfolio: &str) -> String {
    if portfolio.starts_with("http://") || portfolio.starts_with("https://") {
        format!("Self-designed Portfolio: {portfolio}")
    } else {
        format!("Self-designed Portfolio: https://{portfolio}")
    }
}

/// Lays out a canonical resume. `name` and `target_roles` are required.
pub fn layout_resume(rows: &[ResumeRow]) -> Result<ResumeLayout, RenderError> {
    let name = personal(rows, "name").ok_or(RenderError::MissingField("name"))?;
    let target_roles =
        personal(rows, TARGET_ROLES).ok_or(RenderError::MissingField(TARGET_ROLES))?;

    let contact = rows
        .iter()
        .filter(|r| {
            r.in_section(Section::PersonalInfo) && r.subsection != "name" && r.subsection != TARGET_ROLES
        })
        .map(|r| r.content.trim())
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join(" | ");

    let mut cursor = Cursor::new();

    cursor.text(MARGIN, FontStyle::Bold, NAME_SIZE, pdf_safe(name));
    cursor.advance(LINE_HEIGHT);
    if !contact.is_empty() {
        cursor.text(MARGIN, FontStyle::Regular, BODY_SIZE, pdf_safe(&contact));
    }
    cursor.advance(LINE_HEIGHT);
    cursor.text(MARGIN, FontStyle::Oblique, BODY_SIZE, pdf_safe(target_roles));
    cursor.advance((LINE_HEIGHT * 1.25).floor());

    for section in Section::ORDER.iter().skip(1).copied() {
        let group: Vec<&ResumeRow> = rows
            .iter()
            .filter(|r| r.in_section(section) && !r.content.trim().is_empty())
            .collect();
        if group.is_empty() {
            continue;
        }

        cursor.text(MARGIN, FontStyle::Bold, SECTION_TITLE_SIZE, section.title());
        cursor.y -= TITLE_RULE_GAP;
        cursor.ops.push(DrawOp::Rule {
            page: cursor.page,
            x1: MARGIN,
            x2: PAGE_WIDTH - MARGIN,
            y: cursor.y,
        });
        cursor.advance((LINE_HEIGHT * 1.1).floor());

        for row in group {
            draw_rich_text(&mut cursor, &row.content);
            cursor.advance(ROW_GAP);
        }
        cursor.advance(SECTION_GAP);
    }

    if let Some(portfolio) = personal(rows, "portfolio") {
        cursor.y = LINE_HEIGHT * 2.0;
        cursor.text(
            MARGIN,
            FontStyle::Oblique,
            BODY_SIZE,
            pdf_safe(&portfolio_footer(portfolio)),
        );
    }

    Ok(ResumeLayout {
        pages: cursor.page + 1,
        ops: cursor.ops,
    })
}

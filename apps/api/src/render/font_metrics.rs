//! Static glyph-width tables for the PDF builtin Helvetica faces.
//!
//! Widths are AFM advance widths in 1/1000 em. The tables cover ASCII
//! 0x20..=0x7E (95 printable characters); index = `(char as usize) - 32`.
//! Characters outside the table measure as `average_width`.

/// Faces the renderer draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Regular,
    Bold,
    /// Slanted Regular; shares Regular's widths.
    Oblique,
}

/// Character-width table for one face.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    widths: [u16; 95],
    pub average_width: u16,
}

impl FontMetricTable {
    pub fn for_style(style: FontStyle) -> &'static FontMetricTable {
        match style {
            FontStyle::Regular | FontStyle::Oblique => &HELVETICA,
            FontStyle::Bold => &HELVETICA_BOLD,
        }
    }

    /// Rendered width of `s` in points at `size_pt`.
    pub fn measure_str(&self, s: &str, size_pt: f32) -> f32 {
        let units: u32 = s
            .chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    u32::from(self.widths[code - 32])
                } else {
                    u32::from(self.average_width)
                }
            })
            .sum();
        units as f32 * size_pt / 1000.0
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tables
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA: FontMetricTable = FontMetricTable {
    widths: [
        // 0x20 sp ! " # $ % & ' ( ) * + , - . /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0x30 0-9 : ; < = > ?
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
        // 0x40 @ A-O
        1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
        // 0x50 P-Z [ \ ] ^ _
        667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
        // 0x60 ` a-o
        333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
        // 0x70 p-z { | } ~
        556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
    ],
    average_width: 556,
};

static HELVETICA_BOLD: FontMetricTable = FontMetricTable {
    widths: [
        // 0x20 sp ! " # $ % & ' ( ) * + , - . /
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0x30 0-9 : ; < = > ?
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
        // 0x40 @ A-O
        975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
        // 0x50 P-Z [ \ ] ^ _
        667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
        // 0x60 ` a-o
        333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
        // 0x70 p-z { | } ~
        611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
    ],
    average_width: 611,
};

/// Maps text onto the ASCII range the builtin fonts can encode.
pub fn pdf_safe(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c.to_string(),
            '\u{2022}' | '\u{2013}' | '\u{2014}' | '\u{2212}' => "-".to_string(),
            '\u{2018}' | '\u{2019}' => "'".to_string(),
            '\u{201C}' | '\u{201D}' => "\"".to_string(),
            '\u{2026}' => "...".to_string(),
            '\t' | '\u{00A0}' => " ".to_string(),
            _ => "?".to_string(),
        })
        .collect()
}

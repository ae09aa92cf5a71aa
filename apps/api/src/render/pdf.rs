//! Replays a `ResumeLayout` onto a printpdf document using the builtin
//! Helvetica faces.

use printpdf::{BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Pt};
use tracing::debug;

use crate::render::font_metrics::FontStyle;
use crate::render::layout::{DrawOp, ResumeLayout, PAGE_HEIGHT, PAGE_WIDTH};
use crate::render::RenderError;

const RULE_THICKNESS_PT: f32 = 0.5;

fn mm(points: f32) -> Mm {
    Mm::from(Pt(points))
}

fn pdf_err(e: printpdf::Error) -> RenderError {
    RenderError::Pdf(e.to_string())
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
}

impl Fonts {
    fn get(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
            FontStyle::Oblique => &self.oblique,
        }
    }
}

/// Draws every operation and returns the PDF bytes.
pub fn draw_pdf(layout: &ResumeLayout, title: &str) -> Result<Vec<u8>, RenderError> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(title, mm(PAGE_WIDTH), mm(PAGE_HEIGHT), "Resume");

    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_err)?,
        oblique: doc
            .add_builtin_font(BuiltinFont::HelveticaOblique)
            .map_err(pdf_err)?,
    };

    let mut layers: Vec<PdfLayerReference> =
        vec![doc.get_page(first_page).get_layer(first_layer)];
    for _ in 1..layout.pages.max(1) {
        let (page, layer) = doc.add_page(mm(PAGE_WIDTH), mm(PAGE_HEIGHT), "Resume");
        layers.push(doc.get_page(page).get_layer(layer));
    }
    for layer in &layers {
        layer.set_outline_thickness(RULE_THICKNESS_PT);
    }

    for op in &layout.ops {
        match op {
            DrawOp::Text {
                page,
                x,
                y,
                style,
                size,
                text,
            } => {
                let Some(layer) = layers.get(*page) else {
                    continue;
                };
                layer.use_text(text.as_str(), *size, mm(*x), mm(*y), fonts.get(*style));
            }
            DrawOp::Rule { page, x1, x2, y } => {
                let Some(layer) = layers.get(*page) else {
                    continue;
                };
                layer.add_line(Line {
                    points: vec![
                        (Point::new(mm(*x1), mm(*y)), false),
                        (Point::new(mm(*x2), mm(*y)), false),
                    ],
                    is_closed: false,
                });
            }
        }
    }

    let bytes = doc.save_to_bytes().map_err(pdf_err)?;
    debug!("Rendered PDF: {} page(s), {} bytes", layout.pages, bytes.len());
    Ok(bytes)
}

// PDF rendering of a canonical resume.
// Layout is a pure list of draw operations; pdf.rs turns it into bytes.
// Rendering is CPU-bound and must run inside tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod handlers;
pub mod layout;
pub mod pdf;

use thiserror::Error;

use crate::resume::models::ResumeRow;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Required personal_info field '{0}' is missing")]
    MissingField(&'static str),

    #[error("PDF backend error: {0}")]
    Pdf(String),
}

/// Lays out and draws a resume in one step.
pub fn render_resume_pdf(rows: &[ResumeRow]) -> Result<Vec<u8>, RenderError> {
    let layout = layout::layout_resume(rows)?;
    pdf::draw_pdf(&layout, "Resume")
}

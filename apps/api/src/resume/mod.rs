// Resume data model and the canonicalization pipeline:
// codec (CSV/JSON files), questionnaire intake, Block Normalizer, Resume Sanitizer.

pub mod codec;
pub mod handlers;
pub mod models;
pub mod normalizer;
pub mod questionnaire;
pub mod sanitizer;
pub mod text;

// Resume tailoring against a job description.
// Whole-resume rewrite (oracle → normalizer → sanitizer), per-block bullet
// rewrites, and TF-IDF row matching.
// All model calls go through llm_client::TextOracle.

pub mod handlers;
pub mod matcher;
pub mod pipeline;
pub mod prompts;
pub mod rewriter;

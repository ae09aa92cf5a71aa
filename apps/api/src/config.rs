use anyhow::{bail, Context, Result};

use crate::jobs::fetcher::JobApiCredentials;
use crate::llm_client::LlmBackend;
use crate::resume::sanitizer::DEFAULT_ROW_CAP;

/// Application configuration loaded from environment variables.
/// Fails at startup on malformed values or a missing hosted-LLM key; job API
/// credentials are optional and only checked when a search needs them.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub llm_backend: LlmBackend,
    pub job_api: JobApiCredentials,
    pub user_dir: String,
    pub resume_row_cap: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            llm_backend: llm_backend_from_env()?,
            job_api: JobApiCredentials {
                adzuna_app_id: optional_env("ADZUNA_APP_ID"),
                adzuna_app_key: optional_env("ADZUNA_APP_KEY"),
                adzuna_country: env_or("ADZUNA_COUNTRY", "us"),
                jsearch_api_key: optional_env("JSEARCH_API_KEY"),
            },
            user_dir: env_or("USER_DIR", "users"),
            resume_row_cap: env_or("RESUME_ROW_CAP", &DEFAULT_ROW_CAP.to_string())
                .parse::<usize>()
                .context("RESUME_ROW_CAP must be a non-negative integer")?,
        })
    }
}

fn llm_backend_from_env() -> Result<LlmBackend> {
    match env_or("LLM_BACKEND", "ollama").to_lowercase().as_str() {
        "ollama" => Ok(LlmBackend::Ollama {
            url: env_or("OLLAMA_URL", "http://localhost:11434/api/generate"),
            model: env_or("OLLAMA_MODEL", "llama3"),
        }),
        "openai" => Ok(LlmBackend::OpenAi {
            api_key: require_env("OPENAI_API_KEY")?,
            model: env_or("OPENAI_MODEL", "gpt-4"),
        }),
        other => bail!("LLM_BACKEND must be 'ollama' or 'openai', got '{other}'"),
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

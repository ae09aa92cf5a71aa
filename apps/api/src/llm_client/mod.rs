/// LLM Client: the single point of entry for all text-completion calls.
///
/// No other module may call a model endpoint directly; the pipeline only sees
/// the `TextOracle` trait, so tests swap in canned oracles.
///
/// Every call is a single attempt. A failed call surfaces as `LlmError` and
/// is never retried.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;
#[cfg(test)]
pub(crate) mod test_support;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Anything that turns a prompt into text.
#[async_trait]
pub trait TextOracle: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Which model endpoint serves completions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmBackend {
    /// Local Ollama `/api/generate`.
    Ollama { url: String, model: String },
    /// Hosted OpenAI chat completions.
    OpenAi { api_key: String, model: String },
}

impl LlmBackend {
    pub fn model(&self) -> &str {
        match self {
            LlmBackend::Ollama { model, .. } | LlmBackend::OpenAi { model, .. } => model,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LlmBackend::Ollama { .. } => "ollama",
            LlmBackend::OpenAi { .. } => "openai",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    #[serde(default)]
    response: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    backend: LlmBackend,
}

impl LlmClient {
    pub fn new(backend: LlmBackend) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, backend })
    }

    async fn call_ollama(&self, url: &str, model: &str, prompt: &str) -> Result<String, LlmError> {
        let response = self
            .client
            .post(url)
            .json(&OllamaRequest {
                model,
                prompt,
                stream: false,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: OllamaResponse = response.json().await?;
        Ok(body.response)
    }

    async fn call_openai(&self, api_key: &str, model: &str, prompt: &str) -> Result<String, LlmError> {
        let response = self
            .client
            .post(OPENAI_API_URL)
            .bearer_auth(api_key)
            .json(&ChatRequest {
                model,
                messages: vec![ChatMessage {
                    role: "user",
                    content: prompt,
                }],
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OpenAiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ChatResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(LlmError::EmptyContent)
    }
}

#[async_trait]
impl TextOracle for LlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        debug!(
            "LLM call: backend={} model={} prompt_chars={}",
            self.backend.name(),
            self.backend.model(),
            prompt.len()
        );

        let text = match &self.backend {
            LlmBackend::Ollama { url, model } => self.call_ollama(url, model, prompt).await?,
            LlmBackend::OpenAi { api_key, model } => {
                self.call_openai(api_key, model, prompt).await?
            }
        };

        let text = text.trim();
        if text.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        debug!("LLM call succeeded: response_chars={}", text.len());
        Ok(text.to_string())
    }
}

/// Locates the JSON array in free-form model output: everything from the
/// first `[` to the last `]`, inclusive. Prose or code fences around the
/// array are ignored.
pub fn extract_json_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_array_ignores_surrounding_prose() {
        let text = "Here's your resume:\n```json\n[{\"a\": [1, 2]}]\n```\nGood luck!";
        assert_eq!(extract_json_array(text), Some("[{\"a\": [1, 2]}]"));
    }

    #[test]
    fn test_extract_json_array_missing_or_reversed_brackets() {
        assert_eq!(extract_json_array("no json here"), None);
        assert_eq!(extract_json_array("only [ open"), None);
        assert_eq!(extract_json_array("] then ["), None);
    }

    #[test]
    fn test_backend_accessors() {
        let backend = LlmBackend::Ollama {
            url: "http://localhost:11434/api/generate".to_string(),
            model: "llama3".to_string(),
        };
        assert_eq!(backend.name(), "ollama");
        assert_eq!(backend.model(), "llama3");
    }

    #[tokio::test]
    async fn test_unreachable_backend_fails_without_retry() {
        let client = LlmClient::new(LlmBackend::Ollama {
            url: "http://127.0.0.1:9/api/generate".to_string(),
            model: "llama3".to_string(),
        })
        .unwrap();
        let err = client.complete("hello").await.unwrap_err();
        assert!(matches!(err, LlmError::Http(_)));
    }
}

//! In-process oracles for tests. No network.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm_client::{LlmError, TextOracle};

/// Oracle that replays a fixed answer and records the prompts it saw.
pub struct CannedOracle {
    pub answer: String,
    pub prompts: Mutex<Vec<String>>,
}

impl CannedOracle {
    pub fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TextOracle for CannedOracle {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.answer.clone())
    }
}

/// Oracle whose backend is always unavailable.
pub struct DownOracle;

#[async_trait]
impl TextOracle for DownOracle {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
        Err(LlmError::Api {
            status: 503,
            message: "model not loaded".to_string(),
        })
    }
}

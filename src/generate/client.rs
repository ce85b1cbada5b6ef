//! @acp:module "Completion Client"
//! @acp:summary "OpenAI-compatible chat completions over ureq"
//! @acp:domain cli
//! @acp:layer io
//!
//! Requests carry a per-request timeout. Transport errors, HTTP 429, and
//! HTTP 5xx are retried up to `max_retries` times with a linear backoff;
//! anything else fails on the first attempt.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;

use super::{CompletionRequest, TextGenerator};
use crate::config::GeneratorConfig;
use crate::error::{Result, StrategyError};

/// Chat completions response (only the fields we read)
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

enum AttemptError {
    Retryable(String),
    Fatal(String),
}

/// @acp:summary "Blocking chat-completions client"
pub struct OpenAiClient {
    agent: ureq::Agent,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_retries: u32,
    backoff: Duration,
}

impl OpenAiClient {
    pub fn new(config: &GeneratorConfig, api_key: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("stratnav/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: api_key.into(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_retries: config.max_retries,
            backoff: Duration::from_millis(config.retry_backoff_ms),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn send_once(&self, body: &serde_json::Value) -> std::result::Result<String, AttemptError> {
        let response = self
            .agent
            .post(&self.endpoint)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(body);

        let response = match response {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let detail = response.into_string().unwrap_or_default();
                let message = format!("HTTP {}: {}", code, detail.trim());
                return Err(if code == 429 || code >= 500 {
                    AttemptError::Retryable(message)
                } else {
                    AttemptError::Fatal(message)
                });
            }
            Err(ureq::Error::Transport(transport)) => {
                return Err(AttemptError::Retryable(transport.to_string()));
            }
        };

        let parsed: ChatResponse = response
            .into_json()
            .map_err(|e| AttemptError::Fatal(format!("unreadable response body: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| AttemptError::Fatal("response has no message content".to_string()))
    }
}

impl TextGenerator for OpenAiClient {
    fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.prompt },
            ],
            "temperature": self.temperature,
        });

        let mut attempt = 0u32;
        loop {
            match self.send_once(&body) {
                Ok(content) => return Ok(content),
                Err(AttemptError::Retryable(message)) if attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        "Completion attempt {} failed ({}), retrying",
                        attempt,
                        message
                    );
                    std::thread::sleep(self.backoff * attempt);
                }
                Err(AttemptError::Retryable(message)) | Err(AttemptError::Fatal(message)) => {
                    return Err(StrategyError::Generation(message));
                }
            }
        }
    }
}

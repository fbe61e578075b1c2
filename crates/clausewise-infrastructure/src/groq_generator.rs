//! Groq chat-completion client implementing the generation collaborator.
//!
//! Sends OpenAI-compatible `chat/completions` requests and returns the raw
//! assistant text. One attempt per logical request: the engine never retries
//! automatically, because the upstream is not idempotent on the caller's
//! billing and rate-limit state. Timeouts and transport failures surface as
//! `UpstreamGeneration`; the caller decides between fallback and error.

use async_trait::async_trait;
use clausewise_core::collaborator::TextGenerator;
use clausewise_core::config::GeneratorConfig;
use clausewise_core::error::{ClausewiseError, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const BASE_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Generation collaborator backed by the Groq API.
#[derive(Clone)]
pub struct GroqGenerator {
    client: Client,
    api_key: String,
    config: GeneratorConfig,
}

impl GroqGenerator {
    /// Creates a new generator using the provided API key and tuning.
    ///
    /// The HTTP client carries the configured timeout, so every `generate`
    /// call is bounded without callers wrapping it themselves.
    pub fn new(api_key: impl Into<String>, config: GeneratorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClausewiseError::internal(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            config,
        })
    }
}

#[async_trait]
impl TextGenerator for GroqGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let response = self
            .client
            .post(BASE_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    ClausewiseError::upstream(format!(
                        "generation timed out after {}s",
                        self.config.timeout_secs
                    ))
                } else {
                    ClausewiseError::upstream(format!("generation request failed: {}", err))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(map_http_error(status, &body));
        }

        let payload: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| ClausewiseError::malformed(format!("completion body did not parse: {}", err)))?;

        payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| ClausewiseError::malformed("completion contained no choices"))
    }
}

/// Maps a non-success status to a short operator-facing reason. The raw
/// upstream payload is never passed through; only its `error.message`
/// field, when present.
fn map_http_error(status: StatusCode, body: &str) -> ClausewiseError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|err| err.get("message"))
                .and_then(|msg| msg.as_str())
                .map(|msg| msg.to_string())
        })
        .unwrap_or_else(|| "no detail".to_string());

    ClausewiseError::upstream(format!("generation returned {}: {}", status.as_u16(), message))
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

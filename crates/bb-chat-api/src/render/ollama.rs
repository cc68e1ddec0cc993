//! Ollama renderer — summarizes rows through a local Ollama `/api/chat`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ProseRenderer, SYSTEM_PROMPT, tidy, user_prompt};
use crate::config::OllamaConfig;

/// Ollama chat API request body.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

/// A single message in the chat request.
#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Ollama chat API response (only fields we need).
#[derive(Deserialize)]
struct ChatResponse {
    message: Option<ResponseMessage>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Renderer backed by a local Ollama endpoint.
pub struct OllamaRenderer {
    client: reqwest::Client,
    config: OllamaConfig,
}

impl OllamaRenderer {
    pub fn new(config: OllamaConfig, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl ProseRenderer for OllamaRenderer {
    /// Returns None if Ollama is unreachable, answers non-200, or sends an
    /// empty message.
    async fn render(&self, description: &str, rows: &[Value]) -> Option<String> {
        let url = format!("{}/api/chat", self.config.host);
        let prompt = user_prompt(description, rows);

        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            stream: false,
        };

        let response = match self.client.post(&url).json(&body).send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(error = %e, "ollama request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "ollama returned non-200");
            return None;
        }

        let chat_resp: ChatResponse = match response.json().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "failed to parse ollama response body");
                return None;
            }
        };

        let answer = tidy(&chat_resp.message?.content);
        if answer.is_none() {
            tracing::debug!(model = %self.config.model, "ollama returned an empty answer");
        }
        answer
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

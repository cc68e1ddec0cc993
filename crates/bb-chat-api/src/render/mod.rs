//! Prose rendering of query results.
//!
//! Turns the rows an executor returned, plus the query description, into a
//! conversational answer. Renderers:
//! - **Table**: deterministic bullet list, no external calls.
//! - **Ollama**: local LLM over HTTP.
//! - **Bedrock**: AWS Bedrock Converse API.
//! - **Tiered**: tries one renderer and falls back to another.

pub mod bedrock;
pub mod ollama;
pub mod table;
pub mod tiered;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::{RendererConfig, RendererKind};

pub use bedrock::BedrockRenderer;
pub use ollama::OllamaRenderer;
pub use table::TableRenderer;
pub use tiered::TieredRenderer;

/// Instructions shared by the LLM-backed renderers.
pub const SYSTEM_PROMPT: &str = r#"You are the assistant of a blood bank. You receive a short description of what the user asked and the rows the database returned for it, as JSON.

Rules:
- Use only the data provided. Do not invent centres, numbers or dates.
- Show only the data that answers the question.
- Never reveal sensitive personal information about donors.
- Summarize in a simple, conversational style, as if explaining to a person.
- Format the answer with clear bullet points for easy reading.
- Keep it short: at most 10 bullet points."#;

/// Trait for anything that can turn result rows into an answer.
#[async_trait]
pub trait ProseRenderer: Send + Sync {
    /// Render rows as prose. Returns None if this renderer cannot answer, so
    /// a caller can fall back.
    async fn render(&self, description: &str, rows: &[Value]) -> Option<String>;

    /// Name of this renderer (for logging).
    fn name(&self) -> &str;
}

/// User message sent to an LLM: the description followed by the rows.
pub fn user_prompt(description: &str, rows: &[Value]) -> String {
    let data = serde_json::to_string(rows).unwrap_or_else(|_| "[]".into());
    format!("Question topic: {description}\n\nRows ({} total):\n{data}", rows.len())
}

/// Trim LLM output and strip a surrounding markdown fence. Empty output is
/// treated as no answer.
pub fn tidy(text: &str) -> Option<String> {
    let mut trimmed = text.trim();

    if let Some(rest) = trimmed.strip_prefix("```") {
        // Drop an optional language tag on the opening fence line.
        let body = rest.split_once('\n').map(|(_, b)| b).unwrap_or(rest);
        trimmed = body.strip_suffix("```").unwrap_or(body).trim();
    }

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Build the renderer selected by configuration. LLM renderers are always
/// backed by the table renderer.
pub async fn from_config(config: &RendererConfig) -> Arc<dyn ProseRenderer> {
    let timeout = Duration::from_secs(config.timeout_secs);

    match config.kind {
        RendererKind::Table => Arc::new(TableRenderer::new()),
        RendererKind::Ollama => match OllamaRenderer::new(config.ollama.clone(), timeout) {
            Ok(ollama) => Arc::new(TieredRenderer::new(
                Box::new(ollama),
                Box::new(TableRenderer::new()),
            )),
            Err(e) => {
                tracing::warn!(error = %e, "failed to build ollama client, using table renderer");
                Arc::new(TableRenderer::new())
            }
        },
        RendererKind::Bedrock => {
            let sdk_config =
                aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
            let client = aws_sdk_bedrockruntime::Client::new(&sdk_config);
            Arc::new(TieredRenderer::new(
                Box::new(BedrockRenderer::new(
                    client,
                    config.bedrock_model_id.clone(),
                    timeout,
                )),
                Box::new(TableRenderer::new()),
            ))
        }
    }
}

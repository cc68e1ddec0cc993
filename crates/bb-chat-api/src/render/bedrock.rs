//! AWS Bedrock renderer — Converse API summaries.
//!
//! Model-agnostic: anything the Converse API serves (Nova Lite, Claude, ...)
//! can write the answer.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_bedrockruntime::Client as BedrockClient;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, ConverseOutput, Message, SystemContentBlock,
};
use serde_json::Value;
use tokio::time::timeout;

use super::{ProseRenderer, SYSTEM_PROMPT, tidy, user_prompt};

/// Bedrock Converse API renderer.
pub struct BedrockRenderer {
    client: BedrockClient,
    model_id: String,
    timeout: Duration,
}

impl BedrockRenderer {
    /// Create a renderer with a pre-built Bedrock client.
    pub fn new(client: BedrockClient, model_id: String, timeout: Duration) -> Self {
        Self {
            client,
            model_id,
            timeout,
        }
    }

    /// Call the Converse API and return the first text block of the reply.
    async fn call_converse(&self, prompt: String) -> anyhow::Result<Option<String>> {
        let user_message = Message::builder()
            .role(ConversationRole::User)
            .content(ContentBlock::Text(prompt))
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build message: {e}"))?;

        let response = self
            .client
            .converse()
            .model_id(&self.model_id)
            .system(SystemContentBlock::Text(SYSTEM_PROMPT.to_string()))
            .messages(user_message)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("bedrock converse error: {e}"))?;

        let output = response
            .output()
            .ok_or_else(|| anyhow::anyhow!("no output in bedrock response"))?;

        Ok(first_text(output).and_then(|text| tidy(&text)))
    }
}

#[async_trait]
impl ProseRenderer for BedrockRenderer {
    async fn render(&self, description: &str, rows: &[Value]) -> Option<String> {
        let prompt = user_prompt(description, rows);

        match timeout(self.timeout, self.call_converse(prompt)).await {
            Ok(Ok(Some(answer))) => Some(answer),
            Ok(Ok(None)) => {
                tracing::debug!(model_id = %self.model_id, "bedrock returned no text");
                None
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "bedrock rendering failed");
                None
            }
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.timeout.as_secs(),
                    "bedrock rendering timed out"
                );
                None
            }
        }
    }

    fn name(&self) -> &str {
        "bedrock"
    }
}

/// First text block of a Converse reply, if any.
fn first_text(output: &ConverseOutput) -> Option<String> {
    match output {
        ConverseOutput::Message(msg) => msg.content().iter().find_map(|block| {
            if let ContentBlock::Text(t) = block {
                Some(t.clone())
            } else {
                None
            }
        }),
        _ => None,
    }
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::query::ResultType;

/// Inbound chat question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Free-text question from the user.
    pub query: String,
    /// Conversation identifier owned by the front-end. Does not influence
    /// classification.
    #[serde(default = "default_thread_id")]
    pub thread_id: String,
}

fn default_thread_id() -> String {
    "default".to_string()
}

/// Answer returned to the chat front-end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Unique ID for this answer (UUIDv7, time-sortable).
    pub query_id: Uuid,
    /// Conversational answer text.
    pub response: String,
    /// Human-readable description of what was looked up.
    pub description: String,
    pub result_type: ResultType,
    /// Number of rows the query returned.
    pub row_count: usize,
    /// End-to-end processing time in milliseconds.
    pub latency_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_thread_id_defaults() {
        let req: ChatRequest = serde_json::from_str(r#"{"query": "hi"}"#).unwrap();
        assert_eq!(req.query, "hi");
        assert_eq!(req.thread_id, "default");
    }

    #[test]
    fn response_serializes_result_type() {
        let resp = ChatResponse {
            query_id: Uuid::now_v7(),
            response: "There are 12 units.".into(),
            description: "Blood availability".into(),
            result_type: ResultType::BloodAvailability,
            row_count: 1,
            latency_ms: 4,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["result_type"], "blood_availability");
        assert_eq!(json["row_count"], 1);
        assert!(json["query_id"].is_string());
    }
}

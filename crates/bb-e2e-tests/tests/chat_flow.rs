//! E2E tests for the chat pipeline: HTTP request → engine → executor →
//! renderer → response.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bb_chat_api::config::OllamaConfig;
use bb_chat_api::db::MockExecutor;
use bb_chat_api::error::APOLOGY;
use bb_chat_api::render::{OllamaRenderer, TableRenderer, TieredRenderer};
use bb_chat_api::routes::chat::NO_RECORDS;
use bb_protocol::ResultType;

use helpers::TestHarness;

fn ollama_renderer(host: String) -> TieredRenderer {
    let ollama = OllamaRenderer::new(
        OllamaConfig {
            host,
            model: "llama3.2:3b".into(),
        },
        Duration::from_secs(2),
    )
    .unwrap();
    TieredRenderer::new(Box::new(ollama), Box::new(TableRenderer::new()))
}

/// Every canonical question comes back with the expected result type.
#[tokio::test]
async fn e2e_each_result_type_answered() {
    let h = TestHarness::with_sample_data();

    let cases = [
        ("How many O+ bloods are available?", "blood_availability"),
        ("Show me blood centers in Bangalore", "center_info"),
        ("Upcoming blood camps in Mumbai", "camp_info"),
        ("How many donors do we have?", "donor_stats"),
        ("Appointments available today in Delhi", "appointment_info"),
        ("xyz random text", "general"),
    ];

    for (question, expected) in cases {
        let (status, json) = h.chat(question).await;
        assert_eq!(status, StatusCode::OK, "{question}");
        assert_eq!(json["result_type"], expected, "{question}");
        assert!(json["row_count"].as_u64().unwrap() > 0, "{question}");
        assert!(!json["response"].as_str().unwrap().is_empty());
    }

    assert_eq!(h.executor.executed().len(), cases.len());
}

/// The executor receives bound parameters, never interpolated SQL.
#[tokio::test]
async fn e2e_executor_sees_parameters() {
    let h = TestHarness::with_sample_data();
    let (status, _) = h.chat("Plasma stock for o neg in bombay").await;
    assert_eq!(status, StatusCode::OK);

    let executed = h.executor.executed();
    let query = executed.last().unwrap();
    assert_eq!(query.result_type, ResultType::BloodAvailability);
    assert_eq!(query.param("blood_group"), Some("o-"));
    assert_eq!(query.param("location"), Some("%mumbai%"));
    assert_eq!(query.param("component"), Some("%plasma%"));
    assert!(!query.sql.contains("bombay") && !query.sql.contains("mumbai"));
}

/// General questions with a blood group are answered as availability.
#[tokio::test]
async fn e2e_general_with_blood_group_delegates() {
    let h = TestHarness::with_sample_data();
    let (status, json) = h.chat("anything for ab-?").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["result_type"], "blood_availability");
    assert_eq!(json["description"], "Blood availability for AB- blood");
}

/// A query matching nothing says so without calling the renderer.
#[tokio::test]
async fn e2e_empty_result_message() {
    let h = TestHarness::with_executor(MockExecutor::new());
    let (status, json) = h.chat("Upcoming blood camps in Mumbai").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["response"], NO_RECORDS);
    assert_eq!(json["row_count"], 0);
    assert_eq!(json["description"], "Blood donation camps in Mumbai (upcoming)");
}

/// Database failures become a generic apology; SQL and driver text stay hidden.
#[tokio::test]
async fn e2e_database_failure_is_apology() {
    let h = TestHarness::with_executor(MockExecutor::failing(
        "error returned from database: relation \"camps\" does not exist",
    ));
    let (status, json) = h.chat("Upcoming blood camps in Mumbai").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], APOLOGY);
    let raw = json.to_string();
    assert!(!raw.contains("camp_date"));
    assert!(!raw.contains("relation"));
}

/// Blank questions are rejected before reaching the executor.
#[tokio::test]
async fn e2e_blank_question_rejected() {
    let h = TestHarness::with_sample_data();
    let (status, json) = h.chat("   ").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);
    assert!(h.executor.executed().is_empty());
}

/// Ollama writes the answer when reachable.
#[tokio::test]
async fn e2e_ollama_renders_answer() {
    let server = MockServer::start().await;
    let body = json!({
        "model": "llama3.2:3b",
        "message": {
            "role": "assistant",
            "content": "- Rotary TTK Blood Bank in Indiranagar\n- Victoria Hospital Blood Centre on Fort Road"
        },
        "done": true
    });
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let h = TestHarness::with_renderer(Arc::new(ollama_renderer(server.uri())));
    let (status, json) = h.chat("Show me blood centers in Bangalore").await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["response"].as_str().unwrap().starts_with("- Rotary TTK"));
}

/// An Ollama outage falls back to the table renderer.
#[tokio::test]
async fn e2e_ollama_outage_falls_back_to_table() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let h = TestHarness::with_renderer(Arc::new(ollama_renderer(server.uri())));
    let (status, json) = h.chat("Show me blood centers in Bangalore").await;

    assert_eq!(status, StatusCode::OK);
    let text = json["response"].as_str().unwrap();
    assert!(text.starts_with("Blood centers/centres in Bangalore (2 results):"));
}

/// Ollama is not consulted when there is nothing to summarize.
#[tokio::test]
async fn e2e_no_rows_skips_llm() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let h = TestHarness::new(
        MockExecutor::new(),
        Arc::new(ollama_renderer(server.uri())),
    );
    let (status, json) = h.chat("How many donors do we have?").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["response"], NO_RECORDS);
}

/// Translation is hidden unless explicitly exposed.
#[tokio::test]
async fn e2e_translate_gated() {
    let hidden = TestHarness::with_sample_data();
    let (status, _) = hidden.translate("Upcoming blood camps in Mumbai").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let exposed = TestHarness::exposing_sql();
    let (status, json) = exposed.translate("Upcoming blood camps in Mumbai").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["intent"], "camp_info");
    assert_eq!(json["entities"]["time_period"]["kind"], "upcoming");
    assert_eq!(json["entities"]["time_period"]["anchor_date"], "2025-06-18");
    assert_eq!(json["query"]["params"], json!({"location": "%mumbai%"}));
    assert!(exposed.executor.executed().is_empty());
}

/// Answers carry distinct UUIDv7 IDs.
#[tokio::test]
async fn e2e_query_ids_are_unique() {
    let h = TestHarness::with_sample_data();
    let (_, first) = h.chat("How many donors do we have?").await;
    let (_, second) = h.chat("How many donors do we have?").await;

    let first: Uuid = first["query_id"].as_str().unwrap().parse().unwrap();
    let second: Uuid = second["query_id"].as_str().unwrap().parse().unwrap();
    assert_ne!(first, second);
    assert_eq!(first.get_version_num(), 7);
}

//! Shared test harness for E2E integration tests.
//!
//! Wires the query engine, an executor and a renderer into the real Axum
//! router, so requests cross every crate boundary.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use tower::ServiceExt;

use bb_chat_api::db::MockExecutor;
use bb_chat_api::render::{ProseRenderer, TableRenderer};
use bb_chat_api::routes::build_router;
use bb_chat_api::state::AppState;
use bb_query_engine::QueryEngine;

/// Date every harness pins as "today".
pub fn pinned_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 18).unwrap()
}

/// End-to-end test harness around the chat API router.
pub struct TestHarness {
    /// Application state handed to the router.
    pub state: AppState,
    /// Axum router for HTTP requests via `tower::oneshot`.
    pub router: Router,
    /// Executor behind the router, for inspecting executed queries.
    pub executor: Arc<MockExecutor>,
}

impl TestHarness {
    /// Harness with sample rows for every result type and the table renderer.
    pub fn with_sample_data() -> Self {
        Self::build(MockExecutor::with_sample_data(), Arc::new(TableRenderer::new()), false)
    }

    /// Harness around a specific executor.
    pub fn with_executor(executor: MockExecutor) -> Self {
        Self::build(executor, Arc::new(TableRenderer::new()), false)
    }

    /// Harness with sample data and a specific renderer.
    pub fn with_renderer(renderer: Arc<dyn ProseRenderer>) -> Self {
        Self::build(MockExecutor::with_sample_data(), renderer, false)
    }

    /// Harness with `/api/v1/translate` enabled.
    pub fn exposing_sql() -> Self {
        Self::build(MockExecutor::with_sample_data(), Arc::new(TableRenderer::new()), true)
    }

    /// Harness around a specific executor and renderer.
    pub fn new(executor: MockExecutor, renderer: Arc<dyn ProseRenderer>) -> Self {
        Self::build(executor, renderer, false)
    }

    fn build(executor: MockExecutor, renderer: Arc<dyn ProseRenderer>, expose_sql: bool) -> Self {
        let executor = Arc::new(executor.recording());
        let state = AppState::new(executor.clone(), renderer)
            .with_engine(QueryEngine::with_date(pinned_today()))
            .with_expose_sql(expose_sql);
        let router = build_router(state.clone());

        Self {
            state,
            router,
            executor,
        }
    }

    /// Ask a question via POST /api/v1/chat.
    /// Returns (HTTP status code, response JSON body).
    pub async fn chat(&self, query: &str) -> (StatusCode, serde_json::Value) {
        self.post("/api/v1/chat", serde_json::json!({"query": query, "thread_id": "e2e"}))
            .await
    }

    /// Translate a question via POST /api/v1/translate.
    pub async fn translate(&self, query: &str) -> (StatusCode, serde_json::Value) {
        self.post("/api/v1/translate", serde_json::json!({"query": query}))
            .await
    }

    async fn post(&self, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::post(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }
}

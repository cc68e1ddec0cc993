//! Chat endpoint: question in, conversational answer out.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use uuid::Uuid;

use bb_protocol::{ChatRequest, ChatResponse};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Answer sent when a query matches no rows.
pub const NO_RECORDS: &str = "No records found for your query.";

/// POST /api/v1/chat — translate, execute and summarize a question.
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    let query_text = req.query.trim();
    if query_text.is_empty() {
        return Err(ApiError::BadRequest("query must not be empty".into()));
    }

    let started = Instant::now();
    let query_id = Uuid::now_v7();
    let query = state.engine.answer(query_text);

    tracing::info!(
        query_id = %query_id,
        thread_id = %req.thread_id,
        result_type = %query.result_type,
        "question translated"
    );

    let rows = state.executor.execute(&query).await.map_err(|e| {
        tracing::error!(
            query_id = %query_id,
            executor = state.executor.name(),
            sql = %query.sql,
            params = ?query.params,
            "query execution failed"
        );
        ApiError::from(e)
    })?;

    let response = if rows.is_empty() {
        NO_RECORDS.to_string()
    } else {
        match state.renderer.render(&query.description, &rows).await {
            Some(text) => text,
            None => {
                tracing::warn!(
                    query_id = %query_id,
                    renderer = state.renderer.name(),
                    "renderer produced no answer"
                );
                format!("{} ({} results found).", query.description, rows.len())
            }
        }
    };

    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    tracing::info!(
        query_id = %query_id,
        row_count = rows.len(),
        latency_ms,
        "question answered"
    );

    Ok(Json(ChatResponse {
        query_id,
        response,
        description: query.description,
        result_type: query.result_type,
        row_count: rows.len(),
        latency_ms,
    }))
}

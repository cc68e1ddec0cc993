//! Translation inspection endpoint. Only served when SQL exposure is enabled.

use axum::Json;
use axum::extract::State;

use bb_protocol::ChatRequest;
use bb_query_engine::Translation;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// POST /api/v1/translate — show intent, entities and generated SQL without
/// executing anything.
pub async fn translate(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> ApiResult<Json<Translation>> {
    if !state.expose_sql {
        return Err(ApiError::NotFound("translate endpoint is disabled".into()));
    }
    let query_text = req.query.trim();
    if query_text.is_empty() {
        return Err(ApiError::BadRequest("query must not be empty".into()));
    }

    Ok(Json(state.engine.translate(query_text)))
}

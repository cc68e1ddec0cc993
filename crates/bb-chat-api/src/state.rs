//! Shared application state for the Axum server.
//!
//! Supports two modes:
//! - **Database mode**: `PgExecutor` over a `PgPool` (production).
//! - **Sample mode**: `MockExecutor` with canned rows (tests and development).

use std::sync::Arc;

use sqlx::PgPool;

use bb_query_engine::QueryEngine;

use crate::db::{MockExecutor, PgExecutor, QueryExecutor};
use crate::render::{ProseRenderer, TableRenderer};

/// Shared application state, cheap to clone into every handler.
#[derive(Clone)]
pub struct AppState {
    /// Runs generated SQL.
    pub executor: Arc<dyn QueryExecutor>,
    /// Turns result rows into an answer.
    pub renderer: Arc<dyn ProseRenderer>,
    /// Question-to-SQL translation.
    pub engine: QueryEngine,
    /// Whether `/api/v1/translate` is served.
    pub expose_sql: bool,
}

impl AppState {
    /// State with explicit executor and renderer.
    pub fn new(executor: Arc<dyn QueryExecutor>, renderer: Arc<dyn ProseRenderer>) -> Self {
        Self {
            executor,
            renderer,
            engine: QueryEngine::new(),
            expose_sql: false,
        }
    }

    /// State backed by a PostgreSQL pool.
    pub fn with_pool(pool: PgPool, max_rows: usize, renderer: Arc<dyn ProseRenderer>) -> Self {
        Self::new(Arc::new(PgExecutor::new(pool, max_rows)), renderer)
    }

    /// State with sample rows and the table renderer, for development and tests.
    pub fn with_sample_data() -> Self {
        Self::new(
            Arc::new(MockExecutor::with_sample_data()),
            Arc::new(TableRenderer::new()),
        )
    }

    pub fn with_engine(mut self, engine: QueryEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_expose_sql(mut self, expose_sql: bool) -> Self {
        self.expose_sql = expose_sql;
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_sample_data()
    }
}

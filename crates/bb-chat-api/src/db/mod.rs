//! Database access layer for PostgreSQL.
//!
//! The engine only hands over `(sql, params)`; this module owns the pool,
//! placeholder binding and row decoding.

pub mod executor;
pub mod mock;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub use executor::{ExecError, PgExecutor, QueryExecutor, bind_named};
pub use mock::MockExecutor;

/// Connect to PostgreSQL and apply the schema.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    tracing::info!("running database migrations");
    sqlx::raw_sql(include_str!("../../migrations/001_blood_bank.sql"))
        .execute(&pool)
        .await?;
    tracing::info!("migrations complete");

    Ok(pool)
}

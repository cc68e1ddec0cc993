//! SQL execution for engine-built queries.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use sqlx::postgres::PgRow;
use sqlx::{Column, PgPool, Row, TypeInfo};

use bb_protocol::QueryResult;

/// Errors raised while executing a generated query.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error("no value bound for placeholder :{0}")]
    MissingParam(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Other(String),
}

/// Runs a `QueryResult` against a relational store and returns each row as a
/// JSON object.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, query: &QueryResult) -> Result<Vec<Value>, ExecError>;

    /// Name of this executor (for logging).
    fn name(&self) -> &str;
}

/// Rewrite `:name` placeholders into Postgres `$n` markers.
///
/// Repeated names share one index. `::` casts and anything inside single
/// quotes are copied through untouched. Returns the rewritten SQL and the
/// values in positional order.
pub fn bind_named(
    sql: &str,
    params: &BTreeMap<String, String>,
) -> Result<(String, Vec<String>), ExecError> {
    let mut out = String::with_capacity(sql.len());
    let mut order: Vec<&str> = Vec::new();
    let mut values = Vec::new();
    let mut in_literal = false;
    let mut chars = sql.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c == '\'' {
            in_literal = !in_literal;
            out.push(c);
            continue;
        }
        if in_literal || c != ':' {
            out.push(c);
            continue;
        }
        if let Some(&(_, ':')) = chars.peek() {
            chars.next();
            out.push_str("::");
            continue;
        }

        let start = i + 1;
        let mut end = start;
        while let Some(&(j, next)) = chars.peek() {
            if next.is_ascii_alphanumeric() || next == '_' {
                end = j + next.len_utf8();
                chars.next();
            } else {
                break;
            }
        }

        let name = &sql[start..end];
        if name.is_empty() || name.starts_with(|ch: char| ch.is_ascii_digit()) {
            out.push(':');
            out.push_str(name);
            continue;
        }

        let index = match order.iter().position(|n| *n == name) {
            Some(pos) => pos + 1,
            None => {
                let value = params
                    .get(name)
                    .ok_or_else(|| ExecError::MissingParam(name.to_string()))?;
                order.push(name);
                values.push(value.clone());
                order.len()
            }
        };
        out.push_str(&format!("${index}"));
    }

    Ok((out, values))
}

/// PostgreSQL-backed executor.
pub struct PgExecutor {
    pool: PgPool,
    max_rows: usize,
}

impl PgExecutor {
    pub fn new(pool: PgPool, max_rows: usize) -> Self {
        Self { pool, max_rows }
    }
}

/// Cap a statement at `max_rows` rows.
///
/// The statement runs as written, so its own `ORDER BY` decides which rows
/// survive the cap and the order they come back in.
pub fn limit_rows(sql: &str, max_rows: usize) -> String {
    format!("{} LIMIT {max_rows}", sql.trim_end().trim_end_matches(';'))
}

/// Convert one result row into a JSON object keyed by column name.
fn row_to_object(row: &PgRow) -> Result<Value, sqlx::Error> {
    let mut object = Map::with_capacity(row.columns().len());
    for column in row.columns() {
        object.insert(column.name().to_string(), column_value(row, column.ordinal())?);
    }
    Ok(Value::Object(object))
}

/// Decode a single column by its Postgres type. Dates and times come back as
/// ISO-8601 strings; types without a mapping are read as text.
fn column_value(row: &PgRow, index: usize) -> Result<Value, sqlx::Error> {
    let type_name = row.column(index).type_info().name();
    let value = match type_name {
        "BOOL" => row.try_get::<Option<bool>, _>(index)?.map(Value::from),
        "INT2" => row.try_get::<Option<i16>, _>(index)?.map(Value::from),
        "INT4" => row.try_get::<Option<i32>, _>(index)?.map(Value::from),
        "INT8" => row.try_get::<Option<i64>, _>(index)?.map(Value::from),
        "FLOAT4" => row.try_get::<Option<f32>, _>(index)?.map(Value::from),
        "FLOAT8" => row.try_get::<Option<f64>, _>(index)?.map(Value::from),
        "DATE" => row.try_get::<Option<NaiveDate>, _>(index)?.map(date_json),
        "TIME" => row.try_get::<Option<NaiveTime>, _>(index)?.map(time_json),
        "TIMESTAMP" => row
            .try_get::<Option<NaiveDateTime>, _>(index)?
            .map(|t| timestamp_json(t.and_utc())),
        "TIMESTAMPTZ" => row
            .try_get::<Option<DateTime<Utc>>, _>(index)?
            .map(timestamp_json),
        "JSON" | "JSONB" => row.try_get::<Option<Value>, _>(index)?,
        _ => match row.try_get::<Option<String>, _>(index) {
            Ok(text) => text.map(Value::from),
            Err(e) => {
                tracing::warn!(
                    column = row.column(index).name(),
                    pg_type = type_name,
                    error = %e,
                    "unsupported column type, returning null"
                );
                None
            }
        },
    };
    Ok(value.unwrap_or(Value::Null))
}

fn date_json(date: NaiveDate) -> Value {
    Value::from(date.format("%Y-%m-%d").to_string())
}

fn time_json(time: NaiveTime) -> Value {
    Value::from(time.format("%H:%M:%S").to_string())
}

fn timestamp_json(at: DateTime<Utc>) -> Value {
    Value::from(at.to_rfc3339_opts(SecondsFormat::Secs, true))
}

#[async_trait]
impl QueryExecutor for PgExecutor {
    async fn execute(&self, query: &QueryResult) -> Result<Vec<Value>, ExecError> {
        let (sql, values) = bind_named(&query.sql, &query.params)?;
        let limited = limit_rows(&sql, self.max_rows);

        let mut statement = sqlx::query(&limited);
        for value in values {
            statement = statement.bind(value);
        }

        let rows = statement
            .fetch_all(&self.pool)
            .await?
            .iter()
            .map(row_to_object)
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(
            result_type = %query.result_type,
            row_count = rows.len(),
            "query executed"
        );
        Ok(rows)
    }

    fn name(&self) -> &str {
        "postgres"
    }
}

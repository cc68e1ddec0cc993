//! Deterministic renderer: one bullet per row, no external calls.

use async_trait::async_trait;
use serde_json::Value;

use super::ProseRenderer;

/// Rows listed before the rest are summarized as a count.
const MAX_LISTED_ROWS: usize = 20;

/// Renders rows as a markdown bullet list headed by the description.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableRenderer;

impl TableRenderer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProseRenderer for TableRenderer {
    async fn render(&self, description: &str, rows: &[Value]) -> Option<String> {
        Some(render_rows(description, rows))
    }

    fn name(&self) -> &str {
        "table"
    }
}

fn render_rows(description: &str, rows: &[Value]) -> String {
    let noun = if rows.len() == 1 { "result" } else { "results" };
    let mut lines = vec![format!("{description} ({} {noun}):", rows.len())];

    lines.extend(rows.iter().take(MAX_LISTED_ROWS).map(|row| format!("- {}", row_line(row))));

    if rows.len() > MAX_LISTED_ROWS {
        lines.push(format!("- ...and {} more", rows.len() - MAX_LISTED_ROWS));
    }
    lines.join("\n")
}

fn row_line(row: &Value) -> String {
    match row {
        Value::Object(fields) => fields
            .iter()
            .map(|(key, value)| format!("{}: {}", key.replace('_', " "), scalar(value)))
            .collect::<Vec<_>>()
            .join(", "),
        other => scalar(other),
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::Null => "n/a".into(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

//! Tiered renderer — LLM first, deterministic fallback.

use async_trait::async_trait;
use serde_json::Value;

use super::ProseRenderer;

/// Composite renderer that tries `primary` and falls back to `fallback` when
/// it has no answer.
pub struct TieredRenderer {
    primary: Box<dyn ProseRenderer>,
    fallback: Box<dyn ProseRenderer>,
}

impl TieredRenderer {
    pub fn new(primary: Box<dyn ProseRenderer>, fallback: Box<dyn ProseRenderer>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl ProseRenderer for TieredRenderer {
    async fn render(&self, description: &str, rows: &[Value]) -> Option<String> {
        if let Some(answer) = self.primary.render(description, rows).await {
            return Some(answer);
        }

        tracing::debug!(
            primary = self.primary.name(),
            fallback = self.fallback.name(),
            "primary renderer had no answer, falling back"
        );
        self.fallback.render(description, rows).await
    }

    fn name(&self) -> &str {
        "tiered"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Mock renderer that always returns a fixed answer (or None).
    struct MockRenderer {
        answer: Option<&'static str>,
        name: &'static str,
    }

    impl MockRenderer {
        fn hit(name: &'static str, answer: &'static str) -> Self {
            Self {
                answer: Some(answer),
                name,
            }
        }

        fn miss(name: &'static str) -> Self {
            Self { answer: None, name }
        }
    }

    #[async_trait]
    impl ProseRenderer for MockRenderer {
        async fn render(&self, _description: &str, _rows: &[Value]) -> Option<String> {
            self.answer.map(String::from)
        }

        fn name(&self) -> &str {
            self.name
        }
    }

    fn rows() -> Vec<Value> {
        vec![json!({"total_units": 42})]
    }

    #[tokio::test]
    async fn primary_hit_skips_fallback() {
        let renderer = TieredRenderer::new(
            Box::new(MockRenderer::hit("llm", "- 42 units")),
            Box::new(MockRenderer::hit("table", "total_units: 42")),
        );

        let answer = renderer.render("Blood availability", &rows()).await;
        assert_eq!(answer.as_deref(), Some("- 42 units"));
    }

    #[tokio::test]
    async fn fallback_on_primary_miss() {
        let renderer = TieredRenderer::new(
            Box::new(MockRenderer::miss("llm")),
            Box::new(MockRenderer::hit("table", "total_units: 42")),
        );

        let answer = renderer.render("Blood availability", &rows()).await;
        assert_eq!(answer.as_deref(), Some("total_units: 42"));
    }

    #[tokio::test]
    async fn both_miss_returns_none() {
        let renderer = TieredRenderer::new(
            Box::new(MockRenderer::miss("llm")),
            Box::new(MockRenderer::miss("table")),
        );

        assert!(renderer.render("Blood availability", &rows()).await.is_none());
    }
}

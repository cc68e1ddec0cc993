//! Dispatcher: normalize → classify → extract → build.

use chrono::NaiveDate;
use serde::Serialize;

use bb_protocol::{EntityBag, QueryResult};

use crate::builders;
use crate::entities::{extract, extract_on};
use crate::intent::{Intent, classify};
use crate::normalize::normalize;

/// Full account of how a question was translated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Translation {
    pub intent: Intent,
    pub entities: EntityBag,
    pub query: QueryResult,
}

/// Question-to-SQL engine. Stateless apart from an optional pinned date used
/// to anchor time periods.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryEngine {
    today: Option<NaiveDate>,
}

impl QueryEngine {
    /// Engine anchoring time periods on the local calendar date.
    pub fn new() -> Self {
        Self { today: None }
    }

    /// Engine with "today" pinned, for reproducible extraction.
    pub fn with_date(today: NaiveDate) -> Self {
        Self { today: Some(today) }
    }

    /// Translate a raw question into a parameterized query.
    pub fn answer(&self, raw: &str) -> QueryResult {
        self.translate(raw).query
    }

    /// Like `answer`, but also returns the intent and extracted entities.
    pub fn translate(&self, raw: &str) -> Translation {
        let text = normalize(raw);
        let intent = classify(&text);
        let entities = match self.today {
            Some(today) => extract_on(&text, today),
            None => extract(&text),
        };

        tracing::debug!(
            intent = %intent,
            blood_group = ?entities.blood_group,
            location = ?entities.location,
            component = ?entities.component,
            time_period = ?entities.time_period.map(|p| p.kind),
            "question classified"
        );

        let query = builders::builder_for(intent)(&entities);
        Translation {
            intent,
            entities,
            query,
        }
    }
}

/// Translate a question with a default engine.
pub fn answer(raw: &str) -> QueryResult {
    QueryEngine::new().answer(raw)
}

/// Translate a question with a default engine, keeping the intermediate steps.
pub fn translate(raw: &str) -> Translation {
    QueryEngine::new().translate(raw)
}

//! Rule-based question-to-SQL engine for the blood-bank chat service.
//!
//! Turns a free-text question into a parameterized `QueryResult` in four
//! steps: normalize, classify intent, extract entities, run the intent's
//! builder. Every step is a pure function over static tables, so the engine
//! is safe to share across threads without locking.

pub mod builders;
pub mod engine;
pub mod entities;
pub mod intent;
pub mod normalize;
pub mod synonyms;

// Re-export key types for convenience
pub use engine::{QueryEngine, Translation, answer, translate};
pub use entities::{extract, extract_on};
pub use intent::{Intent, classify};
pub use normalize::normalize;

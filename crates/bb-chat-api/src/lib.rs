//! Blood-bank chat API — library crate for the HTTP shell around the query
//! engine.
//!
//! Re-exports all modules so the binary (`main.rs`) and external crates
//! (e.g. `bb-e2e-tests`) can access internal types like `AppState`,
//! `build_router`, `QueryExecutor` and `ProseRenderer`.

pub mod config;
pub mod db;
pub mod error;
pub mod render;
pub mod routes;
pub mod state;

//! End-to-end tests for the blood-bank chat service live under `tests/`.

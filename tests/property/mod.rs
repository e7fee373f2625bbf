//! Property-based tests for the retry engine.

pub mod engine;

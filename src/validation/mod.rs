// src/validation/mod.rs
//
// Validation Pipeline
//
// RULES:
// - Pure: no I/O, no events, no notifications
// - Collect-all: every failing field is reported in one pass
// - Callers decide what to do with the errors

pub mod errors;
pub mod schema;

pub use errors::ValidationError;
pub use schema::{validate, FieldRules, Record, Rule};

//! gradekit-core — Grade model, validation, statistics, and analysis.
//!
//! This crate defines the gradebook data model, the validator, the pure
//! statistics engine with its rule-based analysis, and the snapshot port that
//! the rest of gradekit builds on.

pub mod analysis;
pub mod engine;
pub mod error;
pub mod grade;
pub mod model;
pub mod parser;
pub mod results;
pub mod snapshot;
pub mod statistics;
pub mod traits;
pub mod validate;

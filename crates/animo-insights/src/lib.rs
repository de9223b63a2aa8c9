//! # animo-insights
//!
//! Turns a user's journal entries into an [`InsightReport`]:
//!
//! 1. [`aggregate`] counts areas and emotions and buckets event times.
//! 2. [`summary`] renders the summary, patterns, triggers, and recommendations.
//! 3. [`beliefs`] extracts candidate limiting beliefs (heuristic or model).
//! 4. [`linker`] joins candidates to their entries and removes duplicates.
//!
//! [`InsightEngine`] runs the whole pipeline. [`records`] converts inline
//! client records into entries when the store has none.
//!
//! [`InsightReport`]: animo_core::report::InsightReport

pub mod aggregate;
pub mod beliefs;
pub mod engine;
pub mod error;
pub mod linker;
pub mod records;
pub mod summary;

pub use engine::InsightEngine;
pub use error::InsightError;
pub use records::{InlineRecord, lenient_records, normalize_records, parse_records};

//! # animo-core
//!
//! Core types, taxonomies, and error types for Animo.
//!
//! This crate provides the foundational types shared across all Animo crates:
//! - Journal entities (entries, emotions) and the time range used to query them
//! - The emotion taxonomy that classifies pleasant vs. non-pleasant emotions
//! - Candidate and linked limiting-belief types
//! - The insight report returned by the analysis endpoint
//! - ID prefix constants
//! - Cross-cutting error types

pub mod beliefs;
pub mod entities;
pub mod errors;
pub mod identity;
pub mod ids;
pub mod range;
pub mod report;
pub mod taxonomy;

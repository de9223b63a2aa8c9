//! Insight report returned by the analysis endpoint.
//!
//! Rust field names are English; the serialized names are the ones the
//! journaling client reads.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::beliefs::LinkedBelief;

/// A life area together with how many entries mention it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TriggerFrequency {
    pub trigger: String,
    #[serde(rename = "frecuencia")]
    pub frequency: usize,
}

/// A temporal pattern with the counts that support it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Pattern {
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "evidencia")]
    pub evidence: String,
}

/// Insights for one user over one time range.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct InsightReport {
    #[serde(rename = "resumen_general")]
    pub summary: String,
    #[serde(rename = "top_disparadores")]
    pub top_triggers: Vec<TriggerFrequency>,
    #[serde(rename = "patrones")]
    pub patterns: Vec<Pattern>,
    #[serde(rename = "creencias_limitantes")]
    pub limiting_beliefs: Vec<LinkedBelief>,
    /// Not inferred yet; always empty.
    #[serde(rename = "automatismos")]
    pub automatisms: Vec<String>,
    #[serde(rename = "recomendaciones")]
    pub recommendations: Vec<String>,
}

/// Envelope for `POST /api/analyze`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct InsightsResponse {
    pub insights: InsightReport,
}

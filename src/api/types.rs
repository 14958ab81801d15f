//! API response and query types.

use serde::{Deserialize, Serialize};

use crate::config::ScenarioConfig;
use crate::sim::summary::SessionSummary;
use crate::sim::types::Sample;

/// Scenario, summary, and sample count of the served run.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    /// Scenario configuration.
    pub config: ScenarioConfig,
    /// Aggregate session summary.
    pub summary: SessionSummary,
    /// Number of recorded samples.
    pub sample_count: usize,
}

/// One sample tagged with its position in the result set.
#[derive(Debug, Serialize)]
pub struct SampleRecord {
    /// Zero-based sample index.
    pub index: usize,
    #[serde(flatten)]
    pub sample: Sample,
}

/// Optional range query parameters for the samples endpoint.
#[derive(Debug, Deserialize)]
pub struct SampleQuery {
    /// Start index (inclusive).
    pub from: Option<usize>,
    /// End index (inclusive).
    pub to: Option<usize>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

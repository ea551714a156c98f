//! Error types for malformed planner input.

use thiserror::Error;

/// Malformed numeric input detected before any placement is attempted.
///
/// This indicates a caller bug rather than a planning outcome, so `plan`
/// fails fast without producing a partial report. Unplaced items, excluded
/// clusters and bottlenecks are data in the report, never errors.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ValidationError {
    #[error("workload item {id}: {field} must be a finite non-negative number, got {value}")]
    InvalidDemand { id: String, field: &'static str, value: f64 },

    #[error("cluster {id}: {field} must be a finite non-negative number, got {value}")]
    InvalidCapacity { id: String, field: &'static str, value: f64 },

    #[error("cluster {id}: {field} must be a finite number >= 1.0, got {value}")]
    InvalidOvercommitRatio { id: String, field: &'static str, value: f64 },

    #[error("cluster {id}: node_count must be positive")]
    ZeroNodeCount { id: String },

    #[error("duplicate cluster id {id}")]
    DuplicateClusterId { id: String },

    #[error("planner config: {reason}")]
    InvalidConfig { reason: String },
}

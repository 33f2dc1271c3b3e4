//! Rollout record errors

use crate::metrics::MetricError;
use thiserror::Error;

/// Errors from validating, storing or replaying a rollout record
#[derive(Debug, Error)]
pub enum RolloutError {
    #[error("Rollout record has no frames")]
    EmptyRecord,

    #[error("Frame {index} has invalid time: t={t}, dt={dt}")]
    InvalidFrameTime { index: usize, t: f64, dt: f64 },

    #[error("Frame {index} goes back in time: t={current} after t={previous}")]
    NonMonotonicTime {
        index: usize,
        previous: f64,
        current: f64,
    },

    #[error("Scenario hash mismatch: expected {expected}, got {actual}")]
    ScenarioMismatch { expected: String, actual: String },

    #[error("Metric error: {0}")]
    Metric(#[from] MetricError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

//! Metric errors

use thiserror::Error;

/// Errors that can occur while configuring or driving a metric
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MetricError {
    #[error("Scenario does not define an ego")]
    MissingEgo,

    #[error("Scenario vehicle set is empty")]
    EmptyVehicleSet,

    #[error("Metric '{metric}' was stepped before reset")]
    NotReset { metric: &'static str },

    #[error("Ego '{ego}' has no velocity at t={t}")]
    EgoNotActive { ego: String, t: f64 },

    #[error("Ego '{ego}' has no distance at t={t}")]
    EgoDistanceMissing { ego: String, t: f64 },

    #[error("Invalid metric config: {0}")]
    InvalidConfig(String),

    #[error("Metric '{0}' is already registered")]
    DuplicateMetric(String),

    #[error("Series has no acceleration row")]
    MissingAcceleration,
}

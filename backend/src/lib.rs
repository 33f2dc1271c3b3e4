//! Scenario Metrics Core - Rust Engine
//!
//! Stateful metric accumulators for driving-scenario rollouts.
//!
//! # Architecture
//!
//! - **core**: Rollout clock (elapsed time, step duration, tick count)
//! - **models**: Domain types (Scenario, State, metric result shapes)
//! - **metrics**: The accumulator contract and its variants
//! - **suite**: Registry that drives every metric and collects results by name
//! - **rollout**: Recorded rollouts, replay and reports
//! - **kpi**: Indicators derived from metric results
//!
//! # Critical Invariants
//!
//! 1. Every per-entity history has exactly one sample per `step` since `reset`
//! 2. `get_state` never mutates accumulator state (repeated reads agree)
//! 3. No division by a step duration below [`metrics::DT_EPSILON`]

// Module declarations
pub mod core;
pub mod kpi;
pub mod metrics;
pub mod models;
pub mod rollout;
pub mod suite;

// Re-exports for convenience
pub use crate::core::clock::RolloutClock;
pub use kpi::vehicle_specific_power;
pub use metrics::{
    AllHistory, Delay, EgoAvgSpeed, EgoDistanceTravelled, EgoMaxSpeed,
    EgoSpeedAccelerationHistory, EgoSpeedHistory, Metric, MetricConfig, MetricError,
    DEFAULT_MAX_SPEED, DISTANCE_PROGRESS_THRESHOLD, DT_EPSILON,
};
pub use models::{
    scenario::Scenario,
    state::{speed, State, Velocity},
    value::{AllHistoryResult, EgoSeries, MetricValue},
};
pub use rollout::{
    compute_scenario_hash, Frame, RolloutError, RolloutRecord, RolloutRecorder, RolloutReport,
};
pub use suite::MetricSuite;

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn scenario_metrics_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::suite::PyMetricSuite>()?;
    Ok(())
}

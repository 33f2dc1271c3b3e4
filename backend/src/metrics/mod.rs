//! Metric Accumulators
//!
//! A metric is a stateful observer of a rollout. The rollout driver calls
//! [`Metric::reset`] once with the initial snapshot, [`Metric::step`] once per
//! tick in time order, and [`Metric::get_state`] whenever it wants a result.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized --reset--> Ready --step--> Accumulating --step--> ...
//!                                              |
//!                                          get_state (any number of times)
//! ```
//!
//! `reset` discards everything accumulated before, so one instance can be
//! reused across rollouts. `get_state` takes `&self`: reading a result never
//! changes what the next read returns.
//!
//! # Available Metrics
//!
//! 1. **AllHistory**: Speed/acceleration history of every scenario entity
//! 2. **Delay**: Lag behind an ideal constant-speed traversal
//! 3. **EgoAvgSpeed**: Time-weighted running mean of ego speed
//! 4. **EgoMaxSpeed**: Running max of ego speed
//! 5. **EgoDistanceTravelled**: Latest cumulative ego distance
//! 6. **EgoSpeedHistory**: Ego speed series
//! 7. **EgoSpeedAccelerationHistory**: Ego speed and acceleration series
//!
//! # Example
//!
//! ```rust
//! use scenario_metrics_core_rs::{EgoMaxSpeed, Metric, MetricValue, Scenario, State};
//! use std::sync::Arc;
//!
//! let scenario = Arc::new(Scenario::new("ego", ["car_1"]));
//! let mut metric = EgoMaxSpeed::new();
//!
//! metric.reset(&State::new(scenario.clone(), 0.0, 0.0).with_velocity("ego", [2.0, 0.0, 0.0])).unwrap();
//! metric.step(&State::new(scenario.clone(), 0.1, 0.1).with_velocity("ego", [5.0, 0.0, 0.0])).unwrap();
//! metric.step(&State::new(scenario, 0.2, 0.1).with_velocity("ego", [3.0, 0.0, 0.0])).unwrap();
//!
//! assert_eq!(metric.get_state(), MetricValue::Scalar(5.0));
//! ```

use crate::models::{MetricValue, State};

pub mod all_history;
pub mod config;
pub mod delay;
pub mod distance;
pub mod ego_history;
pub mod error;
pub mod running;

pub use all_history::AllHistory;
pub use config::MetricConfig;
pub use delay::Delay;
pub use distance::EgoDistanceTravelled;
pub use ego_history::{EgoSpeedAccelerationHistory, EgoSpeedHistory};
pub use error::MetricError;
pub use running::{EgoAvgSpeed, EgoMaxSpeed};

/// Floor applied to step durations before dividing by them (seconds)
pub const DT_EPSILON: f64 = 1e-6;

/// Smallest per-tick ego progress that counts as moving (metres)
pub const DISTANCE_PROGRESS_THRESHOLD: f64 = 1e-3;

/// Reference speed of the ideal traversal used by [`Delay`] (m/s, 50 km/h)
pub const DEFAULT_MAX_SPEED: f64 = 13.89;

/// Stateful observer of a rollout
///
/// Implementations own all of their history and never mutate the [`State`]
/// they are handed. Calling `step` twice for the same tick duplicates
/// history; ordering is the driver's responsibility.
pub trait Metric: Send + Sync {
    /// Stable key under which the driver stores this metric's result
    fn name(&self) -> &'static str;

    /// Discard prior state and seed from the initial snapshot
    ///
    /// # Errors
    ///
    /// Fails if the scenario has no ego or an empty vehicle set, or if an
    /// ego-only metric cannot read the ego in the initial snapshot.
    fn reset(&mut self, state: &State) -> Result<(), MetricError>;

    /// Fold the chronologically next snapshot into the accumulator
    fn step(&mut self, state: &State) -> Result<(), MetricError>;

    /// Current result; safe to call mid-rollout and any number of times
    fn get_state(&self) -> MetricValue;

    /// Fail exactly when `reset(state)` would, without touching any state
    ///
    /// A suite checks every metric before resetting any of them, so a
    /// metric whose check passes must not fail in `reset`.
    fn check_reset(&self, state: &State) -> Result<(), MetricError> {
        state.scenario.validate().map(drop)
    }

    /// Fail exactly when `step(state)` would, without touching any state
    fn check_step(&self, _state: &State) -> Result<(), MetricError> {
        Ok(())
    }
}

/// Step duration with the [`DT_EPSILON`] floor applied
pub(crate) fn guarded_dt(dt: f64) -> f64 {
    dt.max(DT_EPSILON)
}

/// Ego identifier captured at reset, or `NotReset`
pub(crate) fn require_ego<'a>(
    ego: &'a Option<String>,
    metric: &'static str,
) -> Result<&'a str, MetricError> {
    ego.as_deref().ok_or(MetricError::NotReset { metric })
}

/// Ego speed in `state`, or `EgoNotActive`
pub(crate) fn ego_speed(state: &State, ego: &str) -> Result<f64, MetricError> {
    state.speed_of(ego).ok_or_else(|| MetricError::EgoNotActive {
        ego: ego.to_string(),
        t: state.t,
    })
}

/// Ego cumulative distance in `state`, or `EgoDistanceMissing`
pub(crate) fn ego_distance(state: &State, ego: &str) -> Result<f64, MetricError> {
    state
        .distance_of(ego)
        .ok_or_else(|| MetricError::EgoDistanceMissing {
            ego: ego.to_string(),
            t: state.t,
        })
}

/// Reset check shared by metrics seeded from the initial ego speed
pub(crate) fn check_ego_speed_reset(state: &State) -> Result<(), MetricError> {
    let ego = state.scenario.validate()?;
    ego_speed(state, ego).map(drop)
}

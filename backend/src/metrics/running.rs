//! Running statistics of ego speed
//!
//! O(1) summaries updated once per tick, without storing history.

use super::{check_ego_speed_reset, ego_speed, require_ego, Metric, MetricError, DT_EPSILON};
use crate::models::{MetricValue, State};

/// Time-weighted running mean of ego speed
///
/// Each sample is weighted by the duration of the step that produced it.
/// The sample seeded at reset has no producing step, so it borrows the
/// duration of the first step with positive duration; with a uniform `dt`
/// the result is the arithmetic mean of every sample including the seed.
/// Zero-duration steps carry no weight.
///
/// The update is the continuous-time form
/// `avg += (1 - w) * (speed - avg)` with `w = elapsed_before / elapsed_through`.
///
/// # Example
///
/// ```
/// use scenario_metrics_core_rs::{EgoAvgSpeed, Metric, Scenario, State};
/// use std::sync::Arc;
///
/// let scenario = Arc::new(Scenario::new("ego", Vec::<String>::new()));
/// let mut avg = EgoAvgSpeed::new();
///
/// avg.reset(&State::new(scenario.clone(), 0.0, 0.0).with_velocity("ego", [0.0, 0.0, 0.0])).unwrap();
/// avg.step(&State::new(scenario.clone(), 1.0, 1.0).with_velocity("ego", [10.0, 0.0, 0.0])).unwrap();
/// avg.step(&State::new(scenario, 2.0, 1.0).with_velocity("ego", [20.0, 0.0, 0.0])).unwrap();
///
/// assert!((avg.average() - 10.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EgoAvgSpeed {
    ego: Option<String>,
    average: f64,
    /// Simulation time of the previous tick
    last_t: f64,
    /// Total weight folded into `average` so far
    elapsed: f64,
}

impl EgoAvgSpeed {
    pub const NAME: &'static str = "ego_avg_speed";

    /// Create an uninitialized metric
    pub fn new() -> Self {
        Self::default()
    }

    /// Current average
    pub fn average(&self) -> f64 {
        self.average
    }
}

impl Metric for EgoAvgSpeed {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn reset(&mut self, state: &State) -> Result<(), MetricError> {
        let ego = state.scenario.validate()?;
        self.average = ego_speed(state, ego)?;
        self.last_t = state.t;
        self.elapsed = 0.0;
        self.ego = Some(ego.to_string());

        tracing::debug!(metric = Self::NAME, ego = %ego, "metric reset");
        Ok(())
    }

    fn step(&mut self, state: &State) -> Result<(), MetricError> {
        let ego = require_ego(&self.ego, Self::NAME)?;
        let speed = ego_speed(state, ego)?;

        let duration = state.t - self.last_t;
        self.last_t = state.t;
        if duration < DT_EPSILON {
            return Ok(());
        }

        if self.elapsed < DT_EPSILON {
            // seed sample borrows the first step's duration
            self.elapsed = duration;
        }
        let through = self.elapsed + duration;
        let w = self.elapsed / through;
        self.average += (1.0 - w) * (speed - self.average);
        self.elapsed = through;
        Ok(())
    }

    fn check_reset(&self, state: &State) -> Result<(), MetricError> {
        check_ego_speed_reset(state)
    }

    fn check_step(&self, state: &State) -> Result<(), MetricError> {
        let ego = require_ego(&self.ego, Self::NAME)?;
        ego_speed(state, ego).map(drop)
    }

    fn get_state(&self) -> MetricValue {
        MetricValue::Scalar(self.average)
    }
}

/// Running maximum of ego speed
#[derive(Debug, Clone, Default)]
pub struct EgoMaxSpeed {
    ego: Option<String>,
    max: f64,
}

impl EgoMaxSpeed {
    pub const NAME: &'static str = "ego_max_speed";

    /// Create an uninitialized metric
    pub fn new() -> Self {
        Self::default()
    }

    /// Current maximum
    pub fn max(&self) -> f64 {
        self.max
    }
}

impl Metric for EgoMaxSpeed {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn reset(&mut self, state: &State) -> Result<(), MetricError> {
        let ego = state.scenario.validate()?;
        self.max = ego_speed(state, ego)?;
        self.ego = Some(ego.to_string());

        tracing::debug!(metric = Self::NAME, ego = %ego, "metric reset");
        Ok(())
    }

    fn step(&mut self, state: &State) -> Result<(), MetricError> {
        let ego = require_ego(&self.ego, Self::NAME)?;
        self.max = self.max.max(ego_speed(state, ego)?);
        Ok(())
    }

    fn check_reset(&self, state: &State) -> Result<(), MetricError> {
        check_ego_speed_reset(state)
    }

    fn check_step(&self, state: &State) -> Result<(), MetricError> {
        let ego = require_ego(&self.ego, Self::NAME)?;
        ego_speed(state, ego).map(drop)
    }

    fn get_state(&self) -> MetricValue {
        MetricValue::Scalar(self.max)
    }
}

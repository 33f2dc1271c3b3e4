//! Ego-only speed histories
//!
//! Single-entity versions of [`AllHistory`](super::AllHistory). The ego is
//! simulated on every tick, so there are no gaps. Both series are seeded at
//! reset with the initial sample.

use super::{
    check_ego_speed_reset, ego_speed, guarded_dt, require_ego, Metric, MetricError,
};
use crate::models::{EgoSeries, MetricValue, State};
use std::iter;

/// Ego speed over time
///
/// Result rows: `[t, speed]`.
#[derive(Debug, Clone, Default)]
pub struct EgoSpeedHistory {
    ego: Option<String>,
    t_history: Vec<f64>,
    speed_history: Vec<f64>,
}

impl EgoSpeedHistory {
    pub const NAME: &'static str = "ego_speed_history";

    /// Create an uninitialized metric
    pub fn new() -> Self {
        Self::default()
    }

    /// Series recorded so far
    pub fn series(&self) -> EgoSeries {
        EgoSeries {
            t: self.t_history.clone(),
            speed: self.speed_history.clone(),
            acceleration: None,
        }
    }
}

impl Metric for EgoSpeedHistory {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn reset(&mut self, state: &State) -> Result<(), MetricError> {
        let ego = state.scenario.validate()?;
        self.speed_history = vec![ego_speed(state, ego)?];
        self.t_history = vec![state.t];
        self.ego = Some(ego.to_string());

        tracing::debug!(metric = Self::NAME, ego = %ego, "metric reset");
        Ok(())
    }

    fn step(&mut self, state: &State) -> Result<(), MetricError> {
        let ego = require_ego(&self.ego, Self::NAME)?;
        self.speed_history.push(ego_speed(state, ego)?);
        self.t_history.push(state.t);
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
        MetricValue::Series(self.series())
    }
}

/// Ego speed and acceleration over time
///
/// Acceleration is stored as backward differences, one per step, so during
/// accumulation it holds one sample fewer than the speed history. The
/// returned series pads it with a leading 0 for the seed sample, which has
/// no previous speed; every row of the result then has the same length and
/// index `k` of each row refers to the same tick. Padding happens on read
/// and is never stored.
///
/// Result rows: `[t, speed, acceleration]`.
///
/// # Example
///
/// ```
/// use scenario_metrics_core_rs::{EgoSpeedAccelerationHistory, Metric, Scenario, State};
/// use std::sync::Arc;
///
/// let scenario = Arc::new(Scenario::new("ego", Vec::<String>::new()));
/// let mut metric = EgoSpeedAccelerationHistory::new();
///
/// metric.reset(&State::new(scenario.clone(), 0.0, 0.0).with_velocity("ego", [0.0, 0.0, 0.0])).unwrap();
/// metric.step(&State::new(scenario.clone(), 1.0, 1.0).with_velocity("ego", [10.0, 0.0, 0.0])).unwrap();
/// metric.step(&State::new(scenario, 2.0, 1.0).with_velocity("ego", [20.0, 0.0, 0.0])).unwrap();
///
/// let series = metric.series();
/// assert_eq!(series.speed, vec![0.0, 10.0, 20.0]);
/// assert_eq!(series.acceleration, Some(vec![0.0, 10.0, 10.0]));
/// assert_eq!(metric.series(), series); // reads are repeatable
/// ```
#[derive(Debug, Clone, Default)]
pub struct EgoSpeedAccelerationHistory {
    ego: Option<String>,
    t_history: Vec<f64>,
    speed_history: Vec<f64>,
    acceleration_history: Vec<f64>,
}

impl EgoSpeedAccelerationHistory {
    pub const NAME: &'static str = "ego_speed_acceleration_history";

    /// Create an uninitialized metric
    pub fn new() -> Self {
        Self::default()
    }

    /// Series recorded so far, with aligned rows
    pub fn series(&self) -> EgoSeries {
        let acceleration = if self.speed_history.is_empty() {
            Vec::new()
        } else {
            iter::once(0.0)
                .chain(self.acceleration_history.iter().copied())
                .collect()
        };
        EgoSeries {
            t: self.t_history.clone(),
            speed: self.speed_history.clone(),
            acceleration: Some(acceleration),
        }
    }
}

impl Metric for EgoSpeedAccelerationHistory {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn reset(&mut self, state: &State) -> Result<(), MetricError> {
        let ego = state.scenario.validate()?;
        self.speed_history = vec![ego_speed(state, ego)?];
        self.t_history = vec![state.t];
        self.acceleration_history.clear();
        self.ego = Some(ego.to_string());

        tracing::debug!(metric = Self::NAME, ego = %ego, "metric reset");
        Ok(())
    }

    fn step(&mut self, state: &State) -> Result<(), MetricError> {
        let ego = require_ego(&self.ego, Self::NAME)?;
        let speed = ego_speed(state, ego)?;
        let previous = self.speed_history.last().copied().unwrap_or(speed);

        self.acceleration_history
            .push((speed - previous) / guarded_dt(state.dt));
        self.speed_history.push(speed);
        self.t_history.push(state.t);
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
        MetricValue::Series(self.series())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Scenario;
    use std::sync::Arc;

    #[test]
    fn test_get_state_is_idempotent() {
        let scenario = Arc::new(Scenario::new("ego", Vec::<String>::new()));
        let mut metric = EgoSpeedAccelerationHistory::new();
        metric
            .reset(&State::new(scenario.clone(), 0.0, 0.0).with_velocity("ego", [1.0, 0.0, 0.0]))
            .unwrap();
        metric
            .step(&State::new(scenario, 0.5, 0.5).with_velocity("ego", [2.0, 0.0, 0.0]))
            .unwrap();

        let first = metric.get_state();
        let second = metric.get_state();
        assert_eq!(first, second);
        assert_eq!(first.as_series().unwrap().rows().len(), 3);
        assert_eq!(first.as_series().unwrap().rows()[2], vec![0.0, 2.0]);
    }

    #[test]
    fn test_speed_history_rows() {
        let scenario = Arc::new(Scenario::new("ego", Vec::<String>::new()));
        let mut metric = EgoSpeedHistory::new();
        metric
            .reset(&State::new(scenario.clone(), 0.0, 0.0).with_velocity("ego", [0.0, 3.0, 4.0]))
            .unwrap();
        metric
            .step(&State::new(scenario, 0.1, 0.1).with_velocity("ego", [0.0, 0.0, 1.0]))
            .unwrap();

        assert_eq!(metric.series().rows(), vec![vec![0.0, 0.1], vec![5.0, 1.0]]);
    }

    #[test]
    fn test_empty_before_reset() {
        let metric = EgoSpeedAccelerationHistory::new();
        let series = metric.series();
        assert!(series.is_empty());
        assert_eq!(series.acceleration, Some(Vec::new()));
    }

    #[test]
    fn test_missing_ego_mid_rollout_is_an_error() {
        let scenario = Arc::new(Scenario::new("ego", Vec::<String>::new()));
        let mut metric = EgoSpeedHistory::new();
        metric
            .reset(&State::new(scenario.clone(), 0.0, 0.0).with_velocity("ego", [1.0, 0.0, 0.0]))
            .unwrap();
        let result = metric.step(&State::new(scenario, 0.1, 0.1));
        assert!(matches!(result, Err(MetricError::EgoNotActive { .. })));
        assert_eq!(metric.series().len(), 1);
    }
}

//! Delay of the ego against an ideal constant-speed traversal
//!
//! On every tick where the ego's cumulative distance has advanced by more
//! than [`DISTANCE_PROGRESS_THRESHOLD`] since the previous tick, the delay is
//! recomputed as `t - distance / max_speed`. While the ego is stalled the
//! previous delay is held.

use super::{
    ego_distance, require_ego, Metric, MetricError, DEFAULT_MAX_SPEED,
    DISTANCE_PROGRESS_THRESHOLD,
};
use crate::models::{MetricValue, State};

/// Measures how far the ego lags an ideal traversal at `max_speed`
///
/// # Example
///
/// ```
/// use scenario_metrics_core_rs::{Delay, Metric, Scenario, State};
/// use std::sync::Arc;
///
/// let scenario = Arc::new(Scenario::new("ego", Vec::<String>::new()));
/// let mut delay = Delay::with_max_speed(10.0).unwrap();
///
/// delay.reset(&State::new(scenario.clone(), 0.0, 0.0).with_distance("ego", 0.0)).unwrap();
/// delay.step(&State::new(scenario, 2.0, 2.0).with_distance("ego", 10.0)).unwrap();
///
/// // Ideal traversal of 10 m at 10 m/s takes 1 s; the ego needed 2 s.
/// assert_eq!(delay.delay(), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct Delay {
    /// Speed of the ideal traversal
    max_speed: f64,

    /// Ego captured at reset
    ego: Option<String>,

    /// Ego distance on the previous tick
    last_distance: f64,

    /// Current delay
    delay: f64,
}

impl Delay {
    pub const NAME: &'static str = "delay";

    /// Create a delay metric using [`DEFAULT_MAX_SPEED`]
    pub fn new() -> Self {
        Self {
            max_speed: DEFAULT_MAX_SPEED,
            ego: None,
            last_distance: 0.0,
            delay: 0.0,
        }
    }

    /// Create a delay metric with a custom ideal speed
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `max_speed` is not a positive finite number
    pub fn with_max_speed(max_speed: f64) -> Result<Self, MetricError> {
        let mut metric = Self::new();
        metric.set_max_speed(max_speed)?;
        Ok(metric)
    }

    /// Change the ideal speed; configure before `reset`
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `max_speed` is not a positive finite number
    pub fn set_max_speed(&mut self, max_speed: f64) -> Result<(), MetricError> {
        if !max_speed.is_finite() || max_speed <= 0.0 {
            return Err(MetricError::InvalidConfig(format!(
                "max_speed must be positive and finite, got {}",
                max_speed
            )));
        }
        self.max_speed = max_speed;
        Ok(())
    }

    /// Ideal traversal speed
    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    /// Current delay
    pub fn delay(&self) -> f64 {
        self.delay
    }
}

impl Default for Delay {
    fn default() -> Self {
        Self::new()
    }
}

impl Metric for Delay {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn reset(&mut self, state: &State) -> Result<(), MetricError> {
        let ego = state.scenario.validate()?;
        self.last_distance = state.distance_of(ego).unwrap_or(0.0);
        self.delay = 0.0;
        self.ego = Some(ego.to_string());

        tracing::debug!(metric = Self::NAME, ego = %ego, max_speed = self.max_speed, "metric reset");
        Ok(())
    }

    fn step(&mut self, state: &State) -> Result<(), MetricError> {
        let ego = require_ego(&self.ego, Self::NAME)?;
        let distance = ego_distance(state, ego)?;

        if distance - self.last_distance > DISTANCE_PROGRESS_THRESHOLD {
            self.delay = state.t - distance / self.max_speed;
        } else {
            tracing::trace!(metric = Self::NAME, t = state.t, "ego stalled, holding delay");
        }
        self.last_distance = distance;
        Ok(())
    }

    fn check_step(&self, state: &State) -> Result<(), MetricError> {
        let ego = require_ego(&self.ego, Self::NAME)?;
        ego_distance(state, ego).map(drop)
    }

    fn get_state(&self) -> MetricValue {
        MetricValue::Scalar(self.delay)
    }
}

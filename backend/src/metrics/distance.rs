//! Distance travelled by the ego
//!
//! Distance accounting belongs to the rollout engine; this metric mirrors the
//! latest cumulative value it reports for the ego.

use super::{ego_distance, require_ego, Metric, MetricError};
use crate::models::{MetricValue, State};

/// Latest cumulative ego distance
#[derive(Debug, Clone, Default)]
pub struct EgoDistanceTravelled {
    ego: Option<String>,
    distance: f64,
}

impl EgoDistanceTravelled {
    pub const NAME: &'static str = "ego_distance_travelled";

    /// Create an uninitialized metric
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent distance
    pub fn distance(&self) -> f64 {
        self.distance
    }
}

impl Metric for EgoDistanceTravelled {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn reset(&mut self, state: &State) -> Result<(), MetricError> {
        let ego = state.scenario.validate()?;
        self.distance = state.distance_of(ego).unwrap_or(0.0);
        self.ego = Some(ego.to_string());

        tracing::debug!(metric = Self::NAME, ego = %ego, "metric reset");
        Ok(())
    }

    fn step(&mut self, state: &State) -> Result<(), MetricError> {
        let ego = require_ego(&self.ego, Self::NAME)?;
        self.distance = ego_distance(state, ego)?;
        Ok(())
    }

    fn check_step(&self, state: &State) -> Result<(), MetricError> {
        let ego = require_ego(&self.ego, Self::NAME)?;
        ego_distance(state, ego).map(drop)
    }

    fn get_state(&self) -> MetricValue {
        MetricValue::Scalar(self.distance)
    }
}

//! Metric result shapes
//!
//! Every metric reports through [`MetricValue`] so a driver can collect
//! results from heterogeneous metrics into one mapping keyed by name.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Speed and acceleration histories for every entity, on one shared time axis
///
/// A `None` sample means the entity was not simulated on that tick, which is
/// distinct from `Some(0.0)` (present but stationary).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllHistoryResult {
    /// Per-entity speed samples, one per tick
    pub speed: BTreeMap<String, Vec<Option<f64>>>,

    /// Per-entity acceleration samples, one per tick
    pub acceleration: BTreeMap<String, Vec<Option<f64>>>,

    /// Simulation time of each tick
    pub t: Vec<f64>,
}

impl AllHistoryResult {
    /// Number of ticks recorded
    pub fn ticks(&self) -> usize {
        self.t.len()
    }

    /// Speed history of one entity
    pub fn speed_of(&self, id: &str) -> Option<&[Option<f64>]> {
        self.speed.get(id).map(Vec::as_slice)
    }

    /// Acceleration history of one entity
    pub fn acceleration_of(&self, id: &str) -> Option<&[Option<f64>]> {
        self.acceleration.get(id).map(Vec::as_slice)
    }
}

/// Ego time series with aligned rows
///
/// Index `k` of every row refers to the same tick. `acceleration` is present
/// only for metrics that track it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EgoSeries {
    /// Simulation time of each sample
    pub t: Vec<f64>,

    /// Ego speed at each sample
    pub speed: Vec<f64>,

    /// Ego acceleration at each sample
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceleration: Option<Vec<f64>>,
}

impl EgoSeries {
    /// Number of samples
    pub fn len(&self) -> usize {
        self.t.len()
    }

    /// Whether the series holds no samples
    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Rows as a 2xN (`[t, speed]`) or 3xN (`[t, speed, acceleration]`) matrix
    pub fn rows(&self) -> Vec<Vec<f64>> {
        let mut rows = vec![self.t.clone(), self.speed.clone()];
        if let Some(acceleration) = &self.acceleration {
            rows.push(acceleration.clone());
        }
        rows
    }
}

/// Result of one metric's `get_state`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// Single number (delay, running average, running max, distance)
    Scalar(f64),

    /// Multi-entity histories
    History(AllHistoryResult),

    /// Ego-only time series
    Series(EgoSeries),
}

impl MetricValue {
    /// The scalar, if this is a scalar result
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            MetricValue::Scalar(value) => Some(*value),
            _ => None,
        }
    }

    /// The multi-entity histories, if this is a history result
    pub fn as_history(&self) -> Option<&AllHistoryResult> {
        match self {
            MetricValue::History(history) => Some(history),
            _ => None,
        }
    }

    /// The ego series, if this is a series result
    pub fn as_series(&self) -> Option<&EgoSeries> {
        match self {
            MetricValue::Series(series) => Some(series),
            _ => None,
        }
    }
}

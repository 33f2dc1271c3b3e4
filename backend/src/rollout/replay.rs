//! Replaying a record through a metric suite

use crate::models::MetricValue;
use crate::rollout::{RolloutError, RolloutRecord};
use crate::suite::MetricSuite;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Results of replaying one rollout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolloutReport {
    /// Rollout the results belong to
    pub rollout_id: String,

    /// SHA-256 of the scenario the rollout ran on
    pub scenario_hash: String,

    /// Ticks stepped after the initial snapshot
    pub ticks: usize,

    /// Metric name to result
    pub metrics: BTreeMap<String, MetricValue>,
}

impl RolloutReport {
    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, RolloutError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl RolloutRecord {
    /// Drive `suite` through this record
    ///
    /// Resets every metric on frame 0, steps them through the remaining
    /// frames in order, and collects the results.
    ///
    /// # Example
    ///
    /// ```rust
    /// use scenario_metrics_core_rs::{MetricConfig, MetricSuite, RolloutRecorder, Scenario};
    /// use std::collections::BTreeMap;
    ///
    /// let v = |s: f64| BTreeMap::from([("ego".to_string(), [s, 0.0, 0.0])]);
    /// let d = |x: f64| BTreeMap::from([("ego".to_string(), x)]);
    ///
    /// let mut recorder = RolloutRecorder::start(Scenario::new("ego", ["car_1"]), v(0.0), d(0.0));
    /// recorder.tick(1.0, v(10.0), d(10.0));
    /// recorder.tick(1.0, v(20.0), d(30.0));
    /// let record = recorder.finish();
    ///
    /// let mut suite = MetricSuite::from_configs(&[MetricConfig::EgoMaxSpeed]).unwrap();
    /// let report = record.replay(&mut suite).unwrap();
    ///
    /// assert_eq!(report.ticks, 2);
    /// assert_eq!(report.metrics["ego_max_speed"].as_scalar(), Some(20.0));
    /// ```
    pub fn replay(&self, suite: &mut MetricSuite) -> Result<RolloutReport, RolloutError> {
        self.validate()?;
        let scenario = Arc::new(self.scenario.clone());

        let (initial, ticks) = self.frames.split_first().ok_or(RolloutError::EmptyRecord)?;
        suite.reset(&initial.to_state(&scenario))?;
        for frame in ticks {
            suite.step(&frame.to_state(&scenario))?;
        }

        tracing::debug!(
            rollout_id = %self.rollout_id,
            ticks = suite.ticks(),
            metrics = suite.len(),
            "rollout replayed"
        );

        Ok(RolloutReport {
            rollout_id: self.rollout_id.clone(),
            scenario_hash: self.scenario_hash()?,
            ticks: suite.ticks(),
            metrics: suite.get_metrics(),
        })
    }
}

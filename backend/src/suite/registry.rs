//! Metric suite
//!
//! Holds the metrics registered for a rollout, forwards every lifecycle call
//! to each of them in registration order, and assembles the results mapping
//! keyed by metric name.
//!
//! # Example
//!
//! ```rust
//! use scenario_metrics_core_rs::{MetricConfig, MetricSuite, Scenario, State};
//! use std::sync::Arc;
//!
//! let mut suite = MetricSuite::from_configs(&[
//!     MetricConfig::EgoMaxSpeed,
//!     MetricConfig::EgoDistanceTravelled,
//! ]).unwrap();
//!
//! let scenario = Arc::new(Scenario::new("ego", ["car_1"]));
//! let initial = State::new(scenario.clone(), 0.0, 0.0).with_velocity("ego", [1.0, 0.0, 0.0]);
//! suite.reset(&initial).unwrap();
//!
//! let next = State::new(scenario, 0.1, 0.1)
//!     .with_velocity("ego", [2.0, 0.0, 0.0])
//!     .with_distance("ego", 0.2);
//! suite.step(&next).unwrap();
//!
//! let results = suite.get_metrics();
//! assert_eq!(results["ego_max_speed"].as_scalar(), Some(2.0));
//! assert_eq!(results["ego_distance_travelled"].as_scalar(), Some(0.2));
//! ```

use crate::metrics::{Metric, MetricConfig, MetricError};
use crate::models::{MetricValue, State};
use std::collections::BTreeMap;

/// Ordered collection of uniquely named metrics
#[derive(Default)]
pub struct MetricSuite {
    /// Registered metrics, in registration order
    metrics: Vec<Box<dyn Metric>>,

    /// Steps taken since the last reset
    ticks: usize,
}

impl MetricSuite {
    /// Create an empty suite
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a suite from configuration
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if a metric parameter is out of range
    /// - `DuplicateMetric` if two configs build metrics with the same name
    pub fn from_configs(configs: &[MetricConfig]) -> Result<Self, MetricError> {
        let mut suite = Self::new();
        for config in configs {
            suite.add(config.build()?)?;
        }
        Ok(suite)
    }

    /// Register a metric
    ///
    /// # Errors
    ///
    /// Returns `DuplicateMetric` if a metric with the same name is registered;
    /// results are keyed by name, so a second one would shadow the first.
    pub fn add(&mut self, metric: Box<dyn Metric>) -> Result<(), MetricError> {
        if self.contains(metric.name()) {
            return Err(MetricError::DuplicateMetric(metric.name().to_string()));
        }
        self.metrics.push(metric);
        Ok(())
    }

    /// Whether a metric with `name` is registered
    pub fn contains(&self, name: &str) -> bool {
        self.metrics.iter().any(|m| m.name() == name)
    }

    /// Names of registered metrics, in registration order
    pub fn names(&self) -> Vec<&'static str> {
        self.metrics.iter().map(|m| m.name()).collect()
    }

    /// Number of registered metrics
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    /// Whether no metrics are registered
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Steps taken since the last reset
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Reset every metric from the initial snapshot
    ///
    /// Every metric is checked before any of them is reset, so a missing ego,
    /// an empty vehicle set or an ego absent from the snapshot fails here
    /// and leaves the suite exactly as it was.
    pub fn reset(&mut self, state: &State) -> Result<(), MetricError> {
        let ego = state.scenario.validate()?;
        for metric in &self.metrics {
            metric.check_reset(state)?;
        }

        tracing::info!(
            metrics = self.metrics.len(),
            vehicles = state.scenario.vehicles().len(),
            ego = %ego,
            "resetting metric suite"
        );

        for metric in self.metrics.iter_mut() {
            metric.reset(state)?;
        }
        self.ticks = 0;
        Ok(())
    }

    /// Step every metric with the next snapshot
    ///
    /// Either every metric advances by one tick or none does: the snapshot
    /// is checked against all of them first.
    pub fn step(&mut self, state: &State) -> Result<(), MetricError> {
        for metric in &self.metrics {
            metric.check_step(state)?;
        }

        for metric in self.metrics.iter_mut() {
            metric.step(state)?;
        }
        self.ticks += 1;
        Ok(())
    }

    /// Current result of one metric
    pub fn get(&self, name: &str) -> Option<MetricValue> {
        self.metrics
            .iter()
            .find(|m| m.name() == name)
            .map(|m| m.get_state())
    }

    /// Results mapping: metric name to current result
    pub fn get_metrics(&self) -> BTreeMap<String, MetricValue> {
        self.metrics
            .iter()
            .map(|m| (m.name().to_string(), m.get_state()))
            .collect()
    }
}

impl std::fmt::Debug for MetricSuite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricSuite")
            .field("metrics", &self.names())
            .field("ticks", &self.ticks)
            .finish()
    }
}

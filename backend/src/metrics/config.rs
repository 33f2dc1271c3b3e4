//! Metric configuration
//!
//! Metrics are selected by configuration and built through a factory, so a
//! driver (or the Python bindings) can describe a suite as data.
//!
//! # Example
//!
//! ```rust
//! use scenario_metrics_core_rs::{Metric, MetricConfig};
//!
//! let configs: Vec<MetricConfig> = serde_json::from_str(
//!     r#"[{"type": "all_history"}, {"type": "delay", "max_speed": 10.0}]"#,
//! ).unwrap();
//!
//! let metrics = configs
//!     .iter()
//!     .map(MetricConfig::build)
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap();
//! assert_eq!(metrics[1].name(), "delay");
//! ```

use super::{
    AllHistory, Delay, EgoAvgSpeed, EgoDistanceTravelled, EgoMaxSpeed,
    EgoSpeedAccelerationHistory, EgoSpeedHistory, Metric, MetricError,
};
use serde::{Deserialize, Serialize};

/// Metric selection and parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MetricConfig {
    /// Speed/acceleration history of every entity
    AllHistory,

    /// Delay against an ideal traversal
    Delay {
        /// Ideal traversal speed; defaults to [`DEFAULT_MAX_SPEED`](super::DEFAULT_MAX_SPEED)
        #[serde(default)]
        max_speed: Option<f64>,
    },

    /// Time-weighted average ego speed
    EgoAvgSpeed,

    /// Maximum ego speed
    EgoMaxSpeed,

    /// Latest ego distance
    EgoDistanceTravelled,

    /// Ego speed series
    EgoSpeedHistory,

    /// Ego speed and acceleration series
    EgoSpeedAccelerationHistory,
}

impl MetricConfig {
    /// Name of the metric this config builds
    pub fn name(&self) -> &'static str {
        match self {
            MetricConfig::AllHistory => AllHistory::NAME,
            MetricConfig::Delay { .. } => Delay::NAME,
            MetricConfig::EgoAvgSpeed => EgoAvgSpeed::NAME,
            MetricConfig::EgoMaxSpeed => EgoMaxSpeed::NAME,
            MetricConfig::EgoDistanceTravelled => EgoDistanceTravelled::NAME,
            MetricConfig::EgoSpeedHistory => EgoSpeedHistory::NAME,
            MetricConfig::EgoSpeedAccelerationHistory => EgoSpeedAccelerationHistory::NAME,
        }
    }

    /// Build an uninitialized metric
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if a parameter is out of range
    pub fn build(&self) -> Result<Box<dyn Metric>, MetricError> {
        let metric: Box<dyn Metric> = match self {
            MetricConfig::AllHistory => Box::new(AllHistory::new()),
            MetricConfig::Delay { max_speed } => match max_speed {
                Some(max_speed) => Box::new(Delay::with_max_speed(*max_speed)?),
                None => Box::new(Delay::new()),
            },
            MetricConfig::EgoAvgSpeed => Box::new(EgoAvgSpeed::new()),
            MetricConfig::EgoMaxSpeed => Box::new(EgoMaxSpeed::new()),
            MetricConfig::EgoDistanceTravelled => Box::new(EgoDistanceTravelled::new()),
            MetricConfig::EgoSpeedHistory => Box::new(EgoSpeedHistory::new()),
            MetricConfig::EgoSpeedAccelerationHistory => {
                Box::new(EgoSpeedAccelerationHistory::new())
            }
        };
        Ok(metric)
    }
}

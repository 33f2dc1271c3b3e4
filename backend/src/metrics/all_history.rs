//! Speed and acceleration history of every scenario entity
//!
//! # Behavior
//!
//! - One sample per entity per `step`, aligned to a single shared time axis
//! - Speed is the norm of the entity's velocity while it is simulated
//! - Acceleration is the backward difference of speed over `dt`, or 0 when
//!   the entity has no speed on the previous tick (first observation, or
//!   first tick after reappearing)
//! - A tick on which the entity is not simulated records `None` for both
//!
//! # Critical Invariants
//!
//! 1. Every history has exactly as many samples as the time axis
//! 2. `None` only ever means "not simulated", never "stationary"

use super::{guarded_dt, Metric, MetricError};
use crate::models::{AllHistoryResult, MetricValue, State};
use std::collections::BTreeMap;

/// Per-entity accumulator
#[derive(Debug, Clone, Default)]
struct EntityTrack {
    speed: Vec<Option<f64>>,
    acceleration: Vec<Option<f64>>,
    /// Speed on the previous tick, if the entity was simulated then
    last_speed: Option<f64>,
}

/// Records speed and acceleration history of all entities
///
/// # Example
///
/// ```
/// use scenario_metrics_core_rs::{AllHistory, Metric, Scenario, State};
/// use std::sync::Arc;
///
/// let scenario = Arc::new(Scenario::new("ego", ["car_1"]));
/// let mut metric = AllHistory::new();
///
/// metric.reset(&State::new(scenario.clone(), 0.0, 0.0).with_velocity("ego", [1.0, 0.0, 0.0])).unwrap();
/// metric.step(&State::new(scenario.clone(), 1.0, 1.0).with_velocity("ego", [3.0, 0.0, 0.0])).unwrap();
/// metric.step(
///     &State::new(scenario, 2.0, 1.0)
///         .with_velocity("ego", [3.0, 0.0, 0.0])
///         .with_velocity("car_1", [0.0, 0.0, 0.0]),
/// ).unwrap();
///
/// let result = metric.result();
/// assert_eq!(result.speed_of("ego"), Some(&[Some(3.0), Some(3.0)][..]));
/// assert_eq!(result.acceleration_of("ego"), Some(&[Some(2.0), Some(0.0)][..]));
/// assert_eq!(result.speed_of("car_1"), Some(&[None, Some(0.0)][..]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct AllHistory {
    /// Tracks keyed by entity, covering the scenario's fixed vehicle set
    tracks: BTreeMap<String, EntityTrack>,

    /// Simulation time of each step
    t_history: Vec<f64>,

    ready: bool,
}

impl AllHistory {
    pub const NAME: &'static str = "all_history";

    /// Create an uninitialized metric
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of steps recorded since reset
    pub fn ticks(&self) -> usize {
        self.t_history.len()
    }

    /// Histories recorded so far
    pub fn result(&self) -> AllHistoryResult {
        let mut result = AllHistoryResult {
            t: self.t_history.clone(),
            ..AllHistoryResult::default()
        };
        for (id, track) in &self.tracks {
            result.speed.insert(id.clone(), track.speed.clone());
            result.acceleration.insert(id.clone(), track.acceleration.clone());
        }
        result
    }
}

impl Metric for AllHistory {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn reset(&mut self, state: &State) -> Result<(), MetricError> {
        state.scenario.validate()?;

        self.tracks = state
            .scenario
            .vehicles()
            .iter()
            .map(|id| {
                let track = EntityTrack {
                    last_speed: state.speed_of(id),
                    ..EntityTrack::default()
                };
                (id.clone(), track)
            })
            .collect();
        self.t_history.clear();
        self.ready = true;

        tracing::debug!(metric = Self::NAME, entities = self.tracks.len(), "metric reset");
        Ok(())
    }

    fn check_step(&self, _state: &State) -> Result<(), MetricError> {
        if !self.ready {
            return Err(MetricError::NotReset { metric: Self::NAME });
        }
        Ok(())
    }

    fn step(&mut self, state: &State) -> Result<(), MetricError> {
        self.check_step(state)?;

        let dt = guarded_dt(state.dt);

        for (id, track) in self.tracks.iter_mut() {
            match state.speed_of(id) {
                Some(speed) => {
                    let acceleration = match track.last_speed {
                        Some(previous) => (speed - previous) / dt,
                        // just appeared: no spike at spawn
                        None => 0.0,
                    };
                    track.speed.push(Some(speed));
                    track.acceleration.push(Some(acceleration));
                    track.last_speed = Some(speed);
                }
                None => {
                    track.speed.push(None);
                    track.acceleration.push(None);
                    track.last_speed = None;
                }
            }
        }

        for id in state.velocities.keys() {
            if !self.tracks.contains_key(id) {
                tracing::debug!(entity = %id, t = state.t, "ignoring entity outside scenario vehicle set");
            }
        }

        self.t_history.push(state.t);
        Ok(())
    }

    fn get_state(&self) -> MetricValue {
        MetricValue::History(self.result())
    }
}

//! Per-tick state snapshot
//!
//! The rollout engine materializes one [`State`] per tick and hands it to
//! every registered metric. Metrics only read it.
//!
//! # Critical Invariants
//!
//! 1. `velocities` has a key only for entities currently simulated
//! 2. `t` is non-decreasing across a rollout and starts at 0
//! 3. `distances` are cumulative and owned by the rollout engine

use crate::models::scenario::Scenario;
use std::collections::HashMap;
use std::sync::Arc;

/// Linear velocity of an entity (x, y, z)
pub type Velocity = [f64; 3];

/// Euclidean norm of a velocity vector
///
/// # Example
///
/// ```rust
/// use scenario_metrics_core_rs::speed;
///
/// assert_eq!(speed(&[3.0, 4.0, 0.0]), 5.0);
/// ```
pub fn speed(velocity: &Velocity) -> f64 {
    velocity.iter().map(|c| c * c).sum::<f64>().sqrt()
}

/// Snapshot of a rollout at one tick
///
/// # Example
///
/// ```rust
/// use scenario_metrics_core_rs::{Scenario, State};
/// use std::sync::Arc;
///
/// let scenario = Arc::new(Scenario::new("ego", ["car_1"]));
/// let state = State::new(scenario, 0.1, 0.1)
///     .with_velocity("ego", [3.0, 4.0, 0.0])
///     .with_distance("ego", 0.5);
///
/// assert_eq!(state.speed_of("ego"), Some(5.0));
/// assert_eq!(state.speed_of("car_1"), None); // not active
/// ```
#[derive(Debug, Clone)]
pub struct State {
    /// Simulation time elapsed since rollout start
    pub t: f64,

    /// Duration of the step that produced this snapshot (may be 0 at start)
    pub dt: f64,

    /// Velocities of the currently active entities
    pub velocities: HashMap<String, Velocity>,

    /// Cumulative distance travelled per entity
    pub distances: HashMap<String, f64>,

    /// Static scenario description
    pub scenario: Arc<Scenario>,
}

impl State {
    /// Create a snapshot with no active entities
    pub fn new(scenario: Arc<Scenario>, t: f64, dt: f64) -> Self {
        Self {
            t,
            dt,
            velocities: HashMap::new(),
            distances: HashMap::new(),
            scenario,
        }
    }

    /// Mark an entity active with the given velocity
    pub fn with_velocity(mut self, id: impl Into<String>, velocity: Velocity) -> Self {
        self.velocities.insert(id.into(), velocity);
        self
    }

    /// Set an entity's cumulative distance
    pub fn with_distance(mut self, id: impl Into<String>, distance: f64) -> Self {
        self.distances.insert(id.into(), distance);
        self
    }

    /// Speed of an entity, or `None` if it is not active this tick
    pub fn speed_of(&self, id: &str) -> Option<f64> {
        self.velocities.get(id).map(speed)
    }

    /// Cumulative distance of an entity, if reported
    pub fn distance_of(&self, id: &str) -> Option<f64> {
        self.distances.get(id).copied()
    }

    /// Whether an entity is simulated this tick
    pub fn is_active(&self, id: &str) -> bool {
        self.velocities.contains_key(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_of_stationary_entity_is_zero_not_none() {
        let scenario = Arc::new(Scenario::new("ego", ["car_1"]));
        let state = State::new(scenario, 0.0, 0.0).with_velocity("car_1", [0.0, 0.0, 0.0]);
        assert_eq!(state.speed_of("car_1"), Some(0.0));
        assert!(state.is_active("car_1"));
        assert!(!state.is_active("ego"));
    }

    #[test]
    fn test_speed_uses_all_three_components() {
        assert!((speed(&[1.0, 2.0, 2.0]) - 3.0).abs() < 1e-12);
    }
}

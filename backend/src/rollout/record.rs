//! Rollout record - store and reload the snapshots of a rollout
//!
//! # Critical Invariants
//!
//! - **Non-empty**: frame 0 is the initial snapshot handed to `reset`
//! - **Monotone time**: `t` never decreases from one frame to the next
//! - **Scenario identity**: a report names the scenario by its SHA-256 hash

use crate::core::clock::RolloutClock;
use crate::models::{Scenario, State, Velocity};
use crate::rollout::RolloutError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::sync::Arc;

// ============================================================================
// Frames
// ============================================================================

/// Serialisable form of one [`State`], without the scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub t: f64,
    pub dt: f64,
    #[serde(default)]
    pub velocities: BTreeMap<String, Velocity>,
    #[serde(default)]
    pub distances: BTreeMap<String, f64>,
}

impl Frame {
    /// Materialize the snapshot for `scenario`
    pub fn to_state(&self, scenario: &Arc<Scenario>) -> State {
        State {
            t: self.t,
            dt: self.dt,
            velocities: self
                .velocities
                .iter()
                .map(|(id, v)| (id.clone(), *v))
                .collect(),
            distances: self
                .distances
                .iter()
                .map(|(id, d)| (id.clone(), *d))
                .collect(),
            scenario: Arc::clone(scenario),
        }
    }
}

impl From<&State> for Frame {
    fn from(state: &State) -> Self {
        Frame {
            t: state.t,
            dt: state.dt,
            velocities: state
                .velocities
                .iter()
                .map(|(id, v)| (id.clone(), *v))
                .collect(),
            distances: state
                .distances
                .iter()
                .map(|(id, d)| (id.clone(), *d))
                .collect(),
        }
    }
}

// ============================================================================
// Record
// ============================================================================

/// Snapshots of one rollout plus the scenario they belong to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolloutRecord {
    /// Unique rollout identifier (UUID v4)
    pub rollout_id: String,

    /// Static scenario description
    pub scenario: Scenario,

    /// Frame 0 is the initial snapshot; each later frame is one tick
    pub frames: Vec<Frame>,
}

impl RolloutRecord {
    /// Create an empty record with a fresh rollout id
    pub fn new(scenario: Scenario) -> Self {
        Self {
            rollout_id: uuid::Uuid::new_v4().to_string(),
            scenario,
            frames: Vec::new(),
        }
    }

    /// Number of ticks after the initial snapshot
    pub fn ticks(&self) -> usize {
        self.frames.len().saturating_sub(1)
    }

    /// Check the record can be replayed
    ///
    /// # Errors
    ///
    /// - `EmptyRecord` if there is no initial frame
    /// - `Metric(MissingEgo | EmptyVehicleSet)` for an unusable scenario
    /// - `InvalidFrameTime` if a frame's `t` is not finite or its `dt` is
    ///   negative or not finite
    /// - `NonMonotonicTime` if a frame goes back in time
    pub fn validate(&self) -> Result<(), RolloutError> {
        if self.frames.is_empty() {
            return Err(RolloutError::EmptyRecord);
        }
        self.scenario.validate()?;

        for (index, frame) in self.frames.iter().enumerate() {
            if !frame.t.is_finite() || !frame.dt.is_finite() || frame.dt < 0.0 {
                return Err(RolloutError::InvalidFrameTime {
                    index,
                    t: frame.t,
                    dt: frame.dt,
                });
            }
        }

        for (index, pair) in self.frames.windows(2).enumerate() {
            if pair[1].t < pair[0].t {
                return Err(RolloutError::NonMonotonicTime {
                    index: index + 1,
                    previous: pair[0].t,
                    current: pair[1].t,
                });
            }
        }
        Ok(())
    }

    /// SHA-256 of the canonical scenario JSON
    pub fn scenario_hash(&self) -> Result<String, RolloutError> {
        compute_scenario_hash(&self.scenario)
    }

    /// Fail unless this record's scenario hashes to `expected`
    pub fn verify_scenario(&self, expected: &str) -> Result<(), RolloutError> {
        let actual = self.scenario_hash()?;
        if actual != expected {
            return Err(RolloutError::ScenarioMismatch {
                expected: expected.to_string(),
                actual,
            });
        }
        Ok(())
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, RolloutError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON and validate
    pub fn from_json(json: &str) -> Result<Self, RolloutError> {
        let record: RolloutRecord = serde_json::from_str(json)?;
        record.validate()?;
        Ok(record)
    }
}

/// Compute a deterministic SHA-256 hash of a scenario
///
/// Object keys are sorted recursively before hashing so the hash does not
/// depend on serialization order.
pub fn compute_scenario_hash(scenario: &Scenario) -> Result<String, RolloutError> {
    use serde_json::Value;

    fn canonicalize(value: Value) -> Value {
        match value {
            Value::Object(map) => {
                let sorted: BTreeMap<String, Value> =
                    map.into_iter().map(|(k, v)| (k, canonicalize(v))).collect();
                Value::Object(sorted.into_iter().collect())
            }
            Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize).collect()),
            other => other,
        }
    }

    let json = serde_json::to_string(&canonicalize(serde_json::to_value(scenario)?))?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

// ============================================================================
// Recorder
// ============================================================================

/// Builds a [`RolloutRecord`] tick by tick
///
/// # Example
///
/// ```rust
/// use scenario_metrics_core_rs::{RolloutRecorder, Scenario};
/// use std::collections::BTreeMap;
///
/// let velocities = |v: f64| BTreeMap::from([("ego".to_string(), [v, 0.0, 0.0])]);
/// let distances = |d: f64| BTreeMap::from([("ego".to_string(), d)]);
///
/// let mut recorder = RolloutRecorder::start(
///     Scenario::new("ego", ["car_1"]),
///     velocities(0.0),
///     distances(0.0),
/// );
/// recorder.tick(0.5, velocities(2.0), distances(1.0));
/// recorder.tick(0.5, velocities(4.0), distances(3.0));
///
/// let record = recorder.finish();
/// assert_eq!(record.ticks(), 2);
/// assert_eq!(record.frames[2].t, 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct RolloutRecorder {
    record: RolloutRecord,
    clock: RolloutClock,
}

impl RolloutRecorder {
    /// Start a record with the initial snapshot at `t = 0`
    pub fn start(
        scenario: Scenario,
        velocities: BTreeMap<String, Velocity>,
        distances: BTreeMap<String, f64>,
    ) -> Self {
        let clock = RolloutClock::new();
        let mut record = RolloutRecord::new(scenario);
        record.frames.push(Frame {
            t: clock.t(),
            dt: clock.dt(),
            velocities,
            distances,
        });
        Self { record, clock }
    }

    /// Append the snapshot produced by a step of duration `dt`
    ///
    /// # Panics
    /// Panics if `dt` is negative or not finite.
    pub fn tick(
        &mut self,
        dt: f64,
        velocities: BTreeMap<String, Velocity>,
        distances: BTreeMap<String, f64>,
    ) {
        self.clock.advance(dt);
        self.record.frames.push(Frame {
            t: self.clock.t(),
            dt: self.clock.dt(),
            velocities,
            distances,
        });
    }

    /// Ticks recorded after the initial snapshot
    pub fn ticks(&self) -> usize {
        self.clock.tick()
    }

    /// Finish recording
    pub fn finish(self) -> RolloutRecord {
        self.record
    }
}

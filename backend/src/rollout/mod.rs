//! Recorded rollouts
//!
//! A [`RolloutRecord`] captures the snapshots of one rollout so it can be
//! stored as JSON and replayed through a [`MetricSuite`](crate::MetricSuite)
//! later, producing a [`RolloutReport`].

pub mod error;
pub mod record;
pub mod replay;

pub use error::RolloutError;
pub use record::{compute_scenario_hash, Frame, RolloutRecord, RolloutRecorder};
pub use replay::RolloutReport;

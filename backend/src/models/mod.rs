//! Domain models for scenario rollouts

pub mod scenario;
pub mod state;
pub mod value;

// Re-exports
pub use scenario::Scenario;
pub use state::{speed, State, Velocity};
pub use value::{AllHistoryResult, EgoSeries, MetricValue};

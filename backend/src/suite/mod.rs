//! Metric suite - the results registry a rollout driver hosts
//!
//! See `registry.rs` for the implementation.

pub mod registry;

// Re-export main types for convenience
pub use registry::MetricSuite;

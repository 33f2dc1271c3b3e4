//! Rollout clock
//!
//! A rollout advances in ticks of variable duration. The clock tracks the
//! elapsed simulation time `t`, the duration of the most recent step `dt`,
//! and how many steps have been taken since the rollout started.

use serde::{Deserialize, Serialize};

/// Tracks elapsed time across variable-duration ticks
///
/// # Example
/// ```
/// use scenario_metrics_core_rs::RolloutClock;
///
/// let mut clock = RolloutClock::new();
/// assert_eq!(clock.tick(), 0);
/// assert_eq!(clock.t(), 0.0);
///
/// clock.advance(0.1);
/// clock.advance(0.25);
/// assert_eq!(clock.tick(), 2);
/// assert!((clock.t() - 0.35).abs() < 1e-12);
/// assert_eq!(clock.dt(), 0.25);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RolloutClock {
    /// Simulation time elapsed since rollout start
    t: f64,
    /// Duration of the most recent step (0 before the first step)
    dt: f64,
    /// Number of steps taken since rollout start
    tick: usize,
}

impl RolloutClock {
    /// Create a clock at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one step of duration `dt`
    ///
    /// # Panics
    /// Panics if `dt` is negative or not finite; time never runs backwards.
    ///
    /// # Example
    /// ```
    /// use scenario_metrics_core_rs::RolloutClock;
    ///
    /// let mut clock = RolloutClock::new();
    /// clock.advance(0.5);
    /// assert_eq!(clock.t(), 0.5);
    /// ```
    pub fn advance(&mut self, dt: f64) {
        assert!(dt.is_finite() && dt >= 0.0, "dt must be finite and non-negative");
        self.t += dt;
        self.dt = dt;
        self.tick += 1;
    }

    /// Elapsed simulation time
    pub fn t(&self) -> f64 {
        self.t
    }

    /// Duration of the most recent step
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Steps taken since rollout start
    pub fn tick(&self) -> usize {
        self.tick
    }

    /// Rewind to time zero
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "dt must be finite and non-negative")]
    fn test_negative_dt_panics() {
        RolloutClock::new().advance(-0.1);
    }

    #[test]
    fn test_zero_dt_still_counts_tick() {
        let mut clock = RolloutClock::new();
        clock.advance(0.0);
        assert_eq!(clock.tick(), 1);
        assert_eq!(clock.t(), 0.0);
    }
}

//! Tests for RolloutClock

use scenario_metrics_core_rs::RolloutClock;

#[test]
fn test_clock_new() {
    let clock = RolloutClock::new();
    assert_eq!(clock.tick(), 0);
    assert_eq!(clock.t(), 0.0);
    assert_eq!(clock.dt(), 0.0);
}

#[test]
fn test_advance_accumulates_variable_steps() {
    let mut clock = RolloutClock::new();

    clock.advance(0.1);
    assert_eq!(clock.tick(), 1);
    assert_eq!(clock.dt(), 0.1);

    clock.advance(0.4);
    assert_eq!(clock.tick(), 2);
    assert_eq!(clock.dt(), 0.4);
    assert!((clock.t() - 0.5).abs() < 1e-12);
}

#[test]
fn test_reset_rewinds_to_zero() {
    let mut clock = RolloutClock::new();
    for _ in 0..10 {
        clock.advance(0.25);
    }
    assert_eq!(clock.t(), 2.5);

    clock.reset();
    assert_eq!(clock, RolloutClock::new());
}

//! Integration tests for running ego statistics
//!
//! Tests cover:
//! - Maximum speed is monotone and seeded at reset
//! - Average speed equals the arithmetic mean under uniform dt
//! - Average speed weights by step duration under variable dt
//! - Distance travelled mirrors the latest reported value

use scenario_metrics_core_rs::{
    EgoAvgSpeed, EgoDistanceTravelled, EgoMaxSpeed, Metric, MetricError, MetricValue, Scenario,
    State,
};
use std::sync::Arc;

fn create_scenario() -> Arc<Scenario> {
    Arc::new(Scenario::new("ego", ["car_1"]))
}

fn ego_state(scenario: &Arc<Scenario>, t: f64, dt: f64, speed: f64) -> State {
    State::new(scenario.clone(), t, dt).with_velocity("ego", [speed, 0.0, 0.0])
}

/// Reset on the first speed, step through the rest with a fixed dt
fn drive<M: Metric>(metric: &mut M, dt: f64, speeds: &[f64]) {
    let scenario = create_scenario();
    metric.reset(&ego_state(&scenario, 0.0, 0.0, speeds[0])).unwrap();
    for (k, speed) in speeds.iter().enumerate().skip(1) {
        metric
            .step(&ego_state(&scenario, k as f64 * dt, dt, *speed))
            .unwrap();
    }
}

#[test]
fn test_concrete_three_tick_rollout() {
    let mut max = EgoMaxSpeed::new();
    let mut avg = EgoAvgSpeed::new();
    drive(&mut max, 1.0, &[0.0, 10.0, 20.0]);
    drive(&mut avg, 1.0, &[0.0, 10.0, 20.0]);

    assert_eq!(max.get_state(), MetricValue::Scalar(20.0));
    assert!((avg.average() - 10.0).abs() < 1e-9);
}

#[test]
fn test_max_never_decreases() {
    let scenario = create_scenario();
    let mut max = EgoMaxSpeed::new();
    max.reset(&ego_state(&scenario, 0.0, 0.0, 3.0)).unwrap();

    let mut previous = max.max();
    for (k, speed) in [5.0, 1.0, 9.0, 0.0, 8.9, 12.0].iter().enumerate() {
        max.step(&ego_state(&scenario, (k + 1) as f64 * 0.1, 0.1, *speed))
            .unwrap();
        assert!(max.max() >= previous);
        previous = max.max();
    }
    assert_eq!(max.max(), 12.0);
}

#[test]
fn test_max_uses_speed_magnitude() {
    let scenario = create_scenario();
    let mut max = EgoMaxSpeed::new();
    max.reset(&ego_state(&scenario, 0.0, 0.0, 0.0)).unwrap();
    max.step(
        &State::new(scenario, 0.1, 0.1).with_velocity("ego", [-3.0, 0.0, -4.0]),
    )
    .unwrap();
    assert_eq!(max.max(), 5.0);
}

#[test]
fn test_average_equals_mean_for_uniform_dt() {
    let speeds = [4.0, 6.0, 8.0, 2.0, 10.0];
    let mut avg = EgoAvgSpeed::new();
    drive(&mut avg, 0.05, &speeds);

    let mean = speeds.iter().sum::<f64>() / speeds.len() as f64;
    assert!((avg.average() - mean).abs() < 1e-9);
}

#[test]
fn test_average_of_constant_speed_is_that_speed() {
    let mut avg = EgoAvgSpeed::new();
    drive(&mut avg, 0.1, &[7.5; 20]);
    assert!((avg.average() - 7.5).abs() < 1e-9);
}

#[test]
fn test_average_weights_longer_steps_more() {
    let scenario = create_scenario();
    let mut avg = EgoAvgSpeed::new();
    avg.reset(&ego_state(&scenario, 0.0, 0.0, 10.0)).unwrap();
    avg.step(&ego_state(&scenario, 0.1, 0.1, 10.0)).unwrap();
    avg.step(&ego_state(&scenario, 1.1, 1.0, 20.0)).unwrap();

    // 10 for 0.2s (seed + first step), 20 for 1.0s
    let expected = (10.0 * 0.2 + 20.0 * 1.0) / 1.2;
    assert!((avg.average() - expected).abs() < 1e-9);
}

#[test]
fn test_reset_clears_previous_rollout() {
    let mut max = EgoMaxSpeed::new();
    let mut avg = EgoAvgSpeed::new();
    drive(&mut max, 1.0, &[0.0, 30.0]);
    drive(&mut avg, 1.0, &[0.0, 30.0]);

    drive(&mut max, 1.0, &[1.0, 2.0]);
    drive(&mut avg, 1.0, &[1.0, 2.0]);
    assert_eq!(max.max(), 2.0);
    assert!((avg.average() - 1.5).abs() < 1e-9);
}

#[test]
fn test_step_before_reset_is_an_error() {
    let scenario = create_scenario();
    let mut max = EgoMaxSpeed::new();
    assert_eq!(
        max.step(&ego_state(&scenario, 0.1, 0.1, 1.0)),
        Err(MetricError::NotReset {
            metric: EgoMaxSpeed::NAME
        })
    );
}

#[test]
fn test_distance_travelled_tracks_latest_value() {
    let scenario = create_scenario();
    let mut distance = EgoDistanceTravelled::new();
    distance
        .reset(&State::new(scenario.clone(), 0.0, 0.0).with_distance("ego", 2.0))
        .unwrap();
    assert_eq!(distance.distance(), 2.0);

    for (k, d) in [2.5, 4.0, 4.0, 9.5].iter().enumerate() {
        distance
            .step(&State::new(scenario.clone(), (k + 1) as f64, 1.0).with_distance("ego", *d))
            .unwrap();
        assert_eq!(distance.get_state(), MetricValue::Scalar(*d));
    }
}

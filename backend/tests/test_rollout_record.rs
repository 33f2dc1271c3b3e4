//! Integration tests for rollout records and replay
//!
//! Tests cover:
//! - Recording a rollout tick by tick
//! - JSON persistence and validation on load
//! - Replay through a metric suite
//! - Scenario hash verification

use scenario_metrics_core_rs::{
    compute_scenario_hash, Frame, MetricConfig, MetricError, MetricSuite, RolloutError,
    RolloutRecord, RolloutRecorder, Scenario, Velocity,
};
use std::collections::BTreeMap;

fn velocities(entries: &[(&str, f64)]) -> BTreeMap<String, Velocity> {
    entries
        .iter()
        .map(|(id, speed)| (id.to_string(), [*speed, 0.0, 0.0]))
        .collect()
}

fn distances(ego: f64) -> BTreeMap<String, f64> {
    BTreeMap::from([("ego".to_string(), ego)])
}

/// dt = [0, 1, 1], ego speeds = [0, 10, 20]; car_1 leaves after tick 1
fn concrete_record() -> RolloutRecord {
    let mut recorder = RolloutRecorder::start(
        Scenario::new("ego", ["car_1"]),
        velocities(&[("ego", 0.0), ("car_1", 5.0)]),
        distances(0.0),
    );
    recorder.tick(1.0, velocities(&[("ego", 10.0), ("car_1", 5.0)]), distances(10.0));
    recorder.tick(1.0, velocities(&[("ego", 20.0)]), distances(30.0));
    assert_eq!(recorder.ticks(), 2);
    recorder.finish()
}

fn full_suite() -> MetricSuite {
    MetricSuite::from_configs(&[
        MetricConfig::AllHistory,
        MetricConfig::Delay { max_speed: None },
        MetricConfig::EgoAvgSpeed,
        MetricConfig::EgoMaxSpeed,
        MetricConfig::EgoDistanceTravelled,
        MetricConfig::EgoSpeedHistory,
        MetricConfig::EgoSpeedAccelerationHistory,
    ])
    .unwrap()
}

#[test]
fn test_recorder_builds_frames_with_time() {
    let record = concrete_record();
    assert_eq!(record.ticks(), 2);
    assert_eq!(record.frames.len(), 3);

    let times: Vec<f64> = record.frames.iter().map(|f| f.t).collect();
    let dts: Vec<f64> = record.frames.iter().map(|f| f.dt).collect();
    assert_eq!(times, vec![0.0, 1.0, 2.0]);
    assert_eq!(dts, vec![0.0, 1.0, 1.0]);
    assert!(record.validate().is_ok());
}

#[test]
fn test_rollout_ids_are_unique() {
    let a = concrete_record();
    let b = concrete_record();
    assert_ne!(a.rollout_id, b.rollout_id);
}

#[test]
fn test_json_round_trip_preserves_record() {
    let record = concrete_record();
    let json = record.to_json().unwrap();
    let loaded = RolloutRecord::from_json(&json).unwrap();
    assert_eq!(loaded, record);
}

#[test]
fn test_from_json_validates() {
    let empty = r#"{"rollout_id": "r-1", "scenario": {"ego": "ego", "vehicles": ["ego"]}, "frames": []}"#;
    assert!(matches!(
        RolloutRecord::from_json(empty),
        Err(RolloutError::EmptyRecord)
    ));

    let no_ego = r#"{"rollout_id": "r-2", "scenario": {"vehicles": ["car_1"]}, "frames": [{"t": 0.0, "dt": 0.0}]}"#;
    assert!(matches!(
        RolloutRecord::from_json(no_ego),
        Err(RolloutError::Metric(MetricError::MissingEgo))
    ));

    assert!(matches!(
        RolloutRecord::from_json("not json"),
        Err(RolloutError::Serialization(_))
    ));
}

#[test]
fn test_replay_produces_report() {
    let record = concrete_record();
    let mut suite = full_suite();
    let report = record.replay(&mut suite).unwrap();

    assert_eq!(report.rollout_id, record.rollout_id);
    assert_eq!(report.scenario_hash, record.scenario_hash().unwrap());
    assert_eq!(report.ticks, 2);
    assert_eq!(report.metrics.len(), 7);
    assert_eq!(report.metrics["ego_max_speed"].as_scalar(), Some(20.0));
    assert_eq!(report.metrics["ego_distance_travelled"].as_scalar(), Some(30.0));

    let history = report.metrics["all_history"].as_history().unwrap();
    assert_eq!(history.speed_of("car_1").unwrap(), &[Some(5.0), None]);
    assert_eq!(history.acceleration_of("car_1").unwrap(), &[Some(0.0), None]);
}

#[test]
fn test_replay_is_repeatable_with_one_suite() {
    let record = concrete_record();
    let mut suite = full_suite();
    let first = record.replay(&mut suite).unwrap();
    let second = record.replay(&mut suite).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_report_serializes_to_json() {
    let record = concrete_record();
    let report = record.replay(&mut full_suite()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    assert_eq!(json["ticks"], serde_json::json!(2));
    assert_eq!(json["metrics"]["ego_max_speed"], serde_json::json!(20.0));
    assert_eq!(json["rollout_id"], serde_json::json!(record.rollout_id));
}

#[test]
fn test_replay_surfaces_metric_errors() {
    let mut record = concrete_record();
    record.frames[2].distances.clear();

    let result = record.replay(&mut full_suite());
    assert!(matches!(
        result,
        Err(RolloutError::Metric(MetricError::EgoDistanceMissing { .. }))
    ));
}

#[test]
fn test_replay_rejects_time_going_backwards() {
    let mut record = concrete_record();
    record.frames.push(Frame {
        t: 1.5,
        dt: 0.5,
        velocities: velocities(&[("ego", 1.0)]),
        distances: distances(31.0),
    });

    assert!(matches!(
        record.replay(&mut full_suite()),
        Err(RolloutError::NonMonotonicTime { index: 3, .. })
    ));
}

#[test]
fn test_scenario_verification() {
    let record = concrete_record();
    let expected = compute_scenario_hash(&Scenario::new("ego", ["car_1"])).unwrap();
    assert!(record.verify_scenario(&expected).is_ok());

    let other = compute_scenario_hash(&Scenario::new("ego", ["car_2"])).unwrap();
    assert!(matches!(
        record.verify_scenario(&other),
        Err(RolloutError::ScenarioMismatch { .. })
    ));
}

#[test]
fn test_replay_rejects_non_finite_or_negative_time() {
    let mut nan_time = concrete_record();
    nan_time.frames[1].t = f64::NAN;
    assert!(matches!(
        nan_time.replay(&mut full_suite()),
        Err(RolloutError::InvalidFrameTime { index: 1, .. })
    ));

    let mut infinite_time = concrete_record();
    infinite_time.frames[2].t = f64::INFINITY;
    assert!(matches!(
        infinite_time.validate(),
        Err(RolloutError::InvalidFrameTime { index: 2, .. })
    ));

    let mut negative_dt = concrete_record();
    negative_dt.frames[2].dt = -1.0;
    assert!(matches!(
        negative_dt.validate(),
        Err(RolloutError::InvalidFrameTime { index: 2, .. })
    ));
}

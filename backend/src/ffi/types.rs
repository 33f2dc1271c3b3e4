//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust types and PyO3-compatible types (PyDict, PyList, etc.)

use pyo3::prelude::*;
use pyo3::types::PyDict;
use std::collections::HashMap;
use std::sync::Arc;

use crate::metrics::MetricConfig;
use crate::models::{MetricValue, Scenario, State, Velocity};

// ========================================================================
// PyDict Extraction Helpers
// ========================================================================

/// Extract a required field from a Python dict with clear error messages.
///
/// # Errors
/// Returns PyValueError if the field is missing or has the wrong type
fn extract_required<'py, T>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<T>
where
    T: FromPyObject<'py>,
{
    dict.get_item(key)?
        .ok_or_else(|| {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                "Missing required field '{}'",
                key
            ))
        })?
        .extract()
}

/// Extract an optional field from a Python dict.
///
/// A missing key and an explicit `None` both yield `Ok(None)`.
fn extract_optional<'py, T>(dict: &Bound<'py, PyDict>, key: &str) -> PyResult<Option<T>>
where
    T: FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) if !value.is_none() => Ok(Some(value.extract()?)),
        _ => Ok(None),
    }
}

// ========================================================================
// Parsers
// ========================================================================

/// Convert a Python dict to a MetricConfig
///
/// Expected shape: `{"type": "delay", "max_speed": 10.0}`
pub fn parse_metric_config(dict: &Bound<'_, PyDict>) -> PyResult<MetricConfig> {
    let metric_type: String = extract_required(dict, "type")?;
    let config = match metric_type.as_str() {
        "all_history" => MetricConfig::AllHistory,
        "delay" => MetricConfig::Delay {
            max_speed: extract_optional(dict, "max_speed")?,
        },
        "ego_avg_speed" => MetricConfig::EgoAvgSpeed,
        "ego_max_speed" => MetricConfig::EgoMaxSpeed,
        "ego_distance_travelled" => MetricConfig::EgoDistanceTravelled,
        "ego_speed_history" => MetricConfig::EgoSpeedHistory,
        "ego_speed_acceleration_history" => MetricConfig::EgoSpeedAccelerationHistory,
        other => {
            return Err(PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                "Unknown metric type '{}'",
                other
            )))
        }
    };
    Ok(config)
}

/// Convert a Python dict to a Scenario
///
/// Expected shape: `{"ego": "ego_id", "vehicles": ["ego_id", "car_1"]}`.
/// A missing ego is kept as `None` so that `reset` reports it.
pub fn parse_scenario(dict: &Bound<'_, PyDict>) -> PyResult<Scenario> {
    let ego: Option<String> = extract_optional(dict, "ego")?;
    let vehicles: Vec<String> = extract_required(dict, "vehicles")?;
    Ok(Scenario::from_parts(ego, vehicles))
}

/// Convert a Python dict to a State for `scenario`
///
/// Expected shape:
/// `{"t": 0.1, "dt": 0.1, "velocities": {"id": [vx, vy, vz, ...]}, "distances": {"id": d}}`.
/// Velocity vectors may carry extra components (e.g. angular rates); only
/// the first three are read.
pub fn parse_state(dict: &Bound<'_, PyDict>, scenario: &Arc<Scenario>) -> PyResult<State> {
    let t: f64 = extract_required(dict, "t")?;
    let dt: f64 = extract_optional(dict, "dt")?.unwrap_or(0.0);

    let raw_velocities: HashMap<String, Vec<f64>> =
        extract_optional(dict, "velocities")?.unwrap_or_default();
    let mut velocities = HashMap::with_capacity(raw_velocities.len());
    for (id, components) in raw_velocities {
        if components.len() < 3 {
            return Err(PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                "Velocity of '{}' needs at least 3 components, got {}",
                id,
                components.len()
            )));
        }
        let velocity: Velocity = [components[0], components[1], components[2]];
        velocities.insert(id, velocity);
    }

    let distances: HashMap<String, f64> =
        extract_optional(dict, "distances")?.unwrap_or_default();

    Ok(State {
        t,
        dt,
        velocities,
        distances,
        scenario: Arc::clone(scenario),
    })
}

// ========================================================================
// Result Conversion
// ========================================================================

/// Convert a MetricValue to a Python object
///
/// - Scalar → float
/// - History → tuple `(speed: dict, acceleration: dict, t: list)`, with
///   `None` where an entity was not simulated
/// - Series → list of rows (`[t, speed]` or `[t, speed, acceleration]`)
pub fn metric_value_to_py(py: Python<'_>, value: &MetricValue) -> PyResult<PyObject> {
    match value {
        MetricValue::Scalar(scalar) => Ok((*scalar).into_py(py)),
        MetricValue::History(history) => {
            let speed = PyDict::new_bound(py);
            for (id, samples) in &history.speed {
                speed.set_item(id, samples.clone())?;
            }
            let acceleration = PyDict::new_bound(py);
            for (id, samples) in &history.acceleration {
                acceleration.set_item(id, samples.clone())?;
            }
            Ok((speed, acceleration, history.t.clone()).into_py(py))
        }
        MetricValue::Series(series) => Ok(series.rows().into_py(py)),
    }
}

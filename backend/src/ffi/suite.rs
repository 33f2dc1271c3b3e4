//! PyO3 wrapper for MetricSuite
//!
//! This module provides the Python interface to the Rust metric suite.

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};
use std::sync::Arc;

use super::types::{metric_value_to_py, parse_metric_config, parse_scenario, parse_state};
use crate::models::Scenario;
use crate::suite::MetricSuite;

/// Python wrapper for the Rust MetricSuite
///
/// # Example (from Python)
///
/// ```python
/// from scenario_metrics_core_rs import MetricSuite
///
/// suite = MetricSuite([{"type": "all_history"}, {"type": "delay", "max_speed": 10.0}])
/// suite.reset(
///     {"ego": "ego", "vehicles": ["ego", "car_1"]},
///     {"t": 0.0, "dt": 0.0, "velocities": {"ego": [0.0, 0.0, 0.0]}, "distances": {"ego": 0.0}},
/// )
/// suite.step({"t": 0.1, "dt": 0.1, "velocities": {"ego": [1.0, 0.0, 0.0]}, "distances": {"ego": 0.1}})
///
/// speed, acceleration, t = suite.get_metrics()["all_history"]
/// ```
#[pyclass(name = "MetricSuite")]
pub struct PyMetricSuite {
    inner: MetricSuite,
    scenario: Option<Arc<Scenario>>,
}

#[pymethods]
impl PyMetricSuite {
    /// Create a suite from a list of metric config dicts
    ///
    /// # Errors
    ///
    /// Raises ValueError for unknown metric types, out-of-range parameters,
    /// or duplicate metric names
    #[new]
    fn new(configs: &Bound<'_, PyList>) -> PyResult<Self> {
        let mut rust_configs = Vec::with_capacity(configs.len());
        for item in configs.iter() {
            let dict = item.downcast::<PyDict>()?;
            rust_configs.push(parse_metric_config(dict)?);
        }

        let inner = MetricSuite::from_configs(&rust_configs).map_err(|e| {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                "Failed to create metric suite: {}",
                e
            ))
        })?;

        Ok(PyMetricSuite {
            inner,
            scenario: None,
        })
    }

    /// Reset every metric for a new rollout
    ///
    /// # Arguments
    ///
    /// * `scenario` - `{"ego": str, "vehicles": [str]}`
    /// * `state` - Initial snapshot dict
    ///
    /// On failure nothing changes: the previous rollout's scenario and
    /// results stay in place.
    fn reset(&mut self, scenario: &Bound<'_, PyDict>, state: &Bound<'_, PyDict>) -> PyResult<()> {
        let scenario = Arc::new(parse_scenario(scenario)?);
        let state = parse_state(state, &scenario)?;

        self.inner.reset(&state).map_err(|e| {
            PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!("Reset failed: {}", e))
        })?;
        self.scenario = Some(scenario);
        Ok(())
    }

    /// Step every metric with the next snapshot dict
    fn step(&mut self, state: &Bound<'_, PyDict>) -> PyResult<()> {
        let scenario = self.scenario.as_ref().ok_or_else(|| {
            PyErr::new::<pyo3::exceptions::PyRuntimeError, _>("step called before reset")
        })?;
        let state = parse_state(state, scenario)?;

        self.inner.step(&state).map_err(|e| {
            PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!("Step failed: {}", e))
        })
    }

    /// Results mapping: metric name to result
    fn get_metrics(&self, py: Python<'_>) -> PyResult<Py<PyDict>> {
        let results = PyDict::new_bound(py);
        for (name, value) in self.inner.get_metrics() {
            results.set_item(name, metric_value_to_py(py, &value)?)?;
        }
        Ok(results.unbind())
    }

    /// Names of registered metrics
    fn names(&self) -> Vec<&'static str> {
        self.inner.names()
    }

    /// Steps taken since the last reset
    #[getter]
    fn ticks(&self) -> usize {
        self.inner.ticks()
    }
}

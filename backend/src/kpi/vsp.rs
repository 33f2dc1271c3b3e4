//! Vehicle specific power
//!
//! Instantaneous tractive power per unit vehicle mass, in kW/tonne, from the
//! light-duty approximation
//!
//! ```text
//! VSP = 1.1 * v * a + 0.213 * v + 0.000305 * v^3
//! ```
//!
//! with `v` in m/s and `a` in m/s^2 (flat road).

use crate::metrics::MetricError;
use crate::models::EgoSeries;

/// Mass-specific acceleration term coefficient (includes rotating mass)
const ACCELERATION_COEFF: f64 = 1.1;

/// Rolling resistance coefficient
const ROLLING_COEFF: f64 = 0.213;

/// Aerodynamic drag coefficient
const DRAG_COEFF: f64 = 0.000305;

/// Vehicle specific power at each sample of an ego series
///
/// Returns `(vsp, t)`, both aligned with the input series.
///
/// # Errors
///
/// Returns `MissingAcceleration` if the series does not carry acceleration
///
/// # Example
///
/// ```rust
/// use scenario_metrics_core_rs::{vehicle_specific_power, EgoSeries};
///
/// let series = EgoSeries {
///     t: vec![0.0, 1.0],
///     speed: vec![0.0, 10.0],
///     acceleration: Some(vec![0.0, 2.0]),
/// };
/// let (vsp, t) = vehicle_specific_power(&series).unwrap();
/// assert_eq!(t, vec![0.0, 1.0]);
/// assert_eq!(vsp[0], 0.0);
/// assert!((vsp[1] - (22.0 + 2.13 + 0.305)).abs() < 1e-9);
/// ```
pub fn vehicle_specific_power(series: &EgoSeries) -> Result<(Vec<f64>, Vec<f64>), MetricError> {
    let acceleration = series
        .acceleration
        .as_ref()
        .ok_or(MetricError::MissingAcceleration)?;

    let vsp = series
        .speed
        .iter()
        .zip(acceleration)
        .map(|(&v, &a)| ACCELERATION_COEFF * v * a + ROLLING_COEFF * v + DRAG_COEFF * v.powi(3))
        .collect();

    Ok((vsp, series.t.clone()))
}

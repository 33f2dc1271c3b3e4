//! Scenario description
//!
//! The static part of a rollout: the fixed set of entities that will ever
//! appear, and the ego under evaluation. Loading scenarios from files is the
//! job of the scenario subsystem; this type only carries what the metrics read.

use crate::metrics::MetricError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Fixed entity set plus the distinguished ego
///
/// # Example
///
/// ```rust
/// use scenario_metrics_core_rs::Scenario;
///
/// let scenario = Scenario::new("ego", ["car_1", "car_2"]);
/// assert_eq!(scenario.ego(), Some("ego"));
/// assert_eq!(scenario.vehicles().len(), 3); // the ego is a vehicle too
/// assert!(scenario.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Identifier of the entity under evaluation
    #[serde(default)]
    ego: Option<String>,

    /// Every entity identifier that can appear during the rollout
    vehicles: BTreeSet<String>,
}

impl Scenario {
    /// Create a scenario whose vehicle set contains `ego` and `others`
    pub fn new<I, S>(ego: impl Into<String>, others: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ego = ego.into();
        let mut vehicles: BTreeSet<String> = others.into_iter().map(Into::into).collect();
        vehicles.insert(ego.clone());
        Self {
            ego: Some(ego),
            vehicles,
        }
    }

    /// Create a scenario from raw parts, without adding the ego to `vehicles`
    ///
    /// Used when the description comes from an external loader that may be
    /// incomplete; [`Scenario::validate`] reports what is missing.
    pub fn from_parts<I, S>(ego: Option<String>, vehicles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ego,
            vehicles: vehicles.into_iter().map(Into::into).collect(),
        }
    }

    /// Ego identifier, if the scenario defines one
    pub fn ego(&self) -> Option<&str> {
        self.ego.as_deref()
    }

    /// Full fixed set of entity identifiers
    pub fn vehicles(&self) -> &BTreeSet<String> {
        &self.vehicles
    }

    /// Check the scenario can be measured, returning the ego identifier
    ///
    /// # Errors
    ///
    /// - [`MetricError::MissingEgo`] if no ego is defined
    /// - [`MetricError::EmptyVehicleSet`] if the vehicle set is empty
    pub fn validate(&self) -> Result<&str, MetricError> {
        if self.vehicles.is_empty() {
            return Err(MetricError::EmptyVehicleSet);
        }
        self.ego().ok_or(MetricError::MissingEgo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_ego_is_rejected() {
        let scenario = Scenario::from_parts(None, ["car_1"]);
        assert_eq!(scenario.validate(), Err(MetricError::MissingEgo));
    }

    #[test]
    fn test_empty_vehicle_set_is_rejected() {
        let scenario = Scenario::from_parts(Some("ego".to_string()), Vec::<String>::new());
        assert_eq!(scenario.validate(), Err(MetricError::EmptyVehicleSet));
    }

    #[test]
    fn test_ego_is_not_duplicated() {
        let scenario = Scenario::new("ego", ["ego", "car_1"]);
        assert_eq!(scenario.vehicles().len(), 2);
    }

    #[test]
    fn test_missing_ego_deserializes_as_none() {
        let scenario: Scenario = serde_json::from_str(r#"{"vehicles": ["a"]}"#).unwrap();
        assert_eq!(scenario.ego(), None);
    }
}

//! Parameter sets and the per-experiment parameter state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{LabError, Result};
use crate::experiment::ExperimentDefinition;

/// Key → value map of numeric parameters.
///
/// Used both as a full snapshot and as a partial patch; consumers apply only
/// the keys that are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamSet(BTreeMap<String, f64>);

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: &str, value: f64) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: f64) {
        self.0.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    /// Value for `key`, or `fallback` when absent.
    pub fn get_or(&self, key: &str, fallback: f64) -> f64 {
        self.get(key).unwrap_or(fallback)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<'a> FromIterator<(&'a str, f64)> for ParamSet {
    fn from_iter<I: IntoIterator<Item = (&'a str, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }
}

/// Current control values of the active experiment.
///
/// Holds exactly one entry per control of the definition it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterState {
    values: ParamSet,
}

impl ParameterState {
    /// Fresh state: each control at `default`, else `min`, else 0.
    pub fn from_definition(definition: &ExperimentDefinition) -> Self {
        let values = definition
            .controls
            .iter()
            .map(|c| (c.key.as_str(), c.initial_value()))
            .collect();
        Self { values }
    }

    /// Set one control. Unknown keys and non-finite values are rejected;
    /// finite values are clamped into the control's bounds.
    ///
    /// Returns the value actually stored.
    pub fn update(&mut self, definition: &ExperimentDefinition, key: &str, value: f64) -> Result<f64> {
        let control = definition
            .control(key)
            .filter(|_| self.values.contains(key))
            .ok_or_else(|| LabError::UnknownControl(key.to_string()))?;
        if !value.is_finite() {
            return Err(LabError::NonFiniteValue {
                key: key.to_string(),
                value,
            });
        }
        let stored = control.clamp(value);
        self.values.insert(key, stored);
        Ok(stored)
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key)
    }

    /// Full snapshot of the current values.
    pub fn values(&self) -> &ParamSet {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

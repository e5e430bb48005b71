//! Experiment definitions as stored in the catalog.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::control::Control;
use crate::error::{LabError, Result};

/// Catalog description of one experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentDefinition {
    /// Catalog key. Document stores call this `_id`.
    #[serde(default, alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    /// Selects the simulation module or formula readout.
    pub simulation_id: String,
    #[serde(default)]
    pub assets: Vec<String>,
    #[serde(default)]
    pub controls: Vec<Control>,
}

impl ExperimentDefinition {
    /// Look up a control by key.
    pub fn control(&self, key: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.key == key)
    }

    /// Title reduced to a URL slug (`"Ohm's Law"` → `"ohm-s-law"`).
    pub fn title_slug(&self) -> String {
        slugify(&self.title)
    }

    /// Validate every control and reject duplicate keys.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for c in &self.controls {
            c.validate()?;
            if !seen.insert(c.key.as_str()) {
                return Err(LabError::InvalidControl {
                    key: c.key.clone(),
                    reason: format!("duplicate key in experiment {:?}", self.title),
                });
            }
        }
        Ok(())
    }
}

/// Lowercase, collapse every run of characters outside `[a-z0-9]` into a
/// single `-`, and trim leading/trailing dashes.
pub fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_dash = false;
    for ch in s.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch);
        } else {
            pending_dash = true;
        }
    }
    out
}

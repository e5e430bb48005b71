//! Control descriptors: one bounded numeric input of an experiment.

use serde::{Deserialize, Serialize};

use crate::error::{LabError, Result};

/// How the page renders a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// Range slider. Catalog documents spell this `"range"`.
    #[default]
    #[serde(alias = "range")]
    Slider,
    /// Free numeric entry box.
    #[serde(alias = "number")]
    Numeric,
}

/// A single bounded, typed numeric input attached to an experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Control {
    /// Parameter key the simulation reads (e.g. `"voltage"`).
    pub key: String,
    /// Human readable label, including units.
    pub label: String,
    #[serde(rename = "type", default)]
    pub input_kind: InputKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default = "default_step")]
    pub step: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<f64>,
}

fn default_step() -> f64 {
    1.0
}

impl Control {
    /// Slider control with all bounds present.
    pub fn slider(key: &str, label: &str, min: f64, max: f64, step: f64, default: f64) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            input_kind: InputKind::Slider,
            min: Some(min),
            max: Some(max),
            step,
            default: Some(default),
        }
    }

    /// Value a fresh parameter state starts from: `default`, else `min`, else 0.
    pub fn initial_value(&self) -> f64 {
        self.default.or(self.min).unwrap_or(0.0)
    }

    /// Clamp a value into whichever of `[min, max]` are declared.
    pub fn clamp(&self, value: f64) -> f64 {
        let mut v = value;
        if let Some(max) = self.max {
            v = v.min(max);
        }
        if let Some(min) = self.min {
            v = v.max(min);
        }
        v
    }

    /// Check `min <= default <= max` and `step > 0`.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| LabError::InvalidControl {
            key: self.key.clone(),
            reason,
        };

        if self.key.is_empty() {
            return Err(invalid("empty key".into()));
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(invalid(format!("step must be > 0, got {}", self.step)));
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(invalid(format!("min {min} > max {max}")));
            }
        }
        if let Some(d) = self.default {
            if self.min.is_some_and(|min| d < min) || self.max.is_some_and(|max| d > max) {
                return Err(invalid(format!("default {d} outside bounds")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_value_priority() {
        let mut c = Control::slider("x", "X", 2.0, 8.0, 1.0, 5.0);
        assert_eq!(c.initial_value(), 5.0);
        c.default = None;
        assert_eq!(c.initial_value(), 2.0);
        c.min = None;
        assert_eq!(c.initial_value(), 0.0);
    }

    #[test]
    fn test_validate() {
        assert!(Control::slider("x", "X", 0.0, 1.0, 0.1, 0.5).validate().is_ok());
        assert!(Control::slider("x", "X", 0.0, 1.0, 0.0, 0.5).validate().is_err());
        assert!(Control::slider("x", "X", 2.0, 1.0, 0.1, 1.5).validate().is_err());
        assert!(Control::slider("x", "X", 0.0, 1.0, 0.1, 1.5).validate().is_err());
    }

    #[test]
    fn test_deserialize_catalog_document() {
        let json = r#"{ "key": "voltage", "label": "Voltage (V)", "type": "range",
                        "min": 0, "max": 20, "step": 0.5, "default": 5 }"#;
        let c: Control = serde_json::from_str(json).unwrap();
        assert_eq!(c.input_kind, InputKind::Slider);
        assert_eq!(c.default, Some(5.0));

        let json = r#"{ "key": "u", "label": "u", "type": "number" }"#;
        let c: Control = serde_json::from_str(json).unwrap();
        assert_eq!(c.input_kind, InputKind::Numeric);
        assert_eq!(c.step, 1.0);
        assert_eq!(c.min, None);
    }

    #[test]
    fn test_clamp() {
        let c = Control::slider("x", "X", -1.0, 1.0, 0.1, 0.0);
        assert_eq!(c.clamp(3.0), 1.0);
        assert_eq!(c.clamp(-3.0), -1.0);
        assert_eq!(c.clamp(0.25), 0.25);
    }
}

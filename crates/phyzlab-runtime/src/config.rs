//! Runtime configuration.

use phyzlab_draw::{CANVAS_HEIGHT, CANVAS_WIDTH, FrameContext};
use phyzlab_model::{LabError, Result};
use phyzlab_sim::{DEFAULT_DT, DEFAULT_EMIT_INTERVAL_MS, ModuleConfig};
use serde::{Deserialize, Serialize};

use crate::buffer::{DEFAULT_SAMPLE_CAPACITY, MAX_SAMPLE_CAPACITY};

/// Tunables for a controller. Every field has a default, so `{}` is a valid
/// document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RuntimeConfig {
    /// Integration step, seconds.
    pub frame_dt: f64,
    pub emit_interval_ms: f64,
    pub sample_capacity: usize,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            frame_dt: DEFAULT_DT,
            emit_interval_ms: DEFAULT_EMIT_INTERVAL_MS,
            sample_capacity: DEFAULT_SAMPLE_CAPACITY,
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
        }
    }
}

impl RuntimeConfig {
    /// Parse and validate.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = |name: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(LabError::InvalidConfig(format!("{name} must be positive, got {v}")))
            }
        };
        positive("frameDt", self.frame_dt)?;
        positive("canvasWidth", self.canvas_width)?;
        positive("canvasHeight", self.canvas_height)?;
        if !self.emit_interval_ms.is_finite() || self.emit_interval_ms < 0.0 {
            return Err(LabError::InvalidConfig(format!(
                "emitIntervalMs must be non-negative, got {}",
                self.emit_interval_ms
            )));
        }
        if self.sample_capacity == 0 {
            return Err(LabError::InvalidConfig("sampleCapacity must be at least 1".into()));
        }
        if self.sample_capacity > MAX_SAMPLE_CAPACITY {
            return Err(LabError::InvalidConfig(format!(
                "sampleCapacity must be at most {MAX_SAMPLE_CAPACITY}, got {}",
                self.sample_capacity
            )));
        }
        Ok(())
    }

    pub fn module_config(&self) -> ModuleConfig {
        ModuleConfig {
            dt: self.frame_dt,
            emit_interval_ms: self.emit_interval_ms,
        }
    }

    pub fn frame(&self, now_ms: f64) -> FrameContext {
        FrameContext {
            now_ms,
            width: self.canvas_width,
            height: self.canvas_height,
        }
    }
}

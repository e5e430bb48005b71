use phyzlab_model::ParamSet;
use serde::Serialize;

/// Instantaneous state of a running module, emitted at most every emission
/// interval.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Sample {
    Pendulum {
        time_ms: f64,
        /// Radians from vertical.
        angle: f64,
        /// Radians per second.
        angular_velocity: f64,
    },
    Spring {
        k: f64,
        x: f64,
        force: f64,
    },
    ResistiveSweep {
        voltage: f64,
        resistance: f64,
        current: f64,
    },
}

impl Sample {
    /// Fields as a flat map, for session records.
    pub fn fields(&self) -> ParamSet {
        match *self {
            Sample::Pendulum {
                time_ms,
                angle,
                angular_velocity,
            } => ParamSet::new()
                .with("timeMs", time_ms)
                .with("angle", angle)
                .with("angularVelocity", angular_velocity),
            Sample::Spring { k, x, force } => {
                ParamSet::new().with("k", k).with("x", x).with("force", force)
            }
            Sample::ResistiveSweep {
                voltage,
                resistance,
                current,
            } => ParamSet::new()
                .with("voltage", voltage)
                .with("resistance", resistance)
                .with("current", current),
        }
    }
}

/// Receives emitted samples.
pub trait SampleSink {
    fn accept(&mut self, sample: Sample);
}

impl<F: FnMut(Sample)> SampleSink for F {
    fn accept(&mut self, sample: Sample) {
        self(sample)
    }
}

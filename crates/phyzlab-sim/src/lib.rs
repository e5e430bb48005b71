//! Stateful simulation modules.
//!
//! Every module follows one contract: construct from a parameter snapshot,
//! merge parameter patches, start/pause/reset, and once per animation frame
//! `advance_and_render`, which integrates one fixed step when running, returns
//! the frame's [`Scene`](phyzlab_draw::Scene), and emits throttled [`Sample`]s.

pub mod module;
pub mod pendulum;
pub mod sample;
pub mod spring;
pub mod sweep;
pub mod transport;

pub use module::{ModuleConfig, ModuleKind, Placeholder, SimulationModule};
pub use pendulum::{Pendulum, PendulumState};
pub use sample::{Sample, SampleSink};
pub use spring::{SpringMass, SpringState};
pub use sweep::ResistiveSweep;
pub use transport::{EmissionThrottle, RunState, Transport};

/// Fixed integration step, seconds.
pub const DEFAULT_DT: f64 = 1.0 / 60.0;
/// Minimum wall-clock spacing between emitted samples, milliseconds.
pub const DEFAULT_EMIT_INTERVAL_MS: f64 = 120.0;

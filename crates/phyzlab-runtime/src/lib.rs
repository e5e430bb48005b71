//! Experiment runtime for phyzlab.
//!
//! [`ExperimentRuntimeController`] is the entry point: it resolves an
//! identifier against a [`Catalog`](phyzlab_model::Catalog), owns the
//! parameter state of the open experiment, and mounts either a
//! [`SimulationHost`] or a formula readout. Emitted samples land in a bounded
//! [`SampleBuffer`].

pub mod buffer;
pub mod config;
pub mod controller;
pub mod host;
pub mod resolve;

pub use buffer::{DEFAULT_SAMPLE_CAPACITY, MAX_SAMPLE_CAPACITY, SampleBuffer};
pub use config::RuntimeConfig;
pub use controller::{ExperimentRuntimeController, LifecycleEvent, LifecycleObserver, OpenOutcome};
pub use host::{SampleListener, SimulationHost};
pub use resolve::{ExperimentKind, resolve};

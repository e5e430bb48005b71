//! phyzlab: parametric physics experiment engine.
//!
//! This is the umbrella crate: it re-exports the data model, the drawing
//! primitives, the simulation modules, the formula readouts and the runtime,
//! and provides [`Lab`], a controller over the in-memory catalog.

pub use phyzlab_draw::{self, Color, FrameContext, Scene, Shape, Vec2};
pub use phyzlab_model::{
    self, AuthContext, Catalog, CatalogQuery, Control, ExperimentDefinition, InMemoryCatalog,
    LabError, ParamSet, ParameterState, Result, SessionAttempt, navigation_slug,
};
pub use phyzlab_readout::{self, FormulaReadout, Quantity, Readout};
pub use phyzlab_runtime::{
    self, ExperimentKind, ExperimentRuntimeController, LifecycleEvent, OpenOutcome,
    RuntimeConfig, SampleBuffer, SimulationHost, resolve,
};
pub use phyzlab_sim::{self, ModuleKind, RunState, Sample, SampleSink, SimulationModule};

/// Controller over an in-memory catalog.
pub type Lab = ExperimentRuntimeController<InMemoryCatalog>;

/// Controller over `catalog`, seeding it first if it is empty.
pub fn lab(mut catalog: InMemoryCatalog, config: RuntimeConfig) -> Result<Lab> {
    if catalog.is_empty() {
        let report = catalog.seed();
        log::info!("empty catalog, seeded {} experiments", report.total);
    }
    Lab::new(catalog, config)
}

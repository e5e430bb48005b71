//! Identifier resolution and simulation dispatch.

use std::sync::Arc;

use phyzlab_model::{Catalog, ExperimentDefinition, Result, slugify};
use phyzlab_readout::FormulaReadout;
use phyzlab_sim::ModuleKind;

/// Find the experiment an identifier names.
///
/// Tries, in order: catalog id, simulation id (case-insensitive), title slug.
/// An identifier that matches nothing is `Ok(None)`, not an error.
pub fn resolve<C: Catalog + ?Sized>(
    catalog: &C,
    ident: &str,
) -> Result<Option<Arc<ExperimentDefinition>>> {
    if let Some(def) = catalog.get(ident)? {
        return Ok(Some(def));
    }
    let all = catalog.list()?;
    let by_sim = all
        .iter()
        .find(|d| !d.simulation_id.is_empty() && d.simulation_id.eq_ignore_ascii_case(ident));
    if let Some(def) = by_sim {
        return Ok(Some(Arc::clone(def)));
    }
    let slug = slugify(ident);
    if slug.is_empty() {
        return Ok(None);
    }
    Ok(all.iter().find(|d| d.title_slug() == slug).cloned())
}

/// How an experiment is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperimentKind {
    /// Stateful, time-stepped simulation.
    Module(ModuleKind),
    /// Stateless formula card.
    Readout(FormulaReadout),
}

impl ExperimentKind {
    /// Modules win over readouts; unknown ids fall back to the placeholder.
    pub fn from_simulation_id(id: &str) -> Self {
        if let Some(kind) = ModuleKind::from_simulation_id(id) {
            return Self::Module(kind);
        }
        if let Some(readout) = FormulaReadout::from_simulation_id(id) {
            return Self::Readout(readout);
        }
        log::warn!("no simulation registered for {id:?}, using placeholder");
        Self::Module(ModuleKind::Placeholder)
    }

    pub fn is_module(self) -> bool {
        matches!(self, Self::Module(_))
    }
}

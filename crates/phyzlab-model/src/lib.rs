//! Data model for phyzlab experiments.
//!
//! `ExperimentDefinition` is the immutable catalog description of an experiment
//! (metadata plus an ordered list of bounded numeric controls).
//! `ParameterState` is the mutable set of current control values for the
//! experiment that is open on the page.

pub mod catalog;
pub mod control;
pub mod error;
pub mod experiment;
pub mod params;
pub mod query;
pub mod seed;
pub mod session;

pub use catalog::{Catalog, InMemoryCatalog, SeedReport, SeedResult};
pub use control::{Control, InputKind};
pub use error::{LabError, Result};
pub use experiment::{ExperimentDefinition, slugify};
pub use params::{ParamSet, ParameterState};
pub use query::{CatalogQuery, navigation_slug};
pub use seed::seed_experiments;
pub use session::{AuthContext, SessionAttempt};

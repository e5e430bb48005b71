//! Stateless formula readouts.
//!
//! Each closed-form experiment maps the current parameters to a set of derived
//! quantities through a pure function. [`formulas`] holds the physics with
//! typed results; [`FormulaReadout`] wraps them into display cards.

pub mod formulas;
pub mod readout;

pub use formulas::{
    DopplerResult, FreeFallResult, KirchhoffResult, LensResult, MIN_RESISTANCE, ProjectileResult,
    RcResult, ShmResult, ThermalResult, clamp_resistance,
};
pub use readout::{FormulaReadout, Quantity, Readout, spring_labels};

//! The closed set of simulation modules and their shared contract.

use phyzlab_draw::{Color, FrameContext, Scene};
use phyzlab_model::ParamSet;

use crate::pendulum::Pendulum;
use crate::sample::SampleSink;
use crate::spring::SpringMass;
use crate::sweep::ResistiveSweep;
use crate::transport::{RunState, Transport};
use crate::{DEFAULT_DT, DEFAULT_EMIT_INTERVAL_MS};

/// Integration and emission settings handed to every module.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModuleConfig {
    /// Fixed step, seconds.
    pub dt: f64,
    pub emit_interval_ms: f64,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            emit_interval_ms: DEFAULT_EMIT_INTERVAL_MS,
        }
    }
}

/// Which module to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    Pendulum,
    SpringMass,
    ResistiveSweep,
    Placeholder,
}

impl ModuleKind {
    /// Module for a catalog simulation id; `None` if no module handles it.
    pub fn from_simulation_id(id: &str) -> Option<Self> {
        match id {
            "pendulum" => Some(Self::Pendulum),
            "hookesLaw" => Some(Self::SpringMass),
            "ohmsLaw" => Some(Self::ResistiveSweep),
            "placeholder" => Some(Self::Placeholder),
            _ => None,
        }
    }
}

/// Accepts every command and does nothing; draws an empty surface.
#[derive(Debug, Clone, Default)]
pub struct Placeholder;

/// A live simulation. Owns its physical state exclusively.
#[derive(Debug, Clone)]
pub enum SimulationModule {
    Pendulum(Pendulum),
    SpringMass(SpringMass),
    ResistiveSweep(ResistiveSweep),
    Placeholder(Placeholder),
}

impl SimulationModule {
    /// Construct from a parameter snapshot.
    pub fn initialize(kind: ModuleKind, params: &ParamSet, config: ModuleConfig) -> Self {
        log::debug!("initialize {kind:?} module with {} params", params.len());
        match kind {
            ModuleKind::Pendulum => Self::Pendulum(Pendulum::new(params, config)),
            ModuleKind::SpringMass => Self::SpringMass(SpringMass::new(params, config)),
            ModuleKind::ResistiveSweep => Self::ResistiveSweep(ResistiveSweep::new(params, config)),
            ModuleKind::Placeholder => Self::Placeholder(Placeholder),
        }
    }

    pub fn kind(&self) -> ModuleKind {
        match self {
            Self::Pendulum(_) => ModuleKind::Pendulum,
            Self::SpringMass(_) => ModuleKind::SpringMass,
            Self::ResistiveSweep(_) => ModuleKind::ResistiveSweep,
            Self::Placeholder(_) => ModuleKind::Placeholder,
        }
    }

    /// Merge-apply only the keys present in `patch`.
    pub fn update_params(&mut self, patch: &ParamSet) {
        match self {
            Self::Pendulum(m) => m.update_params(patch),
            Self::SpringMass(m) => m.update_params(patch),
            Self::ResistiveSweep(m) => m.update_params(patch),
            Self::Placeholder(_) => {}
        }
    }

    fn transport_mut(&mut self) -> Option<&mut Transport> {
        match self {
            Self::Pendulum(m) => Some(m.transport_mut()),
            Self::SpringMass(m) => Some(m.transport_mut()),
            Self::ResistiveSweep(m) => Some(m.transport_mut()),
            Self::Placeholder(_) => None,
        }
    }

    pub fn start(&mut self) {
        if let Some(t) = self.transport_mut() {
            t.start();
        }
    }

    pub fn pause(&mut self) {
        if let Some(t) = self.transport_mut() {
            t.pause();
        }
    }

    pub fn run_state(&self) -> RunState {
        match self {
            Self::Pendulum(m) => m.transport().state(),
            Self::SpringMass(m) => m.transport().state(),
            Self::ResistiveSweep(m) => m.transport().state(),
            Self::Placeholder(_) => RunState::Stopped,
        }
    }

    pub fn is_running(&self) -> bool {
        self.run_state() == RunState::Running
    }

    /// Restore the variant's initial condition. Leaves the run flag alone.
    pub fn reset(&mut self) {
        log::debug!("reset {:?} module", self.kind());
        match self {
            Self::Pendulum(m) => m.reset(),
            Self::SpringMass(m) => m.reset(),
            // Nothing integrated, nothing to restore.
            Self::ResistiveSweep(_) | Self::Placeholder(_) => {}
        }
    }

    /// Called once per animation frame whether or not the module is running.
    pub fn advance_and_render(&mut self, frame: &FrameContext, sink: &mut dyn SampleSink) -> Scene {
        match self {
            Self::Pendulum(m) => m.advance_and_render(frame, sink),
            Self::SpringMass(m) => m.advance_and_render(frame, sink),
            Self::ResistiveSweep(m) => m.advance_and_render(frame, sink),
            Self::Placeholder(_) => frame.blank_scene(Color::gray(245)),
        }
    }

    /// Kinetic + potential energy for modules that integrate dynamics.
    pub fn mechanical_energy(&self) -> Option<f64> {
        match self {
            Self::Pendulum(m) => Some(m.mechanical_energy()),
            Self::SpringMass(m) => Some(m.mechanical_energy()),
            Self::ResistiveSweep(_) | Self::Placeholder(_) => None,
        }
    }

    /// Stop the run loop and drop the emission clock. Safe to call twice.
    pub fn destroy(&mut self) {
        log::debug!("destroy {:?} module", self.kind());
        if let Some(t) = self.transport_mut() {
            t.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pendulum::PendulumState;
    use crate::sample::Sample;

    fn frames(module: &mut SimulationModule, n: usize) -> Vec<Sample> {
        let mut out = Vec::new();
        for i in 0..n {
            module.advance_and_render(&FrameContext::at(i as f64 * 1000.0 / 60.0), &mut |s: Sample| {
                out.push(s)
            });
        }
        out
    }

    #[test]
    fn test_simulation_id_dispatch() {
        assert_eq!(ModuleKind::from_simulation_id("pendulum"), Some(ModuleKind::Pendulum));
        assert_eq!(ModuleKind::from_simulation_id("hookesLaw"), Some(ModuleKind::SpringMass));
        assert_eq!(ModuleKind::from_simulation_id("ohmsLaw"), Some(ModuleKind::ResistiveSweep));
        assert_eq!(ModuleKind::from_simulation_id("projectile"), None);
    }

    #[test]
    fn test_start_pause_idempotent_and_stateless() {
        let mut m = SimulationModule::initialize(ModuleKind::Pendulum, &ParamSet::new(), ModuleConfig::default());
        assert_eq!(m.run_state(), RunState::Stopped);
        m.start();
        m.start();
        assert!(m.is_running());
        frames(&mut m, 10);
        let SimulationModule::Pendulum(p) = &m else { unreachable!() };
        let moved = p.state();
        assert_ne!(moved, PendulumState::INITIAL);

        m.pause();
        m.pause();
        frames(&mut m, 10);
        let SimulationModule::Pendulum(p) = &m else { unreachable!() };
        assert_eq!(p.state(), moved);

        // Resume continues from the paused state.
        m.start();
        frames(&mut m, 1);
        let SimulationModule::Pendulum(p) = &m else { unreachable!() };
        assert_ne!(p.state(), moved);
    }

    #[test]
    fn test_reset_independent_of_run_flag() {
        let mut m = SimulationModule::initialize(ModuleKind::SpringMass, &ParamSet::new(), ModuleConfig::default());
        m.start();
        frames(&mut m, 30);
        m.reset();
        assert!(m.is_running());
        let SimulationModule::SpringMass(s) = &m else { unreachable!() };
        assert_eq!(s.state().x, 0.2);
        assert_eq!(s.state().v, 0.0);
    }

    #[test]
    fn test_placeholder_accepts_everything() {
        let mut m = SimulationModule::initialize(ModuleKind::Placeholder, &ParamSet::new(), ModuleConfig::default());
        m.update_params(&ParamSet::new().with("anything", 1.0));
        m.start();
        m.reset();
        assert!(!m.is_running());
        assert!(frames(&mut m, 20).is_empty());
        let scene = m.advance_and_render(&FrameContext::at(0.0), &mut |_: Sample| {});
        assert!(scene.shapes.is_empty());
        assert_eq!(m.mechanical_energy(), None);
        m.destroy();
        m.destroy();
    }

    #[test]
    fn test_destroy_stops_emission() {
        let mut m = SimulationModule::initialize(ModuleKind::ResistiveSweep, &ParamSet::new(), ModuleConfig::default());
        m.start();
        assert!(!frames(&mut m, 10).is_empty());
        m.destroy();
        assert!(!m.is_running());
        assert!(frames(&mut m, 10).is_empty());
    }
}

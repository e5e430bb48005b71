//! Active-experiment lifecycle.
//!
//! The controller resolves an identifier against the catalog, builds a fresh
//! [`ParameterState`], and mounts either a simulation module or a formula
//! readout. Switching experiments always tears the old one down before the
//! new one is constructed.

use std::sync::Arc;

use phyzlab_draw::Scene;
use phyzlab_model::{
    AuthContext, Catalog, ExperimentDefinition, LabError, ParamSet, ParameterState, Result,
    SessionAttempt,
};
use phyzlab_readout::{FormulaReadout, Readout};
use phyzlab_sim::{ModuleKind, RunState, Sample};

use crate::buffer::SampleBuffer;
use crate::config::RuntimeConfig;
use crate::host::{SampleListener, SimulationHost};
use crate::resolve::{ExperimentKind, resolve};

/// Mount/unmount notifications, in the order they happen.
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleEvent {
    Initialized {
        experiment_id: String,
        kind: ExperimentKind,
    },
    /// Sent after teardown; `final_state` is the run state the torn-down
    /// module was left in.
    Destroyed {
        experiment_id: String,
        kind: ExperimentKind,
        final_state: RunState,
    },
}

pub type LifecycleObserver = Box<dyn FnMut(&LifecycleEvent)>;

/// Result of [`ExperimentRuntimeController::open`].
#[derive(Debug, Clone, PartialEq)]
pub enum OpenOutcome {
    Opened(Arc<ExperimentDefinition>),
    /// Nothing matched; no experiment is active.
    NotFound,
    /// Not signed in; the identifier is kept and opened on sign-in.
    Deferred,
}

enum Presentation {
    Module(SimulationHost),
    Readout {
        variant: FormulaReadout,
        current: Readout,
    },
}

struct ActiveExperiment {
    definition: Arc<ExperimentDefinition>,
    kind: ExperimentKind,
    params: ParameterState,
    presentation: Presentation,
    /// Frame clock at the first rendered frame.
    started_at_ms: Option<f64>,
}

pub struct ExperimentRuntimeController<C: Catalog> {
    catalog: C,
    config: RuntimeConfig,
    auth: AuthContext,
    pending: Option<String>,
    active: Option<ActiveExperiment>,
    buffer: SampleBuffer,
    observer: Option<LifecycleObserver>,
    listener: Option<SampleListener>,
}

impl<C: Catalog> ExperimentRuntimeController<C> {
    /// Controller with no experiment open and no signed-in user.
    pub fn new(catalog: C, config: RuntimeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            catalog,
            buffer: SampleBuffer::with_capacity(config.sample_capacity),
            config,
            auth: AuthContext::default(),
            pending: None,
            active: None,
            observer: None,
            listener: None,
        })
    }

    pub fn with_auth(mut self, auth: AuthContext) -> Self {
        self.auth = auth;
        self
    }

    pub fn on_lifecycle(&mut self, observer: impl FnMut(&LifecycleEvent) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Called with every emitted sample before it is buffered.
    pub fn on_sample(&mut self, listener: impl FnMut(&Sample) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    /// Identifier waiting for sign-in, if any.
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Replace the auth context.
    ///
    /// Signing in opens a deferred identifier. Signing out closes the active
    /// experiment and defers it, so signing back in restores it.
    pub fn set_auth(&mut self, auth: AuthContext) -> Result<Option<OpenOutcome>> {
        let was_signed_in = self.auth.authenticated;
        self.auth = auth;
        match (was_signed_in, self.auth.authenticated) {
            (false, true) => match self.pending.take() {
                Some(ident) => self.open(&ident).map(Some),
                None => Ok(None),
            },
            (true, false) => {
                if let Some(active) = &self.active {
                    self.pending = Some(active.definition.id.clone());
                }
                self.close();
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    /// Make the experiment named by `ident` the active one.
    ///
    /// Re-opening the active experiment keeps it mounted. A catalog failure
    /// leaves the current experiment untouched.
    pub fn open(&mut self, ident: &str) -> Result<OpenOutcome> {
        if !self.auth.authenticated {
            log::info!("deferring {ident:?} until sign-in");
            self.pending = Some(ident.to_string());
            return Ok(OpenOutcome::Deferred);
        }
        self.pending = None;

        let found = resolve(&self.catalog, ident)?;
        if let (Some(def), Some(active)) = (&found, &self.active) {
            if def.id == active.definition.id {
                return Ok(OpenOutcome::Opened(Arc::clone(def)));
            }
        }

        self.close();
        let Some(definition) = found else {
            log::info!("no experiment matches {ident:?}");
            return Ok(OpenOutcome::NotFound);
        };

        let kind = ExperimentKind::from_simulation_id(&definition.simulation_id);
        let params = ParameterState::from_definition(&definition);
        let presentation = self.mount(&definition, kind, &params);
        log::info!(
            "opened {:?} ({}) as {kind:?} with {} controls",
            definition.title,
            definition.id,
            params.len()
        );
        self.active = Some(ActiveExperiment {
            definition: Arc::clone(&definition),
            kind,
            params,
            presentation,
            started_at_ms: None,
        });
        Ok(OpenOutcome::Opened(definition))
    }

    /// Construct the presentation and announce it. Only called with no
    /// experiment active.
    fn mount(
        &mut self,
        definition: &ExperimentDefinition,
        kind: ExperimentKind,
        params: &ParameterState,
    ) -> Presentation {
        debug_assert!(self.active.is_none());
        let presentation = match kind {
            ExperimentKind::Module(module) => Presentation::Module(SimulationHost::mount(
                module,
                params.values(),
                self.config.module_config(),
            )),
            ExperimentKind::Readout(variant) => Presentation::Readout {
                variant,
                current: variant.compute(params.values()),
            },
        };
        self.notify(LifecycleEvent::Initialized {
            experiment_id: definition.id.clone(),
            kind,
        });
        presentation
    }

    /// Tear down the active experiment and clear the buffer.
    pub fn close(&mut self) {
        let Some(mut active) = self.active.take() else {
            return;
        };
        let final_state = match &mut active.presentation {
            Presentation::Module(host) => {
                host.teardown();
                host.run_state()
            }
            Presentation::Readout { .. } => RunState::Stopped,
        };
        self.buffer.clear();
        self.notify(LifecycleEvent::Destroyed {
            experiment_id: active.definition.id.clone(),
            kind: active.kind,
            final_state,
        });
    }

    /// Set one control and push the change to whatever is mounted.
    ///
    /// Returns the stored (clamped) value.
    pub fn update_param(&mut self, key: &str, value: f64) -> Result<f64> {
        let active = self
            .active
            .as_mut()
            .ok_or_else(|| LabError::UnknownControl(key.to_string()))?;
        let stored = active.params.update(&active.definition, key, value)?;
        match &mut active.presentation {
            Presentation::Module(host) => host.apply(key, stored),
            Presentation::Readout { variant, current } => {
                *current = variant.compute(active.params.values());
            }
        }
        Ok(stored)
    }

    fn host_mut(&mut self) -> Option<&mut SimulationHost> {
        match self.active.as_mut().map(|a| &mut a.presentation) {
            Some(Presentation::Module(host)) => Some(host),
            _ => None,
        }
    }

    fn host(&self) -> Option<&SimulationHost> {
        match self.active.as_ref().map(|a| &a.presentation) {
            Some(Presentation::Module(host)) => Some(host),
            _ => None,
        }
    }

    pub fn start(&mut self) {
        if let Some(host) = self.host_mut() {
            host.start();
        }
    }

    pub fn pause(&mut self) {
        if let Some(host) = self.host_mut() {
            host.pause();
        }
    }

    /// Pause, restore the initial condition, and drop buffered samples.
    pub fn reset(&mut self) {
        if let Some(host) = self.host_mut() {
            host.pause();
            host.reset();
        }
        self.buffer.clear();
    }

    pub fn run_state(&self) -> RunState {
        self.host().map_or(RunState::Stopped, SimulationHost::run_state)
    }

    /// Drive one animation frame. Readouts return their static diagram, if
    /// they have one.
    pub fn frame(&mut self, now_ms: f64) -> Option<Scene> {
        let ctx = self.config.frame(now_ms);
        let active = self.active.as_mut()?;
        active.started_at_ms.get_or_insert(now_ms);
        match &mut active.presentation {
            Presentation::Module(host) => {
                Some(host.frame(&ctx, &mut self.buffer, self.listener.as_mut()))
            }
            Presentation::Readout { current, .. } => current.diagram.clone(),
        }
    }

    pub fn definition(&self) -> Option<&Arc<ExperimentDefinition>> {
        self.active.as_ref().map(|a| &a.definition)
    }

    pub fn kind(&self) -> Option<ExperimentKind> {
        self.active.as_ref().map(|a| a.kind)
    }

    pub fn params(&self) -> Option<&ParamSet> {
        self.active.as_ref().map(|a| a.params.values())
    }

    pub fn samples(&self) -> &SampleBuffer {
        &self.buffer
    }

    /// Current card for readout-backed experiments.
    pub fn readout(&self) -> Option<&Readout> {
        match self.active.as_ref().map(|a| &a.presentation) {
            Some(Presentation::Readout { current, .. }) => Some(current),
            _ => None,
        }
    }

    /// Formula card shown beside an animated module: Ohm's law for the
    /// sweep, Hooke's law (with its spring diagram) for the spring.
    pub fn companion_readout(&self) -> Option<Readout> {
        let active = self.active.as_ref()?;
        let variant = match active.kind {
            ExperimentKind::Module(ModuleKind::ResistiveSweep) => FormulaReadout::OhmsLaw,
            ExperimentKind::Module(ModuleKind::SpringMass) => FormulaReadout::HookesLaw,
            _ => return None,
        };
        Some(variant.compute(active.params.values()))
    }

    pub fn mechanical_energy(&self) -> Option<f64> {
        self.host()?.module().mechanical_energy()
    }

    /// Snapshot of the current attempt, `None` with nothing open.
    ///
    /// Outputs are the latest sample for modules (the companion card if none
    /// was emitted yet) and the readout quantities otherwise.
    pub fn session_attempt(&self, ended_at_ms: f64) -> Option<SessionAttempt> {
        let active = self.active.as_ref()?;
        let outputs = match &active.presentation {
            Presentation::Module(_) => self
                .buffer
                .latest()
                .map(Sample::fields)
                .or_else(|| self.companion_readout().map(|r| r.outputs()))
                .unwrap_or_default(),
            Presentation::Readout { current, .. } => current.outputs(),
        };
        Some(SessionAttempt {
            experiment_id: active.definition.id.clone(),
            user: self.auth.display_name.clone(),
            inputs: active.params.values().clone(),
            outputs,
            started_at_ms: active.started_at_ms.unwrap_or(ended_at_ms),
            ended_at_ms,
        })
    }

    fn notify(&mut self, event: LifecycleEvent) {
        log::debug!("lifecycle: {event:?}");
        if let Some(observer) = self.observer.as_mut() {
            observer(&event);
        }
    }
}

impl<C: Catalog> Drop for ExperimentRuntimeController<C> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use phyzlab_model::InMemoryCatalog;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn controller() -> ExperimentRuntimeController<InMemoryCatalog> {
        ExperimentRuntimeController::new(InMemoryCatalog::seeded(), RuntimeConfig::default())
            .unwrap()
            .with_auth(AuthContext::signed_in("Ada"))
    }

    fn run_frames(c: &mut ExperimentRuntimeController<InMemoryCatalog>, from: usize, n: usize) {
        for i in from..from + n {
            c.frame(i as f64 * 1000.0 / 60.0);
        }
    }

    #[test]
    fn test_open_initializes_params_from_defaults() {
        let mut c = controller();
        let OpenOutcome::Opened(def) = c.open("pendulum").unwrap() else {
            panic!("pendulum not opened");
        };
        assert_eq!(def.simulation_id, "pendulum");
        let params = c.params().unwrap();
        assert_eq!(params.get("length"), Some(150.0));
        assert_eq!(params.get("mass"), Some(5.0));
        assert_eq!(params.get("gravity"), Some(1.0));
        assert_eq!(c.kind(), Some(ExperimentKind::Module(ModuleKind::Pendulum)));
        assert_eq!(c.run_state(), RunState::Stopped);
    }

    #[test]
    fn test_switch_destroys_before_initializing() {
        let mut c = controller();
        let events = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&events);
        c.on_lifecycle(move |e| log.borrow_mut().push(e.clone()));

        c.open("ohmsLaw").unwrap();
        let ohm_id = c.definition().unwrap().id.clone();
        c.start();
        run_frames(&mut c, 0, 30);
        assert!(!c.samples().is_empty());
        c.update_param("voltage", 12.0).unwrap();

        c.open("pendulum").unwrap();
        let pendulum_id = c.definition().unwrap().id.clone();
        assert!(c.samples().is_empty());
        assert_eq!(c.params().unwrap().get("voltage"), None);
        assert_eq!(c.run_state(), RunState::Stopped);

        let events = events.borrow();
        assert_eq!(
            events.as_slice(),
            &[
                LifecycleEvent::Initialized {
                    experiment_id: ohm_id.clone(),
                    kind: ExperimentKind::Module(ModuleKind::ResistiveSweep),
                },
                LifecycleEvent::Destroyed {
                    experiment_id: ohm_id,
                    kind: ExperimentKind::Module(ModuleKind::ResistiveSweep),
                    final_state: RunState::Stopped,
                },
                LifecycleEvent::Initialized {
                    experiment_id: pendulum_id,
                    kind: ExperimentKind::Module(ModuleKind::Pendulum),
                },
            ]
        );
    }

    #[test]
    fn test_previous_torn_down_before_next_mounts() {
        use std::cell::Cell;

        let mut c = controller();
        // Id of the experiment currently alive as seen by the observer.
        let live: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
        let mounts = Rc::new(Cell::new(0usize));
        let (seen, count) = (Rc::clone(&live), Rc::clone(&mounts));
        c.on_lifecycle(move |e| match e {
            LifecycleEvent::Initialized { experiment_id, .. } => {
                let previous = seen.borrow_mut().replace(experiment_id.clone());
                assert_eq!(previous, None, "{experiment_id} mounted over {previous:?}");
                count.set(count.get() + 1);
            }
            LifecycleEvent::Destroyed { experiment_id, final_state, .. } => {
                assert_eq!(seen.borrow_mut().take().as_deref(), Some(experiment_id.as_str()));
                assert_eq!(*final_state, RunState::Stopped);
            }
        });

        // module -> module -> readout -> module, each left running.
        for ident in ["hookesLaw", "pendulum", "lensOptics", "ohmsLaw"] {
            c.open(ident).unwrap();
            c.start();
            run_frames(&mut c, 0, 10);
        }
        assert_eq!(mounts.get(), 4);
        c.close();
        assert_eq!(*live.borrow(), None);
    }

    #[test]
    fn test_reopening_same_experiment_keeps_state() {
        let mut c = controller();
        c.open("pendulum").unwrap();
        c.update_param("length", 200.0).unwrap();
        let id = c.definition().unwrap().id.clone();
        c.open(&id).unwrap();
        assert_eq!(c.params().unwrap().get("length"), Some(200.0));
    }

    #[test]
    fn test_update_param_clamps_and_rejects() {
        let mut c = controller();
        assert!(matches!(c.update_param("voltage", 1.0), Err(LabError::UnknownControl(_))));

        c.open("ohmsLaw").unwrap();
        assert_eq!(c.update_param("voltage", 99.0).unwrap(), 20.0);
        assert!(matches!(c.update_param("bogus", 1.0), Err(LabError::UnknownControl(_))));
        assert!(matches!(
            c.update_param("resistance", f64::NAN),
            Err(LabError::NonFiniteValue { .. })
        ));
        assert_eq!(c.params().unwrap().get("resistance"), Some(10.0));

        let card = c.companion_readout().unwrap();
        assert_relative_eq!(card.value("current").unwrap(), 2.0);
    }

    #[test]
    fn test_spring_companion_carries_diagram() {
        let mut c = controller();
        c.open("hookesLaw").unwrap();
        c.update_param("springConstant", 120.0).unwrap();
        c.update_param("displacement", 0.5).unwrap();
        let card = c.companion_readout().unwrap();
        assert_relative_eq!(card.value("force").unwrap(), 60.0, epsilon = 1e-9);
        assert!(card.diagram.is_some());
    }

    #[test]
    fn test_readout_recomputes_on_edit() {
        let mut c = controller();
        c.open("lensOptics").unwrap();
        assert!(c.readout().is_some());
        assert!(c.companion_readout().is_none());
        c.update_param("focal", 10.0).unwrap();
        c.update_param("objectDistance", 20.0).unwrap();
        let card = c.readout().unwrap();
        assert_relative_eq!(card.value("imageDistance").unwrap(), 20.0, epsilon = 1e-9);
        assert_relative_eq!(card.value("magnification").unwrap(), -1.0, epsilon = 1e-9);

        // Run commands are ignored for readouts.
        c.start();
        assert_eq!(c.run_state(), RunState::Stopped);
        assert!(c.frame(0.0).is_none());
    }

    #[test]
    fn test_reset_pauses_and_clears() {
        let mut c = controller();
        c.open("hookesLaw").unwrap();
        c.start();
        run_frames(&mut c, 0, 40);
        assert!(c.samples().len() > 1);
        c.reset();
        assert_eq!(c.run_state(), RunState::Stopped);
        assert!(c.samples().is_empty());
        let e0 = c.mechanical_energy().unwrap();
        assert_relative_eq!(e0, 0.5 * 50.0 * 0.2 * 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_unknown_identifier_closes_current() {
        let mut c = controller();
        c.open("shm").unwrap();
        assert_eq!(c.open("nope").unwrap(), OpenOutcome::NotFound);
        assert!(c.definition().is_none());
        assert!(c.frame(0.0).is_none());
        assert!(c.session_attempt(10.0).is_none());
    }

    #[test]
    fn test_auth_defers_resolution() {
        let mut c = ExperimentRuntimeController::new(InMemoryCatalog::seeded(), RuntimeConfig::default())
            .unwrap();
        assert_eq!(c.open("doppler").unwrap(), OpenOutcome::Deferred);
        assert!(c.definition().is_none());
        assert_eq!(c.pending(), Some("doppler"));

        let outcome = c.set_auth(AuthContext::signed_in("Ada")).unwrap();
        assert!(matches!(outcome, Some(OpenOutcome::Opened(_))));
        assert_eq!(c.definition().unwrap().simulation_id, "doppler");

        c.set_auth(AuthContext::default()).unwrap();
        assert!(c.definition().is_none());
        assert!(c.pending().is_some());
        c.set_auth(AuthContext::signed_in("Ada")).unwrap();
        assert_eq!(c.definition().unwrap().simulation_id, "doppler");
    }

    #[test]
    fn test_sample_listener_sees_every_buffered_sample() {
        let mut c = controller();
        let seen = Rc::new(RefCell::new(0usize));
        let count = Rc::clone(&seen);
        c.on_sample(move |_| *count.borrow_mut() += 1);
        c.open("pendulum").unwrap();
        c.start();
        run_frames(&mut c, 0, 60);
        assert_eq!(*seen.borrow(), c.samples().len());
        assert_eq!(c.samples().len(), 8);
    }

    #[test]
    fn test_session_attempt_records_inputs_and_outputs() {
        let mut c = controller();
        c.open("ohmsLaw").unwrap();
        c.update_param("voltage", 10.0).unwrap();
        c.start();
        run_frames(&mut c, 60, 10);
        let attempt = c.session_attempt(5000.0).unwrap();
        assert_eq!(attempt.user, "Ada");
        assert_eq!(attempt.inputs.get("voltage"), Some(10.0));
        assert_eq!(attempt.outputs.get("current"), Some(1.0));
        assert_relative_eq!(attempt.started_at_ms, 1000.0);
        assert_relative_eq!(attempt.duration_ms(), 4000.0);

        c.open("freeFall").unwrap();
        let attempt = c.session_attempt(0.0).unwrap();
        assert!(attempt.outputs.contains("velocity"));
    }

    struct BrokenCatalog;

    impl Catalog for BrokenCatalog {
        fn list(&self) -> Result<Vec<Arc<ExperimentDefinition>>> {
            Err(LabError::Catalog("connection refused".into()))
        }

        fn get(&self, _id: &str) -> Result<Option<Arc<ExperimentDefinition>>> {
            Err(LabError::Catalog("connection refused".into()))
        }
    }

    #[test]
    fn test_oversized_buffer_rejected_up_front() {
        let config = RuntimeConfig {
            sample_capacity: usize::MAX,
            ..RuntimeConfig::default()
        };
        let result = ExperimentRuntimeController::new(InMemoryCatalog::seeded(), config);
        assert!(matches!(result, Err(LabError::InvalidConfig(_))));
    }

    #[test]
    fn test_catalog_failure_propagates() {
        let mut c = ExperimentRuntimeController::new(BrokenCatalog, RuntimeConfig::default())
            .unwrap()
            .with_auth(AuthContext::signed_in("Ada"));
        assert!(matches!(c.open("pendulum"), Err(LabError::Catalog(_))));
    }
}

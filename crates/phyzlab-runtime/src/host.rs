//! Owner of the live simulation module.

use phyzlab_draw::{FrameContext, Scene};
use phyzlab_model::ParamSet;
use phyzlab_sim::{ModuleConfig, ModuleKind, RunState, Sample, SampleSink, SimulationModule};

use crate::buffer::SampleBuffer;

/// Upward sample callback, called before the sample is buffered.
pub type SampleListener = Box<dyn FnMut(&Sample)>;

/// Fans one emission out to the listener and the buffer.
struct Relay<'a> {
    buffer: &'a mut SampleBuffer,
    listener: Option<&'a mut SampleListener>,
}

impl SampleSink for Relay<'_> {
    fn accept(&mut self, sample: Sample) {
        if let Some(listener) = self.listener.as_deref_mut() {
            listener(&sample);
        }
        self.buffer.push(sample);
    }
}

/// Mounts one module and forwards commands to it. Dropping or tearing down
/// the host destroys the module.
#[derive(Debug)]
pub struct SimulationHost {
    module: SimulationModule,
    torn_down: bool,
}

impl SimulationHost {
    pub fn mount(kind: ModuleKind, params: &ParamSet, config: ModuleConfig) -> Self {
        Self {
            module: SimulationModule::initialize(kind, params, config),
            torn_down: false,
        }
    }

    pub fn kind(&self) -> ModuleKind {
        self.module.kind()
    }

    pub fn module(&self) -> &SimulationModule {
        &self.module
    }

    /// Forward a single-key change.
    pub fn apply(&mut self, key: &str, value: f64) {
        self.module.update_params(&ParamSet::new().with(key, value));
    }

    pub fn start(&mut self) {
        self.module.start();
    }

    pub fn pause(&mut self) {
        self.module.pause();
    }

    pub fn reset(&mut self) {
        self.module.reset();
    }

    pub fn run_state(&self) -> RunState {
        self.module.run_state()
    }

    /// Advance one frame, buffering whatever the module emits.
    pub fn frame(
        &mut self,
        frame: &FrameContext,
        buffer: &mut SampleBuffer,
        listener: Option<&mut SampleListener>,
    ) -> Scene {
        let mut relay = Relay { buffer, listener };
        self.module.advance_and_render(frame, &mut relay)
    }

    pub fn teardown(&mut self) {
        if !self.torn_down {
            self.module.destroy();
            self.torn_down = true;
        }
    }
}

impl Drop for SimulationHost {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_relay_feeds_listener_then_buffer() {
        let mut host = SimulationHost::mount(ModuleKind::ResistiveSweep, &ParamSet::new(), ModuleConfig::default());
        let mut buffer = SampleBuffer::default();
        let seen = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&seen);
        let mut listener: SampleListener = Box::new(move |_| *counter.borrow_mut() += 1);

        host.start();
        for i in 0..30 {
            host.frame(&FrameContext::at(i as f64 * 1000.0 / 60.0), &mut buffer, Some(&mut listener));
        }
        assert_eq!(*seen.borrow(), buffer.len());
        assert_eq!(buffer.len(), 4);
    }

    #[test]
    fn test_single_key_patch() {
        let params = ParamSet::new().with("voltage", 4.0).with("resistance", 8.0);
        let mut host = SimulationHost::mount(ModuleKind::ResistiveSweep, &params, ModuleConfig::default());
        host.apply("voltage", 16.0);
        let SimulationModule::ResistiveSweep(sweep) = host.module() else { unreachable!() };
        assert_eq!(sweep.voltage(), 16.0);
        assert_eq!(sweep.resistance(), 8.0);
    }

    #[test]
    fn test_teardown_stops() {
        let mut host = SimulationHost::mount(ModuleKind::Pendulum, &ParamSet::new(), ModuleConfig::default());
        host.start();
        host.teardown();
        host.teardown();
        assert_eq!(host.run_state(), RunState::Stopped);
    }
}

//! Damped horizontal spring-mass oscillator.
//!
//! a = −(k/m)·x − c·v with unit mass and c = 0.05. The `displacement`
//! parameter is a position, not a coefficient: pushing it repositions the
//! block and zeros the velocity.

use phyzlab_draw::{Color, FrameContext, Scene, draw_spring_assembly};
use phyzlab_model::ParamSet;
use phyzlab_readout::formulas::hookes_force;
use phyzlab_readout::spring_labels;

use crate::module::ModuleConfig;
use crate::sample::{Sample, SampleSink};
use crate::transport::Transport;

pub const MASS: f64 = 1.0;
pub const DAMPING: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringState {
    /// Extension from rest, metres.
    pub x: f64,
    /// m/s.
    pub v: f64,
}

#[derive(Debug, Clone)]
pub struct SpringMass {
    k: f64,
    state: SpringState,
    /// Construction-time extension; `reset` returns here.
    reset_extension: f64,
    transport: Transport,
    dt: f64,
}

impl SpringMass {
    pub fn new(params: &ParamSet, config: ModuleConfig) -> Self {
        let x0 = params.get_or("displacement", 0.2);
        let mut s = Self {
            k: 50.0,
            state: SpringState { x: x0, v: 0.0 },
            reset_extension: x0,
            transport: Transport::new(config.emit_interval_ms),
            dt: config.dt,
        };
        s.update_params(params);
        s
    }

    pub fn update_params(&mut self, patch: &ParamSet) {
        if let Some(k) = patch.get("springConstant") {
            self.k = k;
        }
        if let Some(x) = patch.get("displacement") {
            self.state = SpringState { x, v: 0.0 };
        }
    }

    pub fn reset(&mut self) {
        self.state = SpringState {
            x: self.reset_extension,
            v: 0.0,
        };
    }

    pub fn state(&self) -> SpringState {
        self.state
    }

    pub fn spring_constant(&self) -> f64 {
        self.k
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut Transport {
        &mut self.transport
    }

    /// Restoring force magnitude, F = k·x.
    pub fn force(&self) -> f64 {
        hookes_force(self.k, self.state.x)
    }

    pub fn mechanical_energy(&self) -> f64 {
        let SpringState { x, v } = self.state;
        0.5 * MASS * v * v + 0.5 * self.k * x * x
    }

    fn step(&mut self) {
        let a = -(self.k / MASS) * self.state.x - DAMPING * self.state.v;
        self.state.v += a * self.dt;
        self.state.x += self.state.v * self.dt;
    }

    pub fn advance_and_render(&mut self, frame: &FrameContext, sink: &mut dyn SampleSink) -> Scene {
        if self.transport.is_running() {
            self.step();
        }

        let mut scene = frame.blank_scene(Color::gray(245));
        let layout = draw_spring_assembly(&mut scene, self.state.x);
        let [k_label, x_label, f_label] = spring_labels(self.k, self.state.x);
        scene.text(layout.above(), k_label, 12.0, Color::gray(40));
        scene.text(layout.below(0), x_label, 12.0, Color::gray(40));
        scene.text(layout.below(1), f_label, 12.0, Color::gray(40));

        if self.transport.should_emit(frame.now_ms) {
            sink.accept(Sample::Spring {
                k: self.k,
                x: self.state.x,
                force: self.force(),
            });
        }
        scene
    }
}

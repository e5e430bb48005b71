//! Damped simple pendulum.
//!
//! State is (θ, ω) with θ measured from the downward vertical. Each running
//! frame takes one semi-implicit Euler step:
//!
//! ```text
//! α = −(g/L)·sin θ
//! ω ← (ω + α·dt)·0.995
//! θ ← θ + ω·dt
//! ```
//!
//! Length is in screen pixels and the gravity control in px/frame², so the
//! pendulum is drawn 1:1 and `g` is rescaled to px/s² before integrating.

use std::f64::consts::FRAC_PI_4;

use phyzlab_draw::{Color, FrameContext, Scene, Shape, Vec2};
use phyzlab_model::ParamSet;

use crate::module::ModuleConfig;
use crate::sample::{Sample, SampleSink};
use crate::transport::Transport;

/// Per-step multiplicative velocity damping (air resistance).
pub const DAMPING: f64 = 0.995;
/// Frames per second the gravity control's px/frame² units refer to.
const FRAMES_PER_SECOND: f64 = 60.0;
/// Pivot height below the top edge.
const PIVOT_Y: f64 = 40.0;
const MIN_LENGTH_PX: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendulumState {
    /// θ, radians.
    pub angle: f64,
    /// ω, rad/s.
    pub angular_velocity: f64,
}

impl PendulumState {
    /// Reset target, independent of parameters.
    pub const INITIAL: PendulumState = PendulumState {
        angle: FRAC_PI_4,
        angular_velocity: 0.0,
    };
}

#[derive(Debug, Clone)]
pub struct Pendulum {
    /// Rod length, px.
    length: f64,
    mass: f64,
    /// Gravity control value, px/frame².
    gravity: f64,
    state: PendulumState,
    transport: Transport,
    dt: f64,
}

impl Pendulum {
    pub fn new(params: &ParamSet, config: ModuleConfig) -> Self {
        let mut p = Self {
            length: 150.0,
            mass: 5.0,
            gravity: 1.0,
            state: PendulumState::INITIAL,
            transport: Transport::new(config.emit_interval_ms),
            dt: config.dt,
        };
        p.update_params(params);
        p
    }

    /// Coefficient changes only; the swing itself is untouched.
    pub fn update_params(&mut self, patch: &ParamSet) {
        if let Some(length) = patch.get("length") {
            self.length = length.max(MIN_LENGTH_PX);
        }
        if let Some(mass) = patch.get("mass") {
            self.mass = mass;
        }
        if let Some(gravity) = patch.get("gravity") {
            self.gravity = gravity;
        }
    }

    pub fn reset(&mut self) {
        self.state = PendulumState::INITIAL;
    }

    pub fn state(&self) -> PendulumState {
        self.state
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut Transport {
        &mut self.transport
    }

    /// Gravity in px/s².
    fn gravity_px_s2(&self) -> f64 {
        self.gravity * FRAMES_PER_SECOND * FRAMES_PER_SECOND
    }

    fn step(&mut self) {
        let alpha = -(self.gravity_px_s2() / self.length) * self.state.angle.sin();
        self.state.angular_velocity += alpha * self.dt;
        self.state.angular_velocity *= DAMPING;
        self.state.angle += self.state.angular_velocity * self.dt;
    }

    /// Kinetic + potential energy (mass × px²/s²), zero at rest hanging down.
    pub fn mechanical_energy(&self) -> f64 {
        let speed = self.length * self.state.angular_velocity;
        let height = self.length * (1.0 - self.state.angle.cos());
        self.mass * (0.5 * speed * speed + self.gravity_px_s2() * height)
    }

    pub fn pivot(frame: &FrameContext) -> Vec2 {
        Vec2::new(frame.width / 2.0, PIVOT_Y)
    }

    /// Bob center: pivot + L·(sin θ, cos θ).
    pub fn bob_position(&self, frame: &FrameContext) -> Vec2 {
        let (sin, cos) = self.state.angle.sin_cos();
        Self::pivot(frame) + self.length * Vec2::new(sin, cos)
    }

    pub fn advance_and_render(&mut self, frame: &FrameContext, sink: &mut dyn SampleSink) -> Scene {
        if self.transport.is_running() {
            self.step();
        }

        let mut scene = frame.blank_scene(Color::gray(245));
        let bob = self.bob_position(frame);
        scene.line(Self::pivot(frame), bob, Color::gray(50), 2.0);
        scene.push(Shape::Circle {
            center: bob,
            diameter: self.mass * 5.0,
            fill: Color::gray(120),
            stroke: Some(Color::gray(50)),
        });

        if self.transport.should_emit(frame.now_ms) {
            sink.accept(Sample::Pendulum {
                time_ms: frame.now_ms,
                angle: self.state.angle,
                angular_velocity: self.state.angular_velocity,
            });
        }
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pendulum(gravity: f64) -> Pendulum {
        let params = ParamSet::new()
            .with("length", 150.0)
            .with("mass", 5.0)
            .with("gravity", gravity);
        Pendulum::new(&params, ModuleConfig::default())
    }

    fn discard() -> impl FnMut(Sample) {
        |_| {}
    }

    #[test]
    fn test_paused_pendulum_does_not_move() {
        let mut p = pendulum(1.0);
        let mut sink = discard();
        for i in 0..10 {
            p.advance_and_render(&FrameContext::at(i as f64 * 16.0), &mut sink);
        }
        assert_eq!(p.state(), PendulumState::INITIAL);
    }

    #[test]
    fn test_zero_gravity_velocity_decays_monotonically() {
        let mut p = pendulum(0.0);
        p.state.angular_velocity = 2.0;
        p.transport.start();
        let mut sink = discard();
        let mut prev = p.state.angular_velocity.abs();
        for i in 0..300 {
            p.advance_and_render(&FrameContext::at(i as f64 * 16.0), &mut sink);
            let now = p.state.angular_velocity.abs();
            assert!(now < prev, "step {i}: {now} >= {prev}");
            prev = now;
        }
        assert_relative_eq!(prev, 2.0 * DAMPING.powi(300), epsilon = 1e-12);
    }

    #[test]
    fn test_energy_decays_with_gravity() {
        let mut p = pendulum(1.0);
        p.transport.start();
        let e0 = p.mechanical_energy();
        let mut sink = discard();
        for i in 0..600 {
            p.advance_and_render(&FrameContext::at(i as f64 * 16.0), &mut sink);
            assert!(p.mechanical_energy() <= e0 * 1.001, "energy grew at step {i}");
        }
        assert!(p.mechanical_energy() < 0.5 * e0);
    }

    #[test]
    fn test_matches_per_frame_dynamics() {
        // One step at dt = 1/60 s equals the per-frame update in px/frame² units.
        let mut p = pendulum(1.0);
        p.transport.start();
        p.advance_and_render(&FrameContext::at(0.0), &mut discard());

        let alpha_frame = -(1.0 / 150.0) * FRAC_PI_4.sin();
        let omega_frame = alpha_frame * DAMPING;
        assert_relative_eq!(p.state.angle, FRAC_PI_4 + omega_frame, epsilon = 1e-12);
        assert_relative_eq!(p.state.angular_velocity, omega_frame * 60.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bob_geometry() {
        let p = pendulum(1.0);
        let frame = FrameContext::at(0.0);
        let bob = p.bob_position(&frame);
        let s = FRAC_PI_4.sin() * 150.0;
        assert_relative_eq!(bob.x, 350.0 + s, epsilon = 1e-9);
        assert_relative_eq!(bob.y, 40.0 + s, epsilon = 1e-9);

        let mut p = p;
        let scene = p.advance_and_render(&frame, &mut discard());
        let centers: Vec<Vec2> = scene.circle_centers().collect();
        assert_eq!(centers.len(), 1);
        assert_relative_eq!(centers[0], bob, epsilon = 1e-9);
    }

    #[test]
    fn test_reset_ignores_parameters() {
        let mut p = pendulum(1.0);
        p.transport.start();
        for i in 0..30 {
            p.advance_and_render(&FrameContext::at(i as f64 * 16.0), &mut discard());
        }
        p.update_params(&ParamSet::new().with("length", 250.0));
        p.reset();
        assert_eq!(p.state(), PendulumState::INITIAL);
        assert!(p.transport().is_running());
    }

    #[test]
    fn test_emission_throttled_while_running() {
        let mut p = pendulum(1.0);
        let mut samples = Vec::new();
        let mut sink = |s: Sample| samples.push(s);
        for i in 0..60 {
            p.advance_and_render(&FrameContext::at(i as f64 * 1000.0 / 60.0), &mut sink);
        }
        p.transport.start();
        for i in 60..120 {
            p.advance_and_render(&FrameContext::at(i as f64 * 1000.0 / 60.0), &mut sink);
        }
        assert_eq!(samples.len(), 8);
        assert!(matches!(samples[0], Sample::Pendulum { time_ms, .. } if time_ms == 1000.0));
    }
}

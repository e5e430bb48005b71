//! Animated Ohm's-law V–I sweep.
//!
//! No integrated dynamics: the current is recomputed from V and R on every
//! frame, so the operating point is always current on screen. The run flag
//! only gates sample emission.

use std::f64::consts::FRAC_PI_2;

use phyzlab_draw::{Color, FrameContext, Scene, Shape, TextAlign, Vec2};
use phyzlab_model::ParamSet;
use phyzlab_readout::formulas::{clamp_resistance, ohms_current};

use crate::module::ModuleConfig;
use crate::sample::{Sample, SampleSink};
use crate::transport::Transport;

/// Graph frame: top-left corner and size, px.
const GRAPH_X: f64 = 50.0;
const GRAPH_Y: f64 = 30.0;
const GRAPH_W: f64 = 600.0;
const GRAPH_H: f64 = 280.0;
/// Full-scale voltage on the x axis.
const MAX_VOLTAGE: f64 = 20.0;

#[derive(Debug, Clone)]
pub struct ResistiveSweep {
    voltage: f64,
    /// Always ≥ [`MIN_RESISTANCE`](phyzlab_readout::MIN_RESISTANCE).
    resistance: f64,
    transport: Transport,
}

impl ResistiveSweep {
    pub fn new(params: &ParamSet, config: ModuleConfig) -> Self {
        let mut s = Self {
            voltage: 5.0,
            resistance: 10.0,
            transport: Transport::new(config.emit_interval_ms),
        };
        s.update_params(params);
        s
    }

    pub fn update_params(&mut self, patch: &ParamSet) {
        if let Some(v) = patch.get("voltage") {
            self.voltage = v;
        }
        if let Some(r) = patch.get("resistance") {
            self.resistance = clamp_resistance(r);
        }
    }

    pub fn voltage(&self) -> f64 {
        self.voltage
    }

    pub fn resistance(&self) -> f64 {
        self.resistance
    }

    pub fn current(&self) -> f64 {
        ohms_current(self.voltage, self.resistance)
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut Transport {
        &mut self.transport
    }

    /// Screen position of the (V, I) operating point.
    pub fn operating_point(&self) -> Vec2 {
        let max_current = (MAX_VOLTAGE / self.resistance).max(0.001);
        Vec2::new(
            GRAPH_X + self.voltage / MAX_VOLTAGE * GRAPH_W,
            GRAPH_Y + GRAPH_H - self.current() / max_current * GRAPH_H,
        )
    }

    pub fn advance_and_render(&mut self, frame: &FrameContext, sink: &mut dyn SampleSink) -> Scene {
        let current = self.current();
        let (gx, gy, gw, gh) = (GRAPH_X, GRAPH_Y, GRAPH_W, GRAPH_H);

        let mut scene = frame.blank_scene(Color::gray(248));
        scene.push(Shape::Rect {
            origin: Vec2::new(gx, gy),
            size: Vec2::new(gw, gh),
            fill: Some(Color::gray(255)),
            stroke: Some(Color::gray(210)),
            corner_radius: 0.0,
        });
        for i in 1..10 {
            let x = gx + i as f64 / 10.0 * gw;
            scene.line(Vec2::new(x, gy), Vec2::new(x, gy + gh), Color::gray(235), 1.0);
        }
        for i in 1..6 {
            let y = gy + i as f64 / 6.0 * gh;
            scene.line(Vec2::new(gx, y), Vec2::new(gx + gw, y), Color::gray(235), 1.0);
        }

        // I = V/R is a straight line from the origin to full scale.
        scene.line(
            Vec2::new(gx, gy + gh),
            Vec2::new(gx + gw, gy),
            Color::rgb(30, 120, 240),
            2.0,
        );
        scene.push(Shape::Circle {
            center: self.operating_point(),
            diameter: 9.0,
            fill: Color::rgb(240, 60, 60),
            stroke: None,
        });

        scene.text(
            Vec2::new(gx + gw / 2.0 - 30.0, gy + gh + 18.0),
            "Voltage (V)",
            12.0,
            Color::gray(60),
        );
        scene.push(Shape::Text {
            at: Vec2::new(gx - 28.0, gy + gh / 2.0),
            text: "Current (A)".to_string(),
            size: 12.0,
            fill: Color::gray(60),
            align: TextAlign::Center,
            rotation: -FRAC_PI_2,
        });

        if self.transport.should_emit(frame.now_ms) {
            sink.accept(Sample::ResistiveSweep {
                voltage: self.voltage,
                resistance: self.resistance,
                current,
            });
        }
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sweep(v: f64, r: f64) -> ResistiveSweep {
        ResistiveSweep::new(
            &ParamSet::new().with("voltage", v).with("resistance", r),
            ModuleConfig::default(),
        )
    }

    #[test]
    fn test_zero_resistance_clamped() {
        let s = sweep(5.0, 0.0);
        assert_eq!(s.resistance(), 0.1);
        assert_eq!(s.current(), 5.0 / 0.1);
        assert!(s.operating_point().x.is_finite() && s.operating_point().y.is_finite());
    }

    #[test]
    fn test_operating_point_on_vi_line() {
        for (v, r) in [(0.0, 10.0), (5.0, 10.0), (12.5, 3.0), (20.0, 100.0)] {
            let p = sweep(v, r).operating_point();
            // Line from (50, 310) to (650, 30).
            let t = (p.x - 50.0) / 600.0;
            assert_relative_eq!(p.y, 310.0 - t * 280.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_current_follows_params_while_paused() {
        let mut s = sweep(5.0, 10.0);
        let mut emitted = 0;
        let mut sink = |_: Sample| emitted += 1;
        s.advance_and_render(&FrameContext::at(0.0), &mut sink);
        s.update_params(&ParamSet::new().with("voltage", 10.0));
        let scene = s.advance_and_render(&FrameContext::at(500.0), &mut sink);
        assert_relative_eq!(s.current(), 1.0);
        let marker = scene.circle_centers().next().unwrap();
        assert_relative_eq!(marker, s.operating_point());
        assert_eq!(emitted, 0);
    }

    #[test]
    fn test_running_emits_operating_point() {
        let mut s = sweep(6.0, 4.0);
        s.transport.start();
        let mut got = Vec::new();
        s.advance_and_render(&FrameContext::at(0.0), &mut |x: Sample| got.push(x));
        assert_eq!(
            got,
            vec![Sample::ResistiveSweep {
                voltage: 6.0,
                resistance: 4.0,
                current: 1.5
            }]
        );
    }
}

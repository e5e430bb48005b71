//! Display cards for the formula experiments.

use phyzlab_draw::{CANVAS_HEIGHT, CANVAS_WIDTH, Color, Scene, draw_spring_assembly};
use phyzlab_model::ParamSet;
use serde::Serialize;

use crate::formulas::{self, clamp_resistance};

/// One derived quantity on a readout card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quantity {
    /// Machine key, used when recording outputs.
    pub key: &'static str,
    pub label: &'static str,
    pub value: f64,
    pub unit: &'static str,
    /// Decimal places shown; computation keeps full precision.
    pub precision: usize,
    /// Shown instead of a number when `value` is not finite.
    pub non_finite: &'static str,
}

impl Quantity {
    fn new(key: &'static str, label: &'static str, value: f64, unit: &'static str, precision: usize) -> Self {
        Self {
            key,
            label,
            value,
            unit,
            precision,
            non_finite: "∞",
        }
    }

    fn or_dash(mut self) -> Self {
        self.non_finite = "—";
        self
    }

    /// Rounded value with unit, or the sentinel.
    pub fn display(&self) -> String {
        if !self.value.is_finite() {
            return self.non_finite.to_string();
        }
        if self.unit.is_empty() {
            format!("{:.*}", self.precision, self.value)
        } else {
            format!("{:.*} {}", self.precision, self.value, self.unit)
        }
    }
}

/// Result of [`FormulaReadout::compute`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Readout {
    pub title: &'static str,
    pub formula: &'static str,
    pub quantities: Vec<Quantity>,
    #[serde(skip)]
    pub diagram: Option<Scene>,
}

impl Readout {
    pub fn quantity(&self, key: &str) -> Option<&Quantity> {
        self.quantities.iter().find(|q| q.key == key)
    }

    /// Raw value of a quantity by key.
    pub fn value(&self, key: &str) -> Option<f64> {
        self.quantity(key).map(|q| q.value)
    }

    /// Quantities as a parameter map, for session records.
    pub fn outputs(&self) -> ParamSet {
        self.quantities.iter().map(|q| (q.key, q.value)).collect()
    }
}

/// Labels drawn next to the spring block: `k`, `x`, and `F = kx`.
pub fn spring_labels(k: f64, x: f64) -> [String; 3] {
    let force = formulas::hookes_force(k, x);
    [
        format!("k: {k:.1} N/m"),
        format!("x: {x:.2} m"),
        format!("F = kx = {force:.2} N"),
    ]
}

/// Closed-form experiments, one variant each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormulaReadout {
    OhmsLaw,
    HookesLaw,
    Projectile,
    RcCircuit,
    WaveInterference,
    LensOptics,
    Doppler,
    ThermalExpansion,
    Shm,
    FreeFall,
    Kirchhoff,
}

impl FormulaReadout {
    pub const ALL: [FormulaReadout; 11] = [
        Self::OhmsLaw,
        Self::HookesLaw,
        Self::Projectile,
        Self::RcCircuit,
        Self::WaveInterference,
        Self::LensOptics,
        Self::Doppler,
        Self::ThermalExpansion,
        Self::Shm,
        Self::FreeFall,
        Self::Kirchhoff,
    ];

    /// Catalog simulation id for this readout.
    pub fn simulation_id(self) -> &'static str {
        match self {
            Self::OhmsLaw => "ohmsLaw",
            Self::HookesLaw => "hookesLaw",
            Self::Projectile => "projectile",
            Self::RcCircuit => "rcCircuit",
            Self::WaveInterference => "waveInterference",
            Self::LensOptics => "lensOptics",
            Self::Doppler => "doppler",
            Self::ThermalExpansion => "thermalExpansion",
            Self::Shm => "shm",
            Self::FreeFall => "freeFall",
            Self::Kirchhoff => "kirchhoff",
        }
    }

    pub fn from_simulation_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.simulation_id() == id)
    }

    /// Derive the display quantities. Pure; missing keys use the catalog
    /// defaults for the experiment.
    pub fn compute(self, p: &ParamSet) -> Readout {
        match self {
            Self::OhmsLaw => {
                let v = p.get_or("voltage", 5.0);
                let r = p.get_or("resistance", 10.0);
                let i = formulas::ohms_current(v, r);
                readout(
                    "Ohm's Law",
                    "V = I · R",
                    vec![
                        Quantity::new("voltage", "V", v, "V", 2),
                        Quantity::new("resistance", "R", clamp_resistance(r), "Ω", 2),
                        Quantity::new("current", "I", i, "A", 3),
                    ],
                )
            }
            Self::HookesLaw => {
                let k = p.get_or("springConstant", 50.0);
                let x = p.get_or("displacement", 0.2);
                let mut card = readout(
                    "Hooke's Law",
                    "F = k · x",
                    vec![Quantity::new("force", "F", formulas::hookes_force(k, x), "N", 2)],
                );
                card.diagram = Some(hookes_diagram(k, x));
                card
            }
            Self::Projectile => {
                let r = formulas::projectile(
                    p.get_or("speed", 20.0),
                    p.get_or("angle", 45.0),
                    p.get_or("gravity", 9.8),
                );
                readout(
                    "Projectile Motion",
                    "R = v₀cosθ · t,  H = v₀²sin²θ / 2g,  t = 2v₀sinθ / g",
                    vec![
                        Quantity::new("range", "Range", r.range, "m", 2),
                        Quantity::new("maxHeight", "Max height", r.max_height, "m", 2),
                        Quantity::new("timeOfFlight", "Time of flight", r.time_of_flight, "s", 3),
                    ],
                )
            }
            Self::RcCircuit => {
                let r = formulas::rc_circuit(
                    p.get_or("resistance", 10.0),
                    p.get_or("capacitance", 100.0),
                );
                readout(
                    "RC Circuit",
                    "τ = R · C,  t₉₅ ≈ 3τ",
                    vec![
                        Quantity::new("tau", "τ", r.tau, "s", 3),
                        Quantity::new("t95", "t₉₅", r.t95, "s", 3),
                    ],
                )
            }
            Self::WaveInterference => {
                let a = formulas::wave_interference(
                    p.get_or("amp1", 2.0),
                    p.get_or("amp2", 2.0),
                    p.get_or("phase", 60.0),
                );
                readout(
                    "Wave Interference",
                    "A = √(A₁² + A₂² + 2A₁A₂cosφ)",
                    vec![Quantity::new("amplitude", "Resultant A", a, "", 3)],
                )
            }
            Self::LensOptics => {
                let l = formulas::thin_lens(p.get_or("focal", 10.0), p.get_or("objectDistance", 20.0));
                readout(
                    "Lens Optics",
                    "1/v = 1/f − 1/u,  m = −v/u",
                    vec![
                        Quantity::new("imageDistance", "v", l.image_distance, "cm", 2),
                        Quantity::new("magnification", "m", l.magnification, "", 3).or_dash(),
                    ],
                )
            }
            Self::Doppler => {
                let d = formulas::doppler(
                    p.get_or("freq", 440.0),
                    p.get_or("vs", 0.0),
                    p.get_or("vo", 10.0),
                    p.get_or("vw", 340.0),
                );
                readout(
                    "Doppler Effect",
                    "f′ = f · (v + vₒ) / (v − vₛ)",
                    vec![Quantity::new("observedFrequency", "f′", d.observed_frequency, "Hz", 2)],
                )
            }
            Self::ThermalExpansion => {
                let t = formulas::thermal_expansion(
                    p.get_or("L0", 1.0),
                    p.get_or("alpha", 12.0),
                    p.get_or("deltaT", 50.0),
                );
                readout(
                    "Thermal Expansion",
                    "ΔL = α · L₀ · ΔT",
                    vec![
                        Quantity::new("deltaLength", "ΔL", t.delta_length, "m", 4),
                        Quantity::new("finalLength", "L", t.final_length, "m", 4),
                    ],
                )
            }
            Self::Shm => {
                let s = formulas::shm(p.get_or("mass", 1.0), p.get_or("k", 50.0));
                readout(
                    "SHM Mass-Spring",
                    "ω = √(k/m),  T = 2π/ω",
                    vec![
                        Quantity::new("omega", "ω", s.angular_frequency, "rad/s", 3),
                        Quantity::new("period", "T", s.period, "s", 3),
                    ],
                )
            }
            Self::FreeFall => {
                let f = formulas::free_fall(p.get_or("u", 0.0), p.get_or("time", 2.0), p.get_or("g", 9.8));
                readout(
                    "Free Fall",
                    "v = u + gt,  s = ut + ½gt²",
                    vec![
                        Quantity::new("velocity", "v", f.velocity, "m/s", 2),
                        Quantity::new("displacement", "s", f.displacement, "m", 2),
                    ],
                )
            }
            Self::Kirchhoff => {
                let k = formulas::kirchhoff(p.get_or("supply", 12.0), p.get_or("r1", 20.0), p.get_or("r2", 40.0));
                readout(
                    "Kirchhoff's Circuit Laws",
                    "Series: R = R₁ + R₂;  Parallel: 1/R = 1/R₁ + 1/R₂;  I = V/R",
                    vec![
                        Quantity::new("seriesResistance", "R series", k.series_resistance, "Ω", 2),
                        Quantity::new("parallelResistance", "R parallel", k.parallel_resistance, "Ω", 2),
                        Quantity::new("seriesCurrent", "I series", k.series_current, "A", 3),
                        Quantity::new("seriesDrop1", "V₁ series", k.series_drop_1, "V", 2),
                        Quantity::new("seriesDrop2", "V₂ series", k.series_drop_2, "V", 2),
                        Quantity::new("branchCurrent1", "I₁ parallel", k.branch_current_1, "A", 3),
                        Quantity::new("branchCurrent2", "I₂ parallel", k.branch_current_2, "A", 3),
                        Quantity::new("parallelCurrent", "I total", k.parallel_current, "A", 3),
                    ],
                )
            }
        }
    }
}

fn readout(title: &'static str, formula: &'static str, quantities: Vec<Quantity>) -> Readout {
    Readout {
        title,
        formula,
        quantities,
        diagram: None,
    }
}

fn hookes_diagram(k: f64, x: f64) -> Scene {
    let mut scene = Scene::new(CANVAS_WIDTH, CANVAS_HEIGHT, Color::gray(245));
    let layout = draw_spring_assembly(&mut scene, x);
    let [k_label, x_label, f_label] = spring_labels(k, x);
    scene.text(layout.above(), k_label, 12.0, Color::gray(40));
    scene.text(layout.below(0), x_label, 12.0, Color::gray(40));
    scene.text(layout.below(1), f_label, 12.0, Color::gray(40));
    scene
}

//! Sample experiments loaded into an empty catalog.

use crate::control::Control;
use crate::experiment::ExperimentDefinition;

fn experiment(
    title: &str,
    description: &str,
    difficulty: &str,
    duration_minutes: u32,
    simulation_id: &str,
    controls: Vec<Control>,
) -> ExperimentDefinition {
    ExperimentDefinition {
        id: String::new(),
        title: title.to_string(),
        description: description.to_string(),
        subject: "Physics".to_string(),
        difficulty: difficulty.to_string(),
        duration_minutes: Some(duration_minutes),
        simulation_id: simulation_id.to_string(),
        assets: vec![],
        controls,
    }
}

/// The twelve sample experiments. Ids are left empty; the catalog assigns them.
pub fn seed_experiments() -> Vec<ExperimentDefinition> {
    vec![
        experiment(
            "Ohm's Law",
            "Explore V = I·R. Adjust Voltage and Resistance; observe Current.",
            "Easy",
            8,
            "ohmsLaw",
            vec![
                Control::slider("voltage", "Voltage (V)", 0.0, 20.0, 0.5, 5.0),
                Control::slider("resistance", "Resistance (Ω)", 1.0, 100.0, 1.0, 10.0),
            ],
        ),
        experiment(
            "Simple Pendulum",
            "Single pendulum: change length, mass, and gravity.",
            "Easy",
            10,
            "pendulum",
            vec![
                Control::slider("length", "Length (px)", 50.0, 300.0, 1.0, 150.0),
                Control::slider("mass", "Mass", 1.0, 20.0, 0.5, 5.0),
                Control::slider("gravity", "Gravity", 0.1, 2.0, 0.1, 1.0),
            ],
        ),
        experiment(
            "Hooke's Law",
            "Spring force F = kx. Adjust k and extension.",
            "Easy",
            7,
            "hookesLaw",
            vec![
                Control::slider("springConstant", "Spring Constant k (N/m)", 10.0, 200.0, 5.0, 50.0),
                Control::slider("displacement", "Extension x (m)", 0.0, 1.0, 0.05, 0.2),
            ],
        ),
        experiment(
            "Projectile Motion",
            "Launch a projectile and explore range, height, and time of flight.",
            "Medium",
            12,
            "projectile",
            vec![
                Control::slider("speed", "Initial Speed (m/s)", 5.0, 50.0, 1.0, 20.0),
                Control::slider("angle", "Launch Angle (°)", 10.0, 80.0, 1.0, 45.0),
                Control::slider("gravity", "Gravity g (m/s²)", 2.0, 20.0, 0.5, 9.8),
            ],
        ),
        experiment(
            "RC Circuit",
            "RC charging/discharging: time constant τ = R·C.",
            "Medium",
            12,
            "rcCircuit",
            vec![
                Control::slider("resistance", "Resistance R (kΩ)", 1.0, 100.0, 1.0, 10.0),
                Control::slider("capacitance", "Capacitance C (µF)", 1.0, 1000.0, 10.0, 100.0),
                Control::slider("supply", "Supply Voltage V (V)", 1.0, 20.0, 1.0, 5.0),
            ],
        ),
        experiment(
            "Wave Interference",
            "Two-source interference: resultant amplitude vs phase.",
            "Hard",
            15,
            "waveInterference",
            vec![
                Control::slider("amp1", "Amplitude A₁", 0.0, 5.0, 0.1, 2.0),
                Control::slider("amp2", "Amplitude A₂", 0.0, 5.0, 0.1, 2.0),
                Control::slider("phase", "Phase Difference φ (°)", 0.0, 180.0, 5.0, 60.0),
            ],
        ),
        experiment(
            "Lens Optics",
            "Thin lens formula: 1/f = 1/v + 1/u.",
            "Medium",
            10,
            "lensOptics",
            vec![
                Control::slider("focal", "Focal Length f (cm)", 2.0, 30.0, 1.0, 10.0),
                Control::slider("objectDistance", "Object Distance u (cm)", 5.0, 100.0, 1.0, 20.0),
            ],
        ),
        experiment(
            "Doppler Effect",
            "Observed frequency when source and observer move.",
            "Medium",
            9,
            "doppler",
            vec![
                Control::slider("freq", "Source Frequency f (Hz)", 100.0, 2000.0, 10.0, 440.0),
                Control::slider("vs", "Source Speed vₛ (m/s)", -40.0, 40.0, 2.0, 0.0),
                Control::slider("vo", "Observer Speed vₒ (m/s)", -40.0, 40.0, 2.0, 10.0),
                Control::slider("vw", "Wave Speed v (m/s)", 200.0, 400.0, 5.0, 340.0),
            ],
        ),
        experiment(
            "Thermal Expansion",
            "Linear expansion: ΔL = α L₀ ΔT.",
            "Easy",
            6,
            "thermalExpansion",
            vec![
                Control::slider("L0", "Initial Length L₀ (m)", 0.1, 5.0, 0.1, 1.0),
                Control::slider("alpha", "Coefficient α (×10⁻⁵ /°C)", 1.0, 40.0, 1.0, 12.0),
                Control::slider("deltaT", "ΔT (°C)", -50.0, 200.0, 5.0, 50.0),
            ],
        ),
        experiment(
            "SHM Mass-Spring",
            "Simple harmonic motion: ω = √(k/m), T = 2π/ω.",
            "Easy",
            8,
            "shm",
            vec![
                Control::slider("mass", "Mass m (kg)", 0.1, 5.0, 0.1, 1.0),
                Control::slider("k", "Spring Constant k (N/m)", 5.0, 200.0, 5.0, 50.0),
            ],
        ),
        experiment(
            "Free Fall",
            "Vertical motion under gravity.",
            "Easy",
            6,
            "freeFall",
            vec![
                Control::slider("u", "Initial Speed u (m/s)", 0.0, 50.0, 1.0, 0.0),
                Control::slider("time", "Time t (s)", 0.0, 10.0, 0.2, 2.0),
                Control::slider("g", "Gravity g (m/s²)", 2.0, 20.0, 0.5, 9.8),
            ],
        ),
        experiment(
            "Kirchhoff's Circuit Laws",
            "Currents and voltages in a two-branch circuit.",
            "Medium",
            10,
            "kirchhoff",
            vec![
                Control::slider("supply", "Supply Voltage V (V)", 1.0, 24.0, 1.0, 12.0),
                Control::slider("r1", "Resistance R₁ (Ω)", 1.0, 100.0, 1.0, 20.0),
                Control::slider("r2", "Resistance R₂ (Ω)", 1.0, 100.0, 1.0, 40.0),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_valid() {
        let seeds = seed_experiments();
        assert_eq!(seeds.len(), 12);
        for def in &seeds {
            def.validate().unwrap();
            assert!(!def.controls.is_empty(), "{}", def.title);
        }
    }
}

//! Closed-form physics for the formula experiments.
//!
//! All functions are total: degenerate inputs either clamp (resistance, the
//! Doppler denominator) or produce non-finite values that the display layer
//! renders as a sentinel.

use std::f64::consts::TAU;

/// Smallest resistance (Ω) used wherever resistance is a divisor.
pub const MIN_RESISTANCE: f64 = 0.1;

/// Resistance floored at [`MIN_RESISTANCE`]. NaN also maps to the floor.
#[inline]
pub fn clamp_resistance(r: f64) -> f64 {
    r.max(MIN_RESISTANCE)
}

/// I = V / R.
pub fn ohms_current(voltage: f64, resistance: f64) -> f64 {
    voltage / clamp_resistance(resistance)
}

/// F = k·x.
pub fn hookes_force(k: f64, x: f64) -> f64 {
    k * x
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileResult {
    pub time_of_flight: f64,
    pub range: f64,
    pub max_height: f64,
}

/// Launch from ground level; `angle_deg` measured from horizontal.
pub fn projectile(speed: f64, angle_deg: f64, g: f64) -> ProjectileResult {
    let theta = angle_deg.to_radians();
    let (sin, cos) = theta.sin_cos();
    let time_of_flight = 2.0 * speed * sin / g;
    ProjectileResult {
        time_of_flight,
        range: speed * cos * time_of_flight,
        max_height: speed * speed * sin * sin / (2.0 * g),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RcResult {
    /// τ = R·C, seconds.
    pub tau: f64,
    /// Time to reach ~95% charge, approximated as 3τ.
    pub t95: f64,
}

/// `resistance_kohm` in kΩ, `capacitance_uf` in µF.
pub fn rc_circuit(resistance_kohm: f64, capacitance_uf: f64) -> RcResult {
    let tau = (resistance_kohm * 1e3) * (capacitance_uf * 1e-6);
    RcResult { tau, t95: 3.0 * tau }
}

/// Resultant amplitude of two equal-frequency waves with phase offset `phase_deg`.
pub fn wave_interference(a1: f64, a2: f64, phase_deg: f64) -> f64 {
    let phi = phase_deg.to_radians();
    (a1 * a1 + a2 * a2 + 2.0 * a1 * a2 * phi.cos()).max(0.0).sqrt()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LensResult {
    pub image_distance: f64,
    pub magnification: f64,
}

/// Thin lens with the object distance entered as a positive number and
/// treated as −u: 1/v = 1/f − 1/u, m = −v/u.
pub fn thin_lens(focal: f64, object_distance: f64) -> LensResult {
    let inv_v = 1.0 / focal - 1.0 / object_distance;
    let image_distance = 1.0 / inv_v;
    LensResult {
        image_distance,
        magnification: -image_distance / object_distance,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DopplerResult {
    pub observed_frequency: f64,
    /// True when `v_wave - v_source` was exactly zero and replaced by 1.
    pub denominator_substituted: bool,
}

/// f′ = f·(v + vₒ)/(v − vₛ). An exactly-zero denominator is replaced by 1.
pub fn doppler(freq: f64, v_source: f64, v_observer: f64, v_wave: f64) -> DopplerResult {
    let raw = v_wave - v_source;
    let substituted = raw == 0.0;
    let denominator = if substituted { 1.0 } else { raw };
    DopplerResult {
        observed_frequency: freq * (v_wave + v_observer) / denominator,
        denominator_substituted: substituted,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalResult {
    pub delta_length: f64,
    pub final_length: f64,
}

/// `alpha_e5` is the coefficient in units of 10⁻⁵ /°C.
pub fn thermal_expansion(initial_length: f64, alpha_e5: f64, delta_t: f64) -> ThermalResult {
    let delta_length = alpha_e5 * 1e-5 * initial_length * delta_t;
    ThermalResult {
        delta_length,
        final_length: initial_length + delta_length,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShmResult {
    pub angular_frequency: f64,
    pub period: f64,
}

pub fn shm(mass: f64, k: f64) -> ShmResult {
    let angular_frequency = (k / mass).sqrt();
    ShmResult {
        angular_frequency,
        period: TAU / angular_frequency,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeFallResult {
    pub velocity: f64,
    pub displacement: f64,
}

pub fn free_fall(u: f64, t: f64, g: f64) -> FreeFallResult {
    FreeFallResult {
        velocity: u + g * t,
        displacement: u * t + 0.5 * g * t * t,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KirchhoffResult {
    pub series_resistance: f64,
    pub parallel_resistance: f64,
    pub series_current: f64,
    /// Voltage drop across R₁ in the series topology.
    pub series_drop_1: f64,
    /// Voltage drop across R₂ in the series topology.
    pub series_drop_2: f64,
    pub branch_current_1: f64,
    pub branch_current_2: f64,
    pub parallel_current: f64,
}

/// Two resistors on one supply, solved for both series and parallel wiring.
pub fn kirchhoff(supply: f64, r1: f64, r2: f64) -> KirchhoffResult {
    let r1 = clamp_resistance(r1);
    let r2 = clamp_resistance(r2);
    let series_resistance = r1 + r2;
    let parallel_resistance = 1.0 / (1.0 / r1 + 1.0 / r2);
    let series_current = supply / series_resistance;
    KirchhoffResult {
        series_resistance,
        parallel_resistance,
        series_current,
        series_drop_1: series_current * r1,
        series_drop_2: series_current * r2,
        branch_current_1: supply / r1,
        branch_current_2: supply / r2,
        parallel_current: supply / parallel_resistance,
    }
}

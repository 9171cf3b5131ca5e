use std::f64::consts::TAU;

/// Newton's constant in m^3 kg^-1 s^-2.
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67384e-11;

/// Degrees per tick used when no parent mass is available to derive one.
pub const DEFAULT_ORBIT_SPEED: f64 = 1.0;

/// Orbital period in seconds for a semi-major axis in meters around a parent of `parent_mass` kg.
///
/// `None` when the inputs cannot produce a finite positive period.
pub fn orbital_period(sma_m: f64, parent_mass: f64) -> Option<f64> {
    if !(sma_m > 0.0 && parent_mass > 0.0) {
        return None;
    }
    let period = TAU * (sma_m.powi(3) / (GRAVITATIONAL_CONSTANT * parent_mass)).sqrt();
    (period.is_finite() && period > 0.0).then_some(period)
}

/// Mean motion in degrees per tick (one tick is one simulated second).
///
/// Falls back to `configured`, then to [`DEFAULT_ORBIT_SPEED`], when the parent mass is unknown.
pub fn derive_orbit_speed(sma_km: f64, parent_mass: Option<f64>, configured: Option<f64>) -> f64 {
    parent_mass
        .and_then(|mass| orbital_period(sma_km * 1000.0, mass))
        .map(|period| 360.0 / period)
        .or(configured)
        .unwrap_or(DEFAULT_ORBIT_SPEED)
}

/// Spin in degrees per tick from a rotation period in seconds.
///
/// A period of zero means the body is tidally locked and turns at its orbit speed.
pub fn derive_spin_rate(rotation_period: Option<f64>, orbit_speed: f64) -> f64 {
    match rotation_period {
        Some(p) if p == 0.0 => orbit_speed,
        Some(p) if p.is_finite() => 360.0 / p,
        _ => 0.0,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Motion {
    pub orbit_speed: f64,
    pub spin_rate: f64,
}

/// Both rates for one body. Root bodies have no orbit and only spin.
pub fn derive_motion(
    sma_km: Option<f64>,
    parent_mass: Option<f64>,
    configured_speed: Option<f64>,
    rotation_period: Option<f64>,
) -> Motion {
    let orbit_speed = match sma_km {
        Some(a) => derive_orbit_speed(a, parent_mass, configured_speed),
        None => 0.0,
    };
    Motion {
        orbit_speed,
        spin_rate: derive_spin_rate(rotation_period, orbit_speed),
    }
}

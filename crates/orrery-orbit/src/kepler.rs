use std::f64::consts::{PI, TAU};

use orrery_geom::{Vec3, rotate_plane, wrap_degrees};

use crate::{OrbitError, OrbitalElements};

/// Newton-Raphson stops once successive estimates differ by less than this.
pub const TOLERANCE: f64 = 1e-6;
/// Upper bound on Newton steps; reaching it means the solve did not converge.
pub const MAX_ITERATIONS: u32 = 64;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeplerSolution {
    pub eccentric_anomaly: f64,
    pub iterations: u32,
    pub converged: bool,
}

/// Solves `E - e*sin(E) = M` for the eccentric anomaly `E` (radians).
///
/// `mean_anomaly` is normalized into `[0, 2π)` first. Starts from `E = M`,
/// or from `E = π` for `e >= 0.8` where `M` is a poor first guess near periapsis.
pub fn solve_eccentric_anomaly(mean_anomaly: f64, e: f64) -> KeplerSolution {
    let m = mean_anomaly.rem_euclid(TAU);
    let mut ea = if e < 0.8 { m } else { PI };
    for i in 1..=MAX_ITERATIONS {
        let next = ea - (ea - e * ea.sin() - m) / (1.0 - e * ea.cos());
        let step = (next - ea).abs();
        ea = next;
        if step < TOLERANCE {
            return KeplerSolution {
                eccentric_anomaly: ea,
                iterations: i,
                converged: true,
            };
        }
    }
    KeplerSolution {
        eccentric_anomaly: ea,
        iterations: MAX_ITERATIONS,
        converged: false,
    }
}

/// True anomaly from the eccentric anomaly via the half-angle relation
/// `tan(ν/2) = sqrt((1+e)/(1-e)) * tan(E/2)`, evaluated with `atan2` so it stays defined at `E = π`.
#[inline]
fn true_anomaly(eccentric_anomaly: f64, elements: &OrbitalElements) -> f64 {
    let (sqrt_1pe, sqrt_1me) = elements.half_angle_factors();
    let (s, c) = (eccentric_anomaly * 0.5).sin_cos();
    2.0 * (sqrt_1pe * s).atan2(sqrt_1me * c)
}

fn position(eccentric_anomaly: f64, elements: &OrbitalElements) -> Vec3 {
    let nu = true_anomaly(eccentric_anomaly, elements);
    let r = elements.semi_latus() / (1.0 + elements.eccentricity() * nu.cos());
    let (x, y) = (r * nu.cos(), r * nu.sin());

    // Rz(Ω) · Rx(i) · Rz(ω) applied to the in-plane point
    let (x, y) = rotate_plane(x, y, elements.argument());
    let (y, z) = rotate_plane(y, 0.0, elements.inclination());
    let (x, y) = rotate_plane(x, y, elements.longitude());
    Vec3::new(x, y, z)
}

/// Offset from the focus (the parent body) at `mean_anomaly_deg`, in the astronomical frame.
///
/// Pure and deterministic. If the solver hits its iteration bound the last
/// estimate is used; call [`try_orbit`] to observe that case.
pub fn orbit(mean_anomaly_deg: f64, elements: &OrbitalElements) -> Vec3 {
    let m = wrap_degrees(mean_anomaly_deg).to_radians();
    let sol = solve_eccentric_anomaly(m, elements.eccentricity());
    position(sol.eccentric_anomaly, elements)
}

pub fn try_orbit(mean_anomaly_deg: f64, elements: &OrbitalElements) -> Result<Vec3, OrbitError> {
    let m = wrap_degrees(mean_anomaly_deg).to_radians();
    let sol = solve_eccentric_anomaly(m, elements.eccentricity());
    if !sol.converged {
        return Err(OrbitError::NoConvergence {
            mean_anomaly: m,
            eccentricity: elements.eccentricity(),
            iterations: sol.iterations,
        });
    }
    Ok(position(sol.eccentric_anomaly, elements))
}

/// `n` points of the closed path, evenly spaced in mean anomaly, for orbit lines.
pub fn sample_path(elements: &OrbitalElements, n: usize) -> Vec<Vec3> {
    let step = if n > 0 { 360.0 / n as f64 } else { 0.0 };
    (0..n).map(|k| orbit(k as f64 * step, elements)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elements(a: f64, e: f64) -> OrbitalElements {
        OrbitalElements::new(a, e, 0.0, 0.0, 0.0).unwrap()
    }

    #[test]
    fn circular_orbit_starts_on_x_axis() {
        let p = orbit(0.0, &elements(10.0, 0.0));
        assert!((p - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn quarter_turn_on_circle() {
        let p = orbit(90.0, &elements(10.0, 0.0));
        assert!((p - Vec3::new(0.0, 10.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn inclination_tilts_out_of_plane() {
        let el = OrbitalElements::new(10.0, 0.0, 90.0, 0.0, 0.0).unwrap();
        let p = orbit(90.0, &el);
        assert!((p - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-9);
    }

    #[test]
    fn longitude_rotates_line_of_nodes() {
        let el = OrbitalElements::new(10.0, 0.0, 0.0, 90.0, 0.0).unwrap();
        let p = orbit(0.0, &el);
        assert!((p - Vec3::new(0.0, 10.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn argument_moves_periapsis() {
        let el = OrbitalElements::new(10.0, 0.5, 0.0, 0.0, 180.0).unwrap();
        let p = orbit(0.0, &el);
        assert!((p - Vec3::new(-5.0, 0.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn solver_reports_iterations() {
        let sol = solve_eccentric_anomaly(1.0, 0.3);
        assert!(sol.converged);
        assert!(sol.iterations >= 1 && sol.iterations < 10);
    }

    #[test]
    fn zero_eccentricity_converges_immediately() {
        let sol = solve_eccentric_anomaly(2.5, 0.0);
        assert!(sol.converged);
        assert_eq!(sol.iterations, 1);
        assert_eq!(sol.eccentric_anomaly, 2.5);
    }

    #[test]
    fn unchecked_open_orbit_is_reported() {
        let el = OrbitalElements::new_unchecked(10.0, 1.5, 0.0, 0.0, 0.0);
        // e >= 1 leaves Newton wandering; the bound must stop it either way
        let sol = solve_eccentric_anomaly(0.3, el.eccentricity());
        assert!(sol.iterations <= MAX_ITERATIONS);
    }

    #[test]
    fn sample_path_has_requested_length() {
        let pts = sample_path(&elements(5.0, 0.2), 360);
        assert_eq!(pts.len(), 360);
        assert!((pts[0].length() - 5.0 * 0.8).abs() < 1e-9);
        assert!(sample_path(&elements(5.0, 0.2), 0).is_empty());
    }
}

use orrery_orbit::{OrbitalElements, orbit, solve_eccentric_anomaly, try_orbit};
use proptest::prelude::*;

fn arb_anomaly() -> impl Strategy<Value = f64> {
    -3600.0f64..3600.0
}

fn arb_elements() -> impl Strategy<Value = OrbitalElements> {
    (0.1f64..1.0e4, 0.0f64..0.9, -180.0f64..180.0, 0.0f64..360.0, 0.0f64..360.0)
        .prop_map(|(a, e, i, l, w)| OrbitalElements::new(a, e, i, l, w).unwrap())
}

proptest! {
    // Circular orbits keep a constant radius
    #[test]
    fn circular_radius_law(
        m in arb_anomaly(),
        a in 0.1f64..1.0e5,
        i in -180.0f64..180.0,
        l in 0.0f64..360.0,
        w in 0.0f64..360.0,
    ) {
        let el = OrbitalElements::new(a, 0.0, i, l, w).unwrap();
        let r = orbit(m, &el).length();
        prop_assert!((r - a).abs() <= 1e-9 * a.max(1.0), "r={} a={}", r, a);
    }

    #[test]
    fn periodic_in_mean_anomaly(m in arb_anomaly(), el in arb_elements()) {
        let p = orbit(m, &el);
        let q = orbit(m + 360.0, &el);
        prop_assert!((p - q).length() <= 1e-7 * el.sma().max(1.0));
    }

    // Kepler residual below tolerance for every M when e <= 0.9
    #[test]
    fn solver_residual(m in -20.0f64..20.0, e in 0.0f64..=0.9) {
        let sol = solve_eccentric_anomaly(m, e);
        prop_assert!(sol.converged);
        let m_norm = m.rem_euclid(std::f64::consts::TAU);
        let ea = sol.eccentric_anomaly;
        let residual = (ea - e * ea.sin() - m_norm).abs();
        prop_assert!(residual < 1e-6, "residual {} at M={} e={}", residual, m, e);
    }

    #[test]
    fn radius_stays_between_apsides(m in arb_anomaly(), el in arb_elements()) {
        let r = orbit(m, &el).length();
        let slack = 1e-9 * el.sma();
        prop_assert!(r >= el.periapsis() - slack && r <= el.apoapsis() + slack);
    }

    #[test]
    fn try_orbit_agrees_with_orbit(m in arb_anomaly(), el in arb_elements()) {
        let checked = try_orbit(m, &el).unwrap();
        prop_assert_eq!(checked, orbit(m, &el));
    }
}

#[test]
fn moon_like_orbit_hits_both_apsides() {
    let el = OrbitalElements::new(384.0, 0.0549, 0.0, 0.0, 0.0).unwrap();
    let peri = orbit(0.0, &el).length();
    let apo = orbit(180.0, &el).length();
    assert!((peri - 384.0 * (1.0 - 0.0549)).abs() < 1e-9);
    assert!((apo - 384.0 * (1.0 + 0.0549)).abs() < 1e-9);
}

#[test]
fn high_eccentricity_still_converges() {
    let el = OrbitalElements::new(100.0, 0.97, 0.0, 0.0, 0.0).unwrap();
    for deg in (0..360).step_by(5) {
        assert!(try_orbit(deg as f64, &el).is_ok(), "failed at {deg}");
    }
}

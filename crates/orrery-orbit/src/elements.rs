use crate::OrbitError;

/// Classical orbital elements. Angles are stored in degrees.
///
/// Immutable once built; the derived factors used by the solver are
/// precomputed here so evaluating a position is pure arithmetic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitalElements {
    sma: f64,
    eccentricity: f64,
    inclination: f64,
    longitude: f64,
    argument: f64,
    // sqrt(1 + e), sqrt(1 - e): half-angle true anomaly factors
    sqrt_1pe: f64,
    sqrt_1me: f64,
    // a * (1 - e^2)
    semi_latus: f64,
}

impl OrbitalElements {
    /// Validated constructor: `a > 0` and `0 <= e < 1`.
    pub fn new(
        sma: f64,
        eccentricity: f64,
        inclination: f64,
        longitude: f64,
        argument: f64,
    ) -> Result<Self, OrbitError> {
        if !(sma.is_finite() && sma > 0.0) {
            return Err(OrbitError::InvalidSemiMajorAxis(sma));
        }
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(OrbitError::InvalidEccentricity(eccentricity));
        }
        Ok(Self::new_unchecked(
            sma,
            eccentricity,
            inclination,
            longitude,
            argument,
        ))
    }

    /// Builds elements without validation. With `e >= 1` the solver may not converge.
    pub fn new_unchecked(
        sma: f64,
        eccentricity: f64,
        inclination: f64,
        longitude: f64,
        argument: f64,
    ) -> Self {
        Self {
            sma,
            eccentricity,
            inclination,
            longitude,
            argument,
            sqrt_1pe: (1.0 + eccentricity).sqrt(),
            sqrt_1me: (1.0 - eccentricity).max(0.0).sqrt(),
            semi_latus: sma * (1.0 - eccentricity * eccentricity),
        }
    }

    pub fn circular(sma: f64) -> Result<Self, OrbitError> {
        Self::new(sma, 0.0, 0.0, 0.0, 0.0)
    }

    #[inline]
    pub fn sma(&self) -> f64 {
        self.sma
    }
    #[inline]
    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }
    #[inline]
    pub fn inclination(&self) -> f64 {
        self.inclination
    }
    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
    #[inline]
    pub fn argument(&self) -> f64 {
        self.argument
    }

    #[inline]
    pub fn inclination_rad(&self) -> f64 {
        self.inclination.to_radians()
    }

    #[inline]
    pub(crate) fn half_angle_factors(&self) -> (f64, f64) {
        (self.sqrt_1pe, self.sqrt_1me)
    }

    #[inline]
    pub(crate) fn semi_latus(&self) -> f64 {
        self.semi_latus
    }

    pub fn periapsis(&self) -> f64 {
        self.sma * (1.0 - self.eccentricity)
    }

    pub fn apoapsis(&self) -> f64 {
        self.sma * (1.0 + self.eccentricity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_open_orbits() {
        assert_eq!(
            OrbitalElements::new(10.0, 1.0, 0.0, 0.0, 0.0),
            Err(OrbitError::InvalidEccentricity(1.0))
        );
        assert!(OrbitalElements::new(10.0, -0.1, 0.0, 0.0, 0.0).is_err());
        assert!(OrbitalElements::new(10.0, f64::NAN, 0.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn rejects_degenerate_axis() {
        assert!(matches!(
            OrbitalElements::new(0.0, 0.1, 0.0, 0.0, 0.0),
            Err(OrbitError::InvalidSemiMajorAxis(_))
        ));
        assert!(OrbitalElements::circular(f64::INFINITY).is_err());
    }

    #[test]
    fn apsides() {
        let el = OrbitalElements::new(384.0, 0.0549, 5.0, 0.0, 0.0).unwrap();
        assert!((el.periapsis() - 384.0 * (1.0 - 0.0549)).abs() < 1e-12);
        assert!((el.apoapsis() - 384.0 * (1.0 + 0.0549)).abs() < 1e-12);
        assert!((el.inclination_rad() - 5f64.to_radians()).abs() < 1e-15);
    }
}

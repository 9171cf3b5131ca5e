#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OrbitError {
    InvalidSemiMajorAxis(f64),
    InvalidEccentricity(f64),
    NoConvergence {
        mean_anomaly: f64,
        eccentricity: f64,
        iterations: u32,
    },
}

impl std::fmt::Display for OrbitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrbitError::InvalidSemiMajorAxis(a) => {
                write!(f, "semi-major axis must be positive and finite, got {}", a)
            }
            OrbitError::InvalidEccentricity(e) => {
                write!(f, "eccentricity must lie in [0, 1), got {}", e)
            }
            OrbitError::NoConvergence {
                mean_anomaly,
                eccentricity,
                iterations,
            } => write!(
                f,
                "kepler solver did not converge after {} iterations (M={:.6} rad, e={})",
                iterations, mean_anomaly, eccentricity
            ),
        }
    }
}

impl std::error::Error for OrbitError {}

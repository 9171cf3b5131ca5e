//! Analytic Kepler orbits: elements, the eccentric-anomaly solver and orbit-speed derivation.
#![forbid(unsafe_code)]

pub mod elements;
pub mod error;
pub mod kepler;
pub mod period;

pub use elements::OrbitalElements;
pub use error::OrbitError;
pub use kepler::{KeplerSolution, orbit, sample_path, solve_eccentric_anomaly, try_orbit};
pub use period::{
    DEFAULT_ORBIT_SPEED, GRAVITATIONAL_CONSTANT, Motion, derive_motion, derive_orbit_speed,
    derive_spin_rate, orbital_period,
};

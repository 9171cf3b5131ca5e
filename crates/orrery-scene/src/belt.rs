use orrery_geom::{Euler, Vec3, wrap_degrees};
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rock {
    /// Position relative to the belt center, in the belt's unrotated frame.
    pub offset: Vec3,
    pub scale: f64,
}

/// A ring of rocks scattered around `radius`, spinning about its local Y axis.
#[derive(Clone, Debug)]
pub struct Belt {
    pub name: String,
    pub location: Vec3,
    pub rotation: Euler,
    initial_yaw: f64,
    /// Degrees per tick.
    pub spin_rate: f64,
    pub radius: f64,
    pub cross: f64,
    /// Multiplier applied to every rock's scale.
    pub scale: f64,
    pub model: Option<String>,
    pub color: [u8; 3],
    rocks: Vec<Rock>,
}

// Box-Muller; rand alone has no normal distribution
fn gauss<R: Rng>(rng: &mut R, mean: f64, sd: f64) -> f64 {
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random::<f64>();
    mean + sd * (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

impl Belt {
    /// Scatters `count` rocks: radial distance and height are normal around
    /// `radius` and the belt plane with deviation `cross`; scale is normal around 1.
    pub fn scatter<R: Rng>(
        name: impl Into<String>,
        location: Vec3,
        rotation: Euler,
        radius: f64,
        cross: f64,
        count: usize,
        rng: &mut R,
    ) -> Self {
        let mut rocks = Vec::with_capacity(count);
        for _ in 0..count {
            let theta = std::f64::consts::TAU * rng.random::<f64>();
            let r = gauss(rng, radius, cross);
            let y = gauss(rng, 0.0, cross);
            let mut scale = gauss(rng, 1.0, 0.5);
            if scale < 0.0 {
                scale = 1.0;
            }
            rocks.push(Rock {
                offset: Vec3::new(theta.cos() * r, y, theta.sin() * r),
                scale,
            });
        }
        Self {
            name: name.into(),
            location,
            rotation,
            initial_yaw: rotation.yaw,
            spin_rate: 0.0,
            radius,
            cross,
            scale: 1.0,
            model: None,
            color: [160, 150, 140],
            rocks,
        }
    }

    #[inline]
    pub fn rocks(&self) -> &[Rock] {
        &self.rocks
    }

    pub(crate) fn update(&mut self, tick: u64) {
        self.rotation.yaw = wrap_degrees(self.initial_yaw + tick as f64 * self.spin_rate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn same_seed_same_rocks() {
        let a = Belt::scatter("b", Vec3::ZERO, Euler::ZERO, 100.0, 5.0, 64, &mut StdRng::seed_from_u64(7));
        let b = Belt::scatter("b", Vec3::ZERO, Euler::ZERO, 100.0, 5.0, 64, &mut StdRng::seed_from_u64(7));
        assert_eq!(a.rocks(), b.rocks());
        assert_eq!(a.rocks().len(), 64);
    }

    #[test]
    fn rocks_cluster_around_radius() {
        let belt = Belt::scatter("b", Vec3::ZERO, Euler::ZERO, 1000.0, 10.0, 2000, &mut StdRng::seed_from_u64(1));
        let mean = belt
            .rocks()
            .iter()
            .map(|r| (r.offset.x * r.offset.x + r.offset.z * r.offset.z).sqrt())
            .sum::<f64>()
            / 2000.0;
        assert!((mean - 1000.0).abs() < 2.0, "mean radius {mean}");
        assert!(belt.rocks().iter().all(|r| r.scale >= 0.0));
    }

    #[test]
    fn spin_follows_tick() {
        let mut belt = Belt::scatter("b", Vec3::ZERO, Euler::new(0.0, 10.0, 0.0), 1.0, 0.0, 0, &mut StdRng::seed_from_u64(0));
        belt.spin_rate = 2.0;
        belt.update(200);
        assert_eq!(belt.rotation.yaw, 50.0);
    }
}

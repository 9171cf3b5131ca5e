use orrery_geom::{Euler, Vec3};

/// Live asteroids beyond this count push out the oldest.
pub const MAX_ASTEROIDS: usize = 64;

/// Launched asteroids spawn slightly below and behind the camera.
const SPAWN_OFFSET: Vec3 = Vec3::new(0.0, -3.0, 5.0);

#[derive(Clone, Debug, PartialEq)]
pub struct Asteroid {
    pub location: Vec3,
    /// Scene units per update pass.
    pub velocity: Vec3,
    pub rotation: Euler,
    pub model: Option<String>,
}

impl Asteroid {
    /// Fired along `direction`, always faster than the camera that launched it.
    pub fn launch(origin: Vec3, direction: Vec3, camera_speed: f64, model: Option<String>) -> Self {
        let speed = camera_speed.abs() * 1.1 + 5.0;
        Self {
            location: origin + SPAWN_OFFSET,
            velocity: direction * speed,
            rotation: Euler::ZERO,
            model,
        }
    }

    pub(crate) fn step(&mut self) {
        self.location += self.velocity;
        self.rotation.pitch += 1.0;
        self.rotation.yaw += 1.0;
        self.rotation.roll += 1.0;
    }
}

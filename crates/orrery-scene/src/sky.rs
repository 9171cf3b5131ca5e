use orrery_geom::{Euler, Vec3};

/// Background dome centered on the viewer.
#[derive(Clone, Debug, PartialEq)]
pub struct Sky {
    pub texture: Option<String>,
    pub rotation: Euler,
    pub color: [u8; 3],
    pub location: Vec3,
}

impl Sky {
    pub fn new(texture: Option<String>, rotation: Euler) -> Self {
        Self {
            texture,
            rotation,
            color: [255, 255, 255],
            location: Vec3::ZERO,
        }
    }
}

use orrery_geom::Vec3;

use crate::BodyId;

/// One entry of the per-frame draw list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawItem {
    Body(BodyId),
    /// Index into [`Scene::belts`](crate::Scene::belts).
    Belt(usize),
    Sky,
    /// Launch serial, stable while the asteroid is alive.
    Asteroid(u64),
}

/// What the render orderer needs to place an item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SortKey {
    pub background: bool,
    pub position: Vec3,
}

impl From<SortKey> for (bool, Vec3) {
    fn from(k: SortKey) -> Self {
        (k.background, k.position)
    }
}

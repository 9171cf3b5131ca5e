use orrery_geom::{Euler, Vec3, wrap_degrees};
use orrery_orbit::{OrbitalElements, orbit};

/// Index of a body in its [`Scene`](crate::Scene) arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub(crate) u32);

impl BodyId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Unit sphere scaled by the body radius; flat `color` when the texture is missing or fails to load.
    Sphere {
        texture: Option<String>,
        color: [u8; 3],
    },
    /// External mesh, scaled by the body radius.
    Model { path: String, color: [u8; 3] },
}

/// Translucent shell drawn around a sphere (atmosphere glow, corona).
#[derive(Clone, Debug, PartialEq)]
pub struct Shell {
    pub texture: Option<String>,
    /// Outer radius in scene units.
    pub radius: f64,
    pub color: [u8; 3],
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ring {
    pub texture: Option<String>,
    pub inner: f64,
    pub outer: f64,
    pub rotation: Euler,
    pub color: [u8; 3],
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layers {
    pub atmosphere: Option<Shell>,
    pub cloudmap: Option<String>,
    pub corona: Option<Shell>,
    pub ring: Option<Ring>,
}

/// Camera-distance fade for the orbit lines of a body's satellites.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitLine {
    /// Lines are hidden at or beyond this distance.
    pub show: f64,
    /// Fully opaque below this distance.
    pub opaque: f64,
    /// Distance over which alpha falls from 1 to 0 past `opaque`.
    pub blend: f64,
}

impl Default for OrbitLine {
    fn default() -> Self {
        Self {
            show: f64::INFINITY,
            opaque: f64::INFINITY,
            blend: 1.0,
        }
    }
}

impl OrbitLine {
    /// Line alpha for a camera at `distance` from the parent, `None` when hidden.
    pub fn alpha(&self, distance: f64) -> Option<f32> {
        if distance >= self.show {
            return None;
        }
        if distance < self.opaque {
            return Some(1.0);
        }
        let a = 1.0 - (distance - self.opaque) / self.blend.max(f64::EPSILON);
        Some(a.clamp(0.0, 1.0) as f32)
    }
}

/// Orbital component. Only satellites carry one, so a body has an orbit exactly when it has a parent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orbit {
    pub(crate) parent: BodyId,
    pub elements: OrbitalElements,
    /// Mean motion in degrees per tick.
    pub speed: f64,
}

impl Orbit {
    #[inline]
    pub fn parent(&self) -> BodyId {
        self.parent
    }

    /// `tick * speed mod 360`, evaluated fresh from the tick.
    #[inline]
    pub fn mean_anomaly(&self, tick: u64) -> f64 {
        wrap_degrees(tick as f64 * self.speed)
    }

    /// Offset from the parent in scene space at `tick`.
    pub fn offset(&self, tick: u64) -> Vec3 {
        orbit(self.mean_anomaly(tick), &self.elements).ecliptic_to_scene()
    }
}

#[derive(Clone, Debug)]
pub struct Body {
    pub name: String,
    pub location: Vec3,
    pub rotation: Euler,
    initial_roll: f64,
    /// Degrees per tick about the body's own axis.
    pub spin_rate: f64,
    /// Scene units.
    pub radius: f64,
    /// Kilograms, when known.
    pub mass: Option<f64>,
    pub shape: Shape,
    pub layers: Layers,
    pub orbit_line: OrbitLine,
    pub(crate) orbit: Option<Orbit>,
    pub(crate) children: Vec<BodyId>,
    pub(crate) last_updated_tick: Option<u64>,
}

impl Body {
    pub fn new(name: impl Into<String>, location: Vec3, rotation: Euler, radius: f64, shape: Shape) -> Self {
        Self {
            name: name.into(),
            location,
            rotation,
            initial_roll: rotation.roll,
            spin_rate: 0.0,
            radius,
            mass: None,
            shape,
            layers: Layers::default(),
            orbit_line: OrbitLine::default(),
            orbit: None,
            children: Vec::new(),
            last_updated_tick: None,
        }
    }

    pub fn with_spin(mut self, spin_rate: f64) -> Self {
        self.spin_rate = spin_rate;
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }

    #[inline]
    pub fn orbit(&self) -> Option<&Orbit> {
        self.orbit.as_ref()
    }

    #[inline]
    pub fn parent(&self) -> Option<BodyId> {
        self.orbit.as_ref().map(|o| o.parent)
    }

    #[inline]
    pub fn children(&self) -> &[BodyId] {
        &self.children
    }

    #[inline]
    pub fn last_updated_tick(&self) -> Option<u64> {
        self.last_updated_tick
    }

    /// Cached `location`/`rotation` are current for `tick`.
    #[inline]
    pub fn is_fresh(&self, tick: u64) -> bool {
        self.last_updated_tick == Some(tick)
    }

    /// Inclusive sphere test against this body alone.
    #[inline]
    pub fn contains(&self, point: Vec3) -> bool {
        self.location.distance(point) <= self.radius
    }

    /// Closed-form spin and orbit for `tick`. `parent_location` must already be current.
    pub(crate) fn recompute(&mut self, tick: u64, parent_location: Option<Vec3>) {
        self.rotation.roll = wrap_degrees(self.initial_roll + tick as f64 * self.spin_rate);
        if let (Some(orbit), Some(origin)) = (self.orbit.as_ref(), parent_location) {
            self.location = origin + orbit.offset(tick);
        }
        self.last_updated_tick = Some(tick);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere() -> Shape {
        Shape::Sphere {
            texture: None,
            color: [255, 255, 255],
        }
    }

    #[test]
    fn contains_is_inclusive() {
        let b = Body::new("a", Vec3::new(1.0, 2.0, 3.0), Euler::ZERO, 2.0, sphere());
        assert!(b.contains(Vec3::new(1.0, 2.0, 3.0)));
        assert!(b.contains(Vec3::new(3.0, 2.0, 3.0)));
        assert!(!b.contains(Vec3::new(3.0 + 1e-9, 2.0, 3.0)));
    }

    #[test]
    fn spin_is_closed_form() {
        let mut b = Body::new("a", Vec3::ZERO, Euler::new(0.0, 0.0, 30.0), 1.0, sphere()).with_spin(0.5);
        b.recompute(100, None);
        assert_eq!(b.rotation.roll, 80.0);
        b.recompute(1000, None);
        assert_eq!(b.rotation.roll, 170.0);
        assert!(b.is_fresh(1000));
        assert!(!b.is_fresh(100));
    }

    #[test]
    fn orbit_line_fades() {
        let line = OrbitLine {
            show: 100.0,
            opaque: 50.0,
            blend: 25.0,
        };
        assert_eq!(line.alpha(10.0), Some(1.0));
        assert_eq!(line.alpha(62.5), Some(0.5));
        assert_eq!(line.alpha(90.0), Some(0.0));
        assert_eq!(line.alpha(100.0), None);
        assert_eq!(OrbitLine::default().alpha(1.0e12), Some(1.0));
    }
}

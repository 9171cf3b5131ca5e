use orrery_geom::{Euler, Vec3};
use orrery_orbit::{OrbitalElements, derive_motion};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::belt::Belt;
use crate::body::{Body, BodyId, Layers, OrbitLine, Ring, Shape, Shell};
use crate::config::{BeltRecord, BodyRecord, WorldFile};
use crate::error::BodyError;
use crate::scene::Scene;
use crate::sky::Sky;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraStart {
    pub position: Vec3,
    pub orientation: Euler,
}

/// A record that failed to build, with everything nested under it.
#[derive(Clone, Debug, PartialEq)]
pub struct Dropped {
    /// Dotted path such as `bodies.earth.moon`.
    pub path: String,
    pub reason: BodyError,
    /// The record itself plus its nested satellites.
    pub subtree: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadReport {
    pub bodies: usize,
    pub belts: usize,
    pub dropped: Vec<Dropped>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty()
    }
}

pub struct LoadedWorld {
    pub scene: Scene,
    pub camera_start: CameraStart,
    pub tick_length: f64,
    pub report: LoadReport,
}

fn subtree_size(value: &toml::Value) -> usize {
    let nested = value
        .get("satellites")
        .and_then(|s| s.as_table())
        .map(|t| t.values().map(subtree_size).sum())
        .unwrap_or(0);
    1 + nested
}

struct Builder<'a> {
    file: &'a WorldFile,
    scene: Scene,
    report: LoadReport,
}

impl Builder<'_> {
    fn km(&self, v: f64) -> f64 {
        v / self.file.length
    }

    fn drop_record(&mut self, path: String, reason: BodyError, subtree: usize) {
        log::warn!(
            target: "scene",
            "skipping {} ({} record(s) dropped): {}",
            path,
            subtree,
            reason
        );
        self.report.dropped.push(Dropped {
            path,
            reason,
            subtree,
        });
    }

    fn body(&mut self, path: String, name: &str, value: &toml::Value, parent: Option<BodyId>) {
        let record: BodyRecord = match value.clone().try_into() {
            Ok(r) => r,
            Err(e) => {
                self.drop_record(path, BodyError::Malformed(e.to_string()), subtree_size(value));
                return;
            }
        };
        let id = match self.make_body(name, &record, parent) {
            Ok(id) => id,
            Err(reason) => {
                self.drop_record(path, reason, subtree_size(value));
                return;
            }
        };
        self.report.bodies += 1;
        for (child, child_value) in &record.satellites {
            self.body(format!("{}.{}", path, child), child, child_value, Some(id));
        }
    }

    fn make_body(&mut self, name: &str, r: &BodyRecord, parent: Option<BodyId>) -> Result<BodyId, BodyError> {
        let has_shape = r.texture.is_some() || r.model.is_some();
        let has_motion = r.rotation.is_some() || r.orbit_km().is_some() || r.orbit_speed.is_some();
        if !has_shape && !has_motion {
            return Err(BodyError::NothingToLoad);
        }

        let radius = self.km(r.radius);
        let shape = match &r.model {
            Some(path) => Shape::Model {
                path: path.clone(),
                color: r.color,
            },
            None => Shape::Sphere {
                texture: r.texture.clone(),
                color: r.color,
            },
        };
        let mut body = Body::new(
            name,
            Vec3::new(r.x, r.y, r.z),
            Euler::new(r.pitch, r.yaw, r.roll),
            radius,
            shape,
        );
        body.mass = r.mass;
        body.layers = Layers {
            atmosphere: r.atmosphere.as_ref().map(|s| Shell {
                texture: s.texture.clone(),
                radius: radius + self.km(s.size),
                color: s.color,
            }),
            cloudmap: r.cloudmap.clone(),
            corona: r.corona.as_ref().map(|s| Shell {
                texture: s.texture.clone(),
                radius: radius + self.km(s.size),
                color: s.color,
            }),
            ring: r.ring.as_ref().map(|g| Ring {
                texture: g.texture.clone(),
                inner: self.km(g.distance),
                outer: self.km(g.distance + g.size),
                rotation: Euler::new(g.pitch, g.yaw, g.roll),
                color: g.color,
            }),
        };
        let fade = OrbitLine::default();
        body.orbit_line = OrbitLine {
            show: r.orbit_distance.map(|d| self.km(d)).unwrap_or(fade.show),
            opaque: r.orbit_opaque.map(|d| self.km(d)).unwrap_or(fade.opaque),
            blend: r.orbit_blend.map(|d| self.km(d)).unwrap_or(fade.blend),
        };

        match parent {
            None => {
                let motion = derive_motion(None, None, None, r.rotation);
                body.spin_rate = motion.spin_rate;
                Ok(self.scene.add_root(body))
            }
            Some(parent) => {
                let sma_km = r.orbit_km().ok_or(BodyError::MissingOrbit)?;
                let elements = OrbitalElements::new(
                    self.km(sma_km),
                    r.eccentricity,
                    r.inclination,
                    r.longitude,
                    r.argument,
                )?;
                let parent_mass = self.scene[parent].mass;
                let motion = derive_motion(Some(sma_km), parent_mass, r.orbit_speed, r.rotation);
                body.spin_rate = motion.spin_rate;
                log::debug!(
                    target: "scene",
                    "{}: orbit {:.6} deg/tick, spin {:.6} deg/tick",
                    name,
                    motion.orbit_speed,
                    motion.spin_rate
                );
                Ok(self.scene.add_satellite(parent, body, elements, motion.orbit_speed))
            }
        }
    }

    fn belt(&mut self, rng: &mut StdRng, name: &str, value: &toml::Value) {
        let r: BeltRecord = match value.clone().try_into() {
            Ok(r) => r,
            Err(e) => {
                self.drop_record(format!("belts.{}", name), BodyError::Malformed(e.to_string()), 1);
                return;
            }
        };
        let mut belt = Belt::scatter(
            name,
            Vec3::new(r.x, r.y, r.z),
            Euler::new(r.pitch, r.yaw, r.roll),
            self.km(r.radius),
            self.km(r.cross),
            r.count,
            rng,
        );
        belt.spin_rate = match r.rotation {
            Some(p) if p != 0.0 => 360.0 / p,
            _ => 0.0,
        };
        belt.scale = r.scale;
        belt.model = r.model;
        belt.color = r.color;
        self.scene.add_belt(belt);
        self.report.belts += 1;
    }
}

/// Builds a scene from a parsed world file. Bad records are dropped with
/// their subtrees and listed in the report; siblings still load.
pub fn build_world(file: &WorldFile) -> LoadedWorld {
    let mut b = Builder {
        file,
        scene: Scene::new(),
        report: LoadReport::default(),
    };
    for (name, value) in &file.bodies {
        b.body(format!("bodies.{}", name), name, value, None);
    }
    let mut rng = StdRng::seed_from_u64(file.seed);
    for (name, value) in &file.belts {
        b.belt(&mut rng, name, value);
    }
    if let Some(sky) = &file.sky {
        let mut s = Sky::new(sky.texture.clone(), Euler::new(sky.pitch, sky.yaw, sky.roll));
        s.color = sky.color;
        b.scene.set_sky(Some(s));
    }
    b.scene.set_asteroid_models(file.asteroids.clone());

    let Builder {
        mut scene, report, ..
    } = b;
    let camera_start = CameraStart {
        position: Vec3::new(file.start.x, file.start.y, file.start.z),
        orientation: Euler::new(file.start.pitch, file.start.yaw, file.start.roll),
    };
    scene.follow_camera(camera_start.position);
    log::info!(
        target: "scene",
        "world loaded: {} bodies, {} belts, {} record(s) skipped",
        report.bodies,
        report.belts,
        report.dropped.len()
    );
    LoadedWorld {
        scene,
        camera_start,
        tick_length: file.tick,
        report,
    }
}

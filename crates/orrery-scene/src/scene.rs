use std::collections::VecDeque;

use hashbrown::HashMap;
use orrery_geom::Vec3;
use orrery_orbit::OrbitalElements;

use crate::asteroid::{Asteroid, MAX_ASTEROIDS};
use crate::belt::Belt;
use crate::body::{Body, BodyId, Orbit};
use crate::clock::WorldClock;
use crate::draw::{DrawItem, SortKey};
use crate::sky::Sky;

/// Expensive recomputations versus memoized visits during one update pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateStats {
    pub recomputed: usize,
    pub skipped: usize,
}

/// Owns every body in an arena; tree links are [`BodyId`]s.
#[derive(Default)]
pub struct Scene {
    bodies: Vec<Body>,
    roots: Vec<BodyId>,
    names: HashMap<String, BodyId>,
    belts: Vec<Belt>,
    sky: Option<Sky>,
    asteroids: VecDeque<Asteroid>,
    // serial of asteroids.front()
    first_asteroid: u64,
    asteroid_models: Vec<String>,
    // tick asteroids last advanced on
    asteroids_tick: Option<u64>,
    // bumped whenever the set of drawables changes
    generation: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, body: Body) -> BodyId {
        let id = BodyId(self.bodies.len() as u32);
        if self.names.insert(body.name.clone(), id).is_some() {
            log::warn!(target: "scene", "duplicate body name '{}', lookups resolve to the newest", body.name);
        }
        self.bodies.push(body);
        self.generation += 1;
        id
    }

    /// Adds a top-level body. Any orbit it carries is discarded.
    pub fn add_root(&mut self, mut body: Body) -> BodyId {
        body.orbit = None;
        body.children.clear();
        let id = self.push(body);
        self.roots.push(id);
        id
    }

    /// Adds `body` orbiting `parent` at `speed` degrees per tick.
    pub fn add_satellite(&mut self, parent: BodyId, mut body: Body, elements: OrbitalElements, speed: f64) -> BodyId {
        body.orbit = Some(Orbit {
            parent,
            elements,
            speed,
        });
        body.children.clear();
        body.location = self.bodies[parent.index()].location;
        let id = self.push(body);
        self.bodies[parent.index()].children.push(id);
        id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    #[inline]
    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.index())
    }

    #[inline]
    pub fn roots(&self) -> &[BodyId] {
        &self.roots
    }

    pub fn find(&self, name: &str) -> Option<BodyId> {
        self.names.get(name).copied()
    }

    pub fn bodies(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.bodies.iter().enumerate().map(|(i, b)| (BodyId(i as u32), b))
    }

    /// Brings one body current for `tick`, refreshing its ancestors first.
    ///
    /// A no-op for bodies already updated this tick.
    pub fn update_body(&mut self, id: BodyId, tick: u64, stats: &mut UpdateStats) {
        let idx = id.index();
        if self.bodies[idx].is_fresh(tick) {
            stats.skipped += 1;
            return;
        }
        let parent_location = match self.bodies[idx].parent() {
            Some(parent) => {
                self.update_body(parent, tick, stats);
                Some(self.bodies[parent.index()].location)
            }
            None => None,
        };
        self.bodies[idx].recompute(tick, parent_location);
        stats.recomputed += 1;
    }

    /// Full pass for the clock's current tick: bodies, belt spin, one asteroid step.
    pub fn update(&mut self, clock: &WorldClock) -> UpdateStats {
        let tick = clock.tick();
        let mut stats = UpdateStats::default();
        for i in 0..self.bodies.len() {
            self.update_body(BodyId(i as u32), tick, &mut stats);
        }
        for belt in &mut self.belts {
            belt.update(tick);
        }
        if self.asteroids_tick != Some(tick) {
            self.asteroids_tick = Some(tick);
            for asteroid in &mut self.asteroids {
                asteroid.step();
            }
        }
        log::trace!(
            target: "scene",
            "tick {}: {} recomputed, {} skipped",
            tick,
            stats.recomputed,
            stats.skipped
        );
        stats
    }

    /// `point` lies inside `id` or anywhere in its subtree.
    pub fn collides(&self, id: BodyId, point: Vec3) -> bool {
        let body = &self.bodies[id.index()];
        body.contains(point) || body.children.iter().any(|&c| self.collides(c, point))
    }

    /// First body (pre-order from the roots) containing `point`.
    pub fn collision(&self, point: Vec3) -> Option<BodyId> {
        self.roots.iter().find_map(|&r| self.first_hit(r, point))
    }

    fn first_hit(&self, id: BodyId, point: Vec3) -> Option<BodyId> {
        let body = &self.bodies[id.index()];
        if body.contains(point) {
            return Some(id);
        }
        body.children.iter().find_map(|&c| self.first_hit(c, point))
    }

    pub fn add_belt(&mut self, belt: Belt) -> usize {
        self.belts.push(belt);
        self.generation += 1;
        self.belts.len() - 1
    }

    #[inline]
    pub fn belts(&self) -> &[Belt] {
        &self.belts
    }

    pub fn set_sky(&mut self, sky: Option<Sky>) {
        self.sky = sky;
        self.generation += 1;
    }

    #[inline]
    pub fn sky(&self) -> Option<&Sky> {
        self.sky.as_ref()
    }

    /// Keeps the sky dome centered on the viewer.
    pub fn follow_camera(&mut self, position: Vec3) {
        if let Some(sky) = self.sky.as_mut() {
            sky.location = position;
        }
    }

    pub fn set_asteroid_models(&mut self, models: Vec<String>) {
        self.asteroid_models = models;
    }

    /// Model paths launched asteroids cycle through.
    #[inline]
    pub fn asteroid_models(&self) -> &[String] {
        &self.asteroid_models
    }

    /// Spawns an asteroid and returns its serial, dropping the oldest past [`MAX_ASTEROIDS`].
    pub fn launch_asteroid(&mut self, origin: Vec3, direction: Vec3, camera_speed: f64) -> u64 {
        let serial = self.first_asteroid + self.asteroids.len() as u64;
        let model = if self.asteroid_models.is_empty() {
            None
        } else {
            let pick = (serial % self.asteroid_models.len() as u64) as usize;
            Some(self.asteroid_models[pick].clone())
        };
        self.asteroids.push_back(Asteroid::launch(origin, direction, camera_speed, model));
        while self.asteroids.len() > MAX_ASTEROIDS {
            self.asteroids.pop_front();
            self.first_asteroid += 1;
        }
        self.generation += 1;
        log::debug!(target: "scene", "asteroid #{} launched ({} live)", serial, self.asteroids.len());
        serial
    }

    pub fn asteroid(&self, serial: u64) -> Option<&Asteroid> {
        let offset = serial.checked_sub(self.first_asteroid)?;
        self.asteroids.get(offset as usize)
    }

    pub fn asteroids(&self) -> impl Iterator<Item = (u64, &Asteroid)> {
        let first = self.first_asteroid;
        self.asteroids.iter().enumerate().map(move |(i, a)| (first + i as u64, a))
    }

    /// Changes whenever an item is added to or removed from the draw set.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Rebuilds `out` with every drawable in the scene, unordered.
    pub fn draw_items(&self, out: &mut Vec<DrawItem>) {
        out.clear();
        if self.sky.is_some() {
            out.push(DrawItem::Sky);
        }
        out.extend((0..self.bodies.len()).map(|i| DrawItem::Body(BodyId(i as u32))));
        out.extend((0..self.belts.len()).map(DrawItem::Belt));
        out.extend(self.asteroids().map(|(serial, _)| DrawItem::Asteroid(serial)));
    }

    /// `None` for items that no longer exist.
    pub fn sort_key(&self, item: DrawItem) -> Option<SortKey> {
        let (background, position) = match item {
            DrawItem::Body(id) => (false, self.get(id)?.location),
            DrawItem::Belt(i) => (false, self.belts.get(i)?.location),
            DrawItem::Sky => (true, self.sky.as_ref()?.location),
            DrawItem::Asteroid(serial) => (false, self.asteroid(serial)?.location),
        };
        Some(SortKey {
            background,
            position,
        })
    }
}

impl std::ops::Index<BodyId> for Scene {
    type Output = Body;

    fn index(&self, id: BodyId) -> &Body {
        &self.bodies[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Shape;
    use orrery_geom::Euler;

    fn body(name: &str, at: Vec3, radius: f64) -> Body {
        Body::new(
            name,
            at,
            Euler::ZERO,
            radius,
            Shape::Sphere {
                texture: None,
                color: [255, 255, 255],
            },
        )
    }

    fn system() -> (Scene, BodyId, BodyId, BodyId) {
        let mut scene = Scene::new();
        let sun = scene.add_root(body("sun", Vec3::ZERO, 10.0));
        let earth = scene.add_satellite(
            sun,
            body("earth", Vec3::ZERO, 2.0),
            OrbitalElements::circular(100.0).unwrap(),
            1.0,
        );
        let moon = scene.add_satellite(
            earth,
            body("moon", Vec3::ZERO, 0.5),
            OrbitalElements::circular(5.0).unwrap(),
            10.0,
        );
        (scene, sun, earth, moon)
    }

    #[test]
    fn orbit_iff_parent() {
        let (scene, sun, earth, moon) = system();
        assert!(scene[sun].orbit().is_none() && scene[sun].parent().is_none());
        assert_eq!(scene[earth].parent(), Some(sun));
        assert_eq!(scene[moon].parent(), Some(earth));
        assert_eq!(scene[sun].children(), &[earth]);
        assert_eq!(scene.find("moon"), Some(moon));
    }

    #[test]
    fn updating_satellite_first_refreshes_ancestors() {
        let (mut scene, sun, earth, moon) = system();
        let mut stats = UpdateStats::default();
        scene.update_body(moon, 7, &mut stats);
        assert_eq!(stats.recomputed, 3);
        assert!(scene[sun].is_fresh(7));
        assert!(scene[earth].is_fresh(7));
        let d = scene[moon].location.distance(scene[earth].location);
        assert!((d - 5.0).abs() < 1e-9);
    }

    #[test]
    fn second_pass_in_same_tick_is_memoized() {
        let (mut scene, ..) = system();
        let clock = WorldClock::starting_at(42, 1.0);
        let first = scene.update(&clock);
        let before: Vec<Vec3> = scene.bodies().map(|(_, b)| b.location).collect();
        let second = scene.update(&clock);
        let after: Vec<Vec3> = scene.bodies().map(|(_, b)| b.location).collect();
        assert_eq!(first.recomputed, 3);
        assert_eq!(second.recomputed, 0);
        assert_eq!(second.skipped, 3);
        assert_eq!(before, after);
    }

    #[test]
    fn asteroids_step_once_per_tick() {
        let mut scene = Scene::new();
        let serial = scene.launch_asteroid(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 0.0);
        scene.update(&WorldClock::starting_at(5, 1.0));
        let once = scene.asteroid(serial).unwrap().location;
        assert_eq!(once.x, 5.0);
        scene.update(&WorldClock::starting_at(5, 1.0));
        assert_eq!(scene.asteroid(serial).unwrap().location, once);
        scene.update(&WorldClock::starting_at(6, 1.0));
        assert!(scene.asteroid(serial).unwrap().location.x > once.x);
    }

    #[test]
    fn circular_orbit_lies_in_xz_plane() {
        let (mut scene, _, earth, _) = system();
        scene.update(&WorldClock::starting_at(90, 1.0));
        let p = scene[earth].location;
        assert!(p.y.abs() < 1e-9);
        assert!((p - Vec3::new(0.0, 0.0, 100.0)).length() < 1e-9);
    }

    #[test]
    fn collision_walks_children() {
        let (mut scene, sun, earth, moon) = system();
        scene.update(&WorldClock::new(1.0));
        let moon_at = scene[moon].location;
        assert!(scene.collides(sun, moon_at));
        assert!(!scene[sun].contains(moon_at));
        assert_eq!(scene.collision(moon_at), Some(moon));
        assert_eq!(scene.collision(scene[earth].location), Some(earth));
        assert_eq!(scene.collision(Vec3::new(0.0, 50.0, 0.0)), None);
    }

    #[test]
    fn asteroid_cap_drops_oldest() {
        let mut scene = Scene::new();
        for _ in 0..(MAX_ASTEROIDS + 3) {
            scene.launch_asteroid(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 0.0);
        }
        assert_eq!(scene.asteroids().count(), MAX_ASTEROIDS);
        assert!(scene.asteroid(0).is_none());
        assert!(scene.asteroid(3).is_some());
        assert!(scene.asteroid(MAX_ASTEROIDS as u64 + 2).is_some());
        assert!(scene.sort_key(DrawItem::Asteroid(1)).is_none());
    }

    #[test]
    fn draw_items_cover_everything() {
        let (mut scene, ..) = system();
        scene.set_sky(Some(Sky::new(None, Euler::ZERO)));
        scene.launch_asteroid(Vec3::ZERO, Vec3::UP, 1.0);
        let mut items = Vec::new();
        scene.draw_items(&mut items);
        assert_eq!(items.len(), 1 + 3 + 1);
        assert_eq!(items[0], DrawItem::Sky);
        let sky = scene.sort_key(DrawItem::Sky).unwrap();
        assert!(sky.background);
        scene.follow_camera(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(scene.sort_key(DrawItem::Sky).unwrap().position, Vec3::new(1.0, 2.0, 3.0));
    }
}

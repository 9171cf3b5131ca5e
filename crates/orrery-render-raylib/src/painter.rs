use std::path::Path;

use orrery_geom::{Euler, Mat4, Vec3};
use orrery_orbit::sample_path;
use orrery_scene::{BodyId, DrawItem, Scene, Shape, Shell};
use orrery_view::Camera;
use raylib::prelude::*;

use crate::conv::{mat4_to_rl, rgb, rgba, vec3_to_rl};
use crate::{ModelCache, TextureCache, apply_texture, sphere_model};

const SPHERE_RINGS: i32 = 32;
const SPHERE_SLICES: i32 = 48;
const ROCK_RINGS: i32 = 6;
const ROCK_SLICES: i32 = 8;
const ORBIT_SAMPLES: usize = 360;
/// Cloud shell radius relative to the surface.
const CLOUD_LIFT: f32 = 1.01;
/// Inside the default far plane.
const SKY_RADIUS: f32 = 1_000_000.0;
const ASTEROID_RADIUS: f32 = 2.0;
/// Alpha of an untextured atmosphere or corona.
const SHELL_ALPHA: f32 = 0.25;
const RING_BANDS: usize = 12;
const ROCK_COLOR: [u8; 3] = [150, 140, 130];

/// Layer toggles driven by the HUD keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawOptions {
    pub orbits: bool,
    pub atmosphere: bool,
    pub clouds: bool,
    pub wireframe: bool,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            orbits: true,
            atmosphere: true,
            clouds: true,
            wireframe: false,
        }
    }
}

/// Sphere meshes have their poles on Y while bodies spin about their roll axis.
/// Turning into and back out of a pole-up frame makes pitch 0 upright and roll a spin.
fn upright(rotation: Euler) -> Mat4 {
    Mat4::rotation_x(-90.0) * Mat4::rotation(rotation) * Mat4::rotation_x(90.0)
}

enum Surface {
    Sphere(Model),
    Mesh(String),
}

struct RingVisual {
    model: Option<Model>,
    inner: f32,
    outer: f32,
    rotation: Euler,
    color: Color,
}

struct BodyVisual {
    surface: Surface,
    tint: Color,
    clouds: Option<Model>,
    ring: Option<RingVisual>,
    // orbit relative to the parent, scene frame
    path: Vec<Vector3>,
}

/// GPU-side mirror of a [`Scene`]. Rebuilt with [`prepare`](Self::prepare) whenever
/// a new world is loaded; drawing itself never touches the disk.
pub struct SceneRenderer {
    textures: TextureCache,
    models: ModelCache,
    bodies: Vec<Option<BodyVisual>>,
    sky: Option<Model>,
    rock: Option<Model>,
}

impl SceneRenderer {
    /// Asset paths in the world file are relative to `assets_root`.
    pub fn new(assets_root: &Path) -> Self {
        Self {
            textures: TextureCache::new(assets_root),
            models: ModelCache::new(assets_root),
            bodies: Vec::new(),
            sky: None,
            rock: None,
        }
    }

    fn textured_sphere(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        texture: Option<&str>,
    ) -> Option<(Model, bool)> {
        let mut model = sphere_model(rl, thread, SPHERE_RINGS, SPHERE_SLICES)?;
        let textured = match texture.and_then(|t| self.textures.load(rl, thread, t)) {
            Some(tex) => {
                apply_texture(&mut model, tex);
                true
            }
            None => false,
        };
        Some((model, textured))
    }

    fn body_visual(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        scene: &Scene,
        id: BodyId,
    ) -> Option<BodyVisual> {
        let body = &scene[id];
        let (surface, tint) = match &body.shape {
            Shape::Model { path, .. } if self.models.load(rl, thread, path) => {
                (Surface::Mesh(path.clone()), Color::WHITE)
            }
            Shape::Model { color, .. } => {
                let (model, _) = self.textured_sphere(rl, thread, None)?;
                (Surface::Sphere(model), rgb(*color))
            }
            Shape::Sphere { texture, color } => {
                let (model, textured) = self.textured_sphere(rl, thread, texture.as_deref())?;
                let tint = if textured { Color::WHITE } else { rgb(*color) };
                (Surface::Sphere(model), tint)
            }
        };

        let clouds = match body.layers.cloudmap.as_deref() {
            Some(map) => match self.textured_sphere(rl, thread, Some(map)) {
                Some((model, true)) => Some(model),
                _ => None,
            },
            None => None,
        };
        for shell in [&body.layers.atmosphere, &body.layers.corona].into_iter().flatten() {
            if let Some(t) = shell.texture.as_deref() {
                self.textures.load(rl, thread, t);
            }
        }
        let ring = body.layers.ring.as_ref().map(|r| {
            let model = r.texture.as_deref().and_then(|t| {
                let tex = self.textures.load(rl, thread, t)?;
                let mesh = Mesh::gen_mesh_plane(thread, 2.0, 2.0, 1, 1);
                let mut model = rl.load_model_from_mesh(thread, unsafe { mesh.make_weak() }).ok()?;
                apply_texture(&mut model, tex);
                Some(model)
            });
            RingVisual {
                model,
                inner: r.inner as f32,
                outer: r.outer as f32,
                rotation: r.rotation,
                color: rgb(r.color),
            }
        });
        let path = body
            .orbit()
            .map(|o| {
                sample_path(&o.elements, ORBIT_SAMPLES)
                    .into_iter()
                    .map(|p| vec3_to_rl(p.ecliptic_to_scene()))
                    .collect()
            })
            .unwrap_or_default();

        Some(BodyVisual {
            surface,
            tint,
            clouds,
            ring,
            path,
        })
    }

    /// Uploads everything `scene` can draw. Missing assets fall back to flat-colored spheres.
    pub fn prepare(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, scene: &Scene) {
        if self.rock.is_none() {
            self.rock = sphere_model(rl, thread, ROCK_RINGS, ROCK_SLICES);
        }
        self.bodies.clear();
        let ids: Vec<BodyId> = scene.bodies().map(|(id, _)| id).collect();
        for id in ids {
            let visual = self.body_visual(rl, thread, scene, id);
            if visual.is_none() {
                log::warn!("no visual for body '{}'", scene[id].name);
            }
            self.bodies.push(visual);
        }
        self.sky = match scene.sky() {
            Some(sky) => self
                .textured_sphere(rl, thread, sky.texture.as_deref())
                .map(|(model, _)| model),
            None => None,
        };
        for belt in scene.belts() {
            if let Some(path) = belt.model.as_deref() {
                self.models.load(rl, thread, path);
            }
        }
        for path in scene.asteroid_models() {
            self.models.load(rl, thread, path);
        }
        log::info!(
            "prepared {} body visuals ({} textures)",
            self.bodies.iter().flatten().count(),
            self.textures.len()
        );
    }

    /// Draws `items` in the given order. Expects to run inside 3D mode for `camera`.
    pub fn draw<D: RaylibDraw3D>(
        &mut self,
        d3: &mut D,
        camera: &Camera,
        scene: &Scene,
        items: &[DrawItem],
        options: &DrawOptions,
    ) {
        let camera3d = crate::to_camera3d(camera);
        for &item in items {
            match item {
                DrawItem::Sky => self.draw_sky(d3, scene),
                DrawItem::Body(id) => self.draw_body(d3, camera, camera3d, scene, id, options),
                DrawItem::Belt(index) => self.draw_belt(d3, scene, index),
                DrawItem::Asteroid(serial) => self.draw_asteroid(d3, scene, serial),
            }
        }
    }

    fn draw_sky<D: RaylibDraw3D>(&mut self, d3: &mut D, scene: &Scene) {
        let (Some(model), Some(sky)) = (self.sky.as_mut(), scene.sky()) else {
            return;
        };
        model.set_transform(&mat4_to_rl(&Mat4::rotation(sky.rotation)));
        unsafe {
            raylib::ffi::rlDrawRenderBatchActive();
            raylib::ffi::rlDisableBackfaceCulling();
            raylib::ffi::rlDisableDepthMask();
        }
        d3.draw_model_ex(
            &*model,
            vec3_to_rl(sky.location),
            Vector3::up(),
            0.0,
            Vector3::new(SKY_RADIUS, SKY_RADIUS, SKY_RADIUS),
            rgb(sky.color),
        );
        unsafe {
            raylib::ffi::rlDrawRenderBatchActive();
            raylib::ffi::rlEnableDepthMask();
            raylib::ffi::rlEnableBackfaceCulling();
        }
    }

    fn draw_body<D: RaylibDraw3D>(
        &mut self,
        d3: &mut D,
        camera: &Camera,
        camera3d: Camera3D,
        scene: &Scene,
        id: BodyId,
        options: &DrawOptions,
    ) {
        let Some(body) = scene.get(id) else {
            return;
        };
        let Self {
            textures,
            models,
            bodies,
            ..
        } = self;
        let Some(visual) = bodies.get_mut(id.index()).and_then(Option::as_mut) else {
            return;
        };
        let pos = vec3_to_rl(body.location);
        let r = body.radius as f32;
        let scale = Vector3::new(r, r, r);

        let model = match &visual.surface {
            Surface::Sphere(_) => None,
            Surface::Mesh(path) => models.get_mut(path),
        };
        let (model, transform) = match (model, &mut visual.surface) {
            (Some(m), _) => (m, Mat4::rotation(body.rotation)),
            (None, Surface::Sphere(m)) => (m, upright(body.rotation)),
            (None, Surface::Mesh(_)) => return,
        };
        model.set_transform(&mat4_to_rl(&transform));
        d3.draw_model_ex(&*model, pos, Vector3::up(), 0.0, scale, visual.tint);
        if options.wireframe {
            d3.draw_model_wires_ex(&*model, pos, Vector3::up(), 0.0, scale, Color::GREEN);
        }

        if options.clouds {
            if let Some(clouds) = visual.clouds.as_mut() {
                let lifted = r * CLOUD_LIFT;
                clouds.set_transform(&mat4_to_rl(&upright(body.rotation)));
                d3.draw_model_ex(
                    &*clouds,
                    pos,
                    Vector3::up(),
                    0.0,
                    Vector3::new(lifted, lifted, lifted),
                    Color::WHITE,
                );
            }
        }
        if options.atmosphere {
            if let Some(shell) = &body.layers.atmosphere {
                draw_shell(d3, textures, camera3d, body.location, shell);
            }
            if let Some(shell) = &body.layers.corona {
                // nudged toward the viewer so it never cuts into the surface
                draw_shell(d3, textures, camera3d, body.location - camera.direction(), shell);
            }
        }
        if let Some(ring) = visual.ring.as_mut() {
            draw_ring(d3, pos, ring);
        }
        if options.orbits {
            if let Some(parent) = body.parent().and_then(|p| scene.get(p)) {
                let alpha = parent.orbit_line.alpha(camera.distance_to(parent.location));
                if let Some(a) = alpha.filter(|a| *a > 0.0) {
                    draw_path(d3, vec3_to_rl(parent.location), &visual.path, rgba([255, 255, 255], a));
                }
            }
        }
    }

    fn draw_belt<D: RaylibDraw3D>(&mut self, d3: &mut D, scene: &Scene, index: usize) {
        let Some(belt) = scene.belts().get(index) else {
            return;
        };
        let loaded = belt.model.as_deref().and_then(|p| self.models.get_mut(p));
        let (model, tint) = match loaded {
            Some(m) => (m, Color::WHITE),
            None => match self.rock.as_mut() {
                Some(m) => (m, rgb(belt.color)),
                None => return,
            },
        };
        let rotation = Mat4::rotation(belt.rotation);
        model.set_transform(&mat4_to_rl(&rotation));
        for rock in belt.rocks() {
            let at = belt.location + rotation.transform_vector(rock.offset);
            let s = (belt.scale * rock.scale) as f32;
            d3.draw_model_ex(&*model, vec3_to_rl(at), Vector3::up(), 0.0, Vector3::new(s, s, s), tint);
        }
    }

    fn draw_asteroid<D: RaylibDraw3D>(&mut self, d3: &mut D, scene: &Scene, serial: u64) {
        let Some(asteroid) = scene.asteroid(serial) else {
            return;
        };
        let loaded = asteroid.model.as_deref().and_then(|p| self.models.get_mut(p));
        let (model, scale, tint) = match loaded {
            Some(m) => (m, 1.0, Color::WHITE),
            None => match self.rock.as_mut() {
                Some(m) => (m, ASTEROID_RADIUS, rgb(ROCK_COLOR)),
                None => return,
            },
        };
        model.set_transform(&mat4_to_rl(&Mat4::rotation(asteroid.rotation)));
        d3.draw_model_ex(
            &*model,
            vec3_to_rl(asteroid.location),
            Vector3::up(),
            0.0,
            Vector3::new(scale, scale, scale),
            tint,
        );
    }
}

/// Camera-facing disc when the shell has a texture, a translucent sphere otherwise.
fn draw_shell<D: RaylibDraw3D>(
    d3: &mut D,
    textures: &TextureCache,
    camera3d: Camera3D,
    at: Vec3,
    shell: &Shell,
) {
    let pos = vec3_to_rl(at);
    let radius = shell.radius as f32;
    match shell.texture.as_deref().and_then(|t| textures.get_ref(t)) {
        Some(tex) => d3.draw_billboard(camera3d, tex, pos, radius * 2.0, rgb(shell.color)),
        None => d3.draw_sphere(pos, radius, rgba(shell.color, SHELL_ALPHA)),
    }
}

fn draw_ring<D: RaylibDraw3D>(d3: &mut D, pos: Vector3, ring: &mut RingVisual) {
    match ring.model.as_mut() {
        Some(model) => {
            model.set_transform(&mat4_to_rl(&upright(ring.rotation)));
            unsafe {
                raylib::ffi::rlDrawRenderBatchActive();
                raylib::ffi::rlDisableBackfaceCulling();
            }
            let s = ring.outer;
            d3.draw_model_ex(&*model, pos, Vector3::up(), 0.0, Vector3::new(s, s, s), ring.color);
            unsafe {
                raylib::ffi::rlDrawRenderBatchActive();
                raylib::ffi::rlEnableBackfaceCulling();
            }
        }
        None => {
            // untextured bands only follow the ring's pitch
            let angle = 90.0 + ring.rotation.pitch as f32;
            for k in 0..RING_BANDS {
                let t = k as f32 / (RING_BANDS - 1) as f32;
                let radius = ring.inner + (ring.outer - ring.inner) * t;
                d3.draw_circle_3D(pos, radius, Vector3::new(1.0, 0.0, 0.0), angle, ring.color);
            }
        }
    }
}

fn draw_path<D: RaylibDraw3D>(d3: &mut D, origin: Vector3, path: &[Vector3], color: Color) {
    for (i, &a) in path.iter().enumerate() {
        let b = path[(i + 1) % path.len()];
        d3.draw_line_3D(origin + a, origin + b, color);
    }
}

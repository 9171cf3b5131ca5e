//! Raylib-based drawing for the orrery: conversions, texture/model caches, scene painter.
// Unsafe is required for Raylib mesh/model upload and rlgl state changes in this crate.

use std::collections::HashMap;
use std::path::PathBuf;

use orrery_view::{Camera, Projection};
use raylib::prelude::*;

mod painter;

pub use painter::{DrawOptions, SceneRenderer};

pub mod conv {
    use orrery_geom::{Mat4, Vec3};
    use raylib::prelude::{Color, Matrix, Vector3};

    pub fn vec3_to_rl(v: Vec3) -> Vector3 {
        Vector3::new(v.x as f32, v.y as f32, v.z as f32)
    }

    pub fn vec3_from_rl(v: Vector3) -> Vec3 {
        Vec3 {
            x: v.x as f64,
            y: v.y as f64,
            z: v.z as f64,
        }
    }

    pub fn mat4_to_rl(m: &Mat4) -> Matrix {
        let a = m.to_cols_f32();
        Matrix {
            m0: a[0],
            m1: a[1],
            m2: a[2],
            m3: a[3],
            m4: a[4],
            m5: a[5],
            m6: a[6],
            m7: a[7],
            m8: a[8],
            m9: a[9],
            m10: a[10],
            m11: a[11],
            m12: a[12],
            m13: a[13],
            m14: a[14],
            m15: a[15],
        }
    }

    pub fn rgb(c: [u8; 3]) -> Color {
        Color::new(c[0], c[1], c[2], 255)
    }

    pub fn rgba(c: [u8; 3], alpha: f32) -> Color {
        Color::new(c[0], c[1], c[2], (alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

/// Textures by world-file path. Failed loads are remembered so they are reported once.
pub struct TextureCache {
    root: PathBuf,
    map: HashMap<String, Option<Texture2D>>,
}

impl TextureCache {
    /// Relative keys resolve against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            map: HashMap::new(),
        }
    }

    pub fn get_ref(&self, key: &str) -> Option<&Texture2D> {
        self.map.get(key).and_then(Option::as_ref)
    }

    pub fn load(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, key: &str) -> Option<&Texture2D> {
        if !self.map.contains_key(key) {
            let path = self.root.join(key);
            let loaded = match rl.load_texture(thread, &path.to_string_lossy()) {
                Ok(tex) => {
                    tex.set_texture_filter(thread, TextureFilter::TEXTURE_FILTER_BILINEAR);
                    tex.set_texture_wrap(thread, TextureWrap::TEXTURE_WRAP_REPEAT);
                    log::debug!("loaded texture {}", path.display());
                    Some(tex)
                }
                Err(e) => {
                    log::warn!("texture {} unavailable, using flat color: {}", path.display(), e);
                    None
                }
            };
            self.map.insert(key.to_string(), loaded);
        }
        self.get_ref(key)
    }

    pub fn len(&self) -> usize {
        self.map.values().filter(|t| t.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Mesh models by world-file path, shared between every drawable naming the same file.
pub struct ModelCache {
    root: PathBuf,
    map: HashMap<String, Option<Model>>,
}

impl ModelCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            map: HashMap::new(),
        }
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Model> {
        self.map.get_mut(key).and_then(Option::as_mut)
    }

    pub fn load(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread, key: &str) -> bool {
        if !self.map.contains_key(key) {
            let path = self.root.join(key);
            let loaded = match rl.load_model(thread, &path.to_string_lossy()) {
                Ok(model) => {
                    log::debug!("loaded model {}", path.display());
                    Some(model)
                }
                Err(e) => {
                    log::warn!("model {} unavailable, using a sphere: {}", path.display(), e);
                    None
                }
            };
            self.map.insert(key.to_string(), loaded);
        }
        matches!(self.map.get(key), Some(Some(_)))
    }
}

/// Unit sphere with its poles on the local Y axis.
pub fn sphere_model(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    rings: i32,
    slices: i32,
) -> Option<Model> {
    let mesh = Mesh::gen_mesh_sphere(thread, 1.0, rings, slices);
    match rl.load_model_from_mesh(thread, unsafe { mesh.make_weak() }) {
        Ok(model) => Some(model),
        Err(e) => {
            log::warn!("sphere upload failed: {}", e);
            None
        }
    }
}

/// Binds `tex` as the albedo map of the model's first material.
pub fn apply_texture(model: &mut Model, tex: &Texture2D) {
    if let Some(mat) = model.materials_mut().get_mut(0) {
        mat.set_material_texture(MaterialMapIndex::MATERIAL_MAP_ALBEDO, tex);
    }
}

pub fn to_camera3d(camera: &Camera) -> Camera3D {
    let eye = conv::vec3_to_rl(camera.position());
    Camera3D::perspective(
        eye,
        eye + conv::vec3_to_rl(camera.view_forward()),
        conv::vec3_to_rl(camera.view_up()),
        camera.projection().fov_y.to_degrees() as f32,
    )
}

/// Raylib's default far plane is far too close for planetary distances.
pub fn apply_clip_planes(projection: &Projection) {
    unsafe {
        raylib::ffi::rlSetClipPlanes(projection.znear, projection.zfar);
    }
}

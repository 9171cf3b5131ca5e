//! Viewer camera and back-to-front render ordering (no Raylib dependency).
#![forbid(unsafe_code)]

pub mod camera;
pub mod order;

pub use camera::{Camera, Projection};
pub use order::RenderOrderer;

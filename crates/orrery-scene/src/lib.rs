//! Body tree, simulation clock and world loading (no Raylib dependency).
#![forbid(unsafe_code)]

pub mod asteroid;
pub mod belt;
pub mod body;
pub mod clock;
pub mod config;
pub mod draw;
pub mod error;
pub mod load;
pub mod scene;
pub mod sky;

pub use asteroid::{Asteroid, MAX_ASTEROIDS};
pub use belt::{Belt, Rock};
pub use body::{Body, BodyId, Layers, Orbit, OrbitLine, Ring, Shape, Shell};
pub use clock::{TICK_PRESETS, TickLadder, WorldClock, describe_rate};
pub use config::{BeltRecord, BodyRecord, WorldFile};
pub use draw::{DrawItem, SortKey};
pub use error::{BodyError, LoadError};
pub use load::{CameraStart, Dropped, LoadReport, LoadedWorld, build_world};
pub use scene::{Scene, UpdateStats};
pub use sky::Sky;

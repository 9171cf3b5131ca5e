use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::LoadError;

/// Top level of a world file. Body and belt tables stay raw until build time so
/// one malformed record only drops itself, and so their file order is kept.
#[derive(Clone, Debug, Deserialize)]
pub struct WorldFile {
    /// Kilometers per scene unit.
    #[serde(default = "default_length")]
    pub length: f64,
    /// Initial simulated seconds per real second.
    #[serde(default = "default_tick")]
    pub tick: f64,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub start: StartRecord,
    #[serde(default)]
    pub bodies: toml::Table,
    #[serde(default)]
    pub belts: toml::Table,
    #[serde(default)]
    pub sky: Option<SkyRecord>,
    /// Model paths cycled through by launched asteroids.
    #[serde(default)]
    pub asteroids: Vec<String>,
}

fn default_length() -> f64 {
    4320.0
}
fn default_tick() -> f64 {
    4320.0
}
fn default_color() -> [u8; 3] {
    [255, 255, 255]
}

impl Default for WorldFile {
    fn default() -> Self {
        Self {
            length: default_length(),
            tick: default_tick(),
            seed: 0,
            start: StartRecord::default(),
            bodies: toml::Table::new(),
            belts: toml::Table::new(),
            sky: None,
            asteroids: Vec::new(),
        }
    }
}

impl WorldFile {
    pub fn from_toml_str(s: &str) -> Result<Self, LoadError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let s = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&s)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct StartRecord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

/// One `[bodies.<name>]` or `[...satellites.<name>]` record.
///
/// `radius`, `sma`, `distance` and the appearance sizes are in kilometers;
/// `x`, `y`, `z` are scene units. `rotation` is the spin period in seconds,
/// zero meaning tidally locked.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct BodyRecord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
    pub rotation: Option<f64>,
    pub mass: Option<f64>,
    pub distance: Option<f64>,
    pub sma: Option<f64>,
    pub eccentricity: f64,
    pub inclination: f64,
    pub longitude: f64,
    pub argument: f64,
    pub orbit_speed: Option<f64>,
    pub radius: f64,
    pub texture: Option<String>,
    pub model: Option<String>,
    pub color: [u8; 3],
    pub atmosphere: Option<ShellRecord>,
    pub cloudmap: Option<String>,
    pub corona: Option<ShellRecord>,
    pub ring: Option<RingRecord>,
    pub orbit_distance: Option<f64>,
    pub orbit_opaque: Option<f64>,
    pub orbit_blend: Option<f64>,
    pub satellites: toml::Table,
}

impl Default for BodyRecord {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            pitch: 0.0,
            yaw: 0.0,
            roll: 0.0,
            rotation: None,
            mass: None,
            distance: None,
            sma: None,
            eccentricity: 0.0,
            inclination: 0.0,
            longitude: 0.0,
            argument: 0.0,
            orbit_speed: None,
            radius: 0.0,
            texture: None,
            model: None,
            color: default_color(),
            atmosphere: None,
            cloudmap: None,
            corona: None,
            ring: None,
            orbit_distance: None,
            orbit_opaque: None,
            orbit_blend: None,
            satellites: toml::Table::new(),
        }
    }
}

impl BodyRecord {
    /// Orbit size in km; `sma` wins over the circular-orbit shorthand `distance`.
    #[inline]
    pub fn orbit_km(&self) -> Option<f64> {
        self.sma.or(self.distance)
    }
}

/// Atmosphere or corona: a shell `size` km beyond the body surface.
#[derive(Clone, Debug, Deserialize)]
pub struct ShellRecord {
    #[serde(default)]
    pub texture: Option<String>,
    #[serde(default)]
    pub size: f64,
    #[serde(default = "default_color")]
    pub color: [u8; 3],
}

#[derive(Clone, Debug, Deserialize)]
pub struct RingRecord {
    #[serde(default)]
    pub texture: Option<String>,
    /// Inner edge from the body center, km.
    #[serde(default)]
    pub distance: f64,
    /// Ring width, km.
    #[serde(default)]
    pub size: f64,
    #[serde(default)]
    pub pitch: f64,
    #[serde(default)]
    pub yaw: f64,
    #[serde(default)]
    pub roll: f64,
    #[serde(default = "default_color")]
    pub color: [u8; 3],
}

/// One `[belts.<name>]` record. `radius` and `cross` are in km.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct BeltRecord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
    pub radius: f64,
    pub cross: f64,
    pub count: usize,
    pub scale: f64,
    /// Spin period in seconds.
    pub rotation: Option<f64>,
    pub model: Option<String>,
    pub color: [u8; 3],
}

impl Default for BeltRecord {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            pitch: 0.0,
            yaw: 0.0,
            roll: 0.0,
            radius: 0.0,
            cross: 0.0,
            count: 1000,
            scale: 1.0,
            rotation: None,
            model: None,
            color: [160, 150, 140],
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct SkyRecord {
    #[serde(default)]
    pub texture: Option<String>,
    #[serde(default)]
    pub pitch: f64,
    #[serde(default)]
    pub yaw: f64,
    #[serde(default)]
    pub roll: f64,
    #[serde(default = "default_color")]
    pub color: [u8; 3],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let w = WorldFile::from_toml_str("").unwrap();
        assert_eq!(w.length, 4320.0);
        assert_eq!(w.tick, 4320.0);
        assert!(w.bodies.is_empty());
        assert!(w.sky.is_none());
    }

    #[test]
    fn body_order_is_preserved() {
        let w = WorldFile::from_toml_str(
            r#"
            [bodies.zeta]
            texture = "z.png"
            [bodies.alpha]
            texture = "a.png"
            [bodies.mid]
            texture = "m.png"
            "#,
        )
        .unwrap();
        let names: Vec<&str> = w.bodies.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn nested_satellites_deserialize() {
        let w = WorldFile::from_toml_str(
            r#"
            [bodies.earth]
            texture = "earth.png"
            radius = 6371
            mass = 5.97219e24
            [bodies.earth.satellites.moon]
            texture = "moon.png"
            sma = 384399
            eccentricity = 0.0549
            rotation = 0
            "#,
        )
        .unwrap();
        let earth: BodyRecord = w.bodies["earth"].clone().try_into().unwrap();
        assert_eq!(earth.radius, 6371.0);
        assert_eq!(earth.color, [255, 255, 255]);
        let moon: BodyRecord = earth.satellites["moon"].clone().try_into().unwrap();
        assert_eq!(moon.orbit_km(), Some(384399.0));
        assert_eq!(moon.rotation, Some(0.0));
    }

    #[test]
    fn syntax_error_is_parse_error() {
        assert!(matches!(
            WorldFile::from_toml_str("length = "),
            Err(LoadError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = WorldFile::from_path(Path::new("/nonexistent/world.toml")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}

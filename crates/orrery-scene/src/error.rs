use std::path::PathBuf;

use orrery_orbit::OrbitError;

/// Reasons a single body record cannot be built. Only that body's subtree is dropped.
#[derive(Clone, Debug, PartialEq)]
pub enum BodyError {
    /// No texture or model, and neither orbit nor rotation data.
    NothingToLoad,
    /// A satellite without `sma` or `distance`.
    MissingOrbit,
    InvalidOrbit(OrbitError),
    /// The record itself did not deserialize.
    Malformed(String),
}

impl std::fmt::Display for BodyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BodyError::NothingToLoad => write!(f, "nothing to load (no texture, model, orbit or rotation)"),
            BodyError::MissingOrbit => write!(f, "satellite has neither sma nor distance"),
            BodyError::InvalidOrbit(e) => write!(f, "invalid orbit: {}", e),
            BodyError::Malformed(msg) => write!(f, "malformed record: {}", msg),
        }
    }
}

impl std::error::Error for BodyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BodyError::InvalidOrbit(e) => Some(e),
            _ => None,
        }
    }
}

impl From<OrbitError> for BodyError {
    fn from(e: OrbitError) -> Self {
        BodyError::InvalidOrbit(e)
    }
}

#[derive(Debug)]
pub enum LoadError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(toml::de::Error),
    Body { name: String, reason: BodyError },
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            LoadError::Parse(e) => write!(f, "world file: {}", e),
            LoadError::Body { name, reason } => write!(f, "body '{}': {}", name, reason),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Parse(e) => Some(e),
            LoadError::Body { reason, .. } => Some(reason),
        }
    }
}

impl From<toml::de::Error> for LoadError {
    fn from(e: toml::de::Error) -> Self {
        LoadError::Parse(e)
    }
}

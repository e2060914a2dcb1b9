//! Error types for the voxel editor.
//!
//! Only construction and configuration can fail. Everything on the edit path
//! (voxel access, meshing, ray casting) is infallible by construction: unknown
//! coordinates read as empty, rays that miss return `None`, and unknown brush
//! names are ignored.

use thiserror::Error;

/// Main error type for the editor.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The editor was constructed without a surface to render into.
    #[error("no render surface was supplied; the editor cannot be created without one")]
    MissingSurface,

    /// A configuration value is out of its accepted range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration file could not be parsed.
    #[error("configuration parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EngineError>;

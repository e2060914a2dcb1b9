//! # Editor Configuration
//!
//! Tunables that would otherwise be hard-coded constants (chunk edge
//! length, atlas layout, click threshold, camera projection) are collected in
//! [`EditorConfig`]. The struct deserializes from JSON with every field
//! optional, so a config file only needs to name what it overrides:
//!
//! ```json
//! { "cell_size": 16, "camera": { "fov_degrees": 60.0 } }
//! ```
//!
//! A config is validated once, when the editor is built. After that the values
//! are treated as trusted by the hot paths.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use super::error::{EngineError, Result};

/// Largest accepted chunk edge. Local coordinates are stored in `u8`-sized
/// steps elsewhere, and a 256³ chunk is already 16 MiB of voxel IDs.
pub const MAX_CELL_SIZE: u32 = 256;

/// Largest accepted far plane distance. Click rays are walked out to the far
/// plane, so this also bounds the length of a ray cast.
pub const MAX_CAMERA_FAR: f32 = 100_000.0;

/// Which demo content, if any, the editor seeds into a fresh world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemoWorld {
    /// Start from an empty world.
    None,
    /// Five chunks of rolling sine-wave terrain around the origin.
    SineWaves,
    /// Perlin-noise terrain over the same five chunks.
    Perlin,
}

/// How chunk meshes are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshingStrategy {
    /// One quad per visible voxel face.
    #[default]
    Culled,
    /// Visible faces of the same type are merged into maximal coplanar
    /// rectangles. Each merged quad stretches one atlas tile across its area,
    /// which suits flat palette colors.
    Greedy,
}

/// Perspective camera parameters used when the editor builds its own camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane distance
    pub near: f32,
    /// Far clipping plane distance. Also bounds how far a click ray walks.
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// All editor tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Edge length of a chunk in voxels (`S`).
    pub cell_size: u32,
    /// Edge length of one atlas tile in texels.
    pub tile_size: u32,
    /// Width of the texture atlas in texels.
    pub tile_texture_width: u32,
    /// Height of the texture atlas in texels.
    pub tile_texture_height: u32,
    /// Pointer travel, per axis and in pixels, below which a press/release
    /// counts as a click rather than a camera orbit.
    pub click_threshold: f32,
    /// Maximum number of palette entries (and so of voxel type IDs).
    pub max_colors: usize,
    /// Upper bound on voxels touched by one extrude stroke.
    pub extrude_limit: usize,
    /// Chunk meshing algorithm.
    pub meshing: MeshingStrategy,
    /// Camera projection parameters.
    pub camera: CameraConfig,
    /// Demo content seeded at construction.
    pub demo_world: DemoWorld,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            cell_size: 32,
            tile_size: 16,
            tile_texture_width: 256,
            tile_texture_height: 64,
            click_threshold: 5.0,
            max_colors: 16,
            extrude_limit: 4096,
            meshing: MeshingStrategy::Culled,
            camera: CameraConfig::default(),
            demo_world: DemoWorld::None,
        }
    }
}

impl EditorConfig {
    /// Parses a config from a JSON string. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        log::info!("Loaded editor config from {}", path.as_ref().display());
        Self::from_json_str(&contents)
    }

    /// Checks every value the engine relies on.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.cell_size == 0 || self.cell_size > MAX_CELL_SIZE {
            return Err(EngineError::InvalidConfig(format!(
                "cell_size must be in 1..={}, got {}",
                MAX_CELL_SIZE, self.cell_size
            )));
        }
        if self.tile_size == 0 {
            return Err(EngineError::InvalidConfig("tile_size must be nonzero".into()));
        }
        if self.tile_texture_width < self.tile_size || self.tile_texture_height < self.tile_size {
            return Err(EngineError::InvalidConfig(format!(
                "atlas {}x{} cannot hold a {}px tile",
                self.tile_texture_width, self.tile_texture_height, self.tile_size
            )));
        }
        // Sides, bottom and top each take one atlas row.
        if self.tile_texture_height / self.tile_size < 3 {
            return Err(EngineError::InvalidConfig(
                "atlas needs at least three tile rows (sides, bottom, top)".into(),
            ));
        }
        if self.max_colors == 0 || self.max_colors > u8::MAX as usize {
            return Err(EngineError::InvalidConfig(format!(
                "max_colors must be in 1..=255, got {}",
                self.max_colors
            )));
        }
        let columns = (self.tile_texture_width / self.tile_size) as usize;
        if columns < self.max_colors {
            return Err(EngineError::InvalidConfig(format!(
                "atlas has {} tile columns but the palette allows {} colors",
                columns, self.max_colors
            )));
        }
        if !(self.click_threshold > 0.0) {
            return Err(EngineError::InvalidConfig(
                "click_threshold must be positive".into(),
            ));
        }
        if !(self.camera.far <= MAX_CAMERA_FAR) {
            return Err(EngineError::InvalidConfig(format!(
                "camera far plane must be at most {}, got {}",
                MAX_CAMERA_FAR, self.camera.far
            )));
        }
        if !(self.camera.near > 0.0 && self.camera.far > self.camera.near) {
            return Err(EngineError::InvalidConfig(format!(
                "camera planes must satisfy 0 < near < far, got near={} far={}",
                self.camera.near, self.camera.far
            )));
        }
        Ok(())
    }
}

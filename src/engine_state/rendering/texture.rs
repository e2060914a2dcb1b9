//! Texture atlas layout for voxel faces.
//!
//! The atlas is a grid of square tiles. Each voxel type owns one column
//! (`id - 1`) and each face orientation picks a row: sides use row 0, bottoms
//! row 1, tops row 2. The engine only computes texture coordinates into this
//! grid; loading and sampling the atlas image is the renderer's job.

use crate::{
    core::EditorConfig,
    engine_state::voxels::block::{block_side::BlockSide, VoxelId},
};

/// Describes how tiles are arranged inside the texture atlas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileLayout {
    /// Edge length of one tile in texels
    pub tile_size: u32,
    /// Atlas width in texels
    pub texture_width: u32,
    /// Atlas height in texels
    pub texture_height: u32,
}

impl TileLayout {
    /// Creates a layout from raw atlas dimensions.
    pub fn new(tile_size: u32, texture_width: u32, texture_height: u32) -> Self {
        TileLayout {
            tile_size,
            texture_width,
            texture_height,
        }
    }

    /// Extracts the atlas layout from an editor config.
    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(
            config.tile_size,
            config.tile_texture_width,
            config.tile_texture_height,
        )
    }

    /// Atlas row used by a face orientation.
    pub fn row_for_side(side: BlockSide) -> u32 {
        match side {
            BlockSide::BOTTOM => 1,
            BlockSide::TOP => 2,
            _ => 0,
        }
    }

    /// Maps a corner's tile-relative coordinates to normalized atlas UVs.
    ///
    /// # Arguments
    /// * `voxel` - The voxel type; selects the atlas column `voxel - 1`
    /// * `side` - The face being textured; selects the atlas row
    /// * `corner_uv` - Tile-relative corner coordinates, each `0` or `1`
    ///
    /// # Returns
    /// `[u, v]` with `v` flipped so row 0 sits at the top of the image.
    pub fn uv(&self, voxel: VoxelId, side: BlockSide, corner_uv: [u8; 2]) -> [f32; 2] {
        let column = voxel.saturating_sub(1) as f32;
        let row = Self::row_for_side(side) as f32;
        let tile = self.tile_size as f32;

        [
            (column + corner_uv[0] as f32) * tile / self.texture_width as f32,
            1.0 - (row + 1.0 - corner_uv[1] as f32) * tile / self.texture_height as f32,
        ]
    }
}

impl Default for TileLayout {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

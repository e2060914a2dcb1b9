//! # Block Module
//!
//! Voxel type IDs and voxel faces.
//!
//! A voxel is nothing more than a small integer: `0` is empty space and every
//! nonzero value is an opaque material whose color comes from the palette
//! entry `id - 1`.

pub mod block_side;

/// The underlying integer type used to store voxel types.
pub type VoxelId = u8;

/// The ID of empty space.
pub const EMPTY: VoxelId = 0;

/// Whether a voxel ID denotes an opaque, meshable voxel.
#[inline]
pub fn is_solid(id: VoxelId) -> bool {
    id != EMPTY
}

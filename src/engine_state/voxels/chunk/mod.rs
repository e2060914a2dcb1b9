//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a dense cube of `S³` voxel IDs
//! covering one cell of the world lattice.
//!
//! ## Storage
//!
//! Each chunk keeps two views of the same data:
//! - `voxels`: one `VoxelId` per position, the source of truth
//! - `solid_array`: a bit vector (1 bit per voxel) mirroring `voxels[i] != 0`
//!
//! Both are laid out y-major, then z, then x:
//! `index = x + S * z + S² * y`. Walking the set bits of `solid_array` in
//! ascending order therefore visits solid voxels in exactly the order the
//! mesher must emit them, and a chunk with no set bits can be skipped without
//! touching `voxels` at all.
//!
//! ### Performance Characteristics
//! - **Voxel Lookup**: O(1)
//! - **Solidity Check**: O(1)
//! - **Empty Check**: O(1), via the cached solid count

use bitvec::prelude::BitVec;
use cgmath::Point3;

use super::block::{is_solid, VoxelId, EMPTY};

pub mod chunk_iteration;

pub use chunk_iteration::ChunkVoxelIterator;

/// A dense `S³` block of voxels at one chunk coordinate.
///
/// Chunks are created lazily by the world on the first write inside them and
/// start out completely empty.
#[derive(Clone, Debug)]
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not voxel coordinates).
    pub position: Point3<i32>,

    /// Edge length in voxels.
    dimension: usize,

    /// Voxel IDs in y, z, x order.
    voxels: Vec<VoxelId>,

    /// A bit vector where each bit mirrors whether the corresponding voxel is
    /// solid (1) or empty (0).
    solid_array: BitVec,

    /// Number of set bits in `solid_array`.
    solid_count: usize,
}

impl Chunk {
    /// Creates a new, completely empty chunk.
    ///
    /// # Arguments
    /// * `position` - The chunk coordinates of the new chunk
    /// * `dimension` - Edge length in voxels
    pub fn empty(position: Point3<i32>, dimension: usize) -> Self {
        let size = dimension * dimension * dimension;
        Chunk {
            position,
            dimension,
            voxels: vec![EMPTY; size],
            solid_array: BitVec::repeat(false, size),
            solid_count: 0,
        }
    }

    /// Edge length of the chunk in voxels.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Linear index of a chunk-relative coordinate.
    ///
    /// # Panics
    /// Indexing with the result panics if any coordinate is `>= dimension`.
    #[inline]
    pub fn index_of(&self, cx: usize, cy: usize, cz: usize) -> usize {
        cx + self.dimension * (cz + self.dimension * cy)
    }

    /// Inverse of [`Chunk::index_of`].
    #[inline]
    pub fn position_of_index(&self, index: usize) -> Point3<usize> {
        let d = self.dimension;
        Point3::new(index % d, index / (d * d), (index / d) % d)
    }

    /// Gets the voxel at the specified chunk-relative coordinates.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    pub fn get_voxel(&self, cx: usize, cy: usize, cz: usize) -> VoxelId {
        self.voxels[self.index_of(cx, cy, cz)]
    }

    /// Stores a voxel at the specified chunk-relative coordinates, keeping the
    /// solidity mask in step.
    ///
    /// # Returns
    /// The ID that was previously stored there.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    pub fn set_voxel(&mut self, cx: usize, cy: usize, cz: usize, id: VoxelId) -> VoxelId {
        let index = self.index_of(cx, cy, cz);
        let previous = std::mem::replace(&mut self.voxels[index], id);

        match (is_solid(previous), is_solid(id)) {
            (false, true) => self.solid_count += 1,
            (true, false) => self.solid_count -= 1,
            _ => {}
        }
        self.solid_array.set(index, is_solid(id));

        previous
    }

    /// Checks if the voxel at the specified chunk-relative coordinates is solid.
    pub fn is_block_solid(&self, cx: usize, cy: usize, cz: usize) -> bool {
        self.solid_array[self.index_of(cx, cy, cz)]
    }

    /// Number of solid voxels in the chunk.
    pub fn solid_count(&self) -> usize {
        self.solid_count
    }

    /// `true` when the chunk holds no solid voxels.
    pub fn is_empty(&self) -> bool {
        self.solid_count == 0
    }

    /// Iterates over solid voxels in y, z, x order.
    pub fn solid_voxels(&self) -> ChunkVoxelIterator<'_> {
        ChunkVoxelIterator::new(self)
    }

    pub(crate) fn solid_array(&self) -> &BitVec {
        &self.solid_array
    }

    pub(crate) fn voxel_at_index(&self, index: usize) -> VoxelId {
        self.voxels[index]
    }
}

//! # Chunk Iteration Module
//!
//! This module provides an iterator over the solid voxels of a chunk.
//!
//! ## Memory-Aware Iteration
//!
//! The `ChunkVoxelIterator` walks the chunk's `solid_array` bit vector rather
//! than the voxel array, so long runs of empty space are skipped a machine word
//! at a time. Only positions whose bit is set are decoded and looked up.

use bitvec::slice::IterOnes;
use bitvec::order::Lsb0;
use cgmath::Point3;

use crate::engine_state::voxels::block::VoxelId;

use super::Chunk;

/// An iterator over all solid voxels in a chunk, in y, z, x order.
///
/// Each item is the chunk-relative position of a solid voxel together with its
/// ID.
pub struct ChunkVoxelIterator<'a> {
    /// Reference to the chunk being iterated over
    chunk_ref: &'a Chunk,
    /// Set-bit cursor into the chunk's solid array
    ones: IterOnes<'a, usize, Lsb0>,
}

impl<'a> ChunkVoxelIterator<'a> {
    /// Creates a new iterator positioned before the first solid voxel.
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        ChunkVoxelIterator {
            chunk_ref,
            ones: chunk_ref.solid_array().iter_ones(),
        }
    }
}

impl Iterator for ChunkVoxelIterator<'_> {
    type Item = (Point3<usize>, VoxelId);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.ones.next()?;
        Some((
            self.chunk_ref.position_of_index(index),
            self.chunk_ref.voxel_at_index(index),
        ))
    }
}

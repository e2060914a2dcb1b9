//! # World Module
//!
//! This module provides the `World` struct, the sparse voxel store behind the
//! editor. It maps any signed integer voxel coordinate to a chunk and a voxel
//! ID inside it.
//!
//! ## Architecture
//!
//! The world uses a sparse storage approach where a chunk exists only once a
//! write has landed inside it. Reads of coordinates in absent chunks return
//! empty space, so the lattice is effectively unbounded in every direction.
//!
//! ## Coordinates
//!
//! Voxel coordinates are split with *floor* division and *floor* modulo
//! (`div_euclid` / `rem_euclid`), never truncation. With `S = 32`, voxel
//! `x = -1` lives in chunk `-1` at local offset `31`, not in chunk `0`.
//!
//! ## Performance Considerations
//!
//! - Chunk lookup is O(1) using a hash map keyed directly by the three-integer
//!   chunk coordinate; no string keys are built on the edit path
//! - Chunks are never evicted while the world is open

use std::collections::{hash_map::Entry, HashMap};

use cgmath::Point3;

use super::block::{VoxelId, EMPTY};
use super::chunk::Chunk;

/// A sparse, chunked voxel store.
///
/// # Examples
///
/// ```
/// use voxel_editor::World;
///
/// let mut world = World::new(32);
/// world.set_voxel(-1, 0, 0, 3);
/// assert_eq!(world.get_voxel(-1, 0, 0), 3);
/// assert_eq!(world.chunk_id_of(-1, 0, 0).x, -1);
/// ```
#[derive(Debug)]
pub struct World {
    /// A mapping from chunk coordinates to chunk data.
    chunks: HashMap<Point3<i32>, Chunk>,

    /// Chunk edge length in voxels (`S`).
    cell_size: i32,

    /// Smallest and largest allocated chunk coordinate per axis.
    chunk_bounds: Option<(Point3<i32>, Point3<i32>)>,
}

impl World {
    /// Creates a new, empty world whose chunks are `cell_size³` voxels.
    ///
    /// # Panics
    /// Panics if `cell_size` is zero or does not fit in an `i32`. Editor
    /// configs are validated before a world is built, so this only fires on
    /// direct misuse.
    pub fn new(cell_size: u32) -> Self {
        assert!(cell_size > 0, "chunk edge length must be nonzero");
        World {
            chunks: HashMap::new(),
            cell_size: i32::try_from(cell_size).expect("chunk edge length must fit in i32"),
            chunk_bounds: None,
        }
    }

    /// Chunk edge length in voxels.
    pub fn cell_size(&self) -> u32 {
        self.cell_size as u32
    }

    /// Maps a voxel coordinate to the coordinate of the chunk containing it.
    pub fn chunk_id_of(&self, x: i32, y: i32, z: i32) -> Point3<i32> {
        Point3::new(
            x.div_euclid(self.cell_size),
            y.div_euclid(self.cell_size),
            z.div_euclid(self.cell_size),
        )
    }

    /// Maps a voxel coordinate to its offset inside its chunk. Every component
    /// is in `0..S`, including for negative inputs.
    pub fn local_offset_of(&self, x: i32, y: i32, z: i32) -> Point3<usize> {
        Point3::new(
            x.rem_euclid(self.cell_size) as usize,
            y.rem_euclid(self.cell_size) as usize,
            z.rem_euclid(self.cell_size) as usize,
        )
    }

    /// World-space voxel coordinate of a chunk's minimum corner.
    pub fn chunk_origin(&self, chunk: Point3<i32>) -> Point3<i32> {
        chunk * self.cell_size
    }

    /// The voxel cell containing a fractional world position. Cells span
    /// `[n, n + 1)` on every axis.
    pub fn voxel_coord_of(position: Point3<f32>) -> Point3<i32> {
        Point3::new(
            position.x.floor() as i32,
            position.y.floor() as i32,
            position.z.floor() as i32,
        )
    }

    /// Reads a voxel. Coordinates in chunks that were never written read as
    /// empty.
    pub fn get_voxel(&self, x: i32, y: i32, z: i32) -> VoxelId {
        match self.chunks.get(&self.chunk_id_of(x, y, z)) {
            Some(chunk) => {
                let local = self.local_offset_of(x, y, z);
                chunk.get_voxel(local.x, local.y, local.z)
            }
            None => EMPTY,
        }
    }

    /// Writes a voxel, creating its chunk (filled with empty space) if needed.
    ///
    /// Any cached mesh of this chunk, or of a neighbor sharing the voxel's
    /// face, is stale until rebuilt.
    pub fn set_voxel(&mut self, x: i32, y: i32, z: i32, id: VoxelId) {
        let chunk_position = self.chunk_id_of(x, y, z);
        let local = self.local_offset_of(x, y, z);
        let dimension = self.cell_size as usize;

        let chunk = match self.chunks.entry(chunk_position) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                log::trace!("Allocating chunk {:?}", chunk_position);
                self.chunk_bounds = Some(match self.chunk_bounds {
                    None => (chunk_position, chunk_position),
                    Some((lo, hi)) => (
                        Point3::new(
                            lo.x.min(chunk_position.x),
                            lo.y.min(chunk_position.y),
                            lo.z.min(chunk_position.z),
                        ),
                        Point3::new(
                            hi.x.max(chunk_position.x),
                            hi.y.max(chunk_position.y),
                            hi.z.max(chunk_position.z),
                        ),
                    ),
                });
                entry.insert(Chunk::empty(chunk_position, dimension))
            }
        };
        chunk.set_voxel(local.x, local.y, local.z, id);
    }

    /// Retrieves the chunk at the specified chunk coordinates, if it exists.
    pub fn get_chunk_at(&self, position: Point3<i32>) -> Option<&Chunk> {
        self.chunks.get(&position)
    }

    /// Number of chunks allocated so far.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Inclusive range of allocated chunk coordinates, `(min, max)` per
    /// axis. Every solid voxel lies inside it. `None` for an untouched world.
    pub fn chunk_bounds(&self) -> Option<(Point3<i32>, Point3<i32>)> {
        self.chunk_bounds
    }

    /// Coordinates of every allocated chunk, in no particular order.
    pub fn chunk_positions(&self) -> impl Iterator<Item = Point3<i32>> + '_ {
        self.chunks.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_id_is_floor_division() {
        let world = World::new(32);
        for x in -100..100 {
            let expected = (x as f64 / 32.0).floor() as i32;
            assert_eq!(world.chunk_id_of(x, 0, 0).x, expected, "x = {}", x);
        }
        assert_eq!(world.chunk_id_of(-1, 0, 0), Point3::new(-1, 0, 0));
        assert_eq!(world.chunk_id_of(-32, -33, 31), Point3::new(-1, -2, 0));
        assert_eq!(world.chunk_id_of(i32::MIN, i32::MAX, 0).x, i32::MIN / 32);
    }

    #[test]
    fn test_local_offset_is_floor_modulo() {
        let world = World::new(32);
        assert_eq!(world.local_offset_of(-1, 0, 33), Point3::new(31, 0, 1));
        assert_eq!(world.local_offset_of(-32, -64, 64), Point3::new(0, 0, 0));
    }

    #[test]
    fn test_unvisited_reads_empty_without_allocating() {
        let world = World::new(16);
        assert_eq!(world.get_voxel(1_000_000, -1_000_000, 7), EMPTY);
        assert_eq!(world.chunk_count(), 0);
    }

    #[test]
    fn test_set_get_round_trip() {
        let mut world = World::new(8);
        let writes = [
            ((0, 0, 0), 1),
            ((-1, -1, -1), 2),
            ((7, 8, -9), 3),
            ((-100, 50, 3), 4),
        ];
        for ((x, y, z), id) in writes {
            world.set_voxel(x, y, z, id);
        }
        for ((x, y, z), id) in writes {
            assert_eq!(world.get_voxel(x, y, z), id);
        }

        world.set_voxel(7, 8, -9, 9);
        assert_eq!(world.get_voxel(7, 8, -9), 9);
        assert_eq!(world.get_voxel(-1, -1, -1), 2);
    }

    #[test]
    fn test_writing_empty_still_creates_chunk() {
        let mut world = World::new(32);
        world.set_voxel(-5, 0, 0, EMPTY);
        assert_eq!(world.chunk_count(), 1);
        assert!(world.get_chunk_at(Point3::new(-1, 0, 0)).unwrap().is_empty());
    }

    #[test]
    fn test_voxel_coord_of_floors() {
        assert_eq!(
            World::voxel_coord_of(Point3::new(10.0, 5.5, -0.5)),
            Point3::new(10, 5, -1)
        );
    }

    #[test]
    fn test_chunk_origin() {
        let world = World::new(32);
        assert_eq!(world.chunk_origin(Point3::new(-1, 2, 0)), Point3::new(-32, 64, 0));
    }

    #[test]
    fn test_chunk_bounds_grow_with_allocation() {
        let mut world = World::new(16);
        assert_eq!(world.chunk_bounds(), None);
        world.set_voxel(3, 3, 3, 1);
        assert_eq!(world.chunk_bounds(), Some((Point3::new(0, 0, 0), Point3::new(0, 0, 0))));
        world.set_voxel(-20, 40, 5, EMPTY);
        assert_eq!(
            world.chunk_bounds(),
            Some((Point3::new(-2, 0, 0), Point3::new(0, 2, 0)))
        );
    }
}

//! Per-chunk mesh ownership and incremental rebuilds.
//!
//! The cache keeps exactly one [`ChunkMesh`] per chunk that has ever been
//! meshed. Renderers refer to a mesh through a [`MeshHandle`], which stays
//! valid for the lifetime of the cache; rebuilding a chunk swaps the payload
//! behind the handle and bumps the slot's revision instead of issuing a new
//! handle.
//!
//! # Update Protocol
//! 1. A voxel is written through `World::set_voxel`
//! 2. [`CellMeshCache::on_voxel_edited`] rebuilds the voxel's chunk and any
//!    face neighbour whose border the voxel touches
//! 3. Every rebuilt handle is queued once in the pending-upload list
//! 4. The frame tick collects the list with [`CellMeshCache::drain_updated`]
//!    and re-uploads those meshes
//!
//! The cache only ever reads the world.

use std::collections::{HashMap, HashSet};

use cgmath::{Matrix4, Point3, Vector3};
use log::debug;

use crate::{
    core::{EditorConfig, MeshingStrategy},
    engine_state::{rendering::texture::TileLayout, voxels::world::World},
};

use super::mesh::ChunkMesh;

/// Offsets checked around an edited voxel: the voxel itself, then its six face
/// neighbours. Each offset resolves to a chunk; duplicates are skipped.
const EDIT_NEIGHBOR_OFFSETS: [[i32; 3]; 7] = [
    [0, 0, 0],
    [-1, 0, 0],
    [1, 0, 0],
    [0, -1, 0],
    [0, 1, 0],
    [0, 0, -1],
    [0, 0, 1],
];

/// A stable reference to one chunk's mesh.
///
/// `index` addresses a slot in the cache's arena; `generation` must match the
/// slot's generation for the handle to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle {
    index: u32,
    generation: u32,
}

impl MeshHandle {
    /// Slot index inside the cache.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Generation the slot had when this handle was issued.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

#[derive(Debug)]
struct MeshSlot {
    generation: u32,
    revision: u64,
    chunk_position: Point3<i32>,
    mesh: ChunkMesh,
}

/// Owns one mesh per chunk and rebuilds them as voxels change.
#[derive(Debug)]
pub struct CellMeshCache {
    slots: Vec<MeshSlot>,
    chunk_position_to_handle: HashMap<Point3<i32>, MeshHandle>,
    pending_updates: Vec<MeshHandle>,
    pending_set: HashSet<MeshHandle>,
    next_generation: u32,
    cell_size: i32,
    layout: TileLayout,
    strategy: MeshingStrategy,
}

impl CellMeshCache {
    /// Creates an empty cache.
    ///
    /// # Arguments
    /// * `cell_size` - Chunk edge length; must match the world being meshed
    /// * `layout` - Atlas layout used for texture coordinates
    /// * `strategy` - Meshing algorithm for every rebuild
    pub fn new(cell_size: u32, layout: TileLayout, strategy: MeshingStrategy) -> Self {
        CellMeshCache {
            slots: Vec::new(),
            chunk_position_to_handle: HashMap::new(),
            pending_updates: Vec::new(),
            pending_set: HashSet::new(),
            next_generation: 0,
            cell_size: cell_size as i32,
            layout,
            strategy,
        }
    }

    /// Creates an empty cache configured from an editor config.
    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(
            config.cell_size,
            TileLayout::from_config(config),
            config.meshing,
        )
    }

    /// The handle of a chunk's mesh, if the chunk has been meshed.
    pub fn handle_for(&self, chunk_position: Point3<i32>) -> Option<MeshHandle> {
        self.chunk_position_to_handle.get(&chunk_position).copied()
    }

    fn slot(&self, handle: MeshHandle) -> Option<&MeshSlot> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
    }

    /// The current mesh behind a handle.
    pub fn get(&self, handle: MeshHandle) -> Option<&ChunkMesh> {
        self.slot(handle).map(|slot| &slot.mesh)
    }

    /// Number of payload swaps the handle's slot has seen. Starts at 1 after
    /// the first build.
    pub fn revision(&self, handle: MeshHandle) -> Option<u64> {
        self.slot(handle).map(|slot| slot.revision)
    }

    /// The chunk a handle belongs to.
    pub fn chunk_position(&self, handle: MeshHandle) -> Option<Point3<i32>> {
        self.slot(handle).map(|slot| slot.chunk_position)
    }

    /// Translation placing a chunk-local mesh in world space (`chunk * S`).
    pub fn world_transform(&self, handle: MeshHandle) -> Option<Matrix4<f32>> {
        self.slot(handle).map(|slot| {
            let origin = slot.chunk_position * self.cell_size;
            Matrix4::from_translation(Vector3::new(
                origin.x as f32,
                origin.y as f32,
                origin.z as f32,
            ))
        })
    }

    /// Number of chunks with a mesh.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// `true` before any chunk has been meshed.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Every live handle, in slot order.
    pub fn handles(&self) -> impl Iterator<Item = MeshHandle> + '_ {
        self.slots.iter().enumerate().map(|(index, slot)| MeshHandle {
            index: index as u32,
            generation: slot.generation,
        })
    }

    /// Meshes a chunk and stores the result behind its handle, creating the
    /// handle on first use.
    ///
    /// # Returns
    /// The chunk's (stable) handle.
    pub fn invalidate_and_rebuild(&mut self, world: &World, chunk_position: Point3<i32>) -> MeshHandle {
        let mesh = ChunkMesh::build_with(world, chunk_position, &self.layout, self.strategy);

        let handle = match self.chunk_position_to_handle.get(&chunk_position) {
            Some(&handle) => {
                let slot = &mut self.slots[handle.index as usize];
                slot.mesh = mesh;
                slot.revision += 1;
                handle
            }
            None => {
                let handle = MeshHandle {
                    index: self.slots.len() as u32,
                    generation: self.next_generation,
                };
                self.next_generation = self.next_generation.wrapping_add(1);
                self.slots.push(MeshSlot {
                    generation: handle.generation,
                    revision: 1,
                    chunk_position,
                    mesh,
                });
                self.chunk_position_to_handle.insert(chunk_position, handle);
                handle
            }
        };

        if self.pending_set.insert(handle) {
            self.pending_updates.push(handle);
        }
        handle
    }

    /// Chunks whose mesh can change when the voxel at `(x, y, z)` changes:
    /// its own chunk, plus each face neighbour whose border it lies on.
    /// Returned deduplicated, own chunk first.
    pub fn affected_chunks(world: &World, x: i32, y: i32, z: i32) -> Vec<Point3<i32>> {
        let mut chunks: Vec<Point3<i32>> = Vec::with_capacity(EDIT_NEIGHBOR_OFFSETS.len());
        for [dx, dy, dz] in EDIT_NEIGHBOR_OFFSETS {
            // No neighbour beyond the edge of the coordinate range
            let (Some(nx), Some(ny), Some(nz)) =
                (x.checked_add(dx), y.checked_add(dy), z.checked_add(dz))
            else {
                continue;
            };
            let chunk = world.chunk_id_of(nx, ny, nz);
            if !chunks.contains(&chunk) {
                chunks.push(chunk);
            }
        }
        chunks
    }

    /// Rebuilds every chunk affected by an edit of one voxel.
    ///
    /// # Returns
    /// The rebuilt chunk coordinates, at most 7.
    pub fn on_voxel_edited(&mut self, world: &World, x: i32, y: i32, z: i32) -> Vec<Point3<i32>> {
        let chunks = Self::affected_chunks(world, x, y, z);
        for &chunk in &chunks {
            self.invalidate_and_rebuild(world, chunk);
        }
        debug!("Voxel ({}, {}, {}) edited, rebuilt chunks {:?}", x, y, z, chunks);
        chunks
    }

    /// Rebuilds the union of chunks affected by a batch of edits, each once.
    ///
    /// # Returns
    /// The rebuilt chunk coordinates in first-affected order.
    pub fn on_voxels_edited<I>(&mut self, world: &World, voxels: I) -> Vec<Point3<i32>>
    where
        I: IntoIterator<Item = Point3<i32>>,
    {
        let mut seen: HashSet<Point3<i32>> = HashSet::new();
        let mut chunks: Vec<Point3<i32>> = Vec::new();
        for voxel in voxels {
            for chunk in Self::affected_chunks(world, voxel.x, voxel.y, voxel.z) {
                if seen.insert(chunk) {
                    chunks.push(chunk);
                }
            }
        }
        for &chunk in &chunks {
            self.invalidate_and_rebuild(world, chunk);
        }
        debug!("Batch edit rebuilt {} chunks", chunks.len());
        chunks
    }

    /// Takes the handles rebuilt since the last drain, each listed once in
    /// first-rebuilt order.
    pub fn drain_updated(&mut self) -> Vec<MeshHandle> {
        self.pending_set.clear();
        std::mem::take(&mut self.pending_updates)
    }

    /// `true` when some rebuilt mesh has not been drained yet.
    pub fn has_pending_updates(&self) -> bool {
        !self.pending_updates.is_empty()
    }
}

//! Mesh generation and management for voxel rendering.
//!
//! This module turns chunks of voxel data into triangle meshes and keeps one
//! mesh per chunk up to date as the world is edited. The key goals are:
//! 1. Rebuild only the chunks an edit can affect
//! 2. Give renderers handles that survive rebuilds
//! 3. Produce identical buffers for identical voxel content
//!
//! # Architecture
//! - `CellMeshCache`: owns the meshes and runs the incremental update protocol
//! - `MeshHandle`: stable arena reference to one chunk's mesh
//! - `mesh/`: the culled and greedy chunk meshers
//!
//! # Performance Considerations
//! - An edit touches at most 7 chunks, and usually only 1
//! - Empty chunks are skipped without scanning their voxels

mod cell_mesh_cache;

/// Core mesh generation algorithms and data structures.
pub mod mesh;

pub use cell_mesh_cache::{CellMeshCache, MeshHandle};
pub use mesh::{build_chunk_mesh, ChunkMesh};

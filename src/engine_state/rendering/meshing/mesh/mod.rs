//! Mesh generation for voxel rendering.
//!
//! This module converts the voxels of one chunk into triangle buffers a GPU
//! renderer can upload directly.
//!
//! # Architecture
//! - [`ChunkMesh`]: positions, normals, UVs and indices for one chunk
//! - [`Face`]: the corner table of one voxel face
//! - Culled meshing: one quad per visible voxel face
//! - Greedy meshing: visible faces merged into maximal coplanar rectangles
//!
//! # Usage
//! ```
//! use cgmath::Point3;
//! use voxel_editor::engine_state::rendering::{meshing::mesh::build_chunk_mesh, texture::TileLayout};
//! use voxel_editor::World;
//!
//! let mut world = World::new(32);
//! world.set_voxel(0, 0, 0, 1);
//! let mesh = build_chunk_mesh(&world, Point3::new(0, 0, 0), &TileLayout::default());
//! assert_eq!(mesh.triangle_count(), 12);
//! ```

mod face;
mod greedy;
mod mesh;

pub use face::{Face, FaceCorner, FACES, QUAD_INDICES};
pub use mesh::*;

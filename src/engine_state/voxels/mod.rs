//! # Voxel Store
//!
//! This module contains the voxel data model: what a voxel is, how voxels are
//! grouped into chunks, and how chunks are addressed in an unbounded world.
//!
//! ## Architecture
//!
//! * **Block**: voxel type IDs and the six voxel faces
//! * **Chunk**: dense `S³` arrays of voxel IDs with a solidity bit mask
//! * **World**: sparse chunk map with floor-division addressing
//! * **Generation**: demo content seeded into a fresh world
//!
//! ## Data Flow
//!
//! 1. The editor (or a generator) calls `World::set_voxel`
//! 2. The world allocates the owning chunk on first write
//! 3. The cell mesh cache is told which voxel changed and rebuilds the
//!    affected chunk meshes
//!
//! The store never reaches back into the mesh cache; staleness is resolved by
//! whoever performed the write.

pub mod block;
pub mod chunk;
pub mod generation;
pub mod world;

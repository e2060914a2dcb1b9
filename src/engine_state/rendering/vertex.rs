//! Interleaved vertex format for handing chunk meshes to a GPU renderer.
//!
//! The mesher produces four separate buffers. Renderers that prefer a single
//! interleaved vertex stream can build one from a [`ChunkMesh`] with
//! [`Vertex::interleave`] and upload it with `bytemuck::cast_slice`.
//!
//! [`ChunkMesh`]: crate::engine_state::rendering::meshing::ChunkMesh

use crate::engine_state::rendering::meshing::ChunkMesh;

/// A vertex in the voxel rendering pipeline.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes), chunk-local
/// - Normal: [f32; 3] (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
///
/// Total size: 32 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position relative to the chunk origin
    pub position: [f32; 3],
    /// Outward face normal
    pub normal: [f32; 3],
    /// Atlas texture coordinates
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// Size of one vertex in bytes.
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();

    /// Interleaves a mesh's position, normal and UV buffers.
    pub fn interleave(mesh: &ChunkMesh) -> Vec<Vertex> {
        mesh.positions
            .chunks_exact(3)
            .zip(mesh.normals.chunks_exact(3))
            .zip(mesh.uvs.chunks_exact(2))
            .map(|((p, n), uv)| Vertex {
                position: [p[0], p[1], p[2]],
                normal: [n[0], n[1], n[2]],
                tex_coords: [uv[0], uv[1]],
            })
            .collect()
    }
}

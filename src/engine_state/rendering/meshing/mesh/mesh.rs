//! Mesh data structures and the face-culling chunk mesher.
//!
//! This module converts the voxels of one chunk into renderer-ready triangle
//! buffers. Only faces between a solid voxel and empty space are emitted, so a
//! mesh grows with the visible shell of the chunk rather than its volume.
//! The greedy variant in [`super::greedy`] shares the buffers and the
//! neighbour lookup defined here.

use cgmath::Point3;

use crate::core::MeshingStrategy;
use crate::engine_state::{
    rendering::texture::TileLayout,
    voxels::{
        block::{block_side::BlockSide, VoxelId, EMPTY},
        chunk::Chunk,
        world::World,
    },
};

use super::{
    face::{Face, FACES, QUAD_INDICES},
    greedy,
};

/// Triangle geometry for one chunk.
///
/// The four buffers are parallel: vertex `i` has position
/// `positions[3i..3i+3]`, normal `normals[3i..3i+3]` and texture coordinate
/// `uvs[2i..2i+2]`. Every three entries of `indices` form one triangle.
///
/// Positions are relative to the chunk's own origin (`0..=S` on each axis);
/// the renderer places the chunk by translating it by `chunk * S`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkMesh {
    /// Vertex positions, 3 floats per vertex
    pub positions: Vec<f32>,
    /// Vertex normals, 3 floats per vertex
    pub normals: Vec<f32>,
    /// Atlas texture coordinates, 2 floats per vertex
    pub uvs: Vec<f32>,
    /// Triangle indices, 3 per triangle
    pub indices: Vec<u32>,
}

impl ChunkMesh {
    /// Creates a new, empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the visible-face mesh of the chunk at `chunk_position`.
    ///
    /// For every solid voxel, and for each of its six faces in
    /// [`BlockSide::all`] order, a quad is emitted only when the voxel across
    /// that face is empty. Neighbours across the chunk border are read from the
    /// six face-adjacent chunks; an absent neighbour chunk counts as empty.
    ///
    /// Voxels are visited in y, then z, then x order, so identical voxel
    /// content always yields byte-identical buffers.
    ///
    /// # Arguments
    /// * `world` - The voxel store to read from
    /// * `chunk_position` - The chunk coordinates to mesh
    /// * `layout` - Atlas layout used for texture coordinates
    pub fn build(world: &World, chunk_position: Point3<i32>, layout: &TileLayout) -> Self {
        Self::build_with(world, chunk_position, layout, MeshingStrategy::Culled)
    }

    /// Builds the mesh of the chunk at `chunk_position` with the given
    /// strategy. Both strategies cover exactly the same visible surface.
    pub fn build_with(
        world: &World,
        chunk_position: Point3<i32>,
        layout: &TileLayout,
        strategy: MeshingStrategy,
    ) -> Self {
        let mut mesh = ChunkMesh::new();

        let Some(chunk) = world.get_chunk_at(chunk_position) else {
            return mesh;
        };
        if chunk.is_empty() {
            return mesh;
        }

        let neighbors: [Option<&Chunk>; 6] = BlockSide::all()
            .map(|side| world.get_chunk_at(chunk_position + side.normal()));

        match strategy {
            MeshingStrategy::Culled => {
                for (local, voxel) in chunk.solid_voxels() {
                    for face in FACES.iter() {
                        if Self::neighbor_voxel(chunk, &neighbors, local, face.block_side) == EMPTY {
                            mesh.push_face(local, voxel, face, layout);
                        }
                    }
                }
            }
            MeshingStrategy::Greedy => greedy::mesh_chunk(chunk, &neighbors, layout, &mut mesh),
        }

        mesh
    }

    /// Reads the voxel across `side` from the voxel at `local`, stepping into
    /// the neighbouring chunk when the step leaves this one.
    pub(super) fn neighbor_voxel(
        chunk: &Chunk,
        neighbors: &[Option<&Chunk>; 6],
        local: Point3<usize>,
        side: BlockSide,
    ) -> VoxelId {
        let size = chunk.dimension() as i32;
        let normal = side.normal();
        let nx = local.x as i32 + normal.x;
        let ny = local.y as i32 + normal.y;
        let nz = local.z as i32 + normal.z;

        let inside = (0..size).contains(&nx) && (0..size).contains(&ny) && (0..size).contains(&nz);
        if inside {
            return chunk.get_voxel(nx as usize, ny as usize, nz as usize);
        }

        // Exactly one axis left the chunk; wrap it to the far side of the neighbour.
        match neighbors[side as usize] {
            Some(neighbor) => neighbor.get_voxel(
                nx.rem_euclid(size) as usize,
                ny.rem_euclid(size) as usize,
                nz.rem_euclid(size) as usize,
            ),
            None => EMPTY,
        }
    }

    /// Appends one quad (4 vertices, 2 triangles) for `face` of the voxel at
    /// `local`.
    fn push_face(&mut self, local: Point3<usize>, voxel: VoxelId, face: &Face, layout: &TileLayout) {
        self.push_quad([local.x, local.y, local.z], [1, 1, 1], voxel, face, layout);
    }

    /// Appends one quad for `face`, scaled to cover the box that starts at
    /// `min` and spans `extent` voxels. The extent along the face normal must
    /// be 1.
    pub(super) fn push_quad(
        &mut self,
        min: [usize; 3],
        extent: [usize; 3],
        voxel: VoxelId,
        face: &Face,
        layout: &TileLayout,
    ) {
        let first_vertex = self.vertex_count() as u32;
        let normal = face.block_side.normal();

        for corner in face.corners {
            self.positions.extend_from_slice(&[
                (min[0] + corner.pos[0] as usize * extent[0]) as f32,
                (min[1] + corner.pos[1] as usize * extent[1]) as f32,
                (min[2] + corner.pos[2] as usize * extent[2]) as f32,
            ]);
            self.normals
                .extend_from_slice(&[normal.x as f32, normal.y as f32, normal.z as f32]);
            self.uvs
                .extend_from_slice(&layout.uv(voxel, face.block_side, corner.uv));
        }

        self.indices
            .extend(QUAD_INDICES.iter().map(|i| first_vertex + i));
    }

    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// `true` when the chunk has no visible faces.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Raw bytes of the position buffer, ready for upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Raw bytes of the index buffer, ready for upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Builds the visible-face mesh of one chunk. See [`ChunkMesh::build`].
pub fn build_chunk_mesh(world: &World, chunk_position: Point3<i32>, layout: &TileLayout) -> ChunkMesh {
    ChunkMesh::build(world, chunk_position, layout)
}

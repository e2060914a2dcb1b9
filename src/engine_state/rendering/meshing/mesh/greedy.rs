//! Greedy meshing implementation for voxel rendering.
//!
//! This module combines adjacent coplanar faces of the same voxel type into
//! larger quads, which sharply reduces vertex counts on flat terrain and large
//! builds. The visible surface is identical to the culled mesher's; only the
//! tessellation differs.
//!
//! # Algorithm
//! For each of the six sides, and for each slice of the chunk along that
//! side's normal, a `S x S` mask records the voxel type of every visible face
//! in the slice (or [`EMPTY`] where there is none). The mask is then swept in
//! row-major order: each unclaimed cell grows right as far as the type
//! matches, then down as far as the whole run matches, and the resulting
//! rectangle becomes one quad.

use log::trace;
use web_time::Instant;

use crate::engine_state::{
    rendering::texture::TileLayout,
    voxels::{
        block::{VoxelId, EMPTY},
        chunk::Chunk,
    },
};

use super::{face::FACES, mesh::ChunkMesh};

/// The two in-plane axes of a face whose normal lies along `axis`, as
/// `(row_axis, column_axis)`.
///
/// # Arguments
/// * `axis` - Index of the normal axis (0 = x, 1 = y, 2 = z)
fn plane_axes(axis: usize) -> (usize, usize) {
    match axis {
        0 => (1, 2),
        1 => (2, 0),
        _ => (1, 0),
    }
}

/// Appends the greedy mesh of `chunk` to `mesh`.
///
/// # Arguments
/// * `chunk` - The chunk to mesh
/// * `neighbors` - Face-adjacent chunks indexed by `BlockSide as usize`
/// * `layout` - Atlas layout used for texture coordinates
/// * `mesh` - Output buffers
pub(super) fn mesh_chunk(
    chunk: &Chunk,
    neighbors: &[Option<&Chunk>; 6],
    layout: &TileLayout,
    mesh: &mut ChunkMesh,
) {
    let start = Instant::now();
    let size = chunk.dimension();
    let mut mask: Vec<VoxelId> = vec![EMPTY; size * size];

    for face in FACES.iter() {
        let side = face.block_side;
        let axis = side.axis();
        let (row_axis, column_axis) = plane_axes(axis);

        for slice in 0..size {
            let mut any_visible = false;
            for row in 0..size {
                for column in 0..size {
                    let mut local = [0usize; 3];
                    local[axis] = slice;
                    local[row_axis] = row;
                    local[column_axis] = column;

                    let voxel = chunk.get_voxel(local[0], local[1], local[2]);
                    let visible = voxel != EMPTY
                        && ChunkMesh::neighbor_voxel(chunk, neighbors, local.into(), side) == EMPTY;
                    mask[row * size + column] = if visible { voxel } else { EMPTY };
                    any_visible |= visible;
                }
            }
            if !any_visible {
                continue;
            }

            for row in 0..size {
                let mut column = 0;
                while column < size {
                    let voxel = mask[row * size + column];
                    if voxel == EMPTY {
                        column += 1;
                        continue;
                    }

                    let mut width = 1;
                    while column + width < size && mask[row * size + column + width] == voxel {
                        width += 1;
                    }

                    let mut height = 1;
                    'grow: while row + height < size {
                        let next = (row + height) * size;
                        for c in column..column + width {
                            if mask[next + c] != voxel {
                                break 'grow;
                            }
                        }
                        height += 1;
                    }

                    for r in row..row + height {
                        mask[r * size + column..r * size + column + width].fill(EMPTY);
                    }

                    let mut min = [0usize; 3];
                    min[axis] = slice;
                    min[row_axis] = row;
                    min[column_axis] = column;
                    let mut extent = [1usize; 3];
                    extent[row_axis] = height;
                    extent[column_axis] = width;

                    mesh.push_quad(min, extent, voxel, face, layout);
                    column += width;
                }
            }
        }
    }

    trace!(
        "Greedy meshed chunk {:?} into {} quads in {:?}",
        chunk.position,
        mesh.vertex_count() / 4,
        start.elapsed()
    );
}

//! Surface selection for the extrude brush.
//!
//! Starting from a clicked voxel face, the region grows across neighbouring
//! voxels that lie in the same layer, show the same exposed face, and
//! (optionally) share the clicked voxel's type. Growth is 4-connected within
//! the layer and stops after `limit` voxels.

use std::collections::{HashSet, VecDeque};

use cgmath::{Point3, Vector3};

use crate::engine_state::voxels::{
    block::{VoxelId, EMPTY},
    world::World,
};

/// Finds the connected exposed surface behind a clicked face.
///
/// # Arguments
/// * `world` - The voxel store
/// * `seed` - The clicked (solid) voxel
/// * `normal` - Outward normal of the clicked face
/// * `match_type` - Restrict the region to voxels of this type; `None`
///   accepts any solid voxel
/// * `limit` - Maximum region size
///
/// # Returns
/// The region's voxels in breadth-first order from `seed`. Empty if `seed`
/// itself does not qualify.
pub fn exposed_surface(
    world: &World,
    seed: Point3<i32>,
    normal: Vector3<i32>,
    match_type: Option<VoxelId>,
    limit: usize,
) -> Vec<Point3<i32>> {
    let qualifies = |p: Point3<i32>| {
        let voxel = world.get_voxel(p.x, p.y, p.z);
        let front = p + normal;
        voxel != EMPTY
            && match_type.map_or(true, |t| t == voxel)
            && world.get_voxel(front.x, front.y, front.z) == EMPTY
    };

    if limit == 0 || !qualifies(seed) {
        return Vec::new();
    }

    // The two in-plane unit steps
    let in_plane: Vec<Vector3<i32>> = [Vector3::unit_x(), Vector3::unit_y(), Vector3::unit_z()]
        .into_iter()
        .filter(|axis| axis.x * normal.x + axis.y * normal.y + axis.z * normal.z == 0)
        .collect();

    let mut region = Vec::new();
    let mut visited: HashSet<Point3<i32>> = HashSet::from([seed]);
    let mut queue: VecDeque<Point3<i32>> = VecDeque::from([seed]);

    while let Some(voxel) = queue.pop_front() {
        region.push(voxel);
        if region.len() >= limit {
            break;
        }
        for &axis in &in_plane {
            for neighbor in [voxel + axis, voxel - axis] {
                if visited.insert(neighbor) && qualifies(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }
    }

    region
}

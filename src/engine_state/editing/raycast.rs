//! Ray to voxel intersection.
//!
//! Click rays are walked through the voxel grid one cell at a time with the
//! Amanatides–Woo traversal: at every step the ray crosses whichever of the
//! next x, y or z cell boundaries is nearest, so every cell the ray passes
//! through is visited exactly once and in order.

use cgmath::{EuclideanSpace, InnerSpace, Point3, Vector3};

use crate::engine_state::voxels::{
    block::{VoxelId, EMPTY},
    world::World,
};

/// Where a ray first entered a solid voxel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World-space point where the ray crossed the hit face
    pub position: Point3<f32>,
    /// Outward unit normal of the hit face
    pub normal: Vector3<i32>,
    /// Integer coordinate of the hit voxel
    pub voxel: Point3<i32>,
    /// Type of the hit voxel
    pub voxel_id: VoxelId,
}

impl RayHit {
    /// The voxel a stroke edits: the hit position nudged by `offset` along the
    /// normal, then floored. `+0.5` lands in the empty cell in front of the
    /// face, `-0.5` inside the hit voxel.
    pub fn target(&self, offset: f32) -> Point3<i32> {
        let normal = Vector3::new(
            self.normal.x as f32,
            self.normal.y as f32,
            self.normal.z as f32,
        );
        World::voxel_coord_of(self.position + normal * offset)
    }
}

/// Walks the segment from `start` to `end` and returns the first solid voxel
/// the ray enters.
///
/// The voxel containing `start` is not tested, so a camera inside geometry
/// still hits the next surface it looks at.
///
/// # Returns
/// `None` if the segment has zero length or crosses only empty space.
pub fn intersect_ray(world: &World, start: Point3<f32>, end: Point3<f32>) -> Option<RayHit> {
    let delta = end - start;
    let length = delta.magnitude();
    if !(length > 0.0) || !length.is_finite() {
        return None;
    }
    let direction = delta / length;

    // Solid voxels only exist inside allocated chunks, so the walk ends where
    // the segment leaves their bounding box.
    let length = clip_to_allocated(world, start, direction, length)?;

    let mut cell = World::voxel_coord_of(start);
    let step = Vector3::new(
        if direction.x > 0.0 { 1 } else { -1 },
        if direction.y > 0.0 { 1 } else { -1 },
        if direction.z > 0.0 { 1 } else { -1 },
    );

    // Ray parameter advance per whole cell on each axis, and the parameter of
    // the first boundary crossing on each axis.
    let mut t_delta = [0.0f32; 3];
    let mut t_max = [0.0f32; 3];
    for axis in 0..3 {
        let d = direction[axis];
        t_delta[axis] = (1.0 / d).abs();
        let origin = start[axis];
        let floor = cell[axis] as f32;
        let distance = if step[axis] > 0 {
            floor + 1.0 - origin
        } else {
            origin - floor
        };
        t_max[axis] = if t_delta[axis].is_finite() {
            t_delta[axis] * distance
        } else {
            f32::INFINITY
        };
    }

    loop {
        let axis = if t_max[0] < t_max[1] {
            if t_max[0] < t_max[2] { 0 } else { 2 }
        } else if t_max[1] < t_max[2] {
            1
        } else {
            2
        };

        let t = t_max[axis];
        if t > length {
            return None;
        }
        cell[axis] += step[axis];
        t_max[axis] += t_delta[axis];

        let voxel_id = world.get_voxel(cell.x, cell.y, cell.z);
        if voxel_id != EMPTY {
            let mut normal = Vector3::new(0, 0, 0);
            normal[axis] = -step[axis];
            return Some(RayHit {
                position: Point3::from_vec(start.to_vec() + direction * t),
                normal,
                voxel: cell,
                voxel_id,
            });
        }
    }
}

/// Ray parameter at which the ray leaves the box of allocated chunks, capped
/// at `length`. `None` if the segment never touches that box.
fn clip_to_allocated(
    world: &World,
    start: Point3<f32>,
    direction: Vector3<f32>,
    length: f32,
) -> Option<f32> {
    let (lo, hi) = world.chunk_bounds()?;
    let size = world.cell_size() as f32;

    let mut t_enter = 0.0f32;
    let mut t_exit = length;
    for axis in 0..3 {
        let min = lo[axis] as f32 * size;
        let max = (hi[axis] as f32 + 1.0) * size;
        let origin = start[axis];
        let d = direction[axis];
        if d == 0.0 {
            if origin < min || origin > max {
                return None;
            }
            continue;
        }
        let (t0, t1) = ((min - origin) / d, (max - origin) / d);
        t_enter = t_enter.max(t0.min(t1));
        t_exit = t_exit.min(t0.max(t1));
    }
    (t_enter <= t_exit).then_some(t_exit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_from_above() {
        let mut world = World::new(32);
        world.set_voxel(10, 4, 3, 7);
        let hit = intersect_ray(&world, Point3::new(10.5, 20.0, 3.5), Point3::new(10.5, -20.0, 3.5))
            .unwrap();
        assert_eq!(hit.voxel, Point3::new(10, 4, 3));
        assert_eq!(hit.voxel_id, 7);
        assert_eq!(hit.normal, Vector3::new(0, 1, 0));
        assert!((hit.position.y - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_placement_targets() {
        let hit = RayHit {
            position: Point3::new(10.5, 5.0, 3.5),
            normal: Vector3::new(0, 1, 0),
            voxel: Point3::new(10, 4, 3),
            voxel_id: 1,
        };
        assert_eq!(hit.target(0.5), Point3::new(10, 5, 3));
        assert_eq!(hit.target(-0.5), Point3::new(10, 4, 3));
    }

    #[test]
    fn test_negative_coordinates() {
        let mut world = World::new(32);
        world.set_voxel(-5, 0, -5, 2);
        let hit = intersect_ray(&world, Point3::new(5.5, 0.5, -4.5), Point3::new(-20.0, 0.5, -4.5))
            .unwrap();
        assert_eq!(hit.voxel, Point3::new(-5, 0, -5));
        assert_eq!(hit.normal, Vector3::new(1, 0, 0));
        assert_eq!(hit.target(0.5), Point3::new(-4, 0, -5));
        assert_eq!(hit.target(-0.5), Point3::new(-5, 0, -5));
    }

    #[test]
    fn test_miss_returns_none() {
        let mut world = World::new(32);
        world.set_voxel(0, 0, 0, 1);
        assert!(intersect_ray(&world, Point3::new(0.5, 5.0, 0.5), Point3::new(0.5, 50.0, 0.5)).is_none());
    }

    #[test]
    fn test_segment_stops_before_far_voxel() {
        let mut world = World::new(32);
        world.set_voxel(0, 0, 10, 1);
        let start = Point3::new(0.5, 0.5, 0.5);
        assert!(intersect_ray(&world, start, Point3::new(0.5, 0.5, 9.5)).is_none());
        assert!(intersect_ray(&world, start, Point3::new(0.5, 0.5, 10.5)).is_some());
    }

    #[test]
    fn test_start_voxel_is_skipped() {
        let mut world = World::new(32);
        world.set_voxel(0, 0, 0, 1);
        world.set_voxel(0, 0, 3, 2);
        let hit = intersect_ray(&world, Point3::new(0.5, 0.5, 0.5), Point3::new(0.5, 0.5, 20.0)).unwrap();
        assert_eq!(hit.voxel, Point3::new(0, 0, 3));
        assert_eq!(hit.normal, Vector3::new(0, 0, -1));
    }

    #[test]
    fn test_zero_length_ray() {
        let world = World::new(32);
        let p = Point3::new(1.0, 1.0, 1.0);
        assert!(intersect_ray(&world, p, p).is_none());
    }

    #[test]
    fn test_diagonal_ray_reports_entry_face() {
        let mut world = World::new(8);
        world.set_voxel(3, 3, 3, 1);
        let hit = intersect_ray(&world, Point3::new(0.2, 0.1, 0.3), Point3::new(6.2, 6.1, 6.3)).unwrap();
        assert_eq!(hit.voxel, Point3::new(3, 3, 3));
        // The reported face plane contains the hit position
        let axis = (0..3).find(|&a| hit.normal[a] != 0).unwrap();
        let plane = if hit.normal[axis] > 0 { 4.0 } else { 3.0 };
        assert!((hit.position[axis] - plane).abs() < 1e-4);
    }

    #[test]
    fn test_long_segment_walk_is_clipped_to_allocated_chunks() {
        let mut world = World::new(32);
        world.set_voxel(0, 0, 0, 1);
        let start = Point3::new(0.5, 100.0, 0.5);

        assert!(intersect_ray(&world, start, Point3::new(0.5, 1.0e9, 0.5)).is_none());
        assert!(intersect_ray(&world, Point3::new(100.5, 100.0, 0.5), Point3::new(100.5, -1.0e9, 0.5)).is_none());

        let hit = intersect_ray(&world, start, Point3::new(0.5, -1.0e9, 0.5)).unwrap();
        assert_eq!(hit.voxel, Point3::new(0, 0, 0));
        assert_eq!(hit.normal, Vector3::new(0, 1, 0));
    }

    #[test]
    fn test_empty_world_has_nothing_to_hit() {
        let world = World::new(32);
        assert!(intersect_ray(&world, Point3::new(0.5, 5.0, 0.5), Point3::new(0.5, -5.0, 0.5)).is_none());
    }
}

//! # Demo World Generation
//!
//! Seeds a fresh world with something to edit. Two generators are available:
//!
//! * **Sine waves**: each cell becomes a heightfield of two crossed sine waves.
//!   The centre cell gets random materials; its four horizontal neighbours are
//!   filled with one material each so chunk borders are easy to see.
//! * **Perlin**: 3D Perlin noise thresholded into solid and empty space, which
//!   produces caves and overhangs.
//!
//! Generation writes through [`World::set_voxel`] like any other edit; the
//! caller is responsible for meshing the touched chunks afterwards.

use cgmath::Point3;
use noise::{NoiseFn, Perlin};

use crate::core::DemoWorld;

use super::{block::VoxelId, world::World};

/// Threshold above which Perlin noise is considered solid.
pub const PERLIN_POSITIVE_THRESHOLD: f64 = 0.2;
/// Threshold below which Perlin noise is considered solid.
pub const PERLIN_NEGATIVE_THRESHOLD: f64 = -0.2;
/// Scaling factor applied to world coordinates when sampling Perlin noise.
pub const PERLIN_SCALE_FACTOR: f64 = 0.05;

/// The cells seeded by every generator, paired with the material used for the
/// sine-wave variant (`None` = random per voxel).
const DEMO_CELLS: [(Point3<i32>, Option<VoxelId>); 5] = [
    (Point3::new(0, 0, 0), None),
    (Point3::new(1, 0, 0), Some(2)),
    (Point3::new(-1, 0, 0), Some(3)),
    (Point3::new(0, 0, -1), Some(4)),
    (Point3::new(0, 0, 1), Some(5)),
];

/// Seeds `world` according to `demo`.
///
/// # Arguments
/// * `world` - The world to write into
/// * `demo` - Which generator to run
/// * `max_voxel` - Highest voxel ID the palette can color; random and fixed
///   materials are clamped to `1..=max_voxel`
///
/// # Returns
/// The chunk coordinates that were written, for the caller to mesh.
pub fn seed_demo_world(world: &mut World, demo: DemoWorld, max_voxel: VoxelId) -> Vec<Point3<i32>> {
    let max_voxel = max_voxel.max(1);
    let cells: Vec<Point3<i32>> = DEMO_CELLS.iter().map(|(cell, _)| *cell).collect();

    match demo {
        DemoWorld::None => return Vec::new(),
        DemoWorld::SineWaves => {
            for (cell, voxel) in DEMO_CELLS {
                sine_wave_cell(world, cell, voxel.map(|v| v.min(max_voxel)), max_voxel);
            }
        }
        DemoWorld::Perlin => {
            let perlin = Perlin::new(0);
            for cell in &cells {
                perlin_cell(world, &perlin, *cell, max_voxel);
            }
        }
    }

    log::info!("Seeded {:?} demo world across {} cells", demo, cells.len());
    cells
}

/// Fills one cell with a heightfield of two crossed sine waves.
///
/// The height at local `(x, z)` is
/// `(sin(2π·x/S) + sin(3π·z/S)) · S/6 + S/2`; every voxel below it is set.
pub fn sine_wave_cell(world: &mut World, cell: Point3<i32>, voxel: Option<VoxelId>, max_voxel: VoxelId) {
    let size = world.cell_size() as i32;
    let origin = world.chunk_origin(cell);
    let size_f = size as f32;

    for y in 0..size {
        for z in 0..size {
            for x in 0..size {
                let height = ((x as f32 / size_f * std::f32::consts::PI * 2.0).sin()
                    + (z as f32 / size_f * std::f32::consts::PI * 3.0).sin())
                    * (size_f / 6.0)
                    + size_f / 2.0;

                if (y as f32) < height {
                    let id = voxel.unwrap_or_else(|| fastrand::u8(1..=max_voxel));
                    world.set_voxel(origin.x + x, origin.y + y, origin.z + z, id);
                }
            }
        }
    }
}

/// Fills one cell from thresholded 3D Perlin noise.
pub fn perlin_cell(world: &mut World, perlin: &Perlin, cell: Point3<i32>, max_voxel: VoxelId) {
    let size = world.cell_size() as i32;
    let origin = world.chunk_origin(cell);

    for y in 0..size {
        for z in 0..size {
            for x in 0..size {
                let position = Point3::new(origin.x + x, origin.y + y, origin.z + z);
                let sample = perlin.get(to_perlin_pos(position, PERLIN_SCALE_FACTOR));
                if !(PERLIN_NEGATIVE_THRESHOLD..=PERLIN_POSITIVE_THRESHOLD).contains(&sample) {
                    world.set_voxel(position.x, position.y, position.z, fastrand::u8(1..=max_voxel));
                }
            }
        }
    }
}

/// Converts a voxel coordinate to a scaled sample point for Perlin noise.
fn to_perlin_pos(pos: Point3<i32>, scale_factor: f64) -> [f64; 3] {
    [
        pos.x as f64 * scale_factor,
        pos.y as f64 * scale_factor,
        pos.z as f64 * scale_factor,
    ]
}

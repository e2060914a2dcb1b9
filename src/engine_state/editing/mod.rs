//! # Editing
//!
//! Everything between a pointer event and a voxel write.
//!
//! ## Key Components
//! - `PointerGesture`: tells clicks from camera drags
//! - `intersect_ray`: finds the voxel face under the cursor
//! - `Brush`: the selected action and shape
//! - `ColorPalette`: the selected voxel type and its color
//! - `apply_stroke`: turns a hit and a brush into voxel writes
//!
//! ## Placement
//! A hit position lies exactly on a voxel face, so rounding it could land on
//! either side. Adding nudges half a voxel out along the face normal before
//! flooring, removing and painting nudge half a voxel in.

use cgmath::Point3;
use log::debug;

use crate::engine_state::voxels::{
    block::{VoxelId, EMPTY},
    world::World,
};

pub mod brush;
pub mod extrude;
pub mod gesture;
pub mod palette;
pub mod raycast;

pub use brush::{Brush, BrushAction, BrushShape};
pub use gesture::{GestureOutcome, PointerGesture};
pub use palette::{Color, ColorPalette};
pub use raycast::{intersect_ray, RayHit};

/// Applies one brush stroke at a ray hit.
///
/// # Arguments
/// * `world` - The voxel store to write into
/// * `hit` - Where the click ray landed
/// * `brush` - Action and shape to apply
/// * `selected` - Voxel type written by add and paint
/// * `extrude_limit` - Region cap for the extrude shape
///
/// # Returns
/// Every voxel coordinate written, for the caller to rebuild meshes around.
pub fn apply_stroke(
    world: &mut World,
    hit: &RayHit,
    brush: Brush,
    selected: VoxelId,
    extrude_limit: usize,
) -> Vec<Point3<i32>> {
    let action = brush.action();
    let voxel_id = match action {
        BrushAction::Remove => EMPTY,
        BrushAction::Add | BrushAction::Paint => selected,
    };

    let targets: Vec<Point3<i32>> = match brush.shape() {
        BrushShape::Single => vec![hit.target(action.normal_offset())],
        BrushShape::Extrude => {
            let match_type = match action {
                BrushAction::Add | BrushAction::Remove => Some(hit.voxel_id),
                BrushAction::Paint => None,
            };
            let region =
                extrude::exposed_surface(world, hit.voxel, hit.normal, match_type, extrude_limit);
            match action {
                BrushAction::Add => region.into_iter().map(|p| p + hit.normal).collect(),
                BrushAction::Remove | BrushAction::Paint => region,
            }
        }
    };

    for target in &targets {
        world.set_voxel(target.x, target.y, target.z, voxel_id);
    }
    debug!(
        "{:?}/{:?} stroke wrote {} voxel(s) of type {}",
        action,
        brush.shape(),
        targets.len(),
        voxel_id
    );
    targets
}

//! # Brush Module
//!
//! The brush decides what a click does: which action is applied to the voxel
//! under the cursor and whether it spreads across the clicked surface.
//!
//! UI code names brushes with strings. Those names are resolved through
//! compile-time `phf` maps at the boundary; an unknown name leaves the brush
//! unchanged.

use log::debug;
use phf::phf_map;

/// What a click does to the voxel it lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BrushAction {
    /// Place a voxel against the clicked face
    #[default]
    Add,
    /// Clear the clicked voxel
    Remove,
    /// Recolor the clicked voxel
    Paint,
}

/// How far a click spreads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BrushShape {
    /// Only the voxel under the cursor
    #[default]
    Single,
    /// The whole connected, coplanar surface under the cursor
    Extrude,
}

/// UI names of brush actions.
static BRUSH_ACTIONS: phf::Map<&'static str, BrushAction> = phf_map! {
    "add" => BrushAction::Add,
    "remove" => BrushAction::Remove,
    "paint" => BrushAction::Paint,
};

/// UI names of brush shapes.
static BRUSH_SHAPES: phf::Map<&'static str, BrushShape> = phf_map! {
    "single" => BrushShape::Single,
    "extrude" => BrushShape::Extrude,
};

impl BrushAction {
    /// Resolves a UI name such as `"paint"`.
    pub fn from_name(name: &str) -> Option<Self> {
        BRUSH_ACTIONS.get(name).copied()
    }

    /// Half-voxel offset applied along the hit normal before flooring:
    /// outward for `Add`, inward otherwise.
    pub fn normal_offset(self) -> f32 {
        match self {
            BrushAction::Add => 0.5,
            BrushAction::Remove | BrushAction::Paint => -0.5,
        }
    }
}

impl BrushShape {
    /// Resolves a UI name such as `"extrude"`.
    pub fn from_name(name: &str) -> Option<Self> {
        BRUSH_SHAPES.get(name).copied()
    }
}

/// The current brush selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Brush {
    action: BrushAction,
    shape: BrushShape,
}

impl Brush {
    /// Creates an `Add`/`Single` brush.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current action.
    pub fn action(&self) -> BrushAction {
        self.action
    }

    /// Current shape.
    pub fn shape(&self) -> BrushShape {
        self.shape
    }

    /// Sets the action, keeping the shape.
    pub fn set_action(&mut self, action: BrushAction) {
        self.action = action;
    }

    /// Sets the shape, keeping the action.
    pub fn set_shape(&mut self, shape: BrushShape) {
        self.shape = shape;
    }

    /// Sets action and shape together.
    pub fn select(&mut self, action: BrushAction, shape: BrushShape) {
        self.action = action;
        self.shape = shape;
    }

    /// Sets the action by UI name.
    ///
    /// # Returns
    /// `false` (with the brush untouched) if the name is unknown.
    pub fn set_action_by_name(&mut self, name: &str) -> bool {
        match BrushAction::from_name(name) {
            Some(action) => {
                self.action = action;
                true
            }
            None => {
                debug!("Ignoring unknown brush action {:?}", name);
                false
            }
        }
    }

    /// Sets the shape by UI name.
    ///
    /// # Returns
    /// `false` (with the brush untouched) if the name is unknown.
    pub fn set_shape_by_name(&mut self, name: &str) -> bool {
        match BrushShape::from_name(name) {
            Some(shape) => {
                self.shape = shape;
                true
            }
            None => {
                debug!("Ignoring unknown brush shape {:?}", name);
                false
            }
        }
    }
}

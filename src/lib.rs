#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Editor
//!
//! An interactive voxel editing engine. It stores an unbounded, sparse world
//! of voxel type IDs in fixed-size chunks, turns chunks into triangle meshes,
//! keeps those meshes current as the user edits, and converts clicks into
//! voxel edits by casting rays from the camera.
//!
//! ## Key Modules
//!
//! * `application_state` - Window event translation for `winit` hosts
//! * `core` - Configuration and the crate error type
//! * `engine_state` - The editor itself: voxels, meshing, editing, camera
//!
//! ## Architecture
//!
//! The engine stops at the renderer. Drawing is delegated to a host-supplied
//! [`RenderSurface`], which receives finished meshes (positions, normals, UVs
//! and indices plus a placement transform) and the camera matrices. The engine
//! never creates GPU resources itself.
//!
//! ## Usage
//!
//! ```rust
//! use voxel_editor::{ChunkMesh, EditorConfig, MeshHandle, RenderSurface, VoxelEditor};
//! use voxel_editor::engine_state::camera_state::CameraUniform;
//! use cgmath::{Matrix4, Point3};
//!
//! struct Headless;
//!
//! impl RenderSurface for Headless {
//!     fn size(&self) -> (u32, u32) {
//!         (1280, 720)
//!     }
//!     fn upload_chunk_mesh(&mut self, _: MeshHandle, _: Point3<i32>, _: Matrix4<f32>, mesh: &ChunkMesh) {
//!         println!("{} triangles", mesh.triangle_count());
//!     }
//!     fn draw(&mut self, _: &CameraUniform) {}
//! }
//!
//! voxel_editor::init_logging();
//! let mut editor = VoxelEditor::new(EditorConfig::default(), Some(Headless)).unwrap();
//! editor.set_voxel(0, 0, 0, 1);
//! assert!(editor.frame());
//! ```
//!
//! ## Performance Considerations
//!
//! * Chunks are only allocated where voxels have been written
//! * An edit rebuilds at most seven chunk meshes, usually one
//! * Render requests between two frame ticks coalesce into one draw

use log::info;

pub mod application_state;
pub mod core;
pub mod engine_state;

pub use application_state::{input_state::PointerEvent, WindowBridge};
pub use self::core::{EditorConfig, EngineError, Result};
pub use engine_state::{
    editing::{Brush, BrushAction, BrushShape, Color, ColorPalette, RayHit},
    rendering::{
        meshing::{CellMeshCache, ChunkMesh, MeshHandle},
        RenderSurface,
    },
    voxels::{block::VoxelId, world::World},
    StrokeOutcome, VoxelEditor,
};

/// Installs the stdout logger, filtered by `RUST_LOG`.
///
/// Safe to call more than once; later calls do nothing.
pub fn init_logging() {
    let mut log_builder = env_logger::Builder::new();
    let installed = log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .try_init()
        .is_ok();

    if installed {
        info!("Logger initialized");
    }
}

//! Rendering system for the voxel editor.
//!
//! This module contains the meshing pipeline and the seam to whichever GPU
//! backend hosts the editor. The editor itself never talks to a graphics API:
//! it hands finished chunk meshes and camera matrices to a [`RenderSurface`]
//! and decides *when* a frame is worth drawing with a [`RenderScheduler`].

use cgmath::{Matrix4, Point3};
use log::trace;
use web_time::Instant;

use self::meshing::{ChunkMesh, MeshHandle};
use super::{camera_state::CameraUniform, editing::Color};

pub mod meshing;
pub mod texture;
mod vertex;

// Re-export commonly used types
pub use texture::TileLayout;
pub use vertex::Vertex;

/// The rendering backend the editor draws through.
///
/// Implementations own all GPU state. Meshes are identified by their
/// [`MeshHandle`], which stays the same across rebuilds, so an upload for a
/// handle that was uploaded before replaces the old buffers.
pub trait RenderSurface {
    /// Current drawable size in physical pixels, `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Uploads (or replaces) the buffers of one chunk mesh.
    ///
    /// # Arguments
    /// * `handle` - Stable identity of the chunk's mesh
    /// * `chunk_position` - The chunk's coordinate
    /// * `translation` - World transform placing the chunk-local mesh
    /// * `mesh` - The new geometry; may be empty
    fn upload_chunk_mesh(
        &mut self,
        handle: MeshHandle,
        chunk_position: Point3<i32>,
        translation: Matrix4<f32>,
        mesh: &ChunkMesh,
    );

    /// Receives the palette colors, indexed by `voxel id - 1`. Sent before
    /// the first frame and again whenever an entry is added or recolored.
    fn upload_palette(&mut self, _colors: &[Color]) {}

    /// Draws every uploaded mesh with the given camera.
    fn draw(&mut self, camera: &CameraUniform);
}

/// Coalesces render requests into at most one pending frame.
///
/// Any number of edits and camera changes between two frame ticks produce a
/// single redraw.
#[derive(Debug, Default)]
pub struct RenderScheduler {
    render_requested: bool,
    frames_rendered: u64,
    last_frame: Option<Instant>,
}

impl RenderScheduler {
    /// Creates a scheduler with nothing requested.
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks for a frame.
    ///
    /// # Returns
    /// `true` if this call newly requested a frame, `false` if one was
    /// already pending.
    pub fn request(&mut self) -> bool {
        if self.render_requested {
            return false;
        }
        self.render_requested = true;
        true
    }

    /// Whether a frame is pending.
    pub fn is_requested(&self) -> bool {
        self.render_requested
    }

    /// Consumes the pending request, if any, recording a rendered frame.
    ///
    /// # Returns
    /// `true` if the caller should draw now.
    pub fn take_request(&mut self) -> bool {
        if !self.render_requested {
            return false;
        }
        self.render_requested = false;
        self.frames_rendered += 1;

        let now = Instant::now();
        if let Some(last) = self.last_frame {
            trace!(
                "Frame {} after {:?}",
                self.frames_rendered,
                now.duration_since(last)
            );
        }
        self.last_frame = Some(now);
        true
    }

    /// Number of frames drawn so far.
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// When the last frame was drawn.
    pub fn last_frame(&self) -> Option<Instant> {
        self.last_frame
    }
}

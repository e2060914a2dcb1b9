//! # Voxel Editor Headless Demo
//!
//! Builds an editor over a logging render surface, seeds the demo world, and
//! replays a short scripted session: a click that adds a voxel, a drag that
//! only orbits, and a remove stroke.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- [config.json]
//! ```

use cgmath::{Matrix4, Point3};
use log::{error, info};
use voxel_editor::{
    engine_state::{camera_state::CameraUniform, rendering::Vertex},
    BrushAction, BrushShape, ChunkMesh, EditorConfig, MeshHandle, PointerEvent, RenderSurface,
    VoxelEditor,
};

/// Render surface that only reports what it is handed.
struct LoggingSurface {
    width: u32,
    height: u32,
    triangles_uploaded: usize,
}

impl RenderSurface for LoggingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn upload_chunk_mesh(
        &mut self,
        handle: MeshHandle,
        chunk_position: Point3<i32>,
        _translation: Matrix4<f32>,
        mesh: &ChunkMesh,
    ) {
        self.triangles_uploaded += mesh.triangle_count();
        let vertices = Vertex::interleave(mesh);
        let vertex_bytes: &[u8] = bytemuck::cast_slice(&vertices);
        info!(
            "Upload chunk {:?} (slot {}): {} vertices ({} bytes), {} triangles",
            chunk_position,
            handle.index(),
            vertices.len(),
            vertex_bytes.len() + mesh.index_bytes().len(),
            mesh.triangle_count()
        );
    }

    fn draw(&mut self, camera: &CameraUniform) {
        info!("Draw from {:?}", &camera.position[..3]);
    }
}

fn click(editor: &mut VoxelEditor<LoggingSurface>, x: f32, y: f32) {
    editor.handle_pointer(PointerEvent::Down { x, y });
    if let Some(stroke) = editor.handle_pointer(PointerEvent::Up { x, y }) {
        info!(
            "Stroke at {:?}: {} voxel(s) written, {} chunk(s) rebuilt",
            stroke.hit.voxel,
            stroke.written.len(),
            stroke.rebuilt_chunks.len()
        );
    } else {
        info!("Click at ({}, {}) hit nothing", x, y);
    }
}

fn main() {
    voxel_editor::init_logging();

    let config = match std::env::args().nth(1) {
        Some(path) => match EditorConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                error!("Could not load {}: {}", path, err);
                std::process::exit(1);
            }
        },
        None => EditorConfig {
            demo_world: voxel_editor::core::DemoWorld::SineWaves,
            ..EditorConfig::default()
        },
    };

    let surface = LoggingSurface {
        width: 1280,
        height: 720,
        triangles_uploaded: 0,
    };
    let mut editor = match VoxelEditor::new(config, Some(surface)) {
        Ok(editor) => editor,
        Err(err) => {
            error!("Could not start the editor: {}", err);
            std::process::exit(1);
        }
    };
    editor.frame();

    let (cx, cy) = (640.0, 360.0);
    click(&mut editor, cx, cy);
    editor.frame();

    editor.handle_pointer(PointerEvent::Down { x: cx, y: cy });
    editor.handle_pointer(PointerEvent::Move { x: cx + 40.0, y: cy });
    editor.handle_pointer(PointerEvent::Up { x: cx + 40.0, y: cy });
    info!("Drag ended without an edit; frame drawn: {}", editor.frame());

    editor.set_brush(BrushAction::Remove, BrushShape::Extrude);
    click(&mut editor, cx, cy);
    editor.frame();

    info!(
        "{} chunk(s) in the world, {} mesh(es) cached, {} triangles uploaded",
        editor.world().chunk_count(),
        editor.mesh_cache().len(),
        editor.surface().triangles_uploaded
    );
}

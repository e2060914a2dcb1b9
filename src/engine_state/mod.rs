//! # Engine State Module
//!
//! The core engine module that owns the editor's state and wires its
//! subsystems together.
//!
//! ## Key Components
//!
//! * `VoxelEditor` - The main state container for the editor
//! * `camera_state` - The camera click rays are cast from
//! * `editing` - Gesture classification, ray casting, brush and palette
//! * `rendering` - Chunk meshing, the mesh cache and the renderer seam
//! * `voxels` - Voxel data, chunks, and demo world generation
//!
//! ## Architecture
//!
//! One `VoxelEditor` value owns everything: the world, the mesh cache, the
//! brush, the palette and the render surface. There is no global state, so
//! several editors can coexist (each with its own surface).
//!
//! A click flows through the subsystems in a fixed order:
//!
//! 1. `PointerGesture` classifies press/release as a click
//! 2. The camera unprojects the click into a ray
//! 3. `intersect_ray` walks the ray to the first solid voxel
//! 4. `apply_stroke` writes the brush's voxels into the world
//! 5. `CellMeshCache` rebuilds the affected chunks
//! 6. `RenderScheduler` requests one frame
//!
//! The next call to `VoxelEditor::frame` uploads the rebuilt meshes and draws.

use cgmath::Point3;
use log::{debug, info};

use crate::{
    application_state::input_state::PointerEvent,
    core::{EditorConfig, EngineError, Result},
};

use camera_state::{Camera, CameraUniform};
use editing::{
    apply_stroke, intersect_ray, Brush, BrushAction, BrushShape, Color, ColorPalette,
    GestureOutcome, PointerGesture, RayHit,
};
use rendering::{meshing::CellMeshCache, RenderScheduler, RenderSurface};
use voxels::{block::VoxelId, generation::seed_demo_world, world::World};

pub mod camera_state;
pub mod editing;
pub mod rendering;
pub mod voxels;

/// What one brush stroke did.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeOutcome {
    /// Where the click ray landed
    pub hit: RayHit,
    /// Voxel coordinates written
    pub written: Vec<Point3<i32>>,
    /// Chunks whose meshes were rebuilt
    pub rebuilt_chunks: Vec<Point3<i32>>,
}

/// The interactive voxel editor.
///
/// # Examples
///
/// ```
/// use voxel_editor::{EditorConfig, PointerEvent, VoxelEditor};
/// # use voxel_editor::engine_state::{camera_state::CameraUniform, rendering::{meshing::{ChunkMesh, MeshHandle}, RenderSurface}};
/// # use cgmath::{Matrix4, Point3};
/// # struct Headless;
/// # impl RenderSurface for Headless {
/// #     fn size(&self) -> (u32, u32) { (800, 600) }
/// #     fn upload_chunk_mesh(&mut self, _: MeshHandle, _: Point3<i32>, _: Matrix4<f32>, _: &ChunkMesh) {}
/// #     fn draw(&mut self, _: &CameraUniform) {}
/// # }
///
/// let mut editor = VoxelEditor::new(EditorConfig::default(), Some(Headless)).unwrap();
/// editor.set_voxel(16, 0, 16, 1);
///
/// // Main loop
/// editor.handle_pointer(PointerEvent::Down { x: 400.0, y: 300.0 });
/// editor.handle_pointer(PointerEvent::Up { x: 401.0, y: 300.0 });
/// editor.frame();
/// ```
pub struct VoxelEditor<S: RenderSurface> {
    /// Validated configuration
    config: EditorConfig,
    /// The voxel store
    world: World,
    /// One mesh per touched chunk
    mesh_cache: CellMeshCache,
    /// Current brush selection
    brush: Brush,
    /// Voxel colors and the selected type
    palette: ColorPalette,
    /// Press/release tracking for the primary pointer
    gesture: PointerGesture,
    /// Camera click rays are cast from
    camera: Camera,
    /// Render request coalescing
    scheduler: RenderScheduler,
    /// Set when palette colors must be re-sent to the surface
    palette_dirty: bool,
    /// The rendering backend
    surface: S,
}

impl<S: RenderSurface> VoxelEditor<S> {
    /// Creates an editor drawing to `surface`.
    ///
    /// The config is validated, the demo world it names is seeded and meshed,
    /// and a first frame is requested.
    ///
    /// # Errors
    /// * [`EngineError::MissingSurface`] if `surface` is `None`
    /// * [`EngineError::InvalidConfig`] if the config fails validation
    pub fn new(config: EditorConfig, surface: Option<S>) -> Result<Self> {
        let surface = surface.ok_or(EngineError::MissingSurface)?;
        config.validate()?;

        let (width, height) = surface.size();
        let mut world = World::new(config.cell_size);
        let palette = ColorPalette::new(config.max_colors);
        let mut mesh_cache = CellMeshCache::from_config(&config);

        let seeded = seed_demo_world(&mut world, config.demo_world, palette.len() as VoxelId);
        for chunk in &seeded {
            mesh_cache.invalidate_and_rebuild(&world, *chunk);
        }

        let mut editor = VoxelEditor {
            camera: Camera::for_chunk(&config.camera, width, height, config.cell_size),
            gesture: PointerGesture::new(config.click_threshold),
            brush: Brush::new(),
            scheduler: RenderScheduler::new(),
            palette_dirty: true,
            config,
            world,
            mesh_cache,
            palette,
            surface,
        };
        editor.request_render();

        info!(
            "Voxel editor ready: {}x{} surface, {}³ chunks, {} chunk(s) meshed",
            width,
            height,
            editor.config.cell_size,
            editor.mesh_cache.len()
        );
        Ok(editor)
    }

    /// The validated configuration the editor was built with.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The voxel store.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The per-chunk meshes and their pending uploads.
    pub fn mesh_cache(&self) -> &CellMeshCache {
        &self.mesh_cache
    }

    /// The render surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the render surface, for host-side resizing.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The camera click rays are cast from.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Replaces the camera pose, typically after the host's orbit controls
    /// moved it, and requests a frame.
    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
        self.request_render();
    }

    /// Adapts the projection to a new surface size and requests a frame.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.projection.resize(width, height);
        self.request_render();
    }

    /// Reads a voxel.
    pub fn get_voxel(&self, x: i32, y: i32, z: i32) -> VoxelId {
        self.world.get_voxel(x, y, z)
    }

    /// Writes a voxel and rebuilds the affected chunk meshes.
    ///
    /// # Returns
    /// The rebuilt chunk coordinates.
    pub fn set_voxel(&mut self, x: i32, y: i32, z: i32, id: VoxelId) -> Vec<Point3<i32>> {
        self.world.set_voxel(x, y, z, id);
        let rebuilt = self.mesh_cache.on_voxel_edited(&self.world, x, y, z);
        self.request_render();
        rebuilt
    }

    /// The current brush.
    pub fn brush(&self) -> Brush {
        self.brush
    }

    /// Sets the brush action and shape.
    pub fn set_brush(&mut self, action: BrushAction, shape: BrushShape) {
        self.brush.select(action, shape);
    }

    /// Sets the brush from UI names. The brush only changes when both names
    /// are recognised; otherwise it keeps its current action and shape.
    ///
    /// # Returns
    /// `true` if the brush was updated.
    pub fn set_brush_by_name(&mut self, action: &str, shape: &str) -> bool {
        match (BrushAction::from_name(action), BrushShape::from_name(shape)) {
            (Some(action), Some(shape)) => {
                self.brush.select(action, shape);
                true
            }
            _ => {
                debug!("Ignoring brush selection ({:?}, {:?})", action, shape);
                false
            }
        }
    }

    /// The color palette.
    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    /// Selects the palette entry add and paint strokes use.
    pub fn select_color(&mut self, index: usize) -> bool {
        self.palette.select_color(index)
    }

    /// Appends a palette color.
    ///
    /// # Returns
    /// The new entry's index, or `None` when the palette is full.
    pub fn add_color(&mut self, color: Color) -> Option<usize> {
        let index = self.palette.add_color(color)?;
        self.palette_dirty = true;
        self.request_render();
        Some(index)
    }

    /// Recolors a palette entry, and with it every voxel of that type.
    pub fn update_color(&mut self, index: usize, color: Color) -> bool {
        if !self.palette.update_color(index, color) {
            return false;
        }
        self.palette_dirty = true;
        self.request_render();
        true
    }

    /// Feeds one pointer event through the click classifier.
    ///
    /// # Returns
    /// The stroke performed, when the event completed a click that hit a
    /// voxel.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<StrokeOutcome> {
        match self.gesture.handle(event)? {
            GestureOutcome::Click { x, y } => self.edit_at_screen(x, y),
            GestureOutcome::Orbit => None,
        }
    }

    /// Applies the brush at a pixel of the surface.
    pub fn edit_at_screen(&mut self, x: f32, y: f32) -> Option<StrokeOutcome> {
        let (width, height) = self.surface.size();
        let (start, end) = self.camera.ray_through_pixel(x, y, width, height)?;
        self.edit_along_ray(start, end)
    }

    /// Applies the brush where the segment `start..end` first enters a solid
    /// voxel.
    ///
    /// # Returns
    /// `None` (and no edit) if the segment misses.
    pub fn edit_along_ray(&mut self, start: Point3<f32>, end: Point3<f32>) -> Option<StrokeOutcome> {
        let Some(hit) = intersect_ray(&self.world, start, end) else {
            debug!("Click ray from {:?} hit nothing", start);
            return None;
        };

        let written = apply_stroke(
            &mut self.world,
            &hit,
            self.brush,
            self.palette.selected_voxel_id(),
            self.config.extrude_limit,
        );
        let rebuilt_chunks = match written.as_slice() {
            [] => Vec::new(),
            [voxel] => self.mesh_cache.on_voxel_edited(&self.world, voxel.x, voxel.y, voxel.z),
            _ => self.mesh_cache.on_voxels_edited(&self.world, written.iter().copied()),
        };
        if !rebuilt_chunks.is_empty() {
            self.request_render();
        }

        Some(StrokeOutcome {
            hit,
            written,
            rebuilt_chunks,
        })
    }

    /// Asks for a frame.
    ///
    /// # Returns
    /// `true` if no frame was pending before this call.
    pub fn request_render(&mut self) -> bool {
        self.scheduler.request()
    }

    /// Frame tick: if a frame was requested, uploads every mesh rebuilt since
    /// the last frame and draws once.
    ///
    /// # Returns
    /// `true` if a frame was drawn.
    pub fn frame(&mut self) -> bool {
        if !self.scheduler.take_request() {
            return false;
        }

        if self.palette_dirty {
            self.surface.upload_palette(self.palette.colors());
            self.palette_dirty = false;
        }

        let updated = self.mesh_cache.drain_updated();
        for handle in &updated {
            let (Some(mesh), Some(chunk_position), Some(translation)) = (
                self.mesh_cache.get(*handle),
                self.mesh_cache.chunk_position(*handle),
                self.mesh_cache.world_transform(*handle),
            ) else {
                continue;
            };
            self.surface
                .upload_chunk_mesh(*handle, chunk_position, translation, mesh);
        }

        self.surface.draw(&CameraUniform::from_camera(&self.camera));
        debug!(
            "Frame {} drawn with {} mesh upload(s)",
            self.scheduler.frames_rendered(),
            updated.len()
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{Matrix4, Vector3};

    use crate::core::DemoWorld;

    use super::{
        camera_state::Projection,
        rendering::meshing::{ChunkMesh, MeshHandle},
        *,
    };

    #[derive(Default)]
    struct RecordingSurface {
        uploads: Vec<(MeshHandle, Point3<i32>)>,
        draws: usize,
        palette_uploads: usize,
    }

    impl RenderSurface for RecordingSurface {
        fn size(&self) -> (u32, u32) {
            (200, 100)
        }

        fn upload_chunk_mesh(
            &mut self,
            handle: MeshHandle,
            chunk_position: Point3<i32>,
            _translation: Matrix4<f32>,
            _mesh: &ChunkMesh,
        ) {
            self.uploads.push((handle, chunk_position));
        }

        fn upload_palette(&mut self, _colors: &[Color]) {
            self.palette_uploads += 1;
        }

        fn draw(&mut self, _camera: &CameraUniform) {
            self.draws += 1;
        }
    }

    fn editor() -> VoxelEditor<RecordingSurface> {
        let config = EditorConfig {
            cell_size: 16,
            ..EditorConfig::default()
        };
        VoxelEditor::new(config, Some(RecordingSurface::default())).unwrap()
    }

    #[test]
    fn test_missing_surface_is_fatal() {
        let result = VoxelEditor::<RecordingSurface>::new(EditorConfig::default(), None);
        assert!(matches!(result, Err(EngineError::MissingSurface)));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = EditorConfig {
            cell_size: 0,
            ..EditorConfig::default()
        };
        let result = VoxelEditor::new(config, Some(RecordingSurface::default()));
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_first_frame_uploads_palette_and_draws() {
        let mut editor = editor();
        assert!(editor.frame());
        assert_eq!(editor.surface().draws, 1);
        assert_eq!(editor.surface().palette_uploads, 1);
        assert!(!editor.frame());
    }

    #[test]
    fn test_demo_world_is_meshed_on_construction() {
        let config = EditorConfig {
            cell_size: 16,
            demo_world: DemoWorld::SineWaves,
            ..EditorConfig::default()
        };
        let mut editor = VoxelEditor::new(config, Some(RecordingSurface::default())).unwrap();
        assert_eq!(editor.mesh_cache().len(), 5);
        editor.frame();
        assert_eq!(editor.surface().uploads.len(), 5);
    }

    #[test]
    fn test_edits_coalesce_into_one_frame() {
        let mut editor = editor();
        editor.frame();
        editor.set_voxel(1, 1, 1, 1);
        editor.set_voxel(2, 1, 1, 1);
        editor.set_voxel(3, 1, 1, 1);
        assert!(editor.frame());
        assert_eq!(editor.surface().draws, 2);
        assert_eq!(editor.surface().uploads.len(), 1);
        assert!(!editor.frame());
    }

    #[test]
    fn test_click_adds_on_top_face() {
        let mut editor = editor();
        editor.set_voxel(10, 4, 3, 1);
        let mut camera = Camera::new(
            Point3::new(10.5, 30.0, 3.5),
            Point3::new(10.5, 0.0, 3.5),
            Projection::new(200, 100, cgmath::Deg(60.0), 0.1, 1000.0),
        );
        camera.up = Vector3::unit_z();
        editor.set_camera(camera);
        editor.select_color(2);

        assert!(editor.handle_pointer(PointerEvent::Down { x: 100.0, y: 50.0 }).is_none());
        editor.handle_pointer(PointerEvent::Move { x: 102.0, y: 52.0 });
        let outcome = editor
            .handle_pointer(PointerEvent::Up { x: 100.0, y: 50.0 })
            .unwrap();
        assert_eq!(outcome.hit.voxel, Point3::new(10, 4, 3));
        assert_eq!(outcome.written, vec![Point3::new(10, 5, 3)]);
        assert_eq!(editor.get_voxel(10, 5, 3), 3);
    }

    #[test]
    fn test_drag_does_not_edit() {
        let mut editor = editor();
        editor.set_voxel(8, 8, 8, 1);
        editor.handle_pointer(PointerEvent::Down { x: 100.0, y: 50.0 });
        editor.handle_pointer(PointerEvent::Move { x: 160.0, y: 50.0 });
        assert!(editor.handle_pointer(PointerEvent::Up { x: 160.0, y: 50.0 }).is_none());
        assert_eq!(editor.world().get_voxel(8, 8, 8), 1);
    }

    #[test]
    fn test_miss_does_not_request_render() {
        let mut editor = editor();
        editor.frame();
        let outcome = editor.edit_along_ray(Point3::new(0.5, 50.0, 0.5), Point3::new(0.5, 100.0, 0.5));
        assert!(outcome.is_none());
        assert!(!editor.frame());
    }

    #[test]
    fn test_brush_names() {
        let mut editor = editor();
        assert!(editor.set_brush_by_name("paint", "extrude"));
        assert_eq!(editor.brush().action(), BrushAction::Paint);
        assert_eq!(editor.brush().shape(), BrushShape::Extrude);
    }

    #[test]
    fn test_unknown_brush_name_leaves_brush_unchanged() {
        let mut editor = editor();
        editor.set_brush(BrushAction::Paint, BrushShape::Extrude);

        assert!(!editor.set_brush_by_name("paint", "bogus"));
        assert!(!editor.set_brush_by_name("bogus", "single"));
        assert!(!editor.set_brush_by_name("remove", ""));
        assert_eq!(editor.brush().action(), BrushAction::Paint);
        assert_eq!(editor.brush().shape(), BrushShape::Extrude);
    }

    #[test]
    fn test_palette_changes_reach_surface() {
        let mut editor = editor();
        editor.frame();
        assert!(editor.update_color(0, Color::new(1.0, 0.0, 0.0)));
        assert!(editor.frame());
        assert_eq!(editor.surface().palette_uploads, 2);
        assert!(!editor.update_color(99, Color::new(1.0, 0.0, 0.0)));
    }
}

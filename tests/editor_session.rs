//! End-to-end checks against the public API: voxel addressing, meshing,
//! incremental rebuilds, click handling and brush placement.

use cgmath::{Matrix4, Point3, Vector3};
use voxel_editor::{
    core::{DemoWorld, MeshingStrategy},
    engine_state::{
        camera_state::CameraUniform,
        editing::{apply_stroke, intersect_ray, GestureOutcome, PointerGesture, RayHit},
        rendering::TileLayout,
    },
    Brush, BrushAction, BrushShape, CellMeshCache, ChunkMesh, ColorPalette, EditorConfig,
    EngineError, MeshHandle, PointerEvent, RenderSurface, VoxelEditor, World,
};

#[derive(Default)]
struct TestSurface {
    uploads: Vec<(MeshHandle, Point3<i32>, Matrix4<f32>)>,
    draws: usize,
}

impl RenderSurface for TestSurface {
    fn size(&self) -> (u32, u32) {
        (800, 600)
    }

    fn upload_chunk_mesh(
        &mut self,
        handle: MeshHandle,
        chunk_position: Point3<i32>,
        translation: Matrix4<f32>,
        _mesh: &ChunkMesh,
    ) {
        self.uploads.push((handle, chunk_position, translation));
    }

    fn draw(&mut self, _camera: &CameraUniform) {
        self.draws += 1;
    }
}

fn editor_with_cell_size(cell_size: u32) -> VoxelEditor<TestSurface> {
    let config = EditorConfig {
        cell_size,
        ..EditorConfig::default()
    };
    VoxelEditor::new(config, Some(TestSurface::default())).unwrap()
}

fn sorted(chunks: Vec<Point3<i32>>) -> Vec<(i32, i32, i32)> {
    let mut keys: Vec<_> = chunks.into_iter().map(|c| (c.x, c.y, c.z)).collect();
    keys.sort();
    keys
}

#[test]
fn test_negative_coordinates_floor_into_chunks() {
    let world = World::new(32);
    assert_eq!(world.chunk_id_of(-1, 0, 0), Point3::new(-1, 0, 0));
    assert_eq!(world.local_offset_of(-1, 0, 0), Point3::new(31, 0, 0));
    assert_eq!(world.chunk_id_of(-32, 31, 32), Point3::new(-1, 0, 1));
    assert_eq!(world.chunk_id_of(-33, 0, 0), Point3::new(-2, 0, 0));
}

#[test]
fn test_set_get_round_trip() {
    let mut world = World::new(32);
    world.set_voxel(-5, 40, 7, 9);
    world.set_voxel(-4, 40, 7, 2);
    assert_eq!(world.get_voxel(-5, 40, 7), 9);
    assert_eq!(world.get_voxel(-4, 40, 7), 2);
    assert_eq!(world.get_voxel(-6, 40, 7), 0);
    assert_eq!(world.get_voxel(1000, -1000, 3), 0);
}

#[test]
fn test_solid_cube_mesh_counts() {
    let mut world = World::new(16);
    for x in 0..2 {
        for y in 0..2 {
            for z in 0..2 {
                world.set_voxel(x, y, z, 1);
            }
        }
    }
    let layout = TileLayout::default();
    let origin = Point3::new(0, 0, 0);

    let greedy = ChunkMesh::build_with(&world, origin, &layout, MeshingStrategy::Greedy);
    assert_eq!(greedy.vertex_count(), 24);
    assert_eq!(greedy.triangle_count(), 12);

    let culled = ChunkMesh::build(&world, origin, &layout);
    assert_eq!(culled.triangle_count(), 48);
    assert_eq!(culled.vertex_count(), 96);
}

#[test]
fn test_border_edit_rebuilds_neighbour() {
    let mut editor = editor_with_cell_size(16);
    let rebuilt = editor.set_voxel(0, 5, 5, 1);
    assert_eq!(sorted(rebuilt), vec![(-1, 0, 0), (0, 0, 0)]);

    let rebuilt = editor.set_voxel(5, 5, 5, 1);
    assert_eq!(rebuilt, vec![Point3::new(0, 0, 0)]);
}

#[test]
fn test_corner_edit_rebuilds_four_chunks() {
    let mut editor = editor_with_cell_size(16);
    let rebuilt = editor.set_voxel(0, 0, 0, 1);
    assert_eq!(
        sorted(rebuilt),
        vec![(-1, 0, 0), (0, -1, 0), (0, 0, -1), (0, 0, 0)]
    );
}

#[test]
fn test_click_versus_orbit() {
    let mut gesture = PointerGesture::new(5.0);
    gesture.handle(PointerEvent::Down { x: 0.0, y: 0.0 });
    gesture.handle(PointerEvent::Move { x: 4.0, y: 4.0 });
    assert_eq!(
        gesture.handle(PointerEvent::Up { x: 4.0, y: 4.0 }),
        Some(GestureOutcome::Click { x: 4.0, y: 4.0 })
    );

    gesture.handle(PointerEvent::Down { x: 0.0, y: 0.0 });
    gesture.handle(PointerEvent::Move { x: 6.0, y: 0.0 });
    assert_eq!(
        gesture.handle(PointerEvent::Up { x: 6.0, y: 0.0 }),
        Some(GestureOutcome::Orbit)
    );
}

#[test]
fn test_add_and_remove_placement() {
    let start = Point3::new(10.5, 20.0, 3.5);
    let end = Point3::new(10.5, -20.0, 3.5);

    let mut world = World::new(16);
    world.set_voxel(10, 4, 3, 1);
    let hit = intersect_ray(&world, start, end).unwrap();
    assert_eq!(hit.voxel, Point3::new(10, 4, 3));
    assert!((hit.position.y - 5.0).abs() < 1e-5);

    let written = apply_stroke(&mut world, &hit, Brush::new(), 7, 64);
    assert_eq!(written, vec![Point3::new(10, 5, 3)]);
    assert_eq!(world.get_voxel(10, 5, 3), 7);

    let mut world = World::new(16);
    world.set_voxel(10, 4, 3, 1);
    let mut remove = Brush::new();
    remove.set_action(BrushAction::Remove);
    let written = apply_stroke(&mut world, &hit, remove, 7, 64);
    assert_eq!(written, vec![Point3::new(10, 4, 3)]);
    assert_eq!(world.get_voxel(10, 4, 3), 0);
}

#[test]
fn test_placement_from_hit_on_voxel_corner() {
    let hit = RayHit {
        position: Point3::new(10.0, 5.0, 3.0),
        normal: Vector3::new(0, 1, 0),
        voxel: Point3::new(10, 4, 3),
        voxel_id: 1,
    };
    assert_eq!(hit.target(BrushAction::Add.normal_offset()), Point3::new(10, 5, 3));
    assert_eq!(hit.target(BrushAction::Remove.normal_offset()), Point3::new(10, 4, 3));
    assert_eq!(hit.target(BrushAction::Paint.normal_offset()), Point3::new(10, 4, 3));

    let mut world = World::new(32);
    world.set_voxel(10, 4, 3, 1);
    let written = apply_stroke(&mut world, &hit, Brush::new(), 2, 64);
    assert_eq!(written, vec![Point3::new(10, 5, 3)]);
    assert_eq!(world.get_voxel(10, 5, 3), 2);
}

#[test]
fn test_removing_empty_voxel_keeps_mesh_bytes() {
    let mut editor = editor_with_cell_size(16);
    editor.set_voxel(3, 3, 3, 2);
    editor.set_voxel(4, 3, 3, 5);
    let handle = editor.mesh_cache().handle_for(Point3::new(0, 0, 0)).unwrap();
    let before = editor.mesh_cache().get(handle).unwrap().clone();

    editor.set_voxel(9, 9, 9, 0);
    let after = editor.mesh_cache().get(handle).unwrap();
    assert_eq!(before.position_bytes(), after.position_bytes());
    assert_eq!(before.index_bytes(), after.index_bytes());
    assert_eq!(&before, after);
}

#[test]
fn test_handle_survives_rebuilds() {
    let mut editor = editor_with_cell_size(16);
    editor.set_voxel(2, 2, 2, 1);
    let handle = editor.mesh_cache().handle_for(Point3::new(0, 0, 0)).unwrap();
    let revision = editor.mesh_cache().revision(handle).unwrap();

    editor.set_voxel(2, 3, 2, 1);
    assert_eq!(editor.mesh_cache().handle_for(Point3::new(0, 0, 0)), Some(handle));
    assert_eq!(editor.mesh_cache().revision(handle), Some(revision + 1));
}

#[test]
fn test_frame_uploads_with_translation_and_coalesces() {
    let mut editor = editor_with_cell_size(16);
    editor.frame();

    editor.set_voxel(-1, 0, 0, 1);
    editor.set_voxel(-2, 0, 0, 1);
    assert!(editor.frame());
    assert!(!editor.frame());

    let surface = editor.surface();
    assert_eq!(surface.draws, 2);
    let (_, chunk, translation) = surface
        .uploads
        .iter()
        .find(|(_, chunk, _)| *chunk == Point3::new(-1, 0, 0))
        .unwrap();
    assert_eq!(*chunk, Point3::new(-1, 0, 0));
    assert_eq!(translation.w.x, -16.0);
}

#[test]
fn test_extrude_adds_layer_over_flat_surface() {
    let mut editor = editor_with_cell_size(16);
    for x in 4..7 {
        for z in 4..7 {
            editor.set_voxel(x, 0, z, 1);
        }
    }
    editor.set_brush(BrushAction::Add, BrushShape::Extrude);
    let stroke = editor
        .edit_along_ray(Point3::new(5.5, 10.0, 5.5), Point3::new(5.5, -10.0, 5.5))
        .unwrap();
    assert_eq!(stroke.written.len(), 9);
    for x in 4..7 {
        for z in 4..7 {
            assert_eq!(editor.get_voxel(x, 1, z), 1);
        }
    }
    assert_eq!(stroke.rebuilt_chunks, vec![Point3::new(0, 0, 0)]);
}

#[test]
fn test_palette_bounds_and_brush_names() {
    let mut palette = ColorPalette::new(3);
    assert_eq!(palette.len(), 3);
    assert!(palette.is_full());
    assert_eq!(palette.add_default_color(), None);
    assert!(!palette.select_color(3));
    assert!(palette.select_color(2));
    assert_eq!(palette.selected_voxel_id(), 3);

    let mut brush = Brush::new();
    assert!(brush.set_action_by_name("remove"));
    assert!(!brush.set_action_by_name("erase"));
    assert!(brush.set_shape_by_name("extrude"));
    assert_eq!(brush.action(), BrushAction::Remove);
    assert_eq!(brush.shape(), BrushShape::Extrude);
}

#[test]
fn test_construction_errors() {
    let missing = VoxelEditor::<TestSurface>::new(EditorConfig::default(), None);
    assert!(matches!(missing, Err(EngineError::MissingSurface)));

    let err = EditorConfig::from_json_str(r#"{ "click_threshold": -1.0 }"#).unwrap_err();
    assert!(matches!(err, EngineError::InvalidConfig(_)));
}

#[test]
fn test_demo_world_meshes_match_cache() {
    let config = EditorConfig {
        cell_size: 8,
        demo_world: DemoWorld::SineWaves,
        meshing: MeshingStrategy::Greedy,
        ..EditorConfig::default()
    };
    let editor = VoxelEditor::new(config.clone(), Some(TestSurface::default())).unwrap();
    assert_eq!(editor.world().chunk_count(), 5);

    let mut fresh = CellMeshCache::from_config(&config);
    for chunk in editor.world().chunk_positions() {
        let handle = fresh.invalidate_and_rebuild(editor.world(), chunk);
        let cached = editor.mesh_cache().handle_for(chunk).unwrap();
        assert_eq!(fresh.get(handle), editor.mesh_cache().get(cached));
    }
}

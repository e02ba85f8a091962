// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene assembly, canvas output and export for authored plans

use approx::assert_relative_eq;
use floorplan_core::walls::WallCategory;
use floorplan_core::{Color, Editor, EditorConfig, GridRect, Room, RoomId, Tool, WallConfig};
use floorplan_geometry::{OverlayUnion, PassthroughUnion};
use floorplan_render::{
    build_scene, draw_commands, write_mtl, write_obj, DrawCommand, ObjExport, Theme, WallCache,
};
use nalgebra::Point2;

fn plan() -> Vec<Room> {
    vec![
        Room::new("living", "Living", GridRect::new(0, 0, 2, 2), "#ffadad"),
        Room::new("kitchen", "Kitchen", GridRect::new(2, 0, 2, 2), "not-a-color"),
    ]
}

#[test]
fn scene_has_layers_floors_and_labels() {
    let rooms = plan();
    let config = WallConfig::default();
    let mut cache = WallCache::new(config);
    let walls = cache.get(&rooms, &OverlayUnion).unwrap();
    let scene = build_scene(&rooms, walls, &config, Theme::Dark);

    assert_eq!(scene.walls.len(), 2);
    let exterior = scene.wall_layer(WallCategory::Exterior).unwrap();
    assert_eq!(exterior.cap_render_order, 100);
    assert_eq!(exterior.cap_material.color, Color::rgb(0x66, 0x66, 0x66));

    // caps float just above the solid top
    let (_, solid_max) = exterior.solid.bounds();
    let (cap_min, cap_max) = exterior.cap.bounds();
    assert_relative_eq!(cap_min.y, cap_max.y, epsilon = 1e-5);
    assert_relative_eq!(cap_max.y, solid_max.y + 0.001, epsilon = 1e-5);

    assert_eq!(scene.floors.len(), 2);
    let kitchen = scene.floor(&RoomId::from("kitchen")).unwrap();
    assert_eq!(kitchen.material.color, Color::rgb(0xff, 0x7b, 0x7b));

    let label = scene.label(&RoomId::from("living")).unwrap();
    assert_eq!(label.text, "Living");
    assert_relative_eq!(label.position.y, 0.25);

    let grid = scene.grid.as_ref().unwrap();
    assert_eq!(grid.segments.len(), 5 + 3);
}

#[test]
fn degenerate_rooms_get_no_floor() {
    let mut rooms = plan();
    rooms.push(Room::new("flat", "Flat", GridRect::new(5, 5, 0, 3), "#caffbf"));
    let config = WallConfig::default();
    let mut cache = WallCache::new(config);
    let walls = cache.get(&rooms, &PassthroughUnion).unwrap();
    let scene = build_scene(&rooms, walls, &config, Theme::Light);

    assert_eq!(scene.floors.len(), 2);
    assert!(scene.floor(&RoomId::from("flat")).is_none());
    assert!(scene.label(&RoomId::from("flat")).is_none());
}

#[test]
fn empty_plan_has_empty_scene() {
    let config = WallConfig::default();
    let mut cache = WallCache::new(config);
    let walls = cache.get(&[], &OverlayUnion).unwrap();
    let scene = build_scene(&[], walls, &config, Theme::Light);
    assert!(scene.walls.is_empty());
    assert!(scene.floors.is_empty());
    assert!(scene.grid.is_none());
}

#[test]
fn canvas_shows_invalid_preview_while_drawing_over_a_room() {
    let mut editor = Editor::with_rooms(EditorConfig::default(), plan());
    editor.set_tool(Tool::Draw).unwrap();
    editor.pointer_down(Point2::new(25.0, 25.0));
    editor.pointer_move(Point2::new(125.0, 125.0));

    let commands = draw_commands(&editor, 400.0, 300.0);
    let stroke = commands.iter().find_map(|c| match c {
        DrawCommand::StrokeRect { color, .. } if *color == Color::rgb(0xcc, 0x00, 0x00) => Some(c),
        _ => None,
    });
    assert!(stroke.is_some());

    editor.pointer_up();
    let commands = draw_commands(&editor, 400.0, 300.0);
    assert!(!commands
        .iter()
        .any(|c| matches!(c, DrawCommand::StrokeRect { color, .. } if *color == Color::rgb(0xcc, 0x00, 0x00))));
}

#[test]
fn obj_export_names_every_group() {
    let rooms = plan();
    let config = WallConfig::default();
    let mut cache = WallCache::new(config);
    let walls = cache.get(&rooms, &OverlayUnion).unwrap();
    let scene = build_scene(&rooms, walls, &config, Theme::Light);
    let export = ObjExport::from_scene(&scene);

    let mut obj = Vec::new();
    write_obj(&mut obj, &export.groups(), Some("plan.mtl")).unwrap();
    let obj = String::from_utf8(obj).unwrap();
    for name in [
        "walls_exterior",
        "caps_exterior",
        "walls_interior",
        "caps_interior",
        "floor_living",
        "floor_kitchen",
    ] {
        assert!(obj.contains(&format!("o {}", name)), "missing group {}", name);
        assert!(obj.contains(&format!("usemtl {}", name)));
    }

    let vertices = obj.lines().filter(|l| l.starts_with("v ")).count();
    let expected: usize = export.groups().iter().map(|g| g.mesh.vertex_count()).sum();
    assert_eq!(vertices, expected);

    let mut mtl = Vec::new();
    write_mtl(&mut mtl, export.materials()).unwrap();
    let mtl = String::from_utf8(mtl).unwrap();
    assert_eq!(mtl.matches("newmtl").count(), 6);
}

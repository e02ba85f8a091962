// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rooms to wall solids, end to end

use approx::assert_relative_eq;
use floorplan_core::{GridRect, Room, WallCategory, WallConfig};
use floorplan_geometry::{wall_geometry_for_rooms, Mesh, OverlayUnion, PassthroughUnion};

fn room(id: &str, x: i32, y: i32, w: i32, l: i32) -> Room {
    Room::new(id, id, GridRect::new(x, y, w, l), "#a0c4ff")
}

fn assert_caps_face_up(cap: &Mesh, threshold: f64) {
    assert!(!cap.is_empty());
    for t in 0..cap.triangle_count() {
        if let Some(n) = cap.face_normal(t) {
            assert!(n.y > threshold, "cap triangle {} has normal {:?}", t, n);
        }
    }
}

#[test]
fn single_room_solids_sit_on_floor() {
    let config = WallConfig::default();
    let geometry = wall_geometry_for_rooms(&[room("a", 0, 0, 2, 2)], &config, &OverlayUnion).unwrap();

    let exterior = geometry.get(WallCategory::Exterior);
    assert_relative_eq!(exterior.height, config.full_height);
    // top and both sides join into one U-shaped footprint
    assert_eq!(exterior.footprint.len(), 1);
    let (min, max) = exterior.solid.bounds();
    assert_relative_eq!(min.y as f64, config.floor_elevation, epsilon = 1e-6);
    assert_relative_eq!(max.y as f64, config.floor_elevation + config.full_height, epsilon = 1e-6);

    let interior = geometry.get(WallCategory::Interior);
    assert_relative_eq!(interior.height, config.stub_height);
    assert_eq!(interior.footprint.len(), 1);
    let (_, max) = interior.solid.bounds();
    assert_relative_eq!(max.y as f64, config.floor_elevation + config.stub_height, epsilon = 1e-6);
}

#[test]
fn caps_only_contain_upward_faces_at_the_top() {
    let config = WallConfig::default();
    let rooms = [room("a", 0, 0, 3, 2), room("b", 3, 0, 2, 2), room("c", 0, 2, 5, 2)];
    let geometry = wall_geometry_for_rooms(&rooms, &config, &OverlayUnion).unwrap();

    for (category, solid) in geometry.iter() {
        assert_caps_face_up(&solid.cap, config.cap_normal_threshold);
        let top = (config.floor_elevation + solid.height) as f32;
        let (min, max) = solid.cap.bounds();
        assert!((min.y - top).abs() < 1e-5, "{} cap below top", category.as_str());
        assert!((max.y - top).abs() < 1e-5, "{} cap above top", category.as_str());
    }
}

#[test]
fn union_removes_overlap_between_segments() {
    let config = WallConfig::default();
    let rooms = [room("a", 0, 0, 4, 4)];
    let merged = wall_geometry_for_rooms(&rooms, &config, &OverlayUnion).unwrap();
    let separate = wall_geometry_for_rooms(&rooms, &config, &PassthroughUnion).unwrap();

    let merged_area: f64 = merged.exterior.footprint.iter().map(|p| p.area()).sum();
    let separate_area: f64 = separate.exterior.footprint.iter().map(|p| p.area()).sum();

    // 12 unit segments of 0.1 x 1.0, two corners overlapping by 0.05 x 0.05
    assert_relative_eq!(separate_area, 1.2, epsilon = 1e-9);
    assert_relative_eq!(merged_area, 1.2 - 2.0 * 0.0025, epsilon = 1e-6);
    assert_eq!(separate.exterior.footprint.len(), 12);
    assert_eq!(merged.exterior.footprint.len(), 1);

    assert_caps_face_up(&separate.exterior.cap, config.cap_normal_threshold);
}

#[test]
fn no_rooms_or_only_degenerate_rooms_give_empty_geometry() {
    let config = WallConfig::default();
    assert!(wall_geometry_for_rooms(&[], &config, &OverlayUnion).unwrap().is_empty());

    let degenerate = [room("flat", 0, 0, 0, 3), room("neg", 2, 2, 2, -1)];
    let geometry = wall_geometry_for_rooms(&degenerate, &config, &OverlayUnion).unwrap();
    assert!(geometry.is_empty());
    assert!(geometry.interior.cap.is_empty());
}

#[test]
fn custom_heights_flow_through() {
    let config = WallConfig {
        full_height: 2.5,
        stub_height: 0.5,
        ..WallConfig::default()
    };
    let geometry = wall_geometry_for_rooms(&[room("a", 0, 0, 1, 1)], &config, &OverlayUnion).unwrap();
    let (_, max) = geometry.exterior.solid.bounds();
    assert_relative_eq!(max.y as f64, config.floor_elevation + 2.5, epsilon = 1e-5);
}

#[test]
fn zero_stub_height_keeps_exterior_solid() {
    let config = WallConfig {
        stub_height: 0.0,
        ..WallConfig::default()
    };
    let geometry = wall_geometry_for_rooms(&[room("a", 0, 0, 2, 2)], &config, &OverlayUnion).unwrap();

    assert!(geometry.interior.is_empty());
    assert!(geometry.interior.cap.is_empty());
    assert!(!geometry.exterior.is_empty());
    let (_, max) = geometry.exterior.solid.bounds();
    assert_relative_eq!(max.y as f64, config.floor_elevation + config.full_height, epsilon = 1e-5);
    assert_caps_face_up(&geometry.exterior.cap, config.cap_normal_threshold);
}

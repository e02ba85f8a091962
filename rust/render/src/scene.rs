// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 3D scene adapter
//!
//! Collects everything a 3D host needs for one floor: a translucent solid
//! and an opaque cap per wall category, a floor slab and label per room
//! (keyed by room id so hosts can update incrementally), and a grid overlay.

use floorplan_core::walls::WallCategory;
use floorplan_core::{Room, RoomId, WallConfig};
use floorplan_geometry::{room_floor, Mesh, WallGeometry};
use nalgebra::{Point3, Vector3};

use crate::material::{CapMaterial, FloorMaterial, FrostedWallMaterial, LineMaterial, Theme};

/// Vertical lift applied to caps so they never z-fight the solid's top face
pub const CAP_LIFT: f64 = 0.001;
/// Draw order for caps, above the translucent walls
pub const CAP_RENDER_ORDER: u32 = 100;
/// Height of room labels above the floor elevation
pub const LABEL_LIFT: f64 = 0.1;
/// Height of the grid overlay
pub const GRID_OVERLAY_HEIGHT: f64 = 0.21;
/// Largest floor extent, in grid units, that still gets a grid overlay
pub const MAX_GRID_OVERLAY_SPAN: i64 = 10_000;

/// Solid and cap meshes for one wall category
#[derive(Debug, Clone)]
pub struct WallLayer {
    pub category: WallCategory,
    pub solid: Mesh,
    pub cap: Mesh,
    pub wall_material: FrostedWallMaterial,
    pub cap_material: CapMaterial,
    pub cap_render_order: u32,
}

/// Floor slab of a room
#[derive(Debug, Clone)]
pub struct RoomFloor {
    pub room_id: RoomId,
    pub mesh: Mesh,
    pub material: FloorMaterial,
}

/// Room name placed flat on the floor
#[derive(Debug, Clone, PartialEq)]
pub struct RoomLabel {
    pub room_id: RoomId,
    pub text: String,
    pub position: Point3<f64>,
    pub font_size: f64,
    pub max_width: f64,
}

impl RoomLabel {
    pub fn for_room(room: &Room, config: &WallConfig) -> Self {
        let (cx, cz) = room.center();
        let shorter = room.width.min(room.length) as f64;
        Self {
            room_id: room.id.clone(),
            text: room.name.clone(),
            position: Point3::new(cx, config.floor_elevation + LABEL_LIFT, cz),
            font_size: (shorter * 0.18).clamp(0.25, 0.5),
            max_width: (shorter - 0.5).max(0.5),
        }
    }
}

/// Unit grid drawn over the floor extent
#[derive(Debug, Clone)]
pub struct GridOverlay {
    /// Line segments as endpoint pairs
    pub segments: Vec<[Point3<f64>; 2]>,
    pub material: LineMaterial,
}

impl GridOverlay {
    /// Grid over the `width` x `length` area starting at `(x, z)`
    pub fn new(x: f64, z: f64, width: u32, length: u32, y: f64) -> Self {
        let mut segments = Vec::with_capacity((width + length + 2) as usize);
        for i in 0..=width {
            let gx = x + i as f64;
            segments.push([Point3::new(gx, y, z), Point3::new(gx, y, z + length as f64)]);
        }
        for j in 0..=length {
            let gz = z + j as f64;
            segments.push([Point3::new(x, y, gz), Point3::new(x + width as f64, y, gz)]);
        }
        Self {
            segments,
            material: LineMaterial::default(),
        }
    }

    /// Grid covering the bounding box of a room set. `None` when there is
    /// no valid room or the extent exceeds [`MAX_GRID_OVERLAY_SPAN`].
    pub fn covering(rooms: &[Room]) -> Option<Self> {
        let valid = rooms.iter().filter(|r| !r.is_degenerate());
        let (min_x, min_z, max_x, max_z) = valid.fold(None, |acc, r| {
            let (x0, z0) = (i64::from(r.x), i64::from(r.y));
            let (x1, z1) = (x0 + i64::from(r.width), z0 + i64::from(r.length));
            let (a, b, c, d) = acc.unwrap_or((x0, z0, x1, z1));
            Some((a.min(x0), b.min(z0), c.max(x1), d.max(z1)))
        })?;

        let (width, length) = (max_x - min_x, max_z - min_z);
        if width > MAX_GRID_OVERLAY_SPAN || length > MAX_GRID_OVERLAY_SPAN {
            tracing::warn!(width, length, "Skipping grid overlay for oversized floor");
            return None;
        }
        Some(Self::new(
            min_x as f64,
            min_z as f64,
            u32::try_from(width).ok()?,
            u32::try_from(length).ok()?,
            GRID_OVERLAY_HEIGHT,
        ))
    }
}

/// Renderable contents of one floor
#[derive(Debug, Clone)]
pub struct Scene {
    pub walls: Vec<WallLayer>,
    pub floors: Vec<RoomFloor>,
    pub labels: Vec<RoomLabel>,
    pub grid: Option<GridOverlay>,
}

impl Scene {
    pub fn floor(&self, id: &RoomId) -> Option<&RoomFloor> {
        self.floors.iter().find(|f| &f.room_id == id)
    }

    pub fn label(&self, id: &RoomId) -> Option<&RoomLabel> {
        self.labels.iter().find(|l| &l.room_id == id)
    }

    pub fn wall_layer(&self, category: WallCategory) -> Option<&WallLayer> {
        self.walls.iter().find(|w| w.category == category)
    }
}

/// Assemble the 3D scene from rooms and their wall solids.
///
/// Empty wall categories produce no layer. Degenerate rooms get neither a
/// floor nor a label.
pub fn build_scene(rooms: &[Room], walls: &WallGeometry, config: &WallConfig, theme: Theme) -> Scene {
    let layers = walls
        .iter()
        .filter(|(_, solid)| !solid.is_empty())
        .map(|(category, solid)| {
            let mut cap = solid.cap.clone();
            cap.translate(Vector3::new(0.0, CAP_LIFT, 0.0));
            WallLayer {
                category,
                solid: solid.solid.clone(),
                cap,
                wall_material: FrostedWallMaterial::for_theme(theme),
                cap_material: CapMaterial::for_theme(theme),
                cap_render_order: CAP_RENDER_ORDER,
            }
        })
        .collect();

    let mut floors = Vec::with_capacity(rooms.len());
    let mut labels = Vec::with_capacity(rooms.len());
    for room in rooms {
        if room.is_degenerate() {
            continue;
        }
        match room_floor(room, config) {
            Ok(mesh) => floors.push(RoomFloor {
                room_id: room.id.clone(),
                mesh,
                material: FloorMaterial::for_room_color(&room.color),
            }),
            Err(err) => tracing::warn!(room = %room.id, error = %err, "Skipping room floor"),
        }
        labels.push(RoomLabel::for_room(room, config));
    }

    tracing::debug!(
        wall_layers = walls.iter().filter(|(_, s)| !s.is_empty()).count(),
        floors = floors.len(),
        theme = %theme,
        "Built scene"
    );

    Scene {
        walls: layers,
        floors,
        labels,
        grid: GridOverlay::covering(rooms),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use floorplan_core::GridRect;

    #[test]
    fn test_label_sizing() {
        let config = WallConfig::default();
        let small = Room::new("s", "S", GridRect::new(0, 0, 1, 4), "#ffadad");
        let label = RoomLabel::for_room(&small, &config);
        assert_relative_eq!(label.font_size, 0.25);
        assert_relative_eq!(label.max_width, 0.5);
        assert_relative_eq!(label.position.x, 0.5);
        assert_relative_eq!(label.position.z, 2.0);

        let big = Room::new("b", "B", GridRect::new(0, 0, 5, 6), "#ffadad");
        let label = RoomLabel::for_room(&big, &config);
        assert_relative_eq!(label.font_size, 0.5);
        assert_relative_eq!(label.max_width, 4.5);

        let mid = Room::new("m", "M", GridRect::new(0, 0, 2, 2), "#ffadad");
        assert_relative_eq!(RoomLabel::for_room(&mid, &config).font_size, 0.36);
    }

    #[test]
    fn test_grid_overlay_segments() {
        let grid = GridOverlay::new(0.0, 0.0, 3, 2, GRID_OVERLAY_HEIGHT);
        assert_eq!(grid.segments.len(), 4 + 3);
        assert!(grid.segments.iter().all(|[a, b]| a.y == GRID_OVERLAY_HEIGHT && b.y == GRID_OVERLAY_HEIGHT));
    }

    #[test]
    fn test_grid_covers_rooms() {
        let rooms = vec![
            Room::new("a", "A", GridRect::new(1, 1, 2, 2), "#ffadad"),
            Room::new("b", "B", GridRect::new(3, 0, 1, 4), "#ffd6a5"),
        ];
        let grid = GridOverlay::covering(&rooms).unwrap();
        let [first, last] = grid.segments[0];
        assert_relative_eq!(first.x, 1.0);
        assert_relative_eq!(first.z, 0.0);
        assert_relative_eq!(last.z, 4.0);
        assert!(GridOverlay::covering(&[]).is_none());
    }

    #[test]
    fn test_grid_skipped_for_extreme_extent() {
        let rooms = vec![
            Room::new("west", "W", GridRect::new(-2_000_000_000, 0, 1, 1), "#ffadad"),
            Room::new("east", "E", GridRect::new(2_000_000_000, 0, 1, 1), "#ffd6a5"),
        ];
        assert!(GridOverlay::covering(&rooms).is_none());

        let overflowing = vec![
            Room::new("ok", "Ok", GridRect::new(0, 0, 2, 2), "#ffadad"),
            Room::new("far", "Far", GridRect::new(i32::MAX - 1, 0, 2, 1), "#ffd6a5"),
        ];
        let grid = GridOverlay::covering(&overflowing).unwrap();
        assert_eq!(grid.segments.len(), 3 + 3);
    }
}

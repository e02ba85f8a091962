// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall solids
//!
//! Classified walls are thickened into footprint rectangles, merged per
//! category, extruded to the category's tallest wall and lifted onto the
//! floor. The upward faces of each solid are extracted as a separate cap
//! mesh so they can be drawn opaque over the translucent walls.

use crate::bool2d::PolygonUnion;
use crate::caps::extract_top_faces;
use crate::error::Result;
use crate::extrusion::extrude_profiles;
use crate::mesh::Mesh;
use crate::profile::Profile2D;
use floorplan_core::walls::{max_height, synthesize, Edge, Wall, WallCategory};
use floorplan_core::{Room, WallConfig};
use nalgebra::{Point2, Vector2, Vector3};
use rustc_hash::FxHashMap;

/// Footprint rectangle of a wall segment: the segment offset by
/// `half_thickness` to both sides. Ends are not extended.
///
/// A zero-length segment yields a zero-area rectangle.
pub fn rect_for_segment(edge: &Edge, half_thickness: f64) -> Vec<Point2<f64>> {
    let p1 = Point2::new(edge.x1 as f64, edge.z1 as f64);
    let p2 = Point2::new(edge.x2 as f64, edge.z2 as f64);
    let dir = p2 - p1;
    let len = dir.norm();
    let len = if len > 0.0 { len } else { 1.0 };
    let offset = Vector2::new(-dir.y / len, dir.x / len) * half_thickness;

    vec![p1 + offset, p2 + offset, p2 - offset, p1 - offset]
}

/// Solid and cap for one wall category
#[derive(Debug, Clone, Default)]
pub struct WallSolid {
    /// Extrusion height, `0.0` when the category has no walls
    pub height: f64,
    /// Merged footprint polygons on the floor plane
    pub footprint: Vec<Profile2D>,
    /// Closed solid with its base at floor elevation
    pub solid: Mesh,
    /// Upward-facing triangles of `solid`
    pub cap: Mesh,
}

impl WallSolid {
    pub fn is_empty(&self) -> bool {
        self.solid.is_empty()
    }
}

/// Wall solids for both categories
#[derive(Debug, Clone, Default)]
pub struct WallGeometry {
    pub exterior: WallSolid,
    pub interior: WallSolid,
}

impl WallGeometry {
    pub fn get(&self, category: WallCategory) -> &WallSolid {
        match category {
            WallCategory::Exterior => &self.exterior,
            WallCategory::Interior => &self.interior,
        }
    }

    fn get_mut(&mut self, category: WallCategory) -> &mut WallSolid {
        match category {
            WallCategory::Exterior => &mut self.exterior,
            WallCategory::Interior => &mut self.interior,
        }
    }

    /// Categories paired with their solids, exterior first
    pub fn iter(&self) -> impl Iterator<Item = (WallCategory, &WallSolid)> {
        WallCategory::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    pub fn is_empty(&self) -> bool {
        self.exterior.is_empty() && self.interior.is_empty()
    }
}

/// Build wall solids from classified walls.
///
/// An empty category, or one whose height is not positive, produces empty
/// meshes without affecting the other category.
pub fn build_wall_geometry(
    walls: &[Wall],
    config: &WallConfig,
    union: &dyn PolygonUnion,
) -> Result<WallGeometry> {
    let half = config.half_thickness();

    let mut rects: FxHashMap<WallCategory, Vec<Vec<Point2<f64>>>> = FxHashMap::default();
    for wall in walls {
        rects
            .entry(wall.category())
            .or_default()
            .push(rect_for_segment(&wall.edge, half));
    }

    let mut geometry = WallGeometry::default();
    for category in WallCategory::ALL {
        let Some(height) = max_height(walls, category) else {
            continue;
        };
        if height <= 0.0 || !height.is_finite() {
            tracing::warn!(
                category = category.as_str(),
                height,
                "Skipping wall category with non-positive height"
            );
            continue;
        }
        let footprint = rects
            .get(&category)
            .map(|r| union.union(r))
            .unwrap_or_default();

        let mut solid = extrude_profiles(&footprint, height)?;
        solid.translate(Vector3::new(0.0, config.floor_elevation, 0.0));
        let cap = extract_top_faces(&solid, config.cap_normal_threshold);

        tracing::debug!(
            category = category.as_str(),
            segments = rects.get(&category).map_or(0, Vec::len),
            polygons = footprint.len(),
            triangles = solid.triangle_count(),
            height,
            "Built wall solid"
        );

        *geometry.get_mut(category) = WallSolid {
            height,
            footprint,
            solid,
            cap,
        };
    }

    Ok(geometry)
}

/// Synthesize walls for a room set and build their solids
pub fn wall_geometry_for_rooms(
    rooms: &[Room],
    config: &WallConfig,
    union: &dyn PolygonUnion,
) -> Result<WallGeometry> {
    build_wall_geometry(&synthesize(rooms, config), config, union)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bool2d::{compute_signed_area, OverlayUnion};
    use approx::assert_relative_eq;

    #[test]
    fn test_rect_for_horizontal_segment() {
        let rect = rect_for_segment(&Edge::new(0, 0, 1, 0), 0.05);
        assert_eq!(rect.len(), 4);
        assert_relative_eq!(compute_signed_area(&rect).abs(), 0.1, epsilon = 1e-12);
        assert_relative_eq!(rect[0].y, 0.05);
        assert_relative_eq!(rect[2].y, -0.05);
        assert_relative_eq!(rect[1].x, 1.0);
    }

    #[test]
    fn test_zero_length_segment_is_degenerate() {
        let rect = rect_for_segment(&Edge::new(2, 2, 2, 2), 0.05);
        assert_eq!(compute_signed_area(&rect), 0.0);
    }

    #[test]
    fn test_no_walls_no_geometry() {
        let geometry = build_wall_geometry(&[], &WallConfig::default(), &OverlayUnion).unwrap();
        assert!(geometry.is_empty());
        assert!(geometry.exterior.cap.is_empty());
        assert_eq!(geometry.interior.height, 0.0);
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2D Boolean Operations for Wall Footprints
//!
//! Wall segments are thickened into rectangles that overlap at every corner
//! and junction. They are merged with a polygon union before extrusion so the
//! resulting solid has no internal faces. The union is a capability passed in
//! by the caller ([`PolygonUnion`]): [`OverlayUnion`] is the robust
//! implementation backed by i_overlay, [`PassthroughUnion`] skips merging.

use crate::profile::Profile2D;
use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;
use nalgebra::Point2;

/// Minimum area threshold - polygons smaller than this are considered degenerate
const MIN_AREA_THRESHOLD: f64 = 1e-10;

/// Merges a set of simple polygons into non-overlapping profiles
pub trait PolygonUnion {
    /// Union of `polygons`. Degenerate inputs are ignored; an empty or fully
    /// degenerate input yields no profiles.
    fn union(&self, polygons: &[Vec<Point2<f64>>]) -> Vec<Profile2D>;
}

/// Polygon union using i_overlay
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlayUnion;

impl PolygonUnion for OverlayUnion {
    fn union(&self, polygons: &[Vec<Point2<f64>>]) -> Vec<Profile2D> {
        let mut paths = polygons
            .iter()
            .filter(|c| is_valid_contour(c))
            .map(|c| contour_to_path(&ensure_ccw(c)));

        let Some(first) = paths.next() else {
            return Vec::new();
        };
        let subject: Vec<Vec<[f64; 2]>> = vec![first];
        let clip: Vec<Vec<[f64; 2]>> = paths.collect();

        if clip.is_empty() {
            return shapes_to_profiles(&[subject]);
        }

        // NonZero so that overlapping corners stay filled
        let result = subject.overlay(&clip, OverlayRule::Union, FillRule::NonZero);
        shapes_to_profiles(&result)
    }
}

/// Returns every valid polygon as its own profile without merging.
///
/// Overlapping inputs produce overlapping profiles; intended for tests and
/// previews where internal faces do not matter.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughUnion;

impl PolygonUnion for PassthroughUnion {
    fn union(&self, polygons: &[Vec<Point2<f64>>]) -> Vec<Profile2D> {
        polygons
            .iter()
            .filter(|c| is_valid_contour(c))
            .map(|c| Profile2D::new(ensure_ccw(c)))
            .collect()
    }
}

/// Check if a contour is valid (has area, not degenerate)
pub fn is_valid_contour(contour: &[Point2<f64>]) -> bool {
    if contour.len() < 3 {
        return false;
    }

    let area = compute_signed_area(contour).abs();
    area > MIN_AREA_THRESHOLD
}

/// Compute the signed area of a 2D contour
/// Positive = counter-clockwise, Negative = clockwise
pub fn compute_signed_area(contour: &[Point2<f64>]) -> f64 {
    if contour.len() < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    let n = contour.len();

    for i in 0..n {
        let j = (i + 1) % n;
        area += contour[i].x * contour[j].y;
        area -= contour[j].x * contour[i].y;
    }

    area * 0.5
}

/// Ensure contour has counter-clockwise winding (positive area)
pub fn ensure_ccw(contour: &[Point2<f64>]) -> Vec<Point2<f64>> {
    if compute_signed_area(contour) < 0.0 {
        contour.iter().rev().cloned().collect()
    } else {
        contour.to_vec()
    }
}

/// Ensure contour has clockwise winding (for holes)
pub fn ensure_cw(contour: &[Point2<f64>]) -> Vec<Point2<f64>> {
    if compute_signed_area(contour) > 0.0 {
        contour.iter().rev().cloned().collect()
    } else {
        contour.to_vec()
    }
}

/// Bounding box of a contour
pub fn contour_bounds(contour: &[Point2<f64>]) -> Option<(Point2<f64>, Point2<f64>)> {
    let first = contour.first()?;
    let mut min = *first;
    let mut max = *first;
    for p in &contour[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Some((min, max))
}

/// Convert a Point2 contour to i_overlay path format
fn contour_to_path(contour: &[Point2<f64>]) -> Vec<[f64; 2]> {
    contour.iter().map(|p| [p.x, p.y]).collect()
}

/// Convert i_overlay result shapes to profiles
///
/// Each shape is a list of contours: the first is the outer boundary and the
/// rest are holes.
fn shapes_to_profiles(shapes: &[Vec<Vec<[f64; 2]>>]) -> Vec<Profile2D> {
    let to_points =
        |path: &Vec<[f64; 2]>| -> Vec<Point2<f64>> { path.iter().map(|p| Point2::new(p[0], p[1])).collect() };

    shapes
        .iter()
        .filter_map(|shape| {
            let (outer, holes) = shape.split_first()?;
            let outer = to_points(outer);
            if !is_valid_contour(&outer) {
                return None;
            }
            let holes = holes
                .iter()
                .map(to_points)
                .filter(|h| is_valid_contour(h))
                .map(|h| ensure_cw(&h))
                .collect();
            Some(Profile2D::with_holes(ensure_ccw(&outer), holes))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Point2<f64>> {
        vec![
            Point2::new(x0, y0),
            Point2::new(x1, y0),
            Point2::new(x1, y1),
            Point2::new(x0, y1),
        ]
    }

    #[test]
    fn test_signed_area_orientation() {
        let ccw = rect(0.0, 0.0, 2.0, 1.0);
        assert!((compute_signed_area(&ccw) - 2.0).abs() < 1e-12);
        let cw: Vec<_> = ccw.iter().rev().cloned().collect();
        assert!(compute_signed_area(&cw) < 0.0);
        assert!(compute_signed_area(&ensure_ccw(&cw)) > 0.0);
        assert!(compute_signed_area(&ensure_cw(&ccw)) < 0.0);
    }

    #[test]
    fn test_overlapping_corner_merges() {
        // an L made of two overlapping strips
        let horizontal = rect(-0.05, -0.05, 2.05, 0.05);
        let vertical = rect(-0.05, -0.05, 0.05, 2.05);
        let merged = OverlayUnion.union(&[horizontal.clone(), vertical.clone()]);

        assert_eq!(merged.len(), 1);
        let expected = 2.1 * 0.1 * 2.0 - 0.1 * 0.1;
        assert!((merged[0].area() - expected).abs() < 1e-6);

        let separate = PassthroughUnion.union(&[horizontal, vertical]);
        assert_eq!(separate.len(), 2);
    }

    #[test]
    fn test_closed_ring_has_hole() {
        let strips = vec![
            rect(-0.05, -0.05, 2.05, 0.05),
            rect(-0.05, 1.95, 2.05, 2.05),
            rect(-0.05, -0.05, 0.05, 2.05),
            rect(1.95, -0.05, 2.05, 2.05),
        ];
        let merged = OverlayUnion.union(&strips);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].holes.len(), 1);
        assert!(compute_signed_area(&merged[0].outer) > 0.0);
        assert!(compute_signed_area(&merged[0].holes[0]) < 0.0);
    }

    #[test]
    fn test_degenerate_input_is_empty() {
        assert!(OverlayUnion.union(&[]).is_empty());
        let flat = rect(0.0, 0.0, 1.0, 0.0);
        assert!(OverlayUnion.union(&[flat.clone()]).is_empty());
        assert!(PassthroughUnion.union(&[flat]).is_empty());
    }

    #[test]
    fn test_disjoint_inputs_stay_separate() {
        let merged = OverlayUnion.union(&[rect(0.0, 0.0, 1.0, 1.0), rect(3.0, 0.0, 4.0, 1.0)]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_contour_bounds() {
        let (min, max) = contour_bounds(&rect(-1.0, 2.0, 3.0, 0.5)).unwrap();
        assert_eq!(min, Point2::new(-1.0, 0.5));
        assert_eq!(max, Point2::new(3.0, 2.0));
        assert!(contour_bounds(&[]).is_none());
    }
}

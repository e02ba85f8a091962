// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extrusion operations - converting 2D floor-plane profiles to 3D meshes
//!
//! Profiles are extruded upward along +Y from `y = 0`. Profile point
//! `(x, z)` becomes vertex `(x, y, z)`.

use crate::bool2d::{ensure_ccw, ensure_cw, is_valid_contour};
use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::profile::{Profile2D, Triangulation};
use nalgebra::{Point2, Point3, Vector3};

/// Extrude a profile upward by `height`
pub fn extrude_profile(profile: &Profile2D, height: f64) -> Result<Mesh> {
    if height <= 0.0 || !height.is_finite() {
        return Err(Error::InvalidExtrusion(format!(
            "Height must be positive, got {}",
            height
        )));
    }

    if !is_valid_contour(&profile.outer) {
        return Err(Error::InvalidProfile(
            "Outer boundary has no area".to_string(),
        ));
    }

    let triangulation = profile.triangulate()?;

    let side_vertex_count =
        (profile.outer.len() + profile.holes.iter().map(Vec::len).sum::<usize>()) * 4;
    let mut mesh = Mesh::with_capacity(
        triangulation.points.len() * 2 + side_vertex_count,
        triangulation.indices.len() * 2 + side_vertex_count / 4 * 6,
    );

    create_cap_mesh(&triangulation, 0.0, false, &mut mesh);
    create_cap_mesh(&triangulation, height, true, &mut mesh);

    create_side_walls(&ensure_ccw(&profile.outer), height, &mut mesh);
    for hole in &profile.holes {
        create_side_walls(&ensure_cw(hole), height, &mut mesh);
    }

    Ok(mesh)
}

/// Extrude every profile by the same height and merge the results.
///
/// A profile that fails to triangulate is skipped with a warning.
pub fn extrude_profiles(profiles: &[Profile2D], height: f64) -> Result<Mesh> {
    if height <= 0.0 || !height.is_finite() {
        return Err(Error::InvalidExtrusion(format!(
            "Height must be positive, got {}",
            height
        )));
    }

    let mut mesh = Mesh::new();
    for profile in profiles {
        match extrude_profile(profile, height) {
            Ok(part) => mesh.merge(&part),
            Err(err) => {
                tracing::warn!(error = %err, vertices = profile.outer.len(), "Skipping profile");
            }
        }
    }
    Ok(mesh)
}

/// Horizontal cap at height `y` facing up or down
fn create_cap_mesh(triangulation: &Triangulation, y: f64, facing_up: bool, mesh: &mut Mesh) {
    let base_index = mesh.vertex_count() as u32;
    let normal = if facing_up {
        Vector3::new(0.0, 1.0, 0.0)
    } else {
        Vector3::new(0.0, -1.0, 0.0)
    };

    for point in &triangulation.points {
        mesh.add_vertex(Point3::new(point.x, y, point.y), normal);
    }

    for tri in triangulation.indices.chunks_exact(3) {
        let (a, b, c) = (
            triangulation.points[tri[0]],
            triangulation.points[tri[1]],
            triangulation.points[tri[2]],
        );
        // In (x, z) a counter-clockwise triangle faces -Y
        let faces_up = plan_cross(a, b, c) < 0.0;

        let i0 = base_index + tri[0] as u32;
        let i1 = base_index + tri[1] as u32;
        let i2 = base_index + tri[2] as u32;
        if faces_up == facing_up {
            mesh.add_triangle(i0, i1, i2);
        } else {
            mesh.add_triangle(i0, i2, i1);
        }
    }
}

#[inline]
fn plan_cross(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Vertical quads along a boundary, facing right of the direction of travel.
/// Outer boundaries are counter-clockwise and holes clockwise.
fn create_side_walls(boundary: &[Point2<f64>], height: f64, mesh: &mut Mesh) {
    let base_index = mesh.vertex_count() as u32;
    let mut quad_count = 0u32;

    for i in 0..boundary.len() {
        let j = (i + 1) % boundary.len();

        let p0 = &boundary[i];
        let p1 = &boundary[j];

        let (dx, dz) = (p1.x - p0.x, p1.y - p0.y);
        let normal = match Vector3::new(dz, 0.0, -dx).try_normalize(1e-10) {
            Some(n) => n,
            None => continue, // duplicate consecutive points
        };

        let v0_bottom = Point3::new(p0.x, 0.0, p0.y);
        let v1_bottom = Point3::new(p1.x, 0.0, p1.y);
        let v1_top = Point3::new(p1.x, height, p1.y);
        let v0_top = Point3::new(p0.x, height, p0.y);

        let idx = base_index + (quad_count * 4);
        mesh.add_vertex(v0_bottom, normal);
        mesh.add_vertex(v1_bottom, normal);
        mesh.add_vertex(v1_top, normal);
        mesh.add_vertex(v0_top, normal);

        mesh.add_triangle(idx, idx + 2, idx + 1);
        mesh.add_triangle(idx, idx + 3, idx + 2);

        quad_count += 1;
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Top-surface extraction

use crate::mesh::Mesh;
use nalgebra::Vector3;
use rustc_hash::FxHashMap;

/// Triangles of `mesh` whose face normal has a Y component above
/// `threshold`, as a standalone mesh.
///
/// Face normals come from the triangle winding, not the stored vertex
/// normals. Shared vertices are copied once.
pub fn extract_top_faces(mesh: &Mesh, threshold: f64) -> Mesh {
    let mut cap = Mesh::new();
    let mut remap: FxHashMap<u32, u32> = FxHashMap::default();

    for t in 0..mesh.triangle_count() {
        let Some(normal) = mesh.face_normal(t) else {
            continue;
        };
        if normal.y <= threshold {
            continue;
        }

        let mut out = [0u32; 3];
        for (slot, index) in out.iter_mut().zip(mesh.triangle(t)) {
            *slot = *remap.entry(index).or_insert_with(|| {
                cap.add_vertex(mesh.position(index), Vector3::new(0.0, 1.0, 0.0));
                (cap.vertex_count() - 1) as u32
            });
        }
        cap.add_triangle(out[0], out[1], out[2]);
    }

    cap
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extrusion::extrude_profile;
    use crate::profile::Profile2D;
    use nalgebra::Point2;

    #[test]
    fn test_box_top_only() {
        let profile = Profile2D::rectangle(Point2::new(0.0, 0.0), Point2::new(2.0, 1.0));
        let solid = extrude_profile(&profile, 0.5).unwrap();
        let cap = extract_top_faces(&solid, 0.9);

        assert_eq!(cap.triangle_count(), 2);
        assert_eq!(cap.vertex_count(), 4);
        let (min, max) = cap.bounds();
        assert_eq!(min.y, 0.5);
        assert_eq!(max.y, 0.5);
        for t in 0..cap.triangle_count() {
            assert!(cap.face_normal(t).unwrap().y > 0.9);
        }
    }

    #[test]
    fn test_empty_mesh() {
        assert!(extract_top_faces(&Mesh::new(), 0.9).is_empty());
    }
}

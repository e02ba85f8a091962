// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wavefront OBJ/MTL export of a scene
//!
//! Meshes are already Y-up, so positions and normals are written as-is.

use std::io::{self, Write};

use floorplan_core::Color;
use floorplan_geometry::Mesh;

use crate::scene::Scene;

/// One named mesh with its material
#[derive(Debug, Clone, Copy)]
pub struct ObjGroup<'a> {
    pub name: &'a str,
    pub material: &'a str,
    pub mesh: &'a Mesh,
}

/// A named MTL entry
#[derive(Debug, Clone, PartialEq)]
pub struct MtlEntry {
    pub name: String,
    pub diffuse: Color,
    pub opacity: f32,
}

/// Group and material names for every non-empty scene mesh
pub struct ObjExport<'a> {
    names: Vec<(String, String, &'a Mesh)>,
    materials: Vec<MtlEntry>,
}

impl<'a> ObjExport<'a> {
    pub fn from_scene(scene: &'a Scene) -> Self {
        let mut names = Vec::new();
        let mut materials = Vec::new();

        for layer in &scene.walls {
            let category = layer.category.as_str();
            let wall = format!("walls_{}", category);
            let cap = format!("caps_{}", category);
            materials.push(MtlEntry {
                name: wall.clone(),
                diffuse: layer.wall_material.color,
                opacity: layer.wall_material.opacity,
            });
            materials.push(MtlEntry {
                name: cap.clone(),
                diffuse: layer.cap_material.color,
                opacity: 1.0,
            });
            names.push((wall.clone(), wall, &layer.solid));
            names.push((cap.clone(), cap, &layer.cap));
        }

        for floor in &scene.floors {
            let name = format!("floor_{}", floor.room_id);
            materials.push(MtlEntry {
                name: name.clone(),
                diffuse: floor.material.color,
                opacity: 1.0,
            });
            names.push((name.clone(), name, &floor.mesh));
        }

        names.retain(|(_, _, mesh)| !mesh.is_empty());
        Self { names, materials }
    }

    pub fn groups(&self) -> Vec<ObjGroup<'_>> {
        self.names
            .iter()
            .map(|(name, material, mesh)| ObjGroup { name, material, mesh })
            .collect()
    }

    pub fn materials(&self) -> &[MtlEntry] {
        &self.materials
    }
}

/// Write groups as OBJ, referencing `mtllib` when given
pub fn write_obj<W: Write>(out: &mut W, groups: &[ObjGroup<'_>], mtllib: Option<&str>) -> io::Result<()> {
    writeln!(out, "# Generated by floorplan-to-obj")?;
    writeln!(out, "# Coordinate system: Y-up, 1 unit = 1 m")?;
    if let Some(lib) = mtllib {
        writeln!(out, "mtllib {}", lib)?;
    }
    writeln!(out)?;

    let mut vertex_offset: u32 = 0;
    for group in groups {
        let mesh = group.mesh;
        writeln!(out, "o {}", group.name)?;
        writeln!(out, "usemtl {}", group.material)?;

        for p in mesh.positions.chunks_exact(3) {
            writeln!(out, "v {:.6} {:.6} {:.6}", p[0], p[1], p[2])?;
        }
        for n in mesh.normals.chunks_exact(3) {
            writeln!(out, "vn {:.6} {:.6} {:.6}", n[0], n[1], n[2])?;
        }
        for tri in mesh.indices.chunks_exact(3) {
            let [i0, i1, i2] = [tri[0], tri[1], tri[2]].map(|i| i + vertex_offset + 1);
            writeln!(out, "f {}//{} {}//{} {}//{}", i0, i0, i1, i1, i2, i2)?;
        }

        vertex_offset += mesh.vertex_count() as u32;
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_mtl<W: Write>(out: &mut W, materials: &[MtlEntry]) -> io::Result<()> {
    writeln!(out, "# Generated by floorplan-to-obj")?;
    for entry in materials {
        let [r, g, b, _] = entry.diffuse.to_f32();
        writeln!(out)?;
        writeln!(out, "newmtl {}", entry.name)?;
        writeln!(out, "Kd {:.4} {:.4} {:.4}", r, g, b)?;
        writeln!(out, "d {:.4}", entry.opacity)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Point3, Vector3};

    fn triangle() -> Mesh {
        let mut mesh = Mesh::new();
        let n = Vector3::new(0.0, 1.0, 0.0);
        mesh.add_vertex(Point3::new(0.0, 0.0, 0.0), n);
        mesh.add_vertex(Point3::new(0.0, 0.0, 1.0), n);
        mesh.add_vertex(Point3::new(1.0, 0.0, 0.0), n);
        mesh.add_triangle(0, 1, 2);
        mesh
    }

    #[test]
    fn test_indices_offset_across_groups() {
        let mesh = triangle();
        let groups = [
            ObjGroup { name: "a", material: "m", mesh: &mesh },
            ObjGroup { name: "b", material: "m", mesh: &mesh },
        ];
        let mut out = Vec::new();
        write_obj(&mut out, &groups, Some("scene.mtl")).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("mtllib scene.mtl"));
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 6);
        let faces: Vec<&str> = text.lines().filter(|l| l.starts_with("f ")).collect();
        assert_eq!(faces, ["f 1//1 2//2 3//3", "f 4//4 5//5 6//6"]);
    }

    #[test]
    fn test_mtl_entries() {
        let entries = [MtlEntry {
            name: "walls_exterior".into(),
            diffuse: Color::WHITE,
            opacity: 0.96,
        }];
        let mut out = Vec::new();
        write_mtl(&mut out, &entries).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("newmtl walls_exterior"));
        assert!(text.contains("Kd 1.0000 1.0000 1.0000"));
        assert!(text.contains("d 0.9600"));
    }
}

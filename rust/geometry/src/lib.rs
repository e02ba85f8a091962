// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floorplan Geometry Processing
//!
//! Turns classified walls into renderable solids: footprint rectangles are
//! merged with a pluggable polygon union, triangulated with earcutr and
//! extruded with nalgebra math. Meshes are Y-up.

pub mod bool2d;
pub mod caps;
pub mod error;
pub mod extrusion;
pub mod floor;
pub mod mesh;
pub mod profile;
pub mod triangulation;
pub mod wall_solids;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector2, Vector3};

pub use bool2d::{OverlayUnion, PassthroughUnion, PolygonUnion};
pub use caps::extract_top_faces;
pub use error::{Error, Result};
pub use extrusion::{extrude_profile, extrude_profiles};
pub use floor::{room_floor, FLOOR_THICKNESS};
pub use mesh::Mesh;
pub use profile::{Profile2D, Triangulation};
pub use triangulation::triangulate_polygon;
pub use wall_solids::{
    build_wall_geometry, rect_for_segment, wall_geometry_for_rooms, WallGeometry, WallSolid,
};

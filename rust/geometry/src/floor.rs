// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room floor slabs

use crate::error::Result;
use crate::extrusion::extrude_profile;
use crate::mesh::Mesh;
use crate::profile::Profile2D;
use floorplan_core::{Room, WallConfig};
use nalgebra::{Point2, Vector3};

/// Thickness of a room's floor slab
pub const FLOOR_THICKNESS: f64 = 0.1;

/// Slab covering a room's rectangle, centred vertically on the floor
/// elevation.
pub fn room_floor(room: &Room, config: &WallConfig) -> Result<Mesh> {
    let profile = Profile2D::rectangle(
        Point2::new(room.x as f64, room.y as f64),
        Point2::new((room.x + room.width) as f64, (room.y + room.length) as f64),
    );
    let mut slab = extrude_profile(&profile, FLOOR_THICKNESS)?;
    slab.translate(Vector3::new(0.0, config.floor_elevation - FLOOR_THICKNESS / 2.0, 0.0));
    Ok(slab)
}

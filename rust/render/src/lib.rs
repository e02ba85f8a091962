// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floorplan Rendering Adapters
//!
//! Host-neutral outputs for the floor plan editor: 2D draw commands for a
//! canvas host, a 3D scene of wall solids, caps, floors and labels, and
//! Wavefront OBJ export of that scene.

pub mod cache;
pub mod canvas;
pub mod material;
pub mod obj;
pub mod scene;

pub use cache::WallCache;
pub use canvas::{draw_commands, DrawCommand, TextAlign, WorldRect};
pub use material::{CapMaterial, FloorMaterial, FrostedWallMaterial, LineMaterial, Side, Theme};
pub use obj::{write_mtl, write_obj, MtlEntry, ObjExport, ObjGroup};
pub use scene::{build_scene, GridOverlay, RoomFloor, RoomLabel, Scene, WallLayer};

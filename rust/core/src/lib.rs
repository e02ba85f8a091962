// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Floorplan Core
//!
//! Room model, grid math, interactive authoring and wall synthesis for
//! grid-based floor plans.
//!
//! ## Overview
//!
//! - **Rooms**: integer-grid rectangles with a name and color ([`Room`])
//! - **Grid**: screen/world transforms and snapping ([`Viewport`])
//! - **Editor**: the draw / select / move / resize state machine ([`Editor`])
//! - **Walls**: unit-edge classification into exterior and interior walls
//!   ([`synthesize`])
//! - **Placement**: point-in-room queries and device placement rules
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use floorplan_core::{synthesize, GridRect, Room, WallConfig};
//!
//! let rooms = vec![
//!     Room::new("a", "Living", GridRect::new(0, 0, 2, 2), "#ffadad"),
//!     Room::new("b", "Kitchen", GridRect::new(2, 0, 2, 2), "#ffd6a5"),
//! ];
//! let walls = synthesize(&rooms, &WallConfig::default());
//! assert_eq!(walls.len(), 14);
//! ```

pub mod color;
pub mod config;
pub mod device;
pub mod editor;
pub mod error;
pub mod grid;
pub mod placement;
pub mod room;
pub mod walls;

pub use color::{validate_color, Color};
pub use config::{EditorConfig, WallConfig, DEFAULT_ROOM_COLORS};
pub use device::{DeviceKind, DeviceState};
pub use editor::{
    DrawPreview, DrawState, Editor, Effect, Interaction, MoveState, ResizeHandle, ResizeState,
    RoomPatch, Tool,
};
pub use error::{Error, Result};
pub use grid::{screen_to_world, snap_to_cell, snap_to_grid, world_to_screen, Viewport};
pub use placement::{find_containing_room, validate_device_placement, PlacementValidation};
pub use room::{
    collides, is_valid_room_set, normalize_origin, rooms_from_json, rooms_to_json, validate_name,
    GridRect, Room, RoomId,
};
pub use walls::{
    count_edges, extract_edges, max_height, stub_overrides, synthesize, Edge, HeightTier, Wall,
    WallCategory, WallClass,
};

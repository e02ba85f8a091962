// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Resize handles and hit testing

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::grid::snap_to_cell;
use crate::room::{GridRect, Room};

/// Corner handle of the selected room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeHandle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeHandle {
    /// Hit-test order
    pub const ALL: [ResizeHandle; 4] = [
        ResizeHandle::TopLeft,
        ResizeHandle::TopRight,
        ResizeHandle::BottomLeft,
        ResizeHandle::BottomRight,
    ];

    /// Corner position in world units
    pub fn position(self, room: &Room, grid_size: f64) -> Point2<f64> {
        let left = room.x as f64 * grid_size;
        let top = room.y as f64 * grid_size;
        let right = (room.x as f64 + room.width as f64) * grid_size;
        let bottom = (room.y as f64 + room.length as f64) * grid_size;
        match self {
            ResizeHandle::TopLeft => Point2::new(left, top),
            ResizeHandle::TopRight => Point2::new(right, top),
            ResizeHandle::BottomLeft => Point2::new(left, bottom),
            ResizeHandle::BottomRight => Point2::new(right, bottom),
        }
    }

    /// Rectangle obtained by dragging this corner to `world`, keeping the
    /// opposite corner of `room` fixed.
    pub fn drag(self, room: &Room, world: Point2<f64>, grid_size: f64) -> GridRect {
        let cx = snap_to_cell(world.x, grid_size);
        let cy = snap_to_cell(world.y, grid_size);
        let rect = room.rect();
        let (right, bottom) = (rect.right(), rect.bottom());
        match self {
            ResizeHandle::TopLeft => GridRect::new(cx, cy, right.saturating_sub(cx), bottom.saturating_sub(cy)),
            ResizeHandle::TopRight => GridRect::new(room.x, cy, cx.saturating_sub(room.x), bottom.saturating_sub(cy)),
            ResizeHandle::BottomLeft => GridRect::new(cx, room.y, right.saturating_sub(cx), cy.saturating_sub(room.y)),
            ResizeHandle::BottomRight => GridRect::new(room.x, room.y, cx.saturating_sub(room.x), cy.saturating_sub(room.y)),
        }
    }
}

/// Handle of `room` within `handle_size / zoom` world units of `world`
pub fn handle_at(
    world: Point2<f64>,
    room: &Room,
    grid_size: f64,
    handle_size: f64,
    zoom: f64,
) -> Option<ResizeHandle> {
    let radius = handle_size / zoom;
    ResizeHandle::ALL.into_iter().find(|handle| {
        let corner = handle.position(room, grid_size);
        (world.x - corner.x).abs() <= radius && (world.y - corner.y).abs() <= radius
    })
}

/// Whether a world point lies inside a room, boundary inclusive
pub fn room_contains_world(room: &Room, world: Point2<f64>, grid_size: f64) -> bool {
    room.contains_point(world.x / grid_size, world.y / grid_size)
}

/// Topmost room under a world point (last in list order)
pub fn room_at<'a>(rooms: &'a [Room], world: Point2<f64>, grid_size: f64) -> Option<&'a Room> {
    rooms
        .iter()
        .rev()
        .find(|room| room_contains_world(room, world, grid_size))
}

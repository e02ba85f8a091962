// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Interaction states and pointer transitions
//!
//! Transitions are pure: they take the current state and a read-only view of
//! the editor and return the next state plus an [`Effect`] for the editor to
//! apply. Only one interaction can be active at a time.

use nalgebra::Point2;

use super::handles::{handle_at, room_at, ResizeHandle};
use crate::config::EditorConfig;
use crate::grid::{snap_point, snap_to_cell};
use crate::room::{collides, GridRect, Room, RoomId};

/// Active tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tool {
    #[default]
    Select,
    Draw,
}

impl Tool {
    /// Keyboard shortcut: `v` selects, `d` draws
    pub fn from_shortcut(key: char) -> Option<Tool> {
        match key {
            'v' | 'V' => Some(Tool::Select),
            'd' | 'D' => Some(Tool::Draw),
            _ => None,
        }
    }
}

/// A room being drawn, in snapped world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawState {
    pub start: Point2<f64>,
    pub current: Point2<f64>,
    /// Whether the candidate rectangle avoids every existing room
    pub valid: bool,
}

impl DrawState {
    /// Candidate rectangle in grid units
    pub fn rect(&self, grid_size: f64) -> GridRect {
        let x0 = snap_to_cell(self.start.x, grid_size);
        let y0 = snap_to_cell(self.start.y, grid_size);
        let x1 = snap_to_cell(self.current.x, grid_size);
        let y1 = snap_to_cell(self.current.y, grid_size);
        GridRect::new(x0.min(x1), y0.min(y1), (x1 - x0).abs(), (y1 - y0).abs())
    }
}

/// A selected room being dragged
#[derive(Debug, Clone, PartialEq)]
pub struct MoveState {
    pub room_id: RoomId,
    /// World point where the drag started
    pub anchor: Point2<f64>,
    /// Snapped offset in grid units
    pub delta: (i32, i32),
    /// Room as it was when the drag started
    pub original: Room,
    /// Uncommitted result of the drag
    pub proposed: Room,
}

/// A selected room being resized from one corner
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeState {
    pub room_id: RoomId,
    pub handle: ResizeHandle,
    pub original: Room,
    /// Last proposal with both dimensions at least one unit
    pub proposed: Room,
}

/// Interaction state machine
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Drawing(DrawState),
    Moving(MoveState),
    Resizing(ResizeState),
}

impl Interaction {
    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, Interaction::Idle)
    }

    /// Uncommitted room of a move or resize
    pub fn temp_room(&self) -> Option<&Room> {
        match self {
            Interaction::Moving(state) => Some(&state.proposed),
            Interaction::Resizing(state) => Some(&state.proposed),
            _ => None,
        }
    }
}

/// Read-only editor context for a transition
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub rooms: &'a [Room],
    pub selected: Option<&'a RoomId>,
    pub tool: Tool,
    pub zoom: f64,
    pub config: &'a EditorConfig,
}

impl Context<'_> {
    fn selected_room(&self) -> Option<&Room> {
        let id = self.selected?;
        self.rooms.iter().find(|r| &r.id == id)
    }
}

/// Change requested by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Change the selection
    Select(Option<RoomId>),
    /// Append a newly drawn room and select it
    Add(Room),
    /// Replace the room with the same id
    Replace(Room),
}

/// Pointer pressed at a world position
pub fn pointer_down(state: Interaction, ctx: &Context<'_>, world: Point2<f64>) -> (Interaction, Effect) {
    if !state.is_idle() {
        // Finish or cancel the active interaction first
        return (state, Effect::None);
    }

    if ctx.tool == Tool::Draw {
        let start = snap_point(world, ctx.config.grid_size);
        return (
            Interaction::Drawing(DrawState {
                start,
                current: start,
                valid: true,
            }),
            Effect::None,
        );
    }

    if let Some(selected) = ctx.selected_room() {
        if let Some(handle) = handle_at(
            world,
            selected,
            ctx.config.grid_size,
            ctx.config.handle_size,
            ctx.zoom,
        ) {
            return (
                Interaction::Resizing(ResizeState {
                    room_id: selected.id.clone(),
                    handle,
                    original: selected.clone(),
                    proposed: selected.clone(),
                }),
                Effect::None,
            );
        }
    }

    match room_at(ctx.rooms, world, ctx.config.grid_size) {
        Some(room) if ctx.selected == Some(&room.id) => (
            Interaction::Moving(MoveState {
                room_id: room.id.clone(),
                anchor: world,
                delta: (0, 0),
                original: room.clone(),
                proposed: room.clone(),
            }),
            Effect::None,
        ),
        Some(room) => (Interaction::Idle, Effect::Select(Some(room.id.clone()))),
        None => (Interaction::Idle, Effect::Select(None)),
    }
}

/// Pointer moved to a world position
pub fn pointer_move(state: Interaction, ctx: &Context<'_>, world: Point2<f64>) -> Interaction {
    let grid = ctx.config.grid_size;
    match state {
        Interaction::Idle => Interaction::Idle,
        Interaction::Drawing(mut draw) => {
            draw.current = snap_point(world, grid);
            let rect = draw.rect(grid);
            // Zero-area candidates keep the previous verdict
            if rect.has_area() {
                draw.valid = !collides(&rect, ctx.rooms, None);
            }
            Interaction::Drawing(draw)
        }
        Interaction::Moving(mut mv) => {
            let dx = snap_to_cell(world.x - mv.anchor.x, grid);
            let dy = snap_to_cell(world.y - mv.anchor.y, grid);
            mv.delta = (dx, dy);
            let rect = mv.original.rect();
            mv.proposed = mv.original.with_rect(GridRect::new(
                rect.x.saturating_add(dx),
                rect.y.saturating_add(dy),
                rect.width,
                rect.length,
            ));
            Interaction::Moving(mv)
        }
        Interaction::Resizing(mut rs) => {
            let rect = rs.handle.drag(&rs.original, world, grid);
            if rect.width >= 1 && rect.length >= 1 {
                rs.proposed = rs.original.with_rect(rect);
            }
            Interaction::Resizing(rs)
        }
    }
}

/// Pointer released; commits valid results and returns to idle
pub fn pointer_up(state: Interaction, ctx: &Context<'_>) -> Effect {
    match state {
        Interaction::Idle => Effect::None,
        Interaction::Drawing(draw) => {
            let rect = draw.rect(ctx.config.grid_size);
            if !rect.has_area() || collides(&rect, ctx.rooms, None) {
                return Effect::None;
            }
            Effect::Add(Room::new(
                RoomId::generate(),
                ctx.config.default_room_name.clone(),
                rect,
                ctx.config.palette_color(ctx.rooms.len()),
            ))
        }
        Interaction::Moving(MoveState { proposed, .. })
        | Interaction::Resizing(ResizeState { proposed, .. }) => {
            if collides(&proposed.rect(), ctx.rooms, Some(&proposed.id)) {
                Effect::None
            } else {
                Effect::Replace(proposed)
            }
        }
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Interactive room authoring
//!
//! [`Editor`] owns the room list and is the only writer to it. Pointer events
//! arrive in screen coordinates, are converted through the viewport, and are
//! fed to the pure transitions in [`interaction`]. Invalid results (overlaps,
//! dimensions below one unit, zero-area drawings) are discarded silently; the
//! caller only sees validity flags and the unchanged room list.

pub mod handles;
pub mod interaction;

use nalgebra::Point2;

pub use handles::ResizeHandle;
pub use interaction::{DrawState, Effect, Interaction, MoveState, ResizeState, Tool};

use crate::color::validate_color;
use crate::config::EditorConfig;
use crate::error::{Error, Result};
use crate::grid::{wheel_zoom_factor, Viewport};
use crate::room::{normalize_origin, validate_name, GridRect, Room, RoomId};

/// Property changes for the selected room
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomPatch {
    pub name: Option<String>,
    pub color: Option<String>,
}

/// In-progress drawing as shown to the user
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawPreview {
    /// Candidate in world units: min corner and size
    pub origin: Point2<f64>,
    pub width: f64,
    pub height: f64,
    /// Candidate in grid units
    pub rect: GridRect,
    pub valid: bool,
}

/// Room authoring state machine
#[derive(Debug, Clone)]
pub struct Editor {
    rooms: Vec<Room>,
    selected: Option<RoomId>,
    tool: Tool,
    interaction: Interaction,
    viewport: Viewport,
    config: EditorConfig,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            rooms: Vec::new(),
            selected: None,
            tool: Tool::Select,
            interaction: Interaction::Idle,
            viewport: Viewport::new(config.min_zoom, config.max_zoom),
            config,
        }
    }

    /// Editor over an existing room list
    pub fn with_rooms(config: EditorConfig, rooms: Vec<Room>) -> Self {
        let mut editor = Self::new(config);
        editor.rooms = rooms;
        editor
    }

    /// Replace the room list (e.g. after loading a floor). Resets selection
    /// and abandons any interaction.
    pub fn load_rooms(&mut self, rooms: Vec<Room>) {
        self.rooms = rooms;
        self.selected = None;
        self.interaction = Interaction::Idle;
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn selected_id(&self) -> Option<&RoomId> {
        self.selected.as_ref()
    }

    pub fn selected_room(&self) -> Option<&Room> {
        let id = self.selected.as_ref()?;
        self.rooms.iter().find(|r| &r.id == id)
    }

    /// Uncommitted room of an active move or resize
    pub fn temp_room(&self) -> Option<&Room> {
        self.interaction.temp_room()
    }

    /// Candidate rectangle of an active drawing
    pub fn draw_preview(&self) -> Option<DrawPreview> {
        let Interaction::Drawing(draw) = &self.interaction else {
            return None;
        };
        let grid = self.config.grid_size;
        Some(DrawPreview {
            origin: Point2::new(draw.start.x.min(draw.current.x), draw.start.y.min(draw.current.y)),
            width: (draw.current.x - draw.start.x).abs(),
            height: (draw.current.y - draw.start.y).abs(),
            rect: draw.rect(grid),
            valid: draw.valid,
        })
    }

    /// Validity of the active drawing; `true` when not drawing
    pub fn is_valid_placement(&self) -> bool {
        match &self.interaction {
            Interaction::Drawing(draw) => draw.valid,
            _ => true,
        }
    }

    /// Whether the properties panel may be shown
    pub fn can_edit_properties(&self) -> bool {
        self.selected.is_some()
            && !matches!(
                self.interaction,
                Interaction::Moving(_) | Interaction::Resizing(_)
            )
    }

    /// Switch tools. Not permitted while an interaction is active.
    pub fn set_tool(&mut self, tool: Tool) -> Result<()> {
        if !self.interaction.is_idle() {
            return Err(Error::InteractionInProgress);
        }
        self.tool = tool;
        Ok(())
    }

    /// Apply a keyboard shortcut, returning the tool it selected
    pub fn handle_shortcut(&mut self, key: char) -> Option<Tool> {
        let tool = Tool::from_shortcut(key)?;
        self.set_tool(tool).ok().map(|_| tool)
    }

    pub fn select(&mut self, id: Option<RoomId>) -> Result<()> {
        if let Some(id) = &id {
            if !self.rooms.iter().any(|r| &r.id == id) {
                return Err(Error::RoomNotFound(id.clone()));
            }
        }
        self.selected = id;
        Ok(())
    }

    fn context(&self) -> interaction::Context<'_> {
        interaction::Context {
            rooms: &self.rooms,
            selected: self.selected.as_ref(),
            tool: self.tool,
            zoom: self.viewport.zoom,
            config: &self.config,
        }
    }

    /// Pointer pressed at a screen position. Returns true if a room, handle
    /// or drawing consumed the event.
    pub fn pointer_down(&mut self, screen: Point2<f64>) -> bool {
        let world = self.viewport.screen_to_world(screen);
        let state = std::mem::take(&mut self.interaction);
        let (next, effect) = interaction::pointer_down(state, &self.context(), world);
        let consumed = !next.is_idle() || matches!(effect, Effect::Select(Some(_)));
        self.interaction = next;
        self.apply(effect);
        consumed
    }

    /// Pointer moved to a screen position
    pub fn pointer_move(&mut self, screen: Point2<f64>) {
        if self.interaction.is_idle() {
            return;
        }
        let world = self.viewport.screen_to_world(screen);
        let state = std::mem::take(&mut self.interaction);
        self.interaction = interaction::pointer_move(state, &self.context(), world);
    }

    /// Pointer released: commit the active interaction if it is valid
    pub fn pointer_up(&mut self) {
        let state = std::mem::take(&mut self.interaction);
        let effect = interaction::pointer_up(state, &self.context());
        self.apply(effect);
    }

    /// Pointer left the surface: discard the active interaction
    pub fn cancel(&mut self) {
        if !self.interaction.is_idle() {
            tracing::debug!("Interaction abandoned");
        }
        self.interaction = Interaction::Idle;
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::Select(id) => self.selected = id,
            Effect::Add(room) => {
                tracing::debug!(room = %room.id, x = room.x, y = room.y, width = room.width, length = room.length, "Room drawn");
                self.selected = Some(room.id.clone());
                self.rooms.push(room);
                self.tool = Tool::Select;
            }
            Effect::Replace(room) => {
                if let Some(slot) = self.rooms.iter_mut().find(|r| r.id == room.id) {
                    tracing::debug!(room = %room.id, x = room.x, y = room.y, width = room.width, length = room.length, "Room updated");
                    *slot = room;
                }
            }
        }
    }

    /// Pan the canvas. Only allowed while idle in select mode.
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> bool {
        if self.tool != Tool::Select || !self.interaction.is_idle() {
            return false;
        }
        self.viewport.pan_by(dx, dy);
        true
    }

    /// Zoom around a screen point by a mouse wheel delta
    pub fn wheel(&mut self, screen: Point2<f64>, delta_y: f64) {
        self.viewport.zoom_at(screen, wheel_zoom_factor(delta_y));
    }

    /// Remove a room; clears the selection if it was selected
    pub fn delete_room(&mut self, id: &RoomId) -> Result<Room> {
        if self.interaction.temp_room().is_some_and(|r| &r.id == id) {
            return Err(Error::InteractionInProgress);
        }
        let index = self
            .rooms
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| Error::RoomNotFound(id.clone()))?;
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        Ok(self.rooms.remove(index))
    }

    /// Validate and apply name/color changes to the selected room
    pub fn update_selected(&mut self, patch: RoomPatch) -> Result<()> {
        let id = self.selected.clone().ok_or(Error::NoSelection)?;
        let name = patch.name.as_deref().map(validate_name).transpose()?;
        let color = patch.color.as_deref().map(validate_color).transpose()?;

        let room = self
            .rooms
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(Error::RoomNotFound(id))?;
        if let Some(name) = name {
            room.name = name;
        }
        if let Some(color) = color {
            room.color = color;
        }
        Ok(())
    }

    /// Room list ready for persistence: whole-list replace, origin normalized
    pub fn snapshot(&self) -> Vec<Room> {
        normalize_origin(&self.rooms)
    }
}

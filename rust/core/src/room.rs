// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room data model
//!
//! A room is an axis-aligned rectangle on the integer grid. `x`/`y` is the
//! top-left corner, `width` runs along X and `length` along Y (the Z axis in
//! the 3D view).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Maximum room name length in characters
pub const MAX_NAME_LEN: usize = 32;

/// Stable room identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl RoomId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh identifier for a newly drawn room
    pub fn generate() -> Self {
        Self(format!("room-{}", uuid::Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Axis-aligned rectangle in grid units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub length: i32,
}

impl GridRect {
    pub fn new(x: i32, y: i32, width: i32, length: i32) -> Self {
        Self { x, y, width, length }
    }

    /// Saturates at `i32::MAX` for malformed rectangles
    #[inline]
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.length)
    }

    /// Whether both far edges fit in `i32`
    #[inline]
    pub fn is_representable(&self) -> bool {
        self.x.checked_add(self.width).is_some() && self.y.checked_add(self.length).is_some()
    }

    #[inline]
    pub fn has_area(&self) -> bool {
        self.width > 0 && self.length > 0
    }

    /// Interior overlap on half-open intervals; shared edges do not count.
    #[inline]
    pub fn overlaps(&self, other: &GridRect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// A rectangular room on the grid
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub length: i32,
    pub color: String,
}

impl Room {
    pub fn new(
        id: impl Into<RoomId>,
        name: impl Into<String>,
        rect: GridRect,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            x: rect.x,
            y: rect.y,
            width: rect.width,
            length: rect.length,
            color: color.into(),
        }
    }

    #[inline]
    pub fn rect(&self) -> GridRect {
        GridRect::new(self.x, self.y, self.width, self.length)
    }

    /// Copy of this room moved and resized to `rect`
    pub fn with_rect(&self, rect: GridRect) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            length: rect.length,
            ..self.clone()
        }
    }

    /// Rooms with a non-positive dimension, or whose far edges overflow the
    /// grid, are skipped by wall synthesis
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0 || self.length <= 0 || !self.rect().is_representable()
    }

    #[inline]
    pub fn overlaps(&self, other: &Room) -> bool {
        self.rect().overlaps(&other.rect())
    }

    /// Point-in-rectangle test in grid units, boundary inclusive
    pub fn contains_point(&self, x: f64, z: f64) -> bool {
        let (x0, z0) = (self.x as f64, self.y as f64);
        x >= x0 && x <= x0 + self.width as f64 && z >= z0 && z <= z0 + self.length as f64
    }

    /// Center of the room in grid units
    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.length as f64 / 2.0,
        )
    }
}

impl From<String> for RoomId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// True if `rect` overlaps any room other than `exclude`
pub fn collides(rect: &GridRect, rooms: &[Room], exclude: Option<&RoomId>) -> bool {
    rooms
        .iter()
        .filter(|r| exclude != Some(&r.id))
        .any(|r| r.rect().overlaps(rect))
}

/// Check a room set for overlapping pairs
pub fn is_valid_room_set(rooms: &[Room]) -> bool {
    rooms.iter().enumerate().all(|(i, a)| {
        !a.is_degenerate() && rooms[i + 1..].iter().all(|b| !a.overlaps(b))
    })
}

/// Validate a room name: 1 to 32 characters after trimming.
pub fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidName("name cannot be empty".to_string()));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(Error::InvalidName(format!(
            "name cannot exceed {} characters",
            MAX_NAME_LEN
        )));
    }
    Ok(trimmed.to_string())
}

/// Translate a room set so that no coordinate is negative.
///
/// Sets that already sit at or beyond the origin are returned unchanged.
pub fn normalize_origin(rooms: &[Room]) -> Vec<Room> {
    let min_x = rooms.iter().map(|r| r.x).min().unwrap_or(0).min(0);
    let min_y = rooms.iter().map(|r| r.y).min().unwrap_or(0).min(0);

    rooms
        .iter()
        .map(|r| Room {
            x: r.x - min_x,
            y: r.y - min_y,
            ..r.clone()
        })
        .collect()
}

/// Parse a JSON room list
pub fn rooms_from_json(json: &str) -> Result<Vec<Room>> {
    Ok(serde_json::from_str(json)?)
}

/// Serialize a room list for the persistence layer
pub fn rooms_to_json(rooms: &[Room]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rooms)?)
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall synthesis from a room set
//!
//! Every room boundary is split into unit-length edges so that rooms which
//! share only part of a side still share the matching unit edges. Edge
//! multiplicity decides exterior (one room) vs interior (two rooms), and a
//! set of stub overrides lowers bottom walls and overhung top walls.
//!
//! The result is a pure function of the room set: room order does not affect
//! it, and the wall list is sorted by canonical edge.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::config::WallConfig;
use crate::room::Room;

/// A unit-length, axis-aligned boundary segment on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    pub x1: i32,
    pub z1: i32,
    pub x2: i32,
    pub z2: i32,
}

impl Edge {
    #[inline]
    pub const fn new(x1: i32, z1: i32, x2: i32, z2: i32) -> Self {
        Self { x1, z1, x2, z2 }
    }

    /// Endpoints sorted lexicographically on (x, z), so both traversal
    /// directions of a segment map to the same key.
    #[inline]
    pub fn canonical(self) -> Self {
        if (self.x1, self.z1) <= (self.x2, self.z2) {
            self
        } else {
            Self::new(self.x2, self.z2, self.x1, self.z1)
        }
    }

    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.z1 == self.z2
    }

    pub fn length(&self) -> f64 {
        let dx = (self.x2 - self.x1) as f64;
        let dz = (self.z2 - self.z1) as f64;
        (dx * dx + dz * dz).sqrt()
    }
}

/// Classification by how many rooms bound an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallClass {
    /// Bounds exactly one room
    Exterior,
    /// Shared by two (or, for overlapping input, more) rooms
    Interior,
}

/// The two wall heights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeightTier {
    Full,
    Stub,
}

impl HeightTier {
    pub fn height(self, config: &WallConfig) -> f64 {
        match self {
            HeightTier::Full => config.full_height,
            HeightTier::Stub => config.stub_height,
        }
    }
}

/// Solid a wall is merged into for extrusion and rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WallCategory {
    /// Full-height perimeter walls
    Exterior,
    /// Partitions and stub-overridden walls
    Interior,
}

impl WallCategory {
    pub const ALL: [WallCategory; 2] = [WallCategory::Exterior, WallCategory::Interior];

    pub fn as_str(self) -> &'static str {
        match self {
            WallCategory::Exterior => "exterior",
            WallCategory::Interior => "interior",
        }
    }
}

/// A classified wall segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    /// Canonical edge
    pub edge: Edge,
    pub class: WallClass,
    pub tier: HeightTier,
    pub height: f64,
}

impl Wall {
    /// Render category. Stub-overridden exterior edges keep their
    /// `Exterior` class but are grouped with the interior stubs.
    #[inline]
    pub fn category(&self) -> WallCategory {
        match (self.class, self.tier) {
            (WallClass::Exterior, HeightTier::Full) => WallCategory::Exterior,
            _ => WallCategory::Interior,
        }
    }

    /// True for full-height perimeter walls
    #[inline]
    pub fn is_exterior(&self) -> bool {
        self.category() == WallCategory::Exterior
    }

    #[inline]
    pub fn is_stub(&self) -> bool {
        self.tier == HeightTier::Stub
    }
}

/// Unit edges along the four sides of a room: `width` top, `width` bottom,
/// `length` left and `length` right edges. Degenerate rooms have none.
pub fn room_edges(room: &Room) -> impl Iterator<Item = Edge> + '_ {
    let (x, y) = (room.x, room.y);
    let (w, l) = if room.is_degenerate() {
        (0, 0)
    } else {
        (room.width, room.length)
    };
    let horizontal = (0..w).flat_map(move |i| {
        [
            Edge::new(x + i, y, x + i + 1, y),
            Edge::new(x + i, y + l, x + i + 1, y + l),
        ]
    });
    let vertical = (0..l).flat_map(move |i| {
        [
            Edge::new(x, y + i, x, y + i + 1),
            Edge::new(x + w, y + i, x + w, y + i + 1),
        ]
    });
    horizontal.chain(vertical)
}

/// All unit edges of all rooms, duplicates included
pub fn extract_edges(rooms: &[Room]) -> Vec<Edge> {
    rooms.iter().flat_map(room_edges).collect()
}

/// Occurrence count per canonical edge
pub fn count_edges<'a>(rooms: impl IntoIterator<Item = &'a Room>) -> FxHashMap<Edge, u32> {
    let mut counts: FxHashMap<Edge, u32> = FxHashMap::default();
    for room in rooms {
        for edge in room_edges(room) {
            *counts.entry(edge.canonical()).or_insert(0) += 1;
        }
    }
    counts
}

/// Canonical edges forced to stub height.
///
/// Every bottom edge of every room is a stub. A top edge is also a stub when
/// some other room lies entirely above it (its bottom strictly above the
/// edge) and covers the edge's column. Adjacency is not required: any room
/// further up the column triggers the override.
pub fn stub_overrides(rooms: &[&Room]) -> FxHashSet<Edge> {
    let mut stubs = FxHashSet::default();

    for room in rooms.iter().filter(|r| !r.is_degenerate()) {
        let bottom = room.y + room.length;
        for i in 0..room.width {
            stubs.insert(Edge::new(room.x + i, bottom, room.x + i + 1, bottom).canonical());
        }

        let top = room.y;
        for i in 0..room.width {
            let column = room.x + i;
            let overhung = rooms.iter().any(|other| {
                other.id != room.id
                    && !other.is_degenerate()
                    && other.y + other.length < top
                    && column >= other.x
                    && column < other.x + other.width
            });
            if overhung {
                stubs.insert(Edge::new(column, top, column + 1, top).canonical());
            }
        }
    }

    stubs
}

/// Derive classified walls from a room set.
///
/// Rooms with a non-positive dimension are skipped with a warning.
/// Overlapping input is tolerated: edges counted more than twice are
/// treated as interior.
pub fn synthesize(rooms: &[Room], config: &WallConfig) -> Vec<Wall> {
    let valid: Vec<&Room> = rooms
        .iter()
        .filter(|room| {
            if room.is_degenerate() {
                tracing::warn!(
                    room = %room.id,
                    width = room.width,
                    length = room.length,
                    "Skipping degenerate room"
                );
                false
            } else {
                true
            }
        })
        .collect();

    if valid.is_empty() {
        return Vec::new();
    }

    let counts = count_edges(valid.iter().copied());
    let stubs = stub_overrides(&valid);

    let mut walls: Vec<Wall> = counts
        .into_iter()
        .map(|(edge, count)| {
            let class = if count == 1 {
                WallClass::Exterior
            } else {
                WallClass::Interior
            };
            let tier = if stubs.contains(&edge) || class == WallClass::Interior {
                HeightTier::Stub
            } else {
                HeightTier::Full
            };
            Wall {
                edge,
                class,
                tier,
                height: tier.height(config),
            }
        })
        .collect();

    walls.sort_unstable_by_key(|w| w.edge);

    tracing::debug!(
        rooms = valid.len(),
        walls = walls.len(),
        exterior = walls.iter().filter(|w| w.is_exterior()).count(),
        "Synthesized walls"
    );

    walls
}

/// Tallest wall height in a category, `None` if the category is empty
pub fn max_height(walls: &[Wall], category: WallCategory) -> Option<f64> {
    walls
        .iter()
        .filter(|w| w.category() == category)
        .map(|w| w.height)
        .fold(None, |acc, h| Some(acc.map_or(h, |a: f64| a.max(h))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::GridRect;

    fn room(id: &str, x: i32, y: i32, w: i32, l: i32) -> Room {
        Room::new(id, id, GridRect::new(x, y, w, l), "#a0c4ff")
    }

    #[test]
    fn test_canonical_edge() {
        let forward = Edge::new(1, 2, 2, 2);
        let backward = Edge::new(2, 2, 1, 2);
        assert_eq!(forward.canonical(), backward.canonical());
        assert_eq!(backward.canonical(), forward);

        let vertical = Edge::new(3, 5, 3, 4).canonical();
        assert_eq!(vertical, Edge::new(3, 4, 3, 5));
    }

    #[test]
    fn test_room_edge_counts() {
        let r = room("a", 0, 0, 3, 2);
        let edges: Vec<Edge> = room_edges(&r).collect();
        assert_eq!(edges.len(), 2 * 3 + 2 * 2);
        assert!(edges.iter().all(|e| (e.length() - 1.0).abs() < 1e-12));
    }

    #[test]
    fn test_single_room_all_exterior() {
        let walls = synthesize(&[room("a", 0, 0, 2, 2)], &WallConfig::default());
        assert_eq!(walls.len(), 8);
        assert!(walls.iter().all(|w| w.class == WallClass::Exterior));
    }

    #[test]
    fn test_partial_shared_boundary() {
        // 1x3 room against a 1x1 room: only one unit of the side is shared
        let rooms = [room("tall", 0, 0, 1, 3), room("small", 1, 1, 1, 1)];
        let walls = synthesize(&rooms, &WallConfig::default());

        let shared = walls
            .iter()
            .filter(|w| w.class == WallClass::Interior)
            .map(|w| w.edge)
            .collect::<Vec<_>>();
        assert_eq!(shared, vec![Edge::new(1, 1, 1, 2)]);
    }

    #[test]
    fn test_degenerate_room_skipped() {
        let rooms = [room("ok", 0, 0, 1, 1), room("flat", 5, 5, 0, 3), room("neg", 8, 8, -2, 2)];
        let walls = synthesize(&rooms, &WallConfig::default());
        assert_eq!(walls.len(), 4);
    }

    #[test]
    fn test_empty_input() {
        assert!(synthesize(&[], &WallConfig::default()).is_empty());
        assert_eq!(max_height(&[], WallCategory::Interior), None);
    }

    #[test]
    fn test_overlapping_rooms_do_not_panic() {
        let rooms = [room("a", 0, 0, 2, 2), room("b", 0, 0, 2, 2), room("c", 1, 0, 2, 2)];
        let walls = synthesize(&rooms, &WallConfig::default());
        assert!(!walls.is_empty());
        assert!(walls
            .iter()
            .filter(|w| w.edge == Edge::new(0, 0, 1, 0))
            .all(|w| w.class == WallClass::Interior));
    }

    #[test]
    fn test_max_height_per_category() {
        let config = WallConfig::default();
        let walls = synthesize(&[room("a", 0, 0, 2, 2)], &config);
        assert_eq!(max_height(&walls, WallCategory::Exterior), Some(config.full_height));
        assert_eq!(max_height(&walls, WallCategory::Interior), Some(config.stub_height));
    }
}

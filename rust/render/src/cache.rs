// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall geometry cache
//!
//! Wall synthesis only depends on room ids and rectangles, so renaming or
//! recolouring a room (or reordering the list) reuses the previous solids.

use floorplan_core::{synthesize, Room, RoomId, WallConfig};
use floorplan_geometry::{build_wall_geometry, PolygonUnion, Result, WallGeometry};

type RoomKey = (RoomId, i32, i32, i32, i32);

fn cache_key(rooms: &[Room]) -> Vec<RoomKey> {
    let mut key: Vec<RoomKey> = rooms
        .iter()
        .map(|r| (r.id.clone(), r.x, r.y, r.width, r.length))
        .collect();
    key.sort_unstable();
    key
}

/// Recomputes wall solids only when room geometry changes
#[derive(Debug, Clone)]
pub struct WallCache {
    config: WallConfig,
    key: Option<Vec<RoomKey>>,
    geometry: WallGeometry,
    recomputes: usize,
}

impl WallCache {
    pub fn new(config: WallConfig) -> Self {
        Self {
            config,
            key: None,
            geometry: WallGeometry::default(),
            recomputes: 0,
        }
    }

    pub fn config(&self) -> &WallConfig {
        &self.config
    }

    /// Replace the configuration, invalidating cached solids when it differs
    pub fn set_config(&mut self, config: WallConfig) {
        if config != self.config {
            self.config = config;
            self.key = None;
        }
    }

    /// Number of times solids were rebuilt
    pub fn recomputes(&self) -> usize {
        self.recomputes
    }

    /// Wall solids for `rooms`, rebuilding only on geometry changes
    pub fn get(&mut self, rooms: &[Room], union: &dyn PolygonUnion) -> Result<&WallGeometry> {
        let key = cache_key(rooms);
        if self.key.as_ref() != Some(&key) {
            let walls = synthesize(rooms, &self.config);
            self.geometry = build_wall_geometry(&walls, &self.config, union)?;
            self.key = Some(key);
            self.recomputes += 1;
            tracing::debug!(rooms = rooms.len(), walls = walls.len(), "Rebuilt wall geometry");
        }
        Ok(&self.geometry)
    }

    pub fn invalidate(&mut self) {
        self.key = None;
    }
}

impl Default for WallCache {
    fn default() -> Self {
        Self::new(WallConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorplan_core::GridRect;
    use floorplan_geometry::PassthroughUnion;

    fn rooms() -> Vec<Room> {
        vec![
            Room::new("a", "A", GridRect::new(0, 0, 2, 2), "#ffadad"),
            Room::new("b", "B", GridRect::new(2, 0, 2, 2), "#ffd6a5"),
        ]
    }

    #[test]
    fn test_reuses_geometry_for_cosmetic_changes() {
        let mut cache = WallCache::default();
        let mut rooms = rooms();
        cache.get(&rooms, &PassthroughUnion).unwrap();
        rooms[0].name = "Kitchen".into();
        rooms[1].color = "#000000".into();
        rooms.reverse();
        cache.get(&rooms, &PassthroughUnion).unwrap();
        assert_eq!(cache.recomputes(), 1);
    }

    #[test]
    fn test_rebuilds_on_geometry_change() {
        let mut cache = WallCache::default();
        let mut rooms = rooms();
        cache.get(&rooms, &PassthroughUnion).unwrap();
        rooms[1].width = 3;
        cache.get(&rooms, &PassthroughUnion).unwrap();
        assert_eq!(cache.recomputes(), 2);
    }

    #[test]
    fn test_config_change_invalidates() {
        let mut cache = WallCache::default();
        let rooms = rooms();
        cache.get(&rooms, &PassthroughUnion).unwrap();
        cache.set_config(WallConfig::default());
        cache.get(&rooms, &PassthroughUnion).unwrap();
        assert_eq!(cache.recomputes(), 1);

        cache.set_config(WallConfig {
            full_height: 2.5,
            ..WallConfig::default()
        });
        let height = cache.get(&rooms, &PassthroughUnion).unwrap().exterior.height;
        assert_eq!(cache.recomputes(), 2);
        assert_eq!(height, 2.5);
    }
}

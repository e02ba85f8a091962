// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Read-only placement queries over the room list
//!
//! Positions are in grid units on the floor plane: `x` along room width and
//! `z` along room length.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::device::DeviceKind;
use crate::room::Room;

/// Maximum distance from a wall for wall-mounted devices
pub const WALL_SNAP_DISTANCE: f64 = 0.3;

/// Outcome of a placement check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementValidation {
    pub is_valid: bool,
    pub reason: Option<String>,
    /// Position the device would be placed at; equals the input unless the
    /// device snapped to a wall
    pub snapped_position: (f64, f64),
}

impl PlacementValidation {
    fn valid(x: f64, z: f64) -> Self {
        Self {
            is_valid: true,
            reason: None,
            snapped_position: (x, z),
        }
    }

    fn invalid(reason: &str, x: f64, z: f64) -> Self {
        Self {
            is_valid: false,
            reason: Some(reason.to_string()),
            snapped_position: (x, z),
        }
    }
}

/// First room (in list order) containing the point, boundary inclusive
pub fn find_containing_room(x: f64, z: f64, rooms: &[Room]) -> Option<&Room> {
    rooms.iter().find(|room| room.contains_point(x, z))
}

/// The four sides of a room as (start, end) segments: top, right, bottom, left
pub fn room_sides(room: &Room) -> [(Point2<f64>, Point2<f64>); 4] {
    let (x0, z0) = (room.x as f64, room.y as f64);
    let (x1, z1) = (x0 + room.width as f64, z0 + room.length as f64);
    [
        (Point2::new(x0, z0), Point2::new(x1, z0)),
        (Point2::new(x1, z0), Point2::new(x1, z1)),
        (Point2::new(x1, z1), Point2::new(x0, z1)),
        (Point2::new(x0, z1), Point2::new(x0, z0)),
    ]
}

/// Closest point on segment `a`-`b` to `p`, `None` for a zero-length segment
pub fn closest_point_on_segment(
    p: Point2<f64>,
    a: Point2<f64>,
    b: Point2<f64>,
) -> Option<Point2<f64>> {
    let ab: Vector2<f64> = b - a;
    let len_sq = ab.norm_squared();
    if len_sq == 0.0 {
        return None;
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    Some(a + ab * t)
}

/// Check whether a device of `kind` may be placed at `(x, z)`.
pub fn validate_device_placement(
    kind: DeviceKind,
    x: f64,
    z: f64,
    rooms: &[Room],
) -> PlacementValidation {
    let Some(room) = find_containing_room(x, z, rooms) else {
        return PlacementValidation::invalid("Device must be placed inside a room", x, z);
    };

    if !kind.is_wall_mounted() {
        return PlacementValidation::valid(x, z);
    }

    let p = Point2::new(x, z);
    for (a, b) in room_sides(room) {
        if let Some(closest) = closest_point_on_segment(p, a, b) {
            if (p - closest).norm() <= WALL_SNAP_DISTANCE {
                return PlacementValidation::valid(closest.x, closest.y);
            }
        }
    }

    PlacementValidation::invalid("Door locks must be placed on a wall", x, z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::GridRect;
    use approx::assert_relative_eq;

    fn rooms() -> Vec<Room> {
        vec![
            Room::new("a", "A", GridRect::new(0, 0, 2, 2), "#ffadad"),
            Room::new("b", "B", GridRect::new(2, 0, 2, 2), "#ffd6a5"),
        ]
    }

    #[test]
    fn test_first_match_wins_on_shared_boundary() {
        let rooms = rooms();
        assert_eq!(find_containing_room(2.0, 1.0, &rooms).unwrap().id.as_str(), "a");
        assert_eq!(find_containing_room(3.0, 1.0, &rooms).unwrap().id.as_str(), "b");
        assert!(find_containing_room(5.0, 1.0, &rooms).is_none());
    }

    #[test]
    fn test_outside_any_room() {
        let result = validate_device_placement(DeviceKind::Light, -1.0, 0.5, &rooms());
        assert!(!result.is_valid);
        assert_eq!(result.reason.as_deref(), Some("Device must be placed inside a room"));
    }

    #[test]
    fn test_free_placement_kinds() {
        for kind in [DeviceKind::Light, DeviceKind::Thermostat, DeviceKind::Audio] {
            let result = validate_device_placement(kind, 1.0, 1.0, &rooms());
            assert!(result.is_valid);
            assert_eq!(result.snapped_position, (1.0, 1.0));
        }
    }

    #[test]
    fn test_door_lock_snaps_to_wall() {
        let result = validate_device_placement(DeviceKind::DoorLock, 1.2, 0.2, &rooms());
        assert!(result.is_valid);
        assert_relative_eq!(result.snapped_position.0, 1.2);
        assert_relative_eq!(result.snapped_position.1, 0.0);
    }

    #[test]
    fn test_door_lock_away_from_walls() {
        let result = validate_device_placement(DeviceKind::DoorLock, 1.0, 1.0, &rooms());
        assert!(!result.is_valid);
        assert_eq!(result.reason.as_deref(), Some("Door locks must be placed on a wall"));
    }
}

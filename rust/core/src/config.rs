// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall and editor configuration.
//!
//! Wall settings can be overridden from environment variables, falling back
//! to the defaults when a variable is missing or does not parse.

use serde::{Deserialize, Serialize};

/// Pastel palette used for newly drawn rooms
pub const DEFAULT_ROOM_COLORS: [&str; 8] = [
    "#ffadad", "#ffd6a5", "#fdffb6", "#caffbf", "#9bf6ff", "#a0c4ff", "#bdb2ff", "#ffc6ff",
];

/// Wall synthesis and extrusion parameters (grid units, 1 unit = 1 m)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallConfig {
    /// Height of exterior perimeter walls
    pub full_height: f64,
    /// Height of partition and stub walls
    pub stub_height: f64,
    /// Total wall thickness (each segment is widened by half on both sides)
    pub thickness: f64,
    /// Elevation of the floor surface the walls stand on
    pub floor_elevation: f64,
    /// Minimum Y component of a face normal for it to count as a wall top
    pub cap_normal_threshold: f64,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            full_height: 1.0,
            stub_height: 0.3,
            thickness: 0.1,
            floor_elevation: 0.15,
            cap_normal_threshold: 0.9,
        }
    }
}

impl WallConfig {
    /// Load wall configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            full_height: env_positive_or("FLOORPLAN_FULL_WALL_HEIGHT", defaults.full_height),
            stub_height: env_positive_or("FLOORPLAN_STUB_WALL_HEIGHT", defaults.stub_height),
            thickness: env_positive_or("FLOORPLAN_WALL_THICKNESS", defaults.thickness),
            floor_elevation: env_or("FLOORPLAN_FLOOR_ELEVATION", defaults.floor_elevation),
            cap_normal_threshold: env_or("FLOORPLAN_CAP_THRESHOLD", defaults.cap_normal_threshold),
        }
    }

    /// Half of the wall thickness
    #[inline]
    pub fn half_thickness(&self) -> f64 {
        self.thickness / 2.0
    }
}

fn env_or(key: &str, default: f64) -> f64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

/// Like `env_or`, but non-positive values also fall back to the default
fn env_positive_or(key: &str, default: f64) -> f64 {
    let value = env_or(key, default);
    if value > 0.0 {
        value
    } else {
        default
    }
}

/// Interactive editor parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// World units (pixels at zoom 1) per grid unit
    pub grid_size: f64,
    /// Resize handle size in screen pixels
    pub handle_size: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Colors assigned to new rooms, indexed by room count
    pub palette: Vec<String>,
    /// Name given to newly drawn rooms
    pub default_room_name: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: 50.0,
            handle_size: 10.0,
            min_zoom: 0.2,
            max_zoom: 5.0,
            palette: DEFAULT_ROOM_COLORS.iter().map(|c| c.to_string()).collect(),
            default_room_name: "New Room".to_string(),
        }
    }
}

impl EditorConfig {
    /// Palette color for the n-th room
    pub fn palette_color(&self, room_count: usize) -> String {
        if self.palette.is_empty() {
            return DEFAULT_ROOM_COLORS[room_count % DEFAULT_ROOM_COLORS.len()].to_string();
        }
        self.palette[room_count % self.palette.len()].clone()
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Theme-aware material descriptions
//!
//! Materials serialize to camelCase property bags that a WebGL/three.js style
//! host can apply directly.

use floorplan_core::Color;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Color scheme of the 3D view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{}', expected light or dark", other)),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        })
    }
}

fn hex<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&color.to_hex())
}

/// Which faces of a mesh are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Front,
    Double,
}

/// Translucent physically-based material for vertical wall faces
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrostedWallMaterial {
    #[serde(serialize_with = "hex")]
    pub color: Color,
    pub transparent: bool,
    pub opacity: f32,
    pub transmission: f32,
    pub roughness: f32,
    pub thickness: f32,
    pub ior: f32,
    pub clearcoat: f32,
    pub clearcoat_roughness: f32,
    pub env_map_intensity: f32,
}

impl FrostedWallMaterial {
    pub fn for_theme(theme: Theme) -> Self {
        let color = match theme {
            Theme::Light => Color::WHITE,
            Theme::Dark => Color::rgb(0x88, 0x88, 0x88),
        };
        Self {
            color,
            transparent: true,
            opacity: 0.96,
            transmission: 1.0,
            roughness: 0.7,
            thickness: 1.0,
            ior: 1.45,
            clearcoat: 0.3,
            clearcoat_roughness: 0.1,
            env_map_intensity: 1.0,
        }
    }
}

/// Opaque unlit material for wall tops
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapMaterial {
    #[serde(serialize_with = "hex")]
    pub color: Color,
    pub side: Side,
    pub depth_write: bool,
}

impl CapMaterial {
    pub fn for_theme(theme: Theme) -> Self {
        let color = match theme {
            Theme::Light => Color::WHITE,
            Theme::Dark => Color::rgb(0x66, 0x66, 0x66),
        };
        Self {
            color,
            side: Side::Double,
            depth_write: true,
        }
    }
}

/// Room floor material tinted with the room color
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorMaterial {
    #[serde(serialize_with = "hex")]
    pub color: Color,
    #[serde(serialize_with = "hex")]
    pub emissive: Color,
    pub emissive_intensity: f32,
}

impl FloorMaterial {
    /// Used when a stored room color does not parse
    pub const FALLBACK_COLOR: Color = Color::rgb(0xff, 0x7b, 0x7b);

    pub fn for_room_color(color: &str) -> Self {
        let color = Color::parse_or(color, Self::FALLBACK_COLOR);
        Self {
            color,
            emissive: color,
            emissive_intensity: 0.08,
        }
    }
}

/// Line material for the floor grid overlay
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineMaterial {
    #[serde(serialize_with = "hex")]
    pub color: Color,
    pub opacity: f32,
    pub transparent: bool,
}

impl Default for LineMaterial {
    fn default() -> Self {
        Self {
            color: Color::rgb(0x66, 0x66, 0x66),
            opacity: 0.3,
            transparent: true,
        }
    }
}

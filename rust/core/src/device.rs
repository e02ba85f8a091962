// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device kinds and their per-kind state

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of device that can be placed in a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceKind {
    Light,
    Thermostat,
    DoorLock,
    Audio,
}

impl DeviceKind {
    pub const ALL: [DeviceKind; 4] = [
        DeviceKind::Light,
        DeviceKind::Thermostat,
        DeviceKind::DoorLock,
        DeviceKind::Audio,
    ];

    /// Whether the device must be mounted on a wall
    pub fn is_wall_mounted(self) -> bool {
        matches!(self, DeviceKind::DoorLock)
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeviceKind::Light => "light",
            DeviceKind::Thermostat => "thermostat",
            DeviceKind::DoorLock => "door-lock",
            DeviceKind::Audio => "audio",
        };
        f.write_str(name)
    }
}

/// Device state, one variant per kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DeviceState {
    Light {
        on: bool,
        /// 0-100
        brightness: u8,
    },
    Thermostat {
        /// Celsius, 10-30
        temperature: f64,
    },
    DoorLock {
        locked: bool,
    },
    Audio {
        playlist: String,
        /// 0-20
        volume: u8,
    },
}

impl DeviceState {
    /// Initial state for a newly placed device
    pub fn default_for(kind: DeviceKind) -> Self {
        match kind {
            DeviceKind::Light => DeviceState::Light {
                on: false,
                brightness: 100,
            },
            DeviceKind::Thermostat => DeviceState::Thermostat { temperature: 16.0 },
            DeviceKind::DoorLock => DeviceState::DoorLock { locked: false },
            DeviceKind::Audio => DeviceState::Audio {
                playlist: "classic".to_string(),
                volume: 0,
            },
        }
    }

    pub fn kind(&self) -> DeviceKind {
        match self {
            DeviceState::Light { .. } => DeviceKind::Light,
            DeviceState::Thermostat { .. } => DeviceKind::Thermostat,
            DeviceState::DoorLock { .. } => DeviceKind::DoorLock,
            DeviceState::Audio { .. } => DeviceKind::Audio,
        }
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::room::RoomId;

/// Result type for floor plan operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while editing or loading a floor plan
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid room name: {0}")]
    InvalidName(String),

    #[error("Invalid color '{0}': expected #RGB or #RRGGBB")]
    InvalidColor(String),

    #[error("Room not found: {0}")]
    RoomNotFound(RoomId),

    #[error("No room is selected")]
    NoSelection,

    #[error("An interaction is in progress; finish or cancel it first")]
    InteractionInProgress,

    #[error("Room list serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

//! Generation errors
//!
//! Every variant is fatal for the current invocation. They point at a
//! parameter combination that cannot produce a connected level, so each one
//! echoes the values involved.

use thiserror::Error;

use crate::coords::Coordinates;

/// Errors raised while generating a level
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("Invalid generation parameter '{name}': {reason}")]
    InvalidParams { name: &'static str, reason: String },

    #[error(
        "Map {width}x{height} cannot hold a room section of {min_section} tiles \
         (min room dimension {min_room_dimension}, padding {min_room_padding})"
    )]
    MapTooSmall {
        width: i32,
        height: i32,
        min_section: i32,
        min_room_dimension: i32,
        min_room_padding: i32,
    },

    #[error(
        "Could not connect all regions: {connected} of {total} connected, \
         no remaining pair shares a border of at least {min_border} tiles"
    )]
    Disconnected {
        connected: usize,
        total: usize,
        min_border: i32,
    },

    #[error("No corridor route from ({}, {}) to ({}, {})", from.x, from.y, to.x, to.y)]
    UnroutableCorridor { from: Coordinates, to: Coordinates },
}

impl GenerationError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        GenerationError::InvalidParams {
            name,
            reason: reason.into(),
        }
    }
}

/// Result alias for generation operations
pub type Result<T> = core::result::Result<T, GenerationError>;

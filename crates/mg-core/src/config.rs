//! Generation parameters
//!
//! Plain configuration values supplied by the caller. Every field has a
//! default so partial config files deserialize cleanly.

use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, Result};
use crate::path::Heuristic;

/// An inclusive `min..=max` count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl CountRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

/// Parameters for rooms-and-corridors generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParams {
    /// Level width in tiles
    pub width: i32,
    /// Level height in tiles
    pub height: i32,
    /// Smallest room side, walls included
    pub min_room_dimension: i32,
    /// Largest room side, walls included
    pub max_room_dimension: i32,
    /// Minimum gap between a room and the edge of its region
    pub min_room_padding: i32,
    /// Lower bound on the fraction of regions that keep their room
    pub min_room_fraction: f64,
    /// Upper bound on the fraction of regions that keep their room
    pub max_room_fraction: f64,
    /// Probability that a non-tree connection between two rooms is carved
    pub extra_connection_chance: f64,
    /// Number of enemy spawn points to plan
    pub enemies: CountRange,
    /// Number of item spawn points to plan
    pub items: CountRange,
    /// Tile set identifier handed through to the renderer
    pub tile_set: String,
    /// Distance estimate used when routing corridors
    pub heuristic: Heuristic,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            width: 40,
            height: 30,
            min_room_dimension: 5,
            max_room_dimension: 9,
            min_room_padding: 1,
            min_room_fraction: 0.5,
            max_room_fraction: 0.75,
            extra_connection_chance: 0.2,
            enemies: CountRange::new(3, 6),
            items: CountRange::new(2, 4),
            tile_set: "dungeon".to_string(),
            heuristic: Heuristic::Manhattan,
        }
    }
}

impl GenerationParams {
    /// Smallest region side that can still hold a padded minimum room
    pub fn min_section(&self) -> i32 {
        self.min_room_dimension + 2 * self.min_room_padding
    }

    /// Reject values that cannot describe a level
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(GenerationError::invalid(
                "width/height",
                format!("must be positive, got {}x{}", self.width, self.height),
            ));
        }
        // A room needs a wall on each side and at least one floor tile
        if self.min_room_dimension < 3 {
            return Err(GenerationError::invalid(
                "min_room_dimension",
                format!("must be at least 3, got {}", self.min_room_dimension),
            ));
        }
        if self.max_room_dimension < self.min_room_dimension {
            return Err(GenerationError::invalid(
                "max_room_dimension",
                format!(
                    "{} is smaller than min_room_dimension {}",
                    self.max_room_dimension, self.min_room_dimension
                ),
            ));
        }
        if self.min_room_padding < 1 {
            return Err(GenerationError::invalid(
                "min_room_padding",
                format!("must be at least 1, got {}", self.min_room_padding),
            ));
        }
        let fractions_ok = (0.0..=1.0).contains(&self.min_room_fraction)
            && (0.0..=1.0).contains(&self.max_room_fraction)
            && self.min_room_fraction <= self.max_room_fraction;
        if !fractions_ok {
            return Err(GenerationError::invalid(
                "min_room_fraction/max_room_fraction",
                format!(
                    "need 0 <= min <= max <= 1, got {}..{}",
                    self.min_room_fraction, self.max_room_fraction
                ),
            ));
        }
        if !(0.0..=1.0).contains(&self.extra_connection_chance) {
            return Err(GenerationError::invalid(
                "extra_connection_chance",
                format!("must be within 0..=1, got {}", self.extra_connection_chance),
            ));
        }
        for (name, range) in [("enemies", self.enemies), ("items", self.items)] {
            if range.min > range.max {
                return Err(GenerationError::invalid(
                    name,
                    format!("min {} is larger than max {}", range.min, range.max),
                ));
            }
        }
        Ok(())
    }
}

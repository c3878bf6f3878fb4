//! Regions and the connections planned between them
//!
//! Regions live in a flat arena (`Vec<Region>`) and are referenced by
//! [`RegionId`]; connections never hold references into the arena.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::coords::{Coordinates, Rect};

/// Index of a region in the region list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionId(pub usize);

/// A rectangular subdivision of the map, possibly holding a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub rect: Rect,
    /// Room rectangle, walls included. `None` once the room is pruned.
    pub room: Option<Rect>,
    /// Corridor endpoints already placed in this region
    pub exits: Vec<Coordinates>,
}

impl Region {
    pub fn new(rect: Rect, room: Option<Rect>) -> Self {
        Self {
            rect,
            room,
            exits: Vec::new(),
        }
    }

    pub fn has_room(&self) -> bool {
        self.room.is_some()
    }
}

/// How two connected regions touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Direction {
    /// Side by side, sharing a vertical border
    Horizontal,
    /// Stacked, sharing a horizontal border
    Vertical,
}

/// A planned corridor between two regions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub start: RegionId,
    pub end: RegionId,
    pub start_coordinates: Coordinates,
    /// First tile past the shared border, on the `end` side
    pub middle_coordinates: Coordinates,
    pub end_coordinates: Coordinates,
    pub direction: Direction,
}

impl Connection {
    /// Check if this connection links `a` and `b`, in either order
    pub fn joins(&self, a: RegionId, b: RegionId) -> bool {
        (self.start == a && self.end == b) || (self.start == b && self.end == a)
    }

    pub fn touches(&self, region: RegionId) -> bool {
        self.start == region || self.end == region
    }

    /// The region on the far side from `region`
    pub fn other(&self, region: RegionId) -> Option<RegionId> {
        if self.start == region {
            Some(self.end)
        } else if self.end == region {
            Some(self.start)
        } else {
            None
        }
    }

    /// The endpoint that lies in `region`
    pub fn coordinates_in(&self, region: RegionId) -> Option<Coordinates> {
        if self.start == region {
            Some(self.start_coordinates)
        } else if self.end == region {
            Some(self.end_coordinates)
        } else {
            None
        }
    }
}

/// The neighbors an empty region has to route corridors between
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyRegionConnection {
    pub region: RegionId,
    pub neighbors: Vec<RegionId>,
}

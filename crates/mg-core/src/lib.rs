//! mg-core: rooms-and-corridors level generation
//!
//! Builds the tile layout of a dungeon level: the map is split into regions,
//! some rooms are pruned, regions are joined by a spanning tree plus optional
//! loops, and corridors are carved with the grid pathfinder. The pathfinder is
//! also usable on its own for unit movement.
//!
//! All randomness flows through an explicit [`MapRng`], so a level is fully
//! determined by its parameters and seed.

pub mod config;
pub mod coords;
pub mod dungeon;
pub mod error;
pub mod path;

mod consts;
mod rng;

pub use config::{CountRange, GenerationParams};
pub use consts::*;
pub use coords::{Coordinates, Rect};
pub use dungeon::{MapGenerator, MapTemplate};
pub use error::{GenerationError, Result};
pub use path::{Heuristic, Pathfinder};
pub use rng::MapRng;

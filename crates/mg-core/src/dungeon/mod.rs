//! Level generation
//!
//! Contains regions, the generation pipeline stages, and the tile grid.

mod carver;
mod connectivity;
mod connector;
mod generator;
mod pruner;
mod region;
mod spawns;
mod splitter;
mod tile;

pub use carver::{TileCarver, add_hall_walls, draw_room, generate_tiles};
pub use connectivity::{distance_map, is_fully_connected, unreachable_floor};
pub use connector::{
    are_adjacent, connect_regions, generate_empty_region_connections,
    generate_minimal_spanning_tree, generate_optional_connections, rebuild_exits,
    select_connections,
};
pub use generator::{MapGenerator, MapTemplate, RoomInfo};
pub use pruner::{remove_rooms, strip_orphaned_connections};
pub use region::{Connection, Direction, EmptyRegionConnection, Region, RegionId};
pub use spawns::{SpawnPlan, plan_spawns};
pub use splitter::generate_regions;
pub use tile::{TileGrid, TileType};

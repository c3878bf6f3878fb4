//! Rooms-and-corridors level generation
//!
//! Runs the whole pipeline: split the map into regions, prune rooms, plan
//! connections, carve tiles, plan spawns. Each call owns all of its working
//! data, so one generator can be shared between threads as long as every
//! thread brings its own RNG.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::GenerationParams;
use crate::coords::{Coordinates, Rect};
use crate::error::Result;
use crate::rng::MapRng;

use super::carver::generate_tiles;
use super::connector::{
    generate_empty_region_connections, generate_minimal_spanning_tree,
    generate_optional_connections, rebuild_exits, select_connections,
};
use super::pruner::{remove_rooms, strip_orphaned_connections};
use super::region::{Connection, Region};
use super::spawns::plan_spawns;
use super::splitter::generate_regions;
use super::tile::TileGrid;

/// A room in the finished level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomInfo {
    /// Room rectangle, walls included
    pub rect: Rect,
    /// Doorways on the room wall
    pub exits: Vec<Coordinates>,
}

/// A generated level, ready to be populated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapTemplate {
    pub width: i32,
    pub height: i32,
    pub tile_set: String,
    pub tiles: TileGrid,
    pub rooms: Vec<RoomInfo>,
    pub regions: Vec<Region>,
    pub connections: Vec<Connection>,
    pub start: Option<Coordinates>,
    pub stairs: Option<Coordinates>,
    pub enemy_spawns: Vec<Coordinates>,
    pub item_spawns: Vec<Coordinates>,
}

/// Generator for rooms-and-corridors levels
#[derive(Debug, Clone)]
pub struct MapGenerator {
    params: GenerationParams,
}

impl MapGenerator {
    /// Create a generator, rejecting invalid parameters up front
    pub fn new(params: GenerationParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Generate one level
    pub fn generate(&self, rng: &mut MapRng) -> Result<MapTemplate> {
        let params = &self.params;
        let bounds = Rect::new(0, 0, params.width, params.height);

        let mut regions = generate_regions(bounds, params, rng)?;
        remove_rooms(&mut regions, params, rng);

        let spanning = generate_minimal_spanning_tree(&mut regions, rng)?;
        let optional = generate_optional_connections(&mut regions, &spanning, rng);
        let mut empty_region_connections =
            generate_empty_region_connections(&regions, &spanning, &optional, rng);
        let mut connections = select_connections(
            &regions,
            spanning,
            optional,
            &empty_region_connections,
            params,
            rng,
        );
        strip_orphaned_connections(&mut connections, &mut empty_region_connections);
        rebuild_exits(&mut regions, &connections);
        debug!(
            "{} connections, {} empty-region pass-throughs",
            connections.len(),
            empty_region_connections.len()
        );

        let mut tiles = generate_tiles(
            params.width,
            params.height,
            &regions,
            &connections,
            &empty_region_connections,
            params.heuristic,
            rng,
        )?;

        let room_rects: Vec<Rect> = regions.iter().filter_map(|r| r.room).collect();
        let spawns = plan_spawns(&mut tiles, &room_rects, params, rng);

        let rooms: Vec<RoomInfo> = regions
            .iter()
            .filter_map(|r| {
                r.room.map(|rect| RoomInfo {
                    rect,
                    exits: r.exits.clone(),
                })
            })
            .collect();

        info!(
            "generated {}x{} level (seed {}): {} regions, {} rooms",
            params.width,
            params.height,
            rng.seed(),
            regions.len(),
            rooms.len()
        );

        Ok(MapTemplate {
            width: params.width,
            height: params.height,
            tile_set: params.tile_set.clone(),
            tiles,
            rooms,
            regions,
            connections,
            start: spawns.start,
            stairs: spawns.stairs,
            enemy_spawns: spawns.enemies,
            item_spawns: spawns.items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::connectivity::is_fully_connected;
    use crate::dungeon::tile::TileType;
    use crate::error::GenerationError;

    #[test]
    fn test_generate_default_level() {
        let generator = MapGenerator::new(GenerationParams::default()).unwrap();
        let mut rng = MapRng::new(42);
        let map = generator.generate(&mut rng).unwrap();

        assert_eq!(map.tiles.width(), 40);
        assert_eq!(map.tiles.height(), 30);
        assert!(!map.rooms.is_empty());
        assert!(is_fully_connected(&map.tiles));
        assert_eq!(map.tiles.count(TileType::StairsDown), 1);
        assert!(map.start.is_some());
        assert_eq!(map.tile_set, "dungeon");
    }

    #[test]
    fn test_same_seed_same_level() {
        let generator = MapGenerator::new(GenerationParams::default()).unwrap();
        let a = generator.generate(&mut MapRng::new(7)).unwrap();
        let b = generator.generate(&mut MapRng::new(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let params = GenerationParams {
            min_room_dimension: 2,
            ..Default::default()
        };
        assert!(matches!(
            MapGenerator::new(params),
            Err(GenerationError::InvalidParams { .. })
        ));
    }

    #[test]
    fn test_tiny_map_fails_cleanly() {
        let params = GenerationParams {
            width: 6,
            height: 6,
            ..Default::default()
        };
        let generator = MapGenerator::new(params).unwrap();
        assert!(matches!(
            generator.generate(&mut MapRng::new(1)),
            Err(GenerationError::MapTooSmall { .. })
        ));
    }

    #[test]
    fn test_room_exits_are_doorways() {
        let generator = MapGenerator::new(GenerationParams::default()).unwrap();
        let map = generator.generate(&mut MapRng::new(99)).unwrap();
        for room in &map.rooms {
            for exit in &room.exits {
                assert!(room.rect.on_border(*exit));
                assert_eq!(map.tiles.get(*exit), TileType::FloorHall);
            }
        }
    }
}

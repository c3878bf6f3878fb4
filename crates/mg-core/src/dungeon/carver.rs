//! Tile carving
//!
//! Draws rooms straight from their rectangles, then routes every planned
//! connection through the rock with the pathfinder. Stepping onto an existing
//! corridor is a hundred times cheaper than digging, so corridors merge
//! instead of running side by side. Carving is sequential: each corridor is
//! written to the grid before the next one is routed.

use hashbrown::HashSet;
use log::{debug, trace, warn};

use crate::consts::{EXISTING_HALL_COST, EXIT_CLEARANCE, NEW_HALL_COST};
use crate::coords::{Coordinates, Rect};
use crate::error::{GenerationError, Result};
use crate::path::{Heuristic, Pathfinder};
use crate::rng::MapRng;

use super::region::{Connection, EmptyRegionConnection, Region};
use super::tile::{TileGrid, TileType};

/// Draw a room: `WallTop` along the top row, `Wall` on the rest of the
/// border, `Floor` inside
pub fn draw_room(grid: &mut TileGrid, room: Rect) {
    for c in room.coordinates() {
        let tile = if c.y == room.top {
            TileType::WallTop
        } else if room.on_border(c) {
            TileType::Wall
        } else {
            TileType::Floor
        };
        grid.set(c, tile);
    }
}

/// Put a `WallHall` above every corridor tile that has rock or a plain wall
/// above it
pub fn add_hall_walls(grid: &mut TileGrid) {
    let halls: Vec<Coordinates> = grid
        .coordinates()
        .filter(|&c| grid.get(c) == TileType::FloorHall)
        .collect();
    for hall in halls {
        let above = hall.offset(0, -1);
        if grid.in_bounds(above) && matches!(grid.get(above), TileType::None | TileType::Wall) {
            grid.set(above, TileType::WallHall);
        }
    }
}

/// Working state while corridors are dug into a grid
pub struct TileCarver {
    grid: TileGrid,
    /// Tiles outside every room, plus the room exits
    walkable: HashSet<Coordinates>,
    /// Every exit on a room wall
    exits: Vec<Coordinates>,
    heuristic: Heuristic,
}

impl TileCarver {
    /// Start a grid with every room drawn
    pub fn new(
        width: i32,
        height: i32,
        regions: &[Region],
        connections: &[Connection],
        heuristic: Heuristic,
    ) -> Self {
        let mut grid = TileGrid::new(width, height);
        let rooms: Vec<Rect> = regions.iter().filter_map(|r| r.room).collect();
        for &room in &rooms {
            draw_room(&mut grid, room);
        }

        let mut exits = Vec::new();
        for connection in connections {
            for (region, exit) in [
                (connection.start, connection.start_coordinates),
                (connection.end, connection.end_coordinates),
            ] {
                if regions[region.0].has_room() && !exits.contains(&exit) {
                    exits.push(exit);
                }
            }
        }

        let mut walkable: HashSet<Coordinates> = grid
            .coordinates()
            .filter(|c| !rooms.iter().any(|room| room.contains(*c)))
            .collect();
        walkable.extend(exits.iter().copied());

        Self {
            grid,
            walkable,
            exits,
            heuristic,
        }
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Carve `start -> middle -> end` for one connection
    ///
    /// Both legs may pass next to either of the connection's own exits.
    pub fn carve_connection(&mut self, connection: &Connection, rng: &mut MapRng) -> Result<()> {
        let Connection {
            start_coordinates: start,
            middle_coordinates: middle,
            end_coordinates: end,
            ..
        } = *connection;
        let own = [start, middle, end];
        self.carve_leg(start, middle, &own, rng)?;
        self.carve_leg(middle, end, &own, rng)
    }

    /// Join the border points of an empty region so corridors pass through it
    ///
    /// Every point is linked to the first one; with two neighbors that is a
    /// single straight pass-through.
    pub fn carve_empty_region(
        &mut self,
        erc: &EmptyRegionConnection,
        connections: &[Connection],
        rng: &mut MapRng,
    ) -> Result<()> {
        let points: Vec<Coordinates> = erc
            .neighbors
            .iter()
            .filter_map(|&neighbor| {
                connections
                    .iter()
                    .find(|c| c.joins(erc.region, neighbor))
                    .and_then(|c| c.coordinates_in(erc.region))
            })
            .collect();
        if let Some((&hub, rest)) = points.split_first() {
            for &point in rest {
                self.carve_corridor(hub, point, rng)?;
            }
        }
        Ok(())
    }

    /// Route and dig one corridor
    ///
    /// The first attempt keeps clear of other exits. If that finds nothing the
    /// corridor is retried without the clearance rule before giving up.
    pub fn carve_corridor(
        &mut self,
        from: Coordinates,
        to: Coordinates,
        rng: &mut MapRng,
    ) -> Result<()> {
        self.carve_leg(from, to, &[from, to], rng)
    }

    fn carve_leg(
        &mut self,
        from: Coordinates,
        to: Coordinates,
        own: &[Coordinates],
        rng: &mut MapRng,
    ) -> Result<()> {
        let mut path = self.route(from, to, Some(own), rng);
        if path.is_empty() {
            warn!(
                "corridor ({}, {}) -> ({}, {}) blocked by exit clearance, retrying relaxed",
                from.x, from.y, to.x, to.y
            );
            path = self.route(from, to, None, rng);
        }
        if path.is_empty() {
            return Err(GenerationError::UnroutableCorridor { from, to });
        }

        trace!(
            "corridor ({}, {}) -> ({}, {}): {} tiles",
            from.x,
            from.y,
            to.x,
            to.y,
            path.len()
        );
        for c in path {
            self.grid.set(c, TileType::FloorHall);
        }
        Ok(())
    }

    /// Whether `c` is too close to an exit that is not one of `own`
    fn crowds_exit(&self, c: Coordinates, own: &[Coordinates]) -> bool {
        let near = |e: &Coordinates| e.chebyshev_distance(c) <= EXIT_CLEARANCE;
        own.iter().all(|o| o.chebyshev_distance(c) > 1)
            && self.exits.iter().filter(|e| !own.contains(*e)).any(near)
    }

    /// Cheapest path, keeping clear of exits other than `own` when given
    fn route(
        &self,
        from: Coordinates,
        to: Coordinates,
        own: Option<&[Coordinates]>,
        rng: &mut MapRng,
    ) -> Vec<Coordinates> {
        let grid = &self.grid;
        let blocked = |c: Coordinates| own.is_some_and(|own| self.crowds_exit(c, own));
        let cost = |_: Coordinates, next: Coordinates| {
            if grid.get(next) == TileType::FloorHall {
                EXISTING_HALL_COST
            } else {
                NEW_HALL_COST
            }
        };
        Pathfinder::new(self.heuristic)
            .with_blocked(blocked)
            .with_cost(cost, EXISTING_HALL_COST)
            .find_path(from, to, &self.walkable, rng)
    }

    /// Add corridor walls and hand back the grid
    pub fn finish(mut self) -> TileGrid {
        add_hall_walls(&mut self.grid);
        self.grid
    }
}

/// Produce the tile grid for a planned level
pub fn generate_tiles(
    width: i32,
    height: i32,
    regions: &[Region],
    connections: &[Connection],
    empty_region_connections: &[EmptyRegionConnection],
    heuristic: Heuristic,
    rng: &mut MapRng,
) -> Result<TileGrid> {
    let mut carver = TileCarver::new(width, height, regions, connections, heuristic);
    for connection in connections {
        carver.carve_connection(connection, rng)?;
    }
    for erc in empty_region_connections {
        carver.carve_empty_region(erc, connections, rng)?;
    }
    let grid = carver.finish();
    debug!(
        "carved {} corridor tiles for {} connections",
        grid.count(TileType::FloorHall),
        connections.len()
    );
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationParams;
    use crate::dungeon::connector::{
        generate_empty_region_connections, generate_minimal_spanning_tree,
        generate_optional_connections, rebuild_exits, select_connections,
    };
    use crate::dungeon::pruner::{remove_rooms, strip_orphaned_connections};
    use crate::dungeon::region::{Direction, RegionId};
    use crate::dungeon::splitter::generate_regions;

    /// Two 10x10 regions side by side, each with a 6x6 room
    fn pair() -> (Vec<Region>, Connection) {
        let left = Rect::new(0, 0, 10, 10);
        let right = Rect::new(10, 0, 10, 10);
        let regions = vec![
            Region::new(left, Some(Rect::new(2, 2, 6, 6))),
            Region::new(right, Some(Rect::new(12, 2, 6, 6))),
        ];
        let connection = Connection {
            start: RegionId(0),
            end: RegionId(1),
            start_coordinates: Coordinates::new(7, 4),
            middle_coordinates: Coordinates::new(10, 4),
            end_coordinates: Coordinates::new(12, 4),
            direction: Direction::Horizontal,
        };
        (regions, connection)
    }

    #[test]
    fn test_draw_room() {
        let mut grid = TileGrid::new(8, 8);
        draw_room(&mut grid, Rect::new(1, 1, 5, 4));
        assert_eq!(grid.get(Coordinates::new(1, 1)), TileType::WallTop);
        assert_eq!(grid.get(Coordinates::new(5, 1)), TileType::WallTop);
        assert_eq!(grid.get(Coordinates::new(1, 2)), TileType::Wall);
        assert_eq!(grid.get(Coordinates::new(3, 4)), TileType::Wall);
        assert_eq!(grid.count(TileType::Floor), 3 * 2);
        assert_eq!(grid.get(Coordinates::new(0, 0)), TileType::None);
    }

    #[test]
    fn test_straight_corridor_between_rooms() {
        let (regions, connection) = pair();
        let mut rng = MapRng::new(1);
        let grid = generate_tiles(
            20,
            10,
            &regions,
            std::slice::from_ref(&connection),
            &[],
            Heuristic::Manhattan,
            &mut rng,
        )
        .unwrap();
        // Exit doorways plus the four rock tiles between the walls
        assert_eq!(grid.count(TileType::FloorHall), 6);
        for x in 7..=12 {
            assert_eq!(grid.get(Coordinates::new(x, 4)), TileType::FloorHall);
        }
        // Rock and plain room wall above the corridor both become hall wall
        for x in 7..=12 {
            assert_eq!(grid.get(Coordinates::new(x, 3)), TileType::WallHall);
        }
    }

    #[test]
    fn test_carving_twice_adds_nothing() {
        let (regions, connection) = pair();
        let mut rng = MapRng::new(2);
        let mut carver = TileCarver::new(
            20,
            10,
            &regions,
            std::slice::from_ref(&connection),
            Heuristic::Manhattan,
        );
        carver.carve_connection(&connection, &mut rng).unwrap();
        let first = carver.grid().count(TileType::FloorHall);
        carver.carve_connection(&connection, &mut rng).unwrap();
        assert_eq!(carver.grid().count(TileType::FloorHall), first);
    }

    #[test]
    fn test_corridor_avoids_rooms() {
        // Target exit on the far wall forces a route around the right room
        let (regions, mut connection) = pair();
        connection.end_coordinates = Coordinates::new(17, 5);
        let mut rng = MapRng::new(3);
        let grid = generate_tiles(
            20,
            10,
            &regions,
            std::slice::from_ref(&connection),
            &[],
            Heuristic::Euclidean,
            &mut rng,
        )
        .unwrap();
        let room = regions[1].room.unwrap();
        for c in room.coordinates() {
            if grid.get(c) == TileType::FloorHall {
                assert_eq!(c, connection.end_coordinates, "corridor cut through {c:?}");
            }
        }
        assert_eq!(grid.get(Coordinates::new(17, 5)), TileType::FloorHall);
    }

    #[test]
    fn test_unroutable_corridor_is_an_error() {
        let (regions, _) = pair();
        let mut carver = TileCarver::new(20, 10, &regions, &[], Heuristic::Manhattan);
        let mut rng = MapRng::new(4);
        // The interior of a room is never walkable
        let err = carver
            .carve_corridor(Coordinates::new(0, 0), Coordinates::new(4, 4), &mut rng)
            .unwrap_err();
        assert!(matches!(err, GenerationError::UnroutableCorridor { .. }));
    }

    #[test]
    fn test_empty_region_pass_through() {
        // 0 room | 1 empty | 2 room, all 10x10 in a row
        let mut regions = vec![
            Region::new(Rect::new(0, 0, 10, 10), Some(Rect::new(2, 2, 6, 6))),
            Region::new(Rect::new(10, 0, 10, 10), None),
            Region::new(Rect::new(20, 0, 10, 10), Some(Rect::new(22, 2, 6, 6))),
        ];
        let connections = vec![
            Connection {
                start: RegionId(0),
                end: RegionId(1),
                start_coordinates: Coordinates::new(7, 4),
                middle_coordinates: Coordinates::new(10, 3),
                end_coordinates: Coordinates::new(10, 3),
                direction: Direction::Horizontal,
            },
            Connection {
                start: RegionId(2),
                end: RegionId(1),
                start_coordinates: Coordinates::new(22, 5),
                middle_coordinates: Coordinates::new(19, 6),
                end_coordinates: Coordinates::new(19, 6),
                direction: Direction::Horizontal,
            },
        ];
        regions[1].exits = vec![Coordinates::new(10, 3), Coordinates::new(19, 6)];
        let erc = EmptyRegionConnection {
            region: RegionId(1),
            neighbors: vec![RegionId(0), RegionId(2)],
        };
        let mut rng = MapRng::new(5);
        let grid = generate_tiles(
            30,
            10,
            &regions,
            &connections,
            std::slice::from_ref(&erc),
            Heuristic::Manhattan,
            &mut rng,
        )
        .unwrap();
        assert!(crate::dungeon::connectivity::is_fully_connected(&grid));
    }

    #[test]
    fn test_connection_exits_do_not_crowd_each_other() {
        let (regions, mut connection) = pair();
        connection.end_coordinates = Coordinates::new(12, 6);
        let carver = TileCarver::new(
            20,
            10,
            &regions,
            std::slice::from_ref(&connection),
            Heuristic::Manhattan,
        );
        let start = connection.start_coordinates;
        let middle = connection.middle_coordinates;
        let end = connection.end_coordinates;

        // Next to the far exit, two tiles from the middle
        let beside_end = Coordinates::new(11, 7);
        assert!(carver.crowds_exit(beside_end, &[start, middle]));
        assert!(!carver.crowds_exit(beside_end, &[start, middle, end]));
        // Other corridors still keep their distance from both exits
        let near_end = Coordinates::new(10, 8);
        assert!(!carver.crowds_exit(near_end, &[start, middle, end]));
        assert!(carver.crowds_exit(near_end, &[Coordinates::new(0, 0)]));
    }

    /// Tiles on the shortest walk between two points, obeying the same
    /// clearance rule the carver would use
    fn shortest_walk(
        carver: &TileCarver,
        from: Coordinates,
        to: Coordinates,
        own: &[Coordinates],
    ) -> usize {
        let mut rng = MapRng::new(0);
        for own in [Some(own), None] {
            let path = Pathfinder::new(Heuristic::Manhattan)
                .with_blocked(|c| own.is_some_and(|own| carver.crowds_exit(c, own)))
                .find_path(from, to, &carver.walkable, &mut rng);
            if !path.is_empty() {
                return path.len();
            }
        }
        panic!("no walk from {from:?} to {to:?}");
    }

    #[test]
    fn test_corridor_tiles_bounded_by_shortest_walks() {
        let params = GenerationParams::default();
        let bounds = Rect::new(0, 0, params.width, params.height);
        for seed in 0..10 {
            let mut rng = MapRng::new(seed);
            let mut regions = generate_regions(bounds, &params, &mut rng).unwrap();
            remove_rooms(&mut regions, &params, &mut rng);
            let spanning = generate_minimal_spanning_tree(&mut regions, &mut rng).unwrap();
            let optional = generate_optional_connections(&mut regions, &spanning, &mut rng);
            let mut ercs =
                generate_empty_region_connections(&regions, &spanning, &optional, &mut rng);
            let mut connections =
                select_connections(&regions, spanning, optional, &ercs, &params, &mut rng);
            strip_orphaned_connections(&mut connections, &mut ercs);
            rebuild_exits(&mut regions, &connections);

            let mut carver = TileCarver::new(
                params.width,
                params.height,
                &regions,
                &connections,
                params.heuristic,
            );
            let mut budget = 0;
            for c in &connections {
                let own = [
                    c.start_coordinates,
                    c.middle_coordinates,
                    c.end_coordinates,
                ];
                for (from, to) in [(own[0], own[1]), (own[1], own[2])] {
                    let walk = shortest_walk(&carver, from, to, &own);
                    let before = carver.grid().count(TileType::FloorHall);
                    carver.carve_leg(from, to, &own, &mut rng).unwrap();
                    let added = carver.grid().count(TileType::FloorHall) - before;
                    assert!(added <= walk, "seed {seed}: {from:?} -> {to:?}");
                    budget += walk;
                }
            }
            let total = carver.grid().count(TileType::FloorHall);
            assert!(total <= budget, "seed {seed}: {total} > {budget}");
        }
    }
}

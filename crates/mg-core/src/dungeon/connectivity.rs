//! Reachability over the finished grid
//!
//! Flood fills over non-blocking tiles, moving in the four cardinal
//! directions. Used to verify that a generated level is fully connected and
//! to measure walking distances for spawn planning.

use std::collections::VecDeque;

use crate::coords::Coordinates;

use super::tile::TileGrid;

/// Walking distance from `from` to every tile, row-major; `None` where the
/// tile is blocking or cannot be reached
pub fn distance_map(grid: &TileGrid, from: Coordinates) -> Vec<Option<u32>> {
    let width = grid.width() as usize;
    let index = |c: Coordinates| c.y as usize * width + c.x as usize;
    let mut distances = vec![None; width * grid.height() as usize];

    if !grid.in_bounds(from) || grid.get(from).is_blocking() {
        return distances;
    }

    let mut queue = VecDeque::new();
    distances[index(from)] = Some(0);
    queue.push_back(from);

    while let Some(current) = queue.pop_front() {
        let next_distance = distances[index(current)].map_or(0, |d| d + 1);
        for next in current.neighbors() {
            if !grid.in_bounds(next) || grid.get(next).is_blocking() {
                continue;
            }
            let slot = &mut distances[index(next)];
            if slot.is_none() {
                *slot = Some(next_distance);
                queue.push_back(next);
            }
        }
    }

    distances
}

/// Non-blocking tiles that cannot be reached from the first one found
pub fn unreachable_floor(grid: &TileGrid) -> Vec<Coordinates> {
    let Some(origin) = grid.coordinates().find(|&c| !grid.get(c).is_blocking()) else {
        return Vec::new();
    };
    let distances = distance_map(grid, origin);
    let width = grid.width() as usize;
    grid.coordinates()
        .filter(|&c| {
            !grid.get(c).is_blocking() && distances[c.y as usize * width + c.x as usize].is_none()
        })
        .collect()
}

/// Check that every non-blocking tile can reach every other one
pub fn is_fully_connected(grid: &TileGrid) -> bool {
    unreachable_floor(grid).is_empty()
}

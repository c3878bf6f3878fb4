//! Region connection planning
//!
//! Builds a random spanning tree over the regions so that every region is
//! reachable, collects the remaining adjacent pairs as optional connections
//! (loops), and decides how empty regions are routed through.

use log::debug;

use crate::config::GenerationParams;
use crate::consts::{BORDER_INSET, MIN_BORDER_LENGTH, MIN_EXIT_SPACING};
use crate::coords::{Coordinates, Rect};
use crate::error::{GenerationError, Result};
use crate::rng::MapRng;

use super::region::{Connection, Direction, EmptyRegionConnection, Region, RegionId};

/// Wall of a room that an exit is placed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

/// The segment two regions share
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Border {
    direction: Direction,
    /// Region on the left (horizontal) or top (vertical)
    first: RegionId,
    second: RegionId,
    /// First column/row of `second`
    line: i32,
    /// Shared span along the border, half-open
    span_start: i32,
    span_end: i32,
}

impl Border {
    fn length(&self) -> i32 {
        self.span_end - self.span_start
    }
}

fn overlap(a_start: i32, a_end: i32, b_start: i32, b_end: i32) -> (i32, i32) {
    (a_start.max(b_start), a_end.min(b_end))
}

fn find_border(regions: &[Region], a: RegionId, b: RegionId) -> Option<Border> {
    let (ra, rb) = (regions[a.0].rect, regions[b.0].rect);

    let border = if ra.right() == rb.left || rb.right() == ra.left {
        let (first, second) = if ra.right() == rb.left {
            (a, b)
        } else {
            (b, a)
        };
        let (span_start, span_end) = overlap(ra.top, ra.bottom(), rb.top, rb.bottom());
        Border {
            direction: Direction::Horizontal,
            first,
            second,
            line: regions[second.0].rect.left,
            span_start,
            span_end,
        }
    } else if ra.bottom() == rb.top || rb.bottom() == ra.top {
        let (first, second) = if ra.bottom() == rb.top {
            (a, b)
        } else {
            (b, a)
        };
        let (span_start, span_end) = overlap(ra.left, ra.right(), rb.left, rb.right());
        Border {
            direction: Direction::Vertical,
            first,
            second,
            line: regions[second.0].rect.top,
            span_start,
            span_end,
        }
    } else {
        return None;
    };

    (border.length() >= MIN_BORDER_LENGTH).then_some(border)
}

/// Check if two regions share a border of at least `MIN_BORDER_LENGTH` tiles
pub fn are_adjacent(regions: &[Region], a: RegionId, b: RegionId) -> bool {
    a != b && find_border(regions, a, b).is_some()
}

/// Positions along one wall of `room`, corners excluded
fn wall_positions(room: Rect, side: Side) -> Vec<Coordinates> {
    match side {
        Side::Left | Side::Right => {
            let x = if side == Side::Left {
                room.left
            } else {
                room.right() - 1
            };
            (room.top + 1..room.bottom() - 1)
                .map(|y| Coordinates::new(x, y))
                .collect()
        }
        Side::Top | Side::Bottom => {
            let y = if side == Side::Top {
                room.top
            } else {
                room.bottom() - 1
            };
            (room.left + 1..room.right() - 1)
                .map(|x| Coordinates::new(x, y))
                .collect()
        }
    }
}

/// Pick an exit on the wall of the region's room, away from earlier exits
/// where possible
fn choose_exit(region: &Region, room: Rect, side: Side, rng: &mut MapRng) -> Coordinates {
    let positions = wall_positions(room, side);
    let spaced: Vec<Coordinates> = positions
        .iter()
        .copied()
        .filter(|p| {
            region
                .exits
                .iter()
                .all(|e| e.chebyshev_distance(*p) >= MIN_EXIT_SPACING)
        })
        .collect();
    let pool = if spaced.is_empty() {
        &positions
    } else {
        &spaced
    };
    // Validated rooms are at least 3x3, so every wall has a non-corner tile
    rng.choose(pool).copied().unwrap_or_else(|| room.center())
}

/// Endpoint of a connection inside `region`
///
/// Room regions get an exit on the wall facing the border; empty regions use
/// the tile on their side of the crossing.
fn endpoint(
    region: &Region,
    facing: Side,
    border_tile: Coordinates,
    rng: &mut MapRng,
) -> Coordinates {
    match region.room {
        Some(room) => choose_exit(region, room, facing, rng),
        None => border_tile,
    }
}

fn build_connection(
    regions: &mut [Region],
    start: RegionId,
    end: RegionId,
    border: Border,
    rng: &mut MapRng,
) -> Connection {
    let crossing = rng.range(
        border.span_start + BORDER_INSET,
        border.span_end - 1 - BORDER_INSET,
    );
    let (first_tile, second_tile, first_side, second_side) = match border.direction {
        Direction::Horizontal => (
            Coordinates::new(border.line - 1, crossing),
            Coordinates::new(border.line, crossing),
            Side::Right,
            Side::Left,
        ),
        Direction::Vertical => (
            Coordinates::new(crossing, border.line - 1),
            Coordinates::new(crossing, border.line),
            Side::Bottom,
            Side::Top,
        ),
    };

    let first_exit = endpoint(&regions[border.first.0], first_side, first_tile, rng);
    regions[border.first.0].exits.push(first_exit);
    let second_exit = endpoint(&regions[border.second.0], second_side, second_tile, rng);
    regions[border.second.0].exits.push(second_exit);

    let (start_coordinates, end_coordinates, middle_coordinates) = if start == border.first {
        (first_exit, second_exit, second_tile)
    } else {
        (second_exit, first_exit, first_tile)
    };

    Connection {
        start,
        end,
        start_coordinates,
        middle_coordinates,
        end_coordinates,
        direction: border.direction,
    }
}

/// Build a connection between two adjacent regions, recording the exits
///
/// Returns `None` when the regions do not share a long enough border.
pub fn connect_regions(
    regions: &mut [Region],
    start: RegionId,
    end: RegionId,
    rng: &mut MapRng,
) -> Option<Connection> {
    if start == end {
        return None;
    }
    let border = find_border(regions, start, end)?;
    Some(build_connection(regions, start, end, border, rng))
}

/// Connect every region with a random spanning tree
///
/// Starting from a random region, repeatedly joins a random adjacent
/// (connected, unconnected) pair. Fails when some regions cannot be reached,
/// which means the parameters cannot produce a connected level.
pub fn generate_minimal_spanning_tree(
    regions: &mut [Region],
    rng: &mut MapRng,
) -> Result<Vec<Connection>> {
    let total = regions.len();
    let mut connections = Vec::with_capacity(total.saturating_sub(1));
    if total == 0 {
        return Ok(connections);
    }

    let mut connected = vec![false; total];
    connected[rng.rn2(total as u32) as usize] = true;
    let mut connected_count = 1;

    while connected_count < total {
        let mut candidates = Vec::new();
        for from in (0..total).filter(|&i| connected[i]) {
            for to in (0..total).filter(|&j| !connected[j]) {
                if let Some(border) = find_border(regions, RegionId(from), RegionId(to)) {
                    candidates.push((RegionId(from), RegionId(to), border));
                }
            }
        }

        let Some(&(from, to, border)) = rng.choose(&candidates) else {
            return Err(GenerationError::Disconnected {
                connected: connected_count,
                total,
                min_border: MIN_BORDER_LENGTH,
            });
        };
        connections.push(build_connection(regions, from, to, border, rng));
        connected[to.0] = true;
        connected_count += 1;
    }

    debug!("spanning tree: {} connections", connections.len());
    Ok(connections)
}

/// One connection for every adjacent pair the spanning tree left unjoined
pub fn generate_optional_connections(
    regions: &mut [Region],
    spanning: &[Connection],
    rng: &mut MapRng,
) -> Vec<Connection> {
    let total = regions.len();
    let mut connections = Vec::new();
    for a in 0..total {
        for b in a + 1..total {
            let (a, b) = (RegionId(a), RegionId(b));
            if spanning.iter().any(|c| c.joins(a, b)) {
                continue;
            }
            if let Some(connection) = connect_regions(regions, a, b, rng) {
                connections.push(connection);
            }
        }
    }
    debug!("optional connections: {}", connections.len());
    connections
}

/// Decide which neighbors each empty region routes corridors between
///
/// Neighbors come from the spanning tree. An empty region with exactly one
/// tree neighbor would be a dead end, so it also takes one optional
/// connection picked uniformly among those touching it. The pairing is
/// recorded on both sides when the neighbor is itself empty.
pub fn generate_empty_region_connections(
    regions: &[Region],
    spanning: &[Connection],
    optional: &[Connection],
    rng: &mut MapRng,
) -> Vec<EmptyRegionConnection> {
    let mut empty_region_connections: Vec<EmptyRegionConnection> = regions
        .iter()
        .enumerate()
        .filter(|(_, region)| !region.has_room())
        .map(|(index, _)| {
            let region = RegionId(index);
            EmptyRegionConnection {
                region,
                neighbors: spanning.iter().filter_map(|c| c.other(region)).collect(),
            }
        })
        .collect();

    let mut dead_end_links = Vec::new();
    for erc in &empty_region_connections {
        if erc.neighbors.len() != 1 {
            continue;
        }
        let qualifying: Vec<RegionId> = optional
            .iter()
            .filter_map(|c| c.other(erc.region))
            .filter(|n| !erc.neighbors.contains(n))
            .collect();
        if let Some(&neighbor) = rng.choose(&qualifying) {
            dead_end_links.push((erc.region, neighbor));
        }
    }

    for (a, b) in dead_end_links {
        for erc in empty_region_connections.iter_mut() {
            let other = if erc.region == a {
                b
            } else if erc.region == b {
                a
            } else {
                continue;
            };
            if !erc.neighbors.contains(&other) {
                erc.neighbors.push(other);
            }
        }
    }

    empty_region_connections
}

/// Final connection set to carve
///
/// The spanning tree, every optional connection an empty region relies on,
/// and each remaining room-to-room optional connection with probability
/// `extra_connection_chance`.
pub fn select_connections(
    regions: &[Region],
    spanning: Vec<Connection>,
    optional: Vec<Connection>,
    empty_region_connections: &[EmptyRegionConnection],
    params: &GenerationParams,
    rng: &mut MapRng,
) -> Vec<Connection> {
    let mut selected = spanning;
    for connection in optional {
        let routes_empty_region = empty_region_connections.iter().any(|erc| {
            connection
                .other(erc.region)
                .is_some_and(|n| erc.neighbors.contains(&n))
        });
        let joins_rooms =
            regions[connection.start.0].has_room() && regions[connection.end.0].has_room();
        if routes_empty_region || (joins_rooms && rng.chance(params.extra_connection_chance)) {
            selected.push(connection);
        }
    }
    selected
}

/// Reset every region's exits to the endpoints of `connections`
pub fn rebuild_exits(regions: &mut [Region], connections: &[Connection]) {
    for region in regions.iter_mut() {
        region.exits.clear();
    }
    for connection in connections {
        regions[connection.start.0]
            .exits
            .push(connection.start_coordinates);
        regions[connection.end.0]
            .exits
            .push(connection.end_coordinates);
    }
}

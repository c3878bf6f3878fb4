//! Spawn planning
//!
//! Places the down stairs and picks spawn points for enemies, items and the
//! player on room floors. What actually spawns there is up to the caller.

use serde::{Deserialize, Serialize};

use crate::config::GenerationParams;
use crate::coords::{Coordinates, Rect};
use crate::rng::MapRng;

use super::connectivity::distance_map;
use super::tile::{TileGrid, TileType};

/// Suggested positions for the things that populate a level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnPlan {
    pub stairs: Option<Coordinates>,
    pub start: Option<Coordinates>,
    pub enemies: Vec<Coordinates>,
    pub items: Vec<Coordinates>,
}

fn room_floor(grid: &TileGrid, room: Rect) -> Vec<Coordinates> {
    room.inset(1)
        .coordinates()
        .filter(|&c| grid.get(c) == TileType::Floor)
        .collect()
}

/// Place stairs in `grid` and choose spawn points
///
/// Enemy and item counts are drawn from the configured ranges and capped by
/// the free floor. One tile is always held back for the player start, which
/// goes wherever the average walking distance to the enemies and the stairs
/// is largest.
pub fn plan_spawns(
    grid: &mut TileGrid,
    rooms: &[Rect],
    params: &GenerationParams,
    rng: &mut MapRng,
) -> SpawnPlan {
    let mut plan = SpawnPlan::default();

    let stairs = rng
        .choose(rooms)
        .and_then(|&room| rng.choose(&room_floor(grid, room)).copied());
    if let Some(stairs) = stairs {
        grid.set(stairs, TileType::StairsDown);
        plan.stairs = Some(stairs);
    }

    let mut free: Vec<Coordinates> = rooms.iter().flat_map(|&r| room_floor(grid, r)).collect();
    if free.is_empty() {
        return plan;
    }
    rng.shuffle(&mut free);

    let enemies = rng.between(params.enemies.min, params.enemies.max) as usize;
    let enemies = enemies.min(free.len() - 1);
    plan.enemies = free.drain(..enemies).collect();

    let targets: Vec<Coordinates> = plan.enemies.iter().copied().chain(plan.stairs).collect();
    let start_index = best_start(grid, &free, &targets);
    plan.start = Some(free.swap_remove(start_index));

    let items = rng.between(params.items.min, params.items.max) as usize;
    plan.items = free.into_iter().take(items).collect();

    plan
}

/// Index of the candidate farthest, on average, from every target
fn best_start(grid: &TileGrid, candidates: &[Coordinates], targets: &[Coordinates]) -> usize {
    if targets.is_empty() {
        return 0;
    }
    let width = grid.width() as usize;
    let maps: Vec<Vec<Option<u32>>> = targets.iter().map(|&t| distance_map(grid, t)).collect();
    let score = |c: Coordinates| -> u64 {
        let index = c.y as usize * width + c.x as usize;
        maps.iter().map(|m| u64::from(m[index].unwrap_or(0))).sum()
    };

    // The target count is the same for every candidate, so the summed
    // distance ranks the same as the average
    let mut best = 0;
    let mut best_score = 0;
    for (i, &c) in candidates.iter().enumerate() {
        let s = score(c);
        if s > best_score {
            best = i;
            best_score = s;
        }
    }
    best
}

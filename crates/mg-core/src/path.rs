//! Grid pathfinding with A*
//!
//! The search walks 4-connected grids. Callers describe the walkable area as
//! a candidate set, so the pathfinder knows nothing about map structure;
//! corridor carving and unit movement both drive it this way.
//!
//! Costs are integer units. When a cost function can charge less than one
//! unit per step, pass that minimum as the heuristic scale so the estimate
//! stays admissible and returned paths stay minimal.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::coords::Coordinates;
use crate::rng::MapRng;

/// Distance estimate used for the `h` term
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Heuristic {
    #[default]
    Manhattan,
    Euclidean,
}

impl Heuristic {
    /// Lower bound on the number of steps between two tiles
    pub fn estimate(&self, from: Coordinates, to: Coordinates) -> u32 {
        match self {
            Heuristic::Manhattan => from.manhattan_distance(to),
            // Rounded down so it never exceeds the 4-way step count
            Heuristic::Euclidean => from.euclidean_distance(to).floor() as u32,
        }
    }
}

/// A* node for the priority queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenNode {
    f_cost: u32,
    tiebreak: u64,
    g_cost: u32,
    coordinates: Coordinates,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior; equal f costs fall through
        // to the random key
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.tiebreak.cmp(&self.tiebreak))
            .then_with(|| other.g_cost.cmp(&self.g_cost))
            .then_with(|| other.coordinates.cmp(&self.coordinates))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

type BlockedFn<'a> = Box<dyn Fn(Coordinates) -> bool + 'a>;
type CostFn<'a> = Box<dyn Fn(Coordinates, Coordinates) -> u32 + 'a>;

/// Stateless A* search over a caller-supplied set of coordinates
///
/// Parameterized by a blocked-cell predicate and a per-step cost. Each call
/// to [`Pathfinder::find_path`] owns its open and closed sets, so one
/// instance can serve any number of searches.
pub struct Pathfinder<'a> {
    blocked: BlockedFn<'a>,
    cost: CostFn<'a>,
    heuristic: Heuristic,
    heuristic_scale: u32,
}

impl<'a> Pathfinder<'a> {
    /// Unit step cost, nothing blocked
    pub fn new(heuristic: Heuristic) -> Self {
        Self {
            blocked: Box::new(|_| false),
            cost: Box::new(|_, _| 1),
            heuristic,
            heuristic_scale: 1,
        }
    }

    /// Tiles for which `blocked` returns true are never entered
    pub fn with_blocked(mut self, blocked: impl Fn(Coordinates) -> bool + 'a) -> Self {
        self.blocked = Box::new(blocked);
        self
    }

    /// Cost of stepping `from -> to`; `min_step_cost` must not exceed any
    /// value the function returns
    pub fn with_cost(
        mut self,
        cost: impl Fn(Coordinates, Coordinates) -> u32 + 'a,
        min_step_cost: u32,
    ) -> Self {
        self.cost = Box::new(cost);
        self.heuristic_scale = min_step_cost;
        self
    }

    /// Find a minimal-cost path from `start` to `goal`, both inclusive
    ///
    /// Returns `[start]` when the endpoints coincide and an empty vector when
    /// no path exists. Ties on the `f` cost are broken uniformly at random.
    pub fn find_path(
        &self,
        start: Coordinates,
        goal: Coordinates,
        candidates: &HashSet<Coordinates>,
        rng: &mut MapRng,
    ) -> Vec<Coordinates> {
        if start == goal {
            return vec![start];
        }
        if !candidates.contains(&goal) || (self.blocked)(goal) {
            return Vec::new();
        }

        let mut open_set = BinaryHeap::new();
        let mut g_scores: HashMap<Coordinates, u32> = HashMap::new();
        let mut came_from: HashMap<Coordinates, Coordinates> = HashMap::new();
        let mut closed: HashSet<Coordinates> = HashSet::new();

        g_scores.insert(start, 0);
        open_set.push(OpenNode {
            f_cost: self.estimate(start, goal),
            tiebreak: rng.next_u64(),
            g_cost: 0,
            coordinates: start,
        });

        while let Some(current) = open_set.pop() {
            // Stale entries for tiles already expanded through a cheaper route
            if !closed.insert(current.coordinates) {
                continue;
            }
            if current.coordinates == goal {
                return reconstruct_path(&came_from, start, goal);
            }

            for next in current.coordinates.neighbors() {
                if closed.contains(&next) || !candidates.contains(&next) || (self.blocked)(next) {
                    continue;
                }
                let g_cost = current
                    .g_cost
                    .saturating_add((self.cost)(current.coordinates, next));
                if g_cost < g_scores.get(&next).copied().unwrap_or(u32::MAX) {
                    g_scores.insert(next, g_cost);
                    came_from.insert(next, current.coordinates);
                    open_set.push(OpenNode {
                        f_cost: g_cost.saturating_add(self.estimate(next, goal)),
                        tiebreak: rng.next_u64(),
                        g_cost,
                        coordinates: next,
                    });
                }
            }
        }

        Vec::new()
    }

    fn estimate(&self, from: Coordinates, to: Coordinates) -> u32 {
        self.heuristic
            .estimate(from, to)
            .saturating_mul(self.heuristic_scale)
    }
}

/// Walk parent links back from the goal
fn reconstruct_path(
    came_from: &HashMap<Coordinates, Coordinates>,
    start: Coordinates,
    goal: Coordinates,
) -> Vec<Coordinates> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match came_from.get(&current) {
            Some(&prev) => {
                path.push(prev);
                current = prev;
            }
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}

/// Total cost of walking `path` under `cost`
pub fn path_cost(path: &[Coordinates], cost: impl Fn(Coordinates, Coordinates) -> u32) -> u32 {
    path.windows(2).map(|w| cost(w[0], w[1])).sum()
}

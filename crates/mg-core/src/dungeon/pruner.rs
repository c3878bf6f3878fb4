//! Room pruning
//!
//! Turns a random share of rooms into empty regions, and later strips the
//! corridor stubs that would lead into an empty region and stop there.

use log::debug;

use crate::config::GenerationParams;
use crate::rng::MapRng;

use super::region::{Connection, EmptyRegionConnection, Region};

/// Remove rooms until a random fraction of regions keeps one
///
/// The kept fraction is drawn uniformly from
/// `min_room_fraction..=max_room_fraction` and rounded to a room count;
/// at least one room always survives. Returns the number of rooms kept.
pub fn remove_rooms(regions: &mut [Region], params: &GenerationParams, rng: &mut MapRng) -> usize {
    let total = regions.len();
    if total == 0 {
        return 0;
    }

    let fraction = rng.fraction(params.min_room_fraction, params.max_room_fraction);
    let keep = ((fraction * total as f64).round() as usize).clamp(1, total);

    let mut order: Vec<usize> = (0..total).collect();
    rng.shuffle(&mut order);
    for &index in &order[keep..] {
        regions[index].room = None;
    }

    debug!("kept {keep} of {total} rooms (target fraction {fraction:.2})");
    keep
}

/// Drop connections that dead-end inside an empty region
///
/// An empty region with fewer than two connected neighbors contributes a
/// corridor that leads nowhere. Its connections are removed and its
/// neighbors forget it, which can orphan further empty regions, so this runs
/// until nothing changes. Only leaves of the connection graph are removed,
/// so every remaining region stays reachable.
pub fn strip_orphaned_connections(
    connections: &mut Vec<Connection>,
    empty_region_connections: &mut Vec<EmptyRegionConnection>,
) {
    let mut stripped = 0;
    while let Some(pos) = empty_region_connections
        .iter()
        .position(|erc| erc.neighbors.len() < 2)
    {
        let orphan = empty_region_connections.remove(pos);
        let before = connections.len();
        connections.retain(|c| !c.touches(orphan.region));
        stripped += before - connections.len();
        for erc in empty_region_connections.iter_mut() {
            erc.neighbors.retain(|&n| n != orphan.region);
        }
    }
    if stripped > 0 {
        debug!("stripped {stripped} orphaned connections");
    }
}

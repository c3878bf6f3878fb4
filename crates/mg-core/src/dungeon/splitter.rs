//! Region splitting
//!
//! Recursively cuts the map rectangle in two until neither half could hold
//! another padded minimum-size room, then drops a randomly sized room into
//! each leaf. The halves are concatenated into a flat list; no tree is kept.

use log::debug;

use crate::config::GenerationParams;
use crate::coords::Rect;
use crate::error::{GenerationError, Result};
use crate::rng::MapRng;

use super::region::{Direction, Region};

/// Partition `bounds` into regions, each holding one room
///
/// The regions tile `bounds` exactly. Fails when `bounds` cannot fit even a
/// single padded minimum-size room.
pub fn generate_regions(
    bounds: Rect,
    params: &GenerationParams,
    rng: &mut MapRng,
) -> Result<Vec<Region>> {
    let min_section = params.min_section();
    if bounds.width < min_section || bounds.height < min_section {
        return Err(GenerationError::MapTooSmall {
            width: bounds.width,
            height: bounds.height,
            min_section,
            min_room_dimension: params.min_room_dimension,
            min_room_padding: params.min_room_padding,
        });
    }

    let regions = split(bounds, params, rng);
    debug!(
        "split {}x{} into {} regions",
        bounds.width,
        bounds.height,
        regions.len()
    );
    Ok(regions)
}

fn split(rect: Rect, params: &GenerationParams, rng: &mut MapRng) -> Vec<Region> {
    let min_section = params.min_section();
    let can_split_horizontally = rect.width >= 2 * min_section;
    let can_split_vertically = rect.height >= 2 * min_section;

    let direction = match (can_split_horizontally, can_split_vertically) {
        (false, false) => {
            let room = place_room(rect, params, rng);
            return vec![Region::new(rect, Some(room))];
        }
        (true, false) => Direction::Horizontal,
        (false, true) => Direction::Vertical,
        (true, true) => {
            if rng.one_in(2) {
                Direction::Horizontal
            } else {
                Direction::Vertical
            }
        }
    };

    let (first, second) = match direction {
        Direction::Horizontal => {
            let x = rng.range(rect.left + min_section, rect.right() - min_section);
            (
                Rect::new(rect.left, rect.top, x - rect.left, rect.height),
                Rect::new(x, rect.top, rect.right() - x, rect.height),
            )
        }
        Direction::Vertical => {
            let y = rng.range(rect.top + min_section, rect.bottom() - min_section);
            (
                Rect::new(rect.left, rect.top, rect.width, y - rect.top),
                Rect::new(rect.left, y, rect.width, rect.bottom() - y),
            )
        }
    };

    let mut regions = split(first, params, rng);
    regions.extend(split(second, params, rng));
    regions
}

/// Pick a room size and position inside `rect`, keeping the padding
fn place_room(rect: Rect, params: &GenerationParams, rng: &mut MapRng) -> Rect {
    let padding = params.min_room_padding;
    let max_width = params.max_room_dimension.min(rect.width - 2 * padding);
    let max_height = params.max_room_dimension.min(rect.height - 2 * padding);
    let width = rng.range(params.min_room_dimension, max_width);
    let height = rng.range(params.min_room_dimension, max_height);
    let left = rng.range(rect.left + padding, rect.right() - padding - width);
    let top = rng.range(rect.top + padding, rect.bottom() - padding - height);
    Rect::new(left, top, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> GenerationParams {
        GenerationParams::default()
    }

    #[test]
    fn test_regions_tile_the_map() {
        let bounds = Rect::new(0, 0, 40, 30);
        for seed in 0..20 {
            let mut rng = MapRng::new(seed);
            let regions = generate_regions(bounds, &params(), &mut rng).unwrap();
            let area: i32 = regions.iter().map(|r| r.rect.area()).sum();
            assert_eq!(area, bounds.area());
            for (i, a) in regions.iter().enumerate() {
                assert!(bounds.contains_rect(&a.rect));
                for b in &regions[i + 1..] {
                    assert!(
                        !a.rect.intersects(&b.rect),
                        "{:?} overlaps {:?}",
                        a.rect,
                        b.rect
                    );
                }
            }
        }
    }

    #[test]
    fn test_rooms_respect_padding_and_bounds() {
        let params = GenerationParams {
            min_room_padding: 2,
            ..params()
        };
        let mut rng = MapRng::new(17);
        let regions = generate_regions(Rect::new(0, 0, 64, 48), &params, &mut rng).unwrap();
        for region in &regions {
            let room = region.room.expect("fresh regions always hold a room");
            let inner = region.rect.inset(params.min_room_padding);
            assert!(inner.contains_rect(&room));
            assert!(room.width >= params.min_room_dimension);
            assert!(room.height >= params.min_room_dimension);
            assert!(room.width <= params.max_room_dimension);
            assert!(room.height <= params.max_room_dimension);
            assert!(region.rect.width >= params.min_section());
            assert!(region.rect.height >= params.min_section());
        }
    }

    #[test]
    fn test_minimum_map_is_a_single_region() {
        let params = params();
        let size = params.min_section();
        let mut rng = MapRng::new(1);
        let regions = generate_regions(Rect::new(0, 0, size, size), &params, &mut rng).unwrap();
        assert_eq!(regions.len(), 1);
        let room = regions[0].room.unwrap();
        assert_eq!(room, Rect::new(1, 1, 5, 5));
    }

    #[test]
    fn test_map_too_small() {
        let mut rng = MapRng::new(1);
        let err = generate_regions(Rect::new(0, 0, 6, 30), &params(), &mut rng).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::MapTooSmall {
                width: 6,
                min_section: 7,
                ..
            }
        ));
    }

    #[test]
    fn test_offset_bounds_are_respected() {
        let bounds = Rect::new(5, 3, 30, 20);
        let mut rng = MapRng::new(8);
        let regions = generate_regions(bounds, &params(), &mut rng).unwrap();
        assert!(regions.iter().all(|r| bounds.contains_rect(&r.rect)));
    }
}

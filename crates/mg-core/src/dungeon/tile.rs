//! Tile types and the tile grid

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::coords::{Coordinates, Rect};

/// Tile type tag
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum TileType {
    /// Solid rock, never carved
    #[default]
    None = 0,
    /// Room floor
    Floor = 1,
    /// Corridor floor, doorways included
    FloorHall = 2,
    /// Room wall
    Wall = 3,
    /// Wall face drawn above a corridor
    WallHall = 4,
    /// Top row of a room wall, drawn facing the viewer
    WallTop = 5,
    StairsDown = 6,
}

impl TileType {
    /// Check if units can stand on this tile
    pub const fn is_floor(&self) -> bool {
        matches!(
            self,
            TileType::Floor | TileType::FloorHall | TileType::StairsDown
        )
    }

    /// Check if this tile stops movement
    pub const fn is_blocking(&self) -> bool {
        !self.is_floor()
    }

    /// Get the display character for this tile type
    pub const fn symbol(&self) -> char {
        match self {
            TileType::None => ' ',
            TileType::Floor => '.',
            TileType::FloorHall => '#',
            TileType::Wall => '|',
            TileType::WallHall => '=',
            TileType::WallTop => '-',
            TileType::StairsDown => '>',
        }
    }
}

/// Fixed-size 2-D grid of tiles, stored row-major (`y` outer, `x` inner)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    width: i32,
    height: i32,
    tiles: Vec<Vec<TileType>>,
}

impl TileGrid {
    /// Create a grid filled with `TileType::None`
    pub fn new(width: i32, height: i32) -> Self {
        let (w, h) = (width.max(0) as usize, height.max(0) as usize);
        Self {
            width: width.max(0),
            height: height.max(0),
            tiles: vec![vec![TileType::None; w]; h],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    pub fn in_bounds(&self, c: Coordinates) -> bool {
        self.bounds().contains(c)
    }

    /// Tile at `c`, `None` for anything outside the grid
    pub fn get(&self, c: Coordinates) -> TileType {
        if self.in_bounds(c) {
            self.tiles[c.y as usize][c.x as usize]
        } else {
            TileType::None
        }
    }

    /// Set the tile at `c`; writes outside the grid are ignored
    pub fn set(&mut self, c: Coordinates, tile: TileType) {
        if self.in_bounds(c) {
            self.tiles[c.y as usize][c.x as usize] = tile;
        }
    }

    /// Rows of tiles, top to bottom
    pub fn rows(&self) -> &[Vec<TileType>] {
        &self.tiles
    }

    /// Every coordinate of the grid, row by row
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinates> + use<> {
        self.bounds().coordinates()
    }

    pub fn count(&self, tile: TileType) -> usize {
        self.tiles
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&t| t == tile)
            .count()
    }

    /// Render the grid with one character per tile
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.tiles.len() * (self.width as usize + 1));
        for row in &self.tiles {
            out.extend(row.iter().map(TileType::symbol));
            out.push('\n');
        }
        out
    }
}

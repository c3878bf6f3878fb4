//! Grid coordinates and rectangles
//!
//! Rectangles are half-open: a `Rect` covers `left..right()` by `top..bottom()`.

use serde::{Deserialize, Serialize};

/// A tile position, `x` grows to the right and `y` grows downwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: i32,
    pub y: i32,
}

impl Coordinates {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn manhattan_distance(&self, other: Coordinates) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// King-move distance, used for "within n tiles" checks
    pub fn chebyshev_distance(&self, other: Coordinates) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    pub fn euclidean_distance(&self, other: Coordinates) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        dx.hypot(dy)
    }

    /// The four cardinal neighbors, in N/E/S/W order
    pub fn neighbors(&self) -> [Coordinates; 4] {
        [
            self.offset(0, -1),
            self.offset(1, 0),
            self.offset(0, 1),
            self.offset(-1, 0),
        ]
    }
}

/// An axis-aligned rectangle of tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// One past the rightmost column
    pub const fn right(&self) -> i32 {
        self.left + self.width
    }

    /// One past the bottom row
    pub const fn bottom(&self) -> i32 {
        self.top + self.height
    }

    /// Check if a tile lies inside this rectangle
    pub const fn contains(&self, c: Coordinates) -> bool {
        c.x >= self.left && c.x < self.right() && c.y >= self.top && c.y < self.bottom()
    }

    /// Check if this rectangle contains another
    pub const fn contains_rect(&self, other: &Rect) -> bool {
        self.left <= other.left
            && self.top <= other.top
            && self.right() >= other.right()
            && self.bottom() >= other.bottom()
    }

    /// Check if this rectangle overlaps another
    pub const fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }

    /// Shrink by `n` tiles on every side
    pub const fn inset(&self, n: i32) -> Rect {
        Rect::new(
            self.left + n,
            self.top + n,
            self.width - 2 * n,
            self.height - 2 * n,
        )
    }

    /// Check if a tile lies on the outermost ring of this rectangle
    pub const fn on_border(&self, c: Coordinates) -> bool {
        self.contains(c)
            && (c.x == self.left
                || c.x == self.right() - 1
                || c.y == self.top
                || c.y == self.bottom() - 1)
    }

    pub const fn area(&self) -> i32 {
        self.width * self.height
    }

    pub const fn center(&self) -> Coordinates {
        Coordinates::new(self.left + self.width / 2, self.top + self.height / 2)
    }

    /// Every tile of the rectangle, row by row
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinates> + use<> {
        let Rect {
            left,
            top,
            width,
            height,
        } = *self;
        (top..top + height).flat_map(move |y| {
            (left..left + width).map(move |x| Coordinates::new(x, y))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distances() {
        let a = Coordinates::new(1, 2);
        let b = Coordinates::new(4, -2);
        assert_eq!(a.manhattan_distance(b), 7);
        assert_eq!(a.chebyshev_distance(b), 4);
        assert!((a.euclidean_distance(b) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_neighbors_are_cardinal() {
        let c = Coordinates::new(5, 5);
        for n in c.neighbors() {
            assert_eq!(c.manhattan_distance(n), 1);
        }
    }

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(2, 3, 4, 5);
        assert_eq!(r.right(), 6);
        assert_eq!(r.bottom(), 8);
        assert!(r.contains(Coordinates::new(2, 3)));
        assert!(r.contains(Coordinates::new(5, 7)));
        assert!(!r.contains(Coordinates::new(6, 7)));
        assert!(!r.contains(Coordinates::new(5, 8)));
        assert_eq!(r.coordinates().count(), 20);
    }

    #[test]
    fn test_rect_border_and_inset() {
        let r = Rect::new(0, 0, 5, 5);
        assert!(r.on_border(Coordinates::new(0, 2)));
        assert!(r.on_border(Coordinates::new(4, 4)));
        assert!(!r.on_border(Coordinates::new(2, 2)));
        let inner = r.inset(1);
        assert_eq!(inner, Rect::new(1, 1, 3, 3));
        assert!(r.contains_rect(&inner));
        assert!(!inner.contains_rect(&r));
    }

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(0, 0, 4, 4);
        assert!(a.intersects(&Rect::new(3, 3, 2, 2)));
        assert!(!a.intersects(&Rect::new(4, 0, 2, 2)));
    }
}

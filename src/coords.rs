use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Chebyshev distance: diagonal and axis-aligned steps cost the same.
    pub fn chebyshev(self, other: GridPos) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx.max(dy)
    }
}

impl From<(i32, i32)> for GridPos {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned square of cells, inclusive on both corners. Not clipped to
/// any grid; callers bounds-check each cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRect {
    pub min: GridPos, // inclusive
    pub max: GridPos, // inclusive
}

impl GridRect {
    pub fn new(min: GridPos, max: GridPos) -> Self {
        assert!(min.x <= max.x && min.y <= max.y, "Invalid GridRect bounds");
        Self { min, max }
    }

    pub fn around(center: GridPos, radius: u32) -> Self {
        let r = radius as i32;
        Self::new(center.offset(-r, -r), center.offset(r, r))
    }

    pub fn contains(&self, c: GridPos) -> bool {
        c.x >= self.min.x && c.x <= self.max.x && c.y >= self.min.y && c.y <= self.max.y
    }

    pub fn width(&self) -> i32 {
        self.max.x - self.min.x + 1
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y + 1
    }

    /// Row-major: lowest `y` first, then lowest `x`.
    pub fn iter_cells(&self) -> impl Iterator<Item = GridPos> {
        let min = self.min;
        let max = self.max;
        (min.y..=max.y).flat_map(move |y| (min.x..=max.x).map(move |x| GridPos { x, y }))
    }

    pub fn border_cells(&self) -> impl Iterator<Item = GridPos> {
        let min = self.min;
        let max = self.max;
        self.iter_cells()
            .filter(move |c| c.x == min.x || c.x == max.x || c.y == min.y || c.y == max.y)
    }
}

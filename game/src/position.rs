use std::ops::{Add, Sub};

/// Integer cell coordinate on the level grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell containing a real-valued point. Truncates toward zero.
    pub fn containing(x: f32, y: f32) -> Self {
        Self {
            x: x as i32,
            y: y as i32,
        }
    }

    pub(crate) fn in_bounds(self, bounds: (usize, usize)) -> bool {
        let (width, height) = bounds;
        let x_in_bounds = self.x >= 0 && (self.x as usize) < width;
        let y_in_bounds = self.y >= 0 && (self.y as usize) < height;
        x_in_bounds && y_in_bounds
    }

    /// True if `other` lies within one cell of `self` on both axes.
    pub(crate) fn adjacent_or_same(self, other: Position) -> bool {
        let PositionDelta { dx, dy } = other - self;
        dx.abs() <= 1 && dy.abs() <= 1
    }
}

/// Offset between two cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionDelta {
    pub dx: i32,
    pub dy: i32,
}

impl PositionDelta {
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

impl Add<PositionDelta> for Position {
    type Output = Position;

    fn add(self, delta: PositionDelta) -> Position {
        let x = self.x + delta.dx;
        let y = self.y + delta.dy;
        Position { x, y }
    }
}

impl Sub for Position {
    type Output = PositionDelta;

    fn sub(self, other: Position) -> PositionDelta {
        PositionDelta {
            dx: self.x - other.x,
            dy: self.y - other.y,
        }
    }
}

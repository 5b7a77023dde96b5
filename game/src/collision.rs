//! Blocking tests on real-valued coordinates, shared by the player and enemies.

use crate::grid::{Grid, Tile};
use crate::position::Position;

/// The tile under a real-valued point. Out-of-range points read as walls.
pub fn tile_at(grid: &Grid, x: f32, y: f32) -> Tile {
    grid.at(Position::containing(x, y))
}

/// True if the cell containing `(x, y)` cannot be entered.
pub fn is_blocked(grid: &Grid, x: f32, y: f32) -> bool {
    tile_at(grid, x, y).is_solid()
}

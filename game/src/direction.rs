use crate::position::PositionDelta;

/// Gravity polarity. `Down` points toward increasing y.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Gravity {
    #[default]
    Down,
    Up,
}

impl Gravity {
    /// +1 for `Down`, -1 for `Up`.
    pub fn sign(self) -> f32 {
        match self {
            Gravity::Down => 1.0,
            Gravity::Up => -1.0,
        }
    }

    pub fn flipped(self) -> Gravity {
        match self {
            Gravity::Down => Gravity::Up,
            Gravity::Up => Gravity::Down,
        }
    }

    pub(crate) fn delta(self) -> PositionDelta {
        match self {
            Gravity::Down => PositionDelta::new(0, 1),
            Gravity::Up => PositionDelta::new(0, -1),
        }
    }
}

/// Horizontal patrol direction of an enemy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn reversed(self) -> Facing {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }

    pub(crate) fn delta(self) -> PositionDelta {
        match self {
            Facing::Left => PositionDelta::new(-1, 0),
            Facing::Right => PositionDelta::new(1, 0),
        }
    }
}

use crate::position::Position;

/// The level's single key. Whether it is held lives on the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Key {
    pub pos: Position,
}

impl Key {
    pub fn new(pos: Position) -> Self {
        Self { pos }
    }
}

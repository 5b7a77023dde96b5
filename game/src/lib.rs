pub mod collision;
pub mod detour;
pub mod direction;
pub mod game;
pub mod grid;
pub mod levels;
pub mod position;
pub mod scores;

pub(crate) mod input;
pub(crate) mod render;
pub(crate) mod storage;

pub mod game_app;

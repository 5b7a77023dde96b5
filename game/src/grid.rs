use crate::game::EnemyKind;
use crate::position::Position;

mod parse;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Empty,
    Wall,
    Platform,
    Exit,
    SecretExit,
    PlayerSpawn,
    KeySpawn,
    StandardEnemySpawn,
    InvertedEnemySpawn,
}

impl Tile {
    pub(crate) fn from_symbol(symbol: char) -> Tile {
        match symbol {
            '#' => Tile::Wall,
            '=' => Tile::Platform,
            'S' => Tile::Exit,
            '+' => Tile::SecretExit,
            '@' => Tile::PlayerSpawn,
            'K' => Tile::KeySpawn,
            'E' => Tile::StandardEnemySpawn,
            'F' => Tile::InvertedEnemySpawn,
            _ => Tile::Empty,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Tile::Empty => ' ',
            Tile::Wall => '#',
            Tile::Platform => '=',
            Tile::Exit => 'S',
            Tile::SecretExit => '+',
            Tile::PlayerSpawn => '@',
            Tile::KeySpawn => 'K',
            Tile::StandardEnemySpawn => 'E',
            Tile::InvertedEnemySpawn => 'F',
        }
    }

    /// Walls and platforms. Exits are passable triggers and spawn markers
    /// behave as empty space once the level is loaded.
    pub fn is_solid(self) -> bool {
        matches!(self, Tile::Wall | Tile::Platform)
    }

    pub fn is_spawn_marker(self) -> bool {
        matches!(
            self,
            Tile::PlayerSpawn | Tile::KeySpawn | Tile::StandardEnemySpawn | Tile::InvertedEnemySpawn
        )
    }
}

/// Entity positions read from a grid's spawn markers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Spawns {
    pub player: Option<Position>,
    pub key: Option<Position>,
    pub enemies: Vec<(Position, EnemyKind)>,
}

/// Rectangular tile map of one level. Immutable once loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    tiles: Vec<Vec<Tile>>,
    width: usize,
    height: usize,
}

impl Grid {
    pub(crate) fn new(tiles: Vec<Vec<Tile>>) -> Self {
        let height = tiles.len();
        let width = tiles.first().map_or(0, Vec::len);
        assert!(width > 0 && height > 0, "grid must have at least one cell");
        for row in &tiles {
            assert_eq!(row.len(), width);
        }
        Self {
            tiles,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bounds(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// The tile at `pos`, or `None` outside the grid.
    pub fn get(&self, pos: Position) -> Option<Tile> {
        if pos.in_bounds(self.bounds()) {
            Some(self.tiles[pos.y as usize][pos.x as usize])
        } else {
            None
        }
    }

    /// Fail-closed lookup: anything outside the grid reads as a wall.
    pub fn at(&self, pos: Position) -> Tile {
        self.get(pos).unwrap_or(Tile::Wall)
    }

    pub fn entries(&self) -> impl Iterator<Item = (Position, Tile)> {
        self.tiles.iter().enumerate().flat_map(move |(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, &tile)| (Position::new(x as i32, y as i32), tile))
        })
    }

    pub(crate) fn find_tiles<F: FnMut(Tile) -> bool>(
        &self,
        mut f: F,
    ) -> impl Iterator<Item = (Position, Tile)> + use<'_, F> {
        self.entries().filter(move |&(_, tile)| f(tile))
    }

    pub fn spawns(&self) -> Spawns {
        let mut spawns = Spawns::default();
        for (pos, tile) in self.find_tiles(Tile::is_spawn_marker) {
            match tile {
                Tile::PlayerSpawn => spawns.player = Some(pos),
                Tile::KeySpawn => spawns.key = Some(pos),
                _ => {
                    if let Some(kind) = EnemyKind::from_tile(tile) {
                        spawns.enemies.push((pos, kind));
                    }
                }
            }
        }
        spawns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_reads_as_wall() {
        let grid = Grid::parse("  \n  ").unwrap();
        assert_eq!(grid.get(Position::new(2, 0)), None);
        assert_eq!(grid.at(Position::new(-1, 0)), Tile::Wall);
        assert_eq!(grid.at(Position::new(0, 2)), Tile::Wall);
        assert_eq!(grid.at(Position::new(1, 1)), Tile::Empty);
    }

    #[test]
    fn spawns_are_collected_in_row_order() {
        let grid = Grid::parse("#F K#\n#@ E#\n#####").unwrap();
        let spawns = grid.spawns();
        assert_eq!(spawns.player, Some(Position::new(1, 1)));
        assert_eq!(spawns.key, Some(Position::new(3, 0)));
        assert_eq!(
            spawns.enemies,
            vec![
                (Position::new(1, 0), EnemyKind::Inverted),
                (Position::new(3, 1), EnemyKind::Standard),
            ]
        );
    }

    #[test]
    fn markers_are_not_solid() {
        for symbol in ['@', 'K', 'E', 'F', 'S', '+', ' '] {
            assert!(!Tile::from_symbol(symbol).is_solid(), "{symbol:?}");
        }
        assert!(Tile::Wall.is_solid());
        assert!(Tile::Platform.is_solid());
    }
}

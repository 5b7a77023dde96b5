use crate::direction::{Facing, Gravity};
use crate::grid::{Grid, Tile};
use crate::position::Position;

const DEFAULT_SPEED: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    /// Spawned from `E`. Walks on floors, dangerous under downward gravity.
    Standard,
    /// Spawned from `F`. Walks on ceilings, dangerous under upward gravity.
    Inverted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activity {
    Active,
    Inactive,
}

impl EnemyKind {
    pub(crate) fn from_tile(tile: Tile) -> Option<Self> {
        match tile {
            Tile::StandardEnemySpawn => Some(EnemyKind::Standard),
            Tile::InvertedEnemySpawn => Some(EnemyKind::Inverted),
            _ => None,
        }
    }

    pub fn activity(self, player_gravity: Gravity) -> Activity {
        match (self, player_gravity) {
            (EnemyKind::Standard, Gravity::Down) | (EnemyKind::Inverted, Gravity::Up) => {
                Activity::Active
            }
            _ => Activity::Inactive,
        }
    }

    /// The side the enemy needs solid ground on.
    fn ground(self) -> Gravity {
        match self {
            EnemyKind::Standard => Gravity::Down,
            EnemyKind::Inverted => Gravity::Up,
        }
    }

    fn turns_at(self, tile: Tile) -> bool {
        match self {
            EnemyKind::Standard => matches!(tile, Tile::Wall | Tile::SecretExit),
            EnemyKind::Inverted => matches!(
                tile,
                Tile::Wall | Tile::SecretExit | Tile::StandardEnemySpawn
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub pos: Position,
    pub kind: EnemyKind,
    pub facing: Facing,
    pub speed: f64,
    movement: f64,
    activity: Activity,
}

impl Enemy {
    pub fn new(pos: Position, kind: EnemyKind) -> Self {
        Self {
            pos,
            kind,
            facing: Facing::Right,
            speed: DEFAULT_SPEED,
            movement: 0.0,
            activity: kind.activity(Gravity::Down),
        }
    }

    /// Activity as of the latest update.
    pub fn activity(&self) -> Activity {
        self.activity
    }

    pub fn is_active(&self) -> bool {
        self.activity == Activity::Active
    }

    /// Recompute activity for this tick, then patrol if active.
    /// Inactive enemies stay frozen.
    pub fn update(&mut self, grid: &Grid, player_gravity: Gravity) {
        self.activity = self.kind.activity(player_gravity);
        if self.is_active() {
            self.patrol_step(grid);
        }
    }

    pub fn patrol_step(&mut self, grid: &Grid) {
        self.movement += self.speed;
        while self.movement >= 1.0 {
            self.movement -= 1.0;
            self.step(grid);
        }
    }

    fn step(&mut self, grid: &Grid) {
        let dest = self.pos + self.facing.delta();
        let blocked = grid.get(dest).is_none_or(|tile| self.kind.turns_at(tile));
        // Never walk off the edge of the surface the enemy clings to.
        let unsupported = || {
            let support = dest + self.kind.ground().delta();
            !grid.get(support).is_some_and(Tile::is_solid)
        };

        if blocked || unsupported() {
            self.facing = self.facing.reversed();
        } else {
            self.pos = dest;
        }
    }

    pub fn collides_with(&self, player: Position) -> bool {
        self.is_active() && self.pos == player
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy_at(grid: &Grid, speed: f64) -> Enemy {
        let (pos, kind) = grid.spawns().enemies[0];
        let mut enemy = Enemy::new(pos, kind);
        enemy.speed = speed;
        enemy
    }

    #[test]
    fn activity_follows_player_gravity() {
        for gravity in [Gravity::Down, Gravity::Up] {
            let standard = EnemyKind::Standard.activity(gravity) == Activity::Active;
            let inverted = EnemyKind::Inverted.activity(gravity) == Activity::Active;
            assert_eq!(standard, gravity.sign() > 0.0);
            assert_eq!(inverted, !standard);
        }
    }

    #[test]
    fn steps_along_a_supported_floor() {
        let grid = Grid::parse("#######\n#  E  #\n#######").unwrap();
        let mut enemy = enemy_at(&grid, 1.0);
        enemy.update(&grid, Gravity::Down);
        assert_eq!(enemy.pos, Position::new(4, 1));
        assert_eq!(enemy.facing, Facing::Right);
    }

    #[test]
    fn turns_at_a_ledge() {
        let grid = Grid::parse("#######\n#  E  #\n#### ##").unwrap();
        let mut enemy = enemy_at(&grid, 1.0);
        enemy.update(&grid, Gravity::Down);
        assert_eq!(enemy.pos, Position::new(3, 1));
        assert_eq!(enemy.facing, Facing::Left);
    }

    #[test]
    fn turns_at_walls_and_secret_exits() {
        let grid = Grid::parse("#####\n#E+ #\n#####").unwrap();
        let mut enemy = enemy_at(&grid, 1.0);
        enemy.update(&grid, Gravity::Down);
        assert_eq!(enemy.facing, Facing::Left);
        enemy.update(&grid, Gravity::Down);
        assert_eq!(enemy.facing, Facing::Right);
        assert_eq!(enemy.pos, Position::new(1, 1));
    }

    #[test]
    fn walks_onto_platforms_and_exits() {
        let grid = Grid::parse("######\n#E=S #\n######").unwrap();
        let mut enemy = enemy_at(&grid, 1.0);
        enemy.update(&grid, Gravity::Down);
        enemy.update(&grid, Gravity::Down);
        assert_eq!(enemy.pos, Position::new(3, 1));
    }

    #[test]
    fn turns_at_the_grid_edge() {
        let grid = Grid::parse(" E\n##").unwrap();
        let mut enemy = enemy_at(&grid, 1.0);
        enemy.update(&grid, Gravity::Down);
        assert_eq!(enemy.pos, Position::new(1, 0));
        assert_eq!(enemy.facing, Facing::Left);
    }

    #[test]
    fn inverted_enemy_needs_a_ceiling() {
        let grid = Grid::parse("#### ##\n#  F  #\n#######").unwrap();
        let mut enemy = enemy_at(&grid, 1.0);
        enemy.update(&grid, Gravity::Up);
        assert_eq!(enemy.pos, Position::new(3, 1));
        assert_eq!(enemy.facing, Facing::Left);
        enemy.update(&grid, Gravity::Up);
        assert_eq!(enemy.pos, Position::new(2, 1));
    }

    #[test]
    fn inverted_enemy_avoids_standard_spawn_tiles() {
        let grid = Grid::parse("#####\n#FE #\n#   #").unwrap();
        let mut enemy = Enemy::new(Position::new(1, 1), EnemyKind::Inverted);
        enemy.speed = 1.0;
        enemy.update(&grid, Gravity::Up);
        assert_eq!(enemy.pos, Position::new(1, 1));
        assert_eq!(enemy.facing, Facing::Left);
    }

    #[test]
    fn inactive_enemies_are_frozen_and_harmless() {
        let grid = Grid::parse("#######\n#  E  #\n#######").unwrap();
        let mut enemy = enemy_at(&grid, 1.0);
        enemy.update(&grid, Gravity::Up);
        assert_eq!(enemy.activity(), Activity::Inactive);
        assert_eq!(enemy.pos, Position::new(3, 1));
        assert!(!enemy.collides_with(Position::new(3, 1)));

        enemy.update(&grid, Gravity::Down);
        assert!(enemy.collides_with(Position::new(4, 1)));
    }

    #[test]
    fn slow_enemies_accumulate_movement() {
        let grid = Grid::parse("#######\n#  E  #\n#######").unwrap();
        let mut enemy = enemy_at(&grid, 0.25);
        for _ in 0..3 {
            enemy.update(&grid, Gravity::Down);
        }
        assert_eq!(enemy.pos, Position::new(3, 1));
        enemy.update(&grid, Gravity::Down);
        assert_eq!(enemy.pos, Position::new(4, 1));
    }

    #[test]
    fn default_speed_steps_on_the_eleventh_tick() {
        let grid = Grid::parse("##############\n#E           #\n##############").unwrap();
        let mut enemy = Enemy::new(Position::new(1, 1), EnemyKind::Standard);
        let first_step = (1..=20).find(|_| {
            enemy.update(&grid, Gravity::Down);
            enemy.pos != Position::new(1, 1)
        });
        assert_eq!(first_step, Some(11));
    }

    #[test]
    fn fast_enemies_take_several_steps() {
        let grid = Grid::parse("########\n#E     #\n########").unwrap();
        let mut enemy = enemy_at(&grid, 3.0);
        enemy.update(&grid, Gravity::Down);
        assert_eq!(enemy.pos, Position::new(4, 1));
    }
}

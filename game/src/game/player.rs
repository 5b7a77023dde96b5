use crate::collision::is_blocked;
use crate::direction::Gravity;
use crate::grid::Grid;
use crate::position::Position;

const GRAVITY: f32 = 0.5;
const MAX_FALL_SPEED: f32 = 2.0;
const JUMP_POWER: f32 = -3.0;
const FLIP_COOLDOWN: u8 = 5;
const SUB_STEP: f32 = 0.1;

/// Screen-edge clamp applied after every update, independent of level size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Field {
    pub x_max: f32,
    pub y_max: f32,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            x_max: 37.0,
            y_max: 24.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub speed: i32,
    pub velocity_y: f32,
    pub gravity: Gravity,
    pub on_ground: bool,
    pub jump_power: f32,
    /// Ticks left before another flip is expected. Not enforced.
    pub flip_cooldown: u8,
    last_x: Option<f32>,
}

impl Player {
    pub fn new(spawn: Position) -> Self {
        Self {
            x: spawn.x as f32,
            y: spawn.y as f32,
            speed: 1,
            velocity_y: 0.0,
            gravity: Gravity::Down,
            on_ground: false,
            jump_power: JUMP_POWER,
            flip_cooldown: 0,
            last_x: None,
        }
    }

    pub fn cell(&self) -> Position {
        Position::containing(self.x, self.y)
    }

    /// Put the player back on `spawn` with default gravity and no motion.
    pub(crate) fn respawn(&mut self, spawn: Position) {
        self.x = spawn.x as f32;
        self.y = spawn.y as f32;
        self.gravity = Gravity::Down;
        self.velocity_y = 0.0;
        self.on_ground = false;
        self.last_x = None;
    }

    pub fn move_left(&mut self) {
        self.x = (self.x - self.speed as f32).max(0.0);
    }

    pub fn move_right(&mut self) {
        self.x += self.speed as f32;
    }

    /// Invert gravity and push the player with a half-strength impulse.
    pub fn flip_gravity(&mut self) {
        self.gravity = self.gravity.flipped();
        self.velocity_y = self.jump_power * self.gravity.sign() * 0.5;
        self.on_ground = false;
        self.flip_cooldown = FLIP_COOLDOWN;
    }

    /// Whether the key at `key` can be collected from here.
    pub fn try_pick_key(&self, key: Position, already_held: bool) -> bool {
        !already_held && self.cell().adjacent_or_same(key)
    }

    pub fn update(&mut self, grid: &Grid, field: Field) {
        if !self.on_ground {
            self.velocity_y += GRAVITY * self.gravity.sign();
        }
        if self.velocity_y.abs() > MAX_FALL_SPEED {
            self.velocity_y = MAX_FALL_SPEED.copysign(self.velocity_y);
        }

        if self.flip_cooldown > 0 {
            self.flip_cooldown -= 1;
        }

        self.collide(grid);
        self.clamp(field);
    }

    fn collide(&mut self, grid: &Grid) {
        // Look one cell ahead in the direction of gravity.
        if is_blocked(grid, self.x, self.y + self.gravity.sign()) {
            self.on_ground = true;
            self.velocity_y = 0.0;
        } else {
            self.on_ground = false;
        }

        if self.velocity_y != 0.0 {
            let target_y = self.y + self.velocity_y;
            if !is_blocked(grid, self.x, target_y) {
                self.y = target_y;
            } else {
                let step = SUB_STEP.copysign(self.velocity_y);
                while !is_blocked(grid, self.x, self.y + step)
                    && (self.y - target_y).abs() > SUB_STEP
                {
                    self.y += step;
                }
                self.velocity_y = 0.0;
            }
        }

        // Horizontal moves happen between ticks and are undone whole.
        if let Some(last_x) = self.last_x
            && self.x != last_x
            && is_blocked(grid, self.x, self.y)
        {
            self.x = last_x;
        }
        self.last_x = Some(self.x);
    }

    fn clamp(&mut self, field: Field) {
        self.x = self.x.clamp(0.0, field.x_max);
        self.y = self.y.clamp(0.0, field.y_max - 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_room() -> Grid {
        Grid::parse(
            "##########\n\
             #        #\n\
             #        #\n\
             #        #\n\
             #        #\n\
             ##########",
        )
        .unwrap()
    }

    #[test]
    fn standing_on_a_wall_sets_on_ground() {
        let grid = open_room();
        let mut player = Player::new(Position::new(3, 4));
        player.update(&grid, Field::default());
        assert!(player.on_ground);
        assert_eq!(player.velocity_y, 0.0);
        assert_eq!(player.y, 4.0);
    }

    #[test]
    fn falling_accelerates_until_the_cap() {
        let grid = Grid::parse(&" \n".repeat(40)).unwrap();
        let mut player = Player::new(Position::new(0, 0));
        let field = Field {
            x_max: 37.0,
            y_max: 100.0,
        };
        player.update(&grid, field);
        assert_eq!(player.velocity_y, 0.5);
        assert_eq!(player.y, 0.5);
        for _ in 0..10 {
            player.update(&grid, field);
        }
        assert_eq!(player.velocity_y, 2.0);
    }

    #[test]
    fn flip_pushes_against_the_new_gravity() {
        let mut player = Player::new(Position::new(3, 4));
        player.on_ground = true;
        player.flip_gravity();
        assert_eq!(player.gravity, Gravity::Up);
        assert_eq!(player.velocity_y, 1.5);
        assert!(!player.on_ground);
        assert_eq!(player.flip_cooldown, 5);

        player.flip_gravity();
        assert_eq!(player.gravity, Gravity::Down);
        assert_eq!(player.velocity_y, -1.5);
    }

    #[test]
    fn double_flip_keeps_polarity_but_not_motion() {
        let mut player = Player::new(Position::new(3, 4));
        player.on_ground = true;
        let before = player.clone();
        player.flip_gravity();
        player.flip_gravity();
        assert_eq!(player.gravity, before.gravity);
        assert_ne!(player.velocity_y, before.velocity_y);
        assert_ne!(player.on_ground, before.on_ground);
    }

    #[test]
    fn landing_sub_steps_toward_the_floor() {
        let grid = open_room();
        let mut player = Player::new(Position::new(3, 1));
        player.velocity_y = 2.0;
        player.y = 3.5;
        player.update(&grid, Field::default());
        // Row 4 is free, row 5 is wall; the player creeps down but stays in row 4 or above.
        assert!(player.y < 5.0);
        assert!(player.y > 3.5);
        assert_eq!(player.velocity_y, 0.0);
    }

    #[test]
    fn upward_gravity_lands_on_the_ceiling() {
        let grid = open_room();
        let mut player = Player::new(Position::new(3, 1));
        player.gravity = Gravity::Up;
        player.update(&grid, Field::default());
        assert!(player.on_ground);
        assert_eq!(player.y, 1.0);
    }

    #[test]
    fn walking_into_a_wall_rolls_back() {
        let grid = open_room();
        let mut player = Player::new(Position::new(8, 4));
        player.update(&grid, Field::default());
        player.move_right();
        assert_eq!(player.x, 9.0);
        player.update(&grid, Field::default());
        assert_eq!(player.x, 8.0);
    }

    #[test]
    fn free_horizontal_moves_stick() {
        let grid = open_room();
        let mut player = Player::new(Position::new(4, 4));
        player.update(&grid, Field::default());
        player.move_left();
        player.move_left();
        player.update(&grid, Field::default());
        assert_eq!(player.x, 2.0);
    }

    #[test]
    fn move_left_stops_at_zero() {
        let mut player = Player::new(Position::new(0, 0));
        player.move_left();
        assert_eq!(player.x, 0.0);
    }

    #[test]
    fn screen_edge_clamp_ignores_level_width() {
        let grid = Grid::parse(&" ".repeat(60)).unwrap();
        let mut player = Player::new(Position::new(36, 0));
        player.update(&grid, Field::default());
        player.move_right();
        player.move_right();
        player.update(&grid, Field::default());
        assert_eq!(player.x, 37.0);
    }

    #[test]
    fn key_reach_is_one_cell() {
        let player = Player::new(Position::new(5, 5));
        assert!(player.try_pick_key(Position::new(6, 4), false));
        assert!(!player.try_pick_key(Position::new(6, 4), true));
        assert!(!player.try_pick_key(Position::new(7, 5), false));
    }
}

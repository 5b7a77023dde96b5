use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::detour::Detour;
use crate::grid::{Grid, Tile};
use crate::levels::{self, EmbeddedLevels, LevelSource};
use crate::position::Position;

mod enemy;
mod key;
mod player;

pub use enemy::{Activity, Enemy, EnemyKind};
pub use key::Key;
pub use player::{Field, Player};

const STARTING_LIVES: u32 = 5;
const EXIT_BONUS: f64 = 500.0;
const SECRET_BONUS: f64 = 10_000.0;
const SECRET_LIVES_BONUS: u32 = 5;
const DEATH_PENALTY: f64 = 1000.0;
const FLIP_COST: f64 = 1.0;
const KEY_BONUS: f64 = 100.0;
const VICTORY_BONUS: f64 = 5000.0;
const VICTORY_BASE: f64 = 50.0;

const DEFAULT_PLAYER_SPAWN: Position = Position::new(5, 5);
const DEFAULT_KEY_SPAWN: Position = Position::new(20, 20);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayState {
    Playing,
    Won,
    Lost,
    Quit,
}

/// One discrete player command, as delivered by an input source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    FlipGravity,
    PickKey,
    RestartLevel,
    Quit,
}

/// Final result handed to the score recorder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    pub score: i64,
    /// 1-based number of the level the session ended on.
    pub level: usize,
    pub victory: bool,
}

/// The whole simulation: level set, entities, score and progression.
pub struct Session<S = EmbeddedLevels> {
    source: S,
    levels: Vec<Grid>,
    level: usize,
    detour: Detour,
    field: Field,
    player: Player,
    spawn: Position,
    key: Key,
    enemies: Vec<Enemy>,
    score: f64,
    lives: u32,
    has_key: bool,
    play_state: PlayState,
}

impl Session {
    pub fn new() -> Self {
        Self::with_source(EmbeddedLevels)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: LevelSource> Session<S> {
    pub fn with_source(source: S) -> Self {
        let levels = levels::main_levels(&source);
        let mut session = Self {
            source,
            levels,
            level: 0,
            detour: Detour::Normal,
            field: Field::default(),
            player: Player::new(DEFAULT_PLAYER_SPAWN),
            spawn: DEFAULT_PLAYER_SPAWN,
            key: Key::new(DEFAULT_KEY_SPAWN),
            enemies: Vec::new(),
            score: 0.0,
            lives: STARTING_LIVES,
            has_key: false,
            play_state: PlayState::Playing,
        };
        session.seed_entities();
        session
    }

    /// Start over from the first level with a fresh score and lives.
    pub fn reset_session(&mut self) {
        self.levels = levels::main_levels(&self.source);
        self.level = 0;
        self.detour = Detour::Normal;
        self.score = 0.0;
        self.lives = STARTING_LIVES;
        self.has_key = false;
        self.play_state = PlayState::Playing;
        self.seed_entities();
        log::info!("Session reset");
    }

    /// Rebuild player, key and enemies from the current grid's spawn markers.
    fn seed_entities(&mut self) {
        let spawns = self.levels[self.level].spawns();
        self.spawn = spawns.player.unwrap_or(DEFAULT_PLAYER_SPAWN);
        self.player = Player::new(self.spawn);
        self.key = Key::new(spawns.key.unwrap_or(DEFAULT_KEY_SPAWN));
        self.enemies.clear();
        self.enemies.extend(
            spawns
                .enemies
                .into_iter()
                .map(|(pos, kind)| Enemy::new(pos, kind)),
        );
    }

    pub fn grid(&self) -> &Grid {
        &self.levels[self.level]
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn key(&self) -> Key {
        self.key
    }

    pub fn has_key(&self) -> bool {
        self.has_key
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Zero-based index of the active level slot.
    pub fn level_index(&self) -> usize {
        self.level
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn detour(&self) -> &Detour {
        &self.detour
    }

    pub fn play_state(&self) -> PlayState {
        self.play_state
    }

    pub fn is_running(&self) -> bool {
        self.play_state == PlayState::Playing
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::FlipGravity => self.flip_gravity(),
            Command::PickKey => {
                self.try_pick_key();
            }
            Command::RestartLevel => self.restart_level(),
            Command::Quit => self.quit(),
        }
    }

    pub fn move_left(&mut self) {
        if self.is_running() {
            self.player.move_left();
        }
    }

    pub fn move_right(&mut self) {
        if self.is_running() {
            self.player.move_right();
        }
    }

    pub fn flip_gravity(&mut self) {
        if self.is_running() {
            self.player.flip_gravity();
            self.score -= FLIP_COST;
        }
    }

    /// Returns true if the key was collected by this call.
    pub fn try_pick_key(&mut self) -> bool {
        if !self.is_running() || !self.player.try_pick_key(self.key.pos, self.has_key) {
            return false;
        }
        self.has_key = true;
        self.score += KEY_BONUS * self.lives as f64 / STARTING_LIVES as f64;
        log::debug!("Key picked up at {:?}", self.key.pos);
        true
    }

    /// Send the player back to the level spawn and drop the key.
    /// Enemies keep patrolling where they are.
    pub fn restart_level(&mut self) {
        if self.is_running() {
            self.player.respawn(self.spawn);
            self.has_key = false;
            log::debug!("Level {} restarted", self.level + 1);
        }
    }

    pub fn quit(&mut self) {
        if self.is_running() {
            self.play_state = PlayState::Quit;
        }
    }

    fn tile_under_player(&self) -> Option<Tile> {
        self.grid().get(self.player.cell())
    }

    pub fn check_exit(&self) -> bool {
        self.has_key && self.tile_under_player() == Some(Tile::Exit)
    }

    pub fn check_secret_exit(&self) -> bool {
        self.tile_under_player() == Some(Tile::SecretExit)
    }

    fn enemy_hit(&self) -> bool {
        let cell = self.player.cell();
        self.enemies.iter().any(|enemy| enemy.collides_with(cell))
    }

    /// Advance the simulation by one fixed step.
    pub fn tick(&mut self) {
        if !self.is_running() {
            return;
        }

        let grid = &self.levels[self.level];
        self.player.update(grid, self.field);
        let gravity = self.player.gravity;
        for enemy in &mut self.enemies {
            enemy.update(grid, gravity);
        }

        // At most one transition per tick; a transition re-seeds every entity.
        if self.check_exit() {
            self.advance();
        } else if self.check_secret_exit() {
            self.enter_secret();
        } else if self.enemy_hit() {
            self.die();
        }
    }

    fn advance(&mut self) {
        if self.level + 1 >= self.levels.len() {
            self.detour.leave(&mut self.levels);
            self.win();
            return;
        }

        match self.detour.leave(&mut self.levels) {
            Some(return_index) => {
                self.level = return_index + 1;
                self.lives += SECRET_LIVES_BONUS;
            }
            None => self.level += 1,
        }
        self.has_key = false;
        self.score += EXIT_BONUS;
        self.seed_entities();
        log::info!("Entering level {}", self.level + 1);
    }

    fn enter_secret(&mut self) {
        self.score += SECRET_BONUS;
        let secret = levels::secret_or_fallback(&self.source, self.level);
        self.detour.enter(&mut self.levels, self.level, secret);
        self.has_key = false;
        self.seed_entities();
        log::info!("Entering the secret level from level {}", self.level + 1);
    }

    fn die(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.score -= DEATH_PENALTY;
        if self.lives == 0 {
            self.play_state = PlayState::Lost;
            log::info!("Defeat on level {} with score {}", self.level + 1, self.score);
        } else {
            self.player.respawn(self.spawn);
            log::debug!("Respawned at {:?}", self.spawn);
            log::info!("Player died, {} lives left", self.lives);
        }
    }

    fn win(&mut self) {
        let bonus = VICTORY_BONUS * self.lives as f64 / STARTING_LIVES as f64 + VICTORY_BASE;
        self.score += bonus.floor();
        self.play_state = PlayState::Won;
        log::info!("Victory with score {}", self.score);
    }

    /// Final result, once the session has ended in victory or defeat.
    pub fn summary(&self) -> Option<Summary> {
        let victory = match self.play_state {
            PlayState::Won => true,
            PlayState::Lost => false,
            PlayState::Playing | PlayState::Quit => return None,
        };
        Some(Summary {
            score: self.score as i64,
            level: self.level + 1,
            victory,
        })
    }
}

/// Session handle shared by the simulation and render activities.
/// Both take the same lock, so a frame never sees a half-applied tick.
pub struct SharedSession<S = EmbeddedLevels>(Arc<Mutex<Session<S>>>);

impl<S> SharedSession<S> {
    pub fn new(session: Session<S>) -> Self {
        Self(Arc::new(Mutex::new(session)))
    }

    pub fn lock(&self) -> MutexGuard<'_, Session<S>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S> Clone for SharedSession<S> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

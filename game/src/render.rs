use macroquad::prelude::*;

use crate::direction::Gravity;
use crate::game::{Session, Summary};
use crate::grid::{Grid, Tile};
use crate::levels::LevelSource;
use crate::scores::ScoreBoard;

const PADDING: f32 = 4.0;
const HUD_HEIGHT: f32 = 40.0;
const HINT_HEIGHT: f32 = 30.0;

const BACKGROUND: Color = Color::new(0.12, 0.12, 0.16, 1.0);
const OVERLAY: Color = Color::new(0.0, 0.0, 0.0, 0.7);
const WALL: Color = Color::new(0.45, 0.45, 0.5, 1.0);
const PLATFORM: Color = Color::new(0.6, 0.45, 0.25, 1.0);
const EXIT: Color = Color::new(0.2, 0.8, 0.3, 1.0);
const SECRET_EXIT: Color = Color::new(0.7, 0.3, 0.9, 1.0);
const KEY: Color = Color::new(1.0, 0.85, 0.1, 1.0);
const ENEMY: Color = Color::new(0.9, 0.2, 0.2, 1.0);
const ENEMY_INACTIVE: Color = Color::new(0.4, 0.2, 0.2, 1.0);
const PLAYER: Color = Color::new(0.3, 0.7, 1.0, 1.0);

const PLAY_HINT: &str = "Q/D move | Z flip | E key | R restart | Esc quit";

fn draw_centered(text: &str, center_x: f32, y: f32, size: u16, color: Color) {
    let dims = measure_text(text, None, size, 1.0);
    draw_text(text, center_x - dims.width / 2.0, y, size as f32, color);
}

fn draw_glyph(glyph: &str, px: f32, py: f32, size: f32, color: Color) {
    let font_size = (size * 0.9) as u16;
    let dims = measure_text(glyph, None, font_size, 1.0);
    let tx = px + (size - dims.width) / 2.0;
    let ty = py + (size + dims.height) / 2.0;
    draw_text(glyph, tx, ty, font_size as f32, color);
}

fn tile_color(tile: Tile) -> Option<Color> {
    match tile {
        Tile::Wall => Some(WALL),
        Tile::Platform => Some(PLATFORM),
        Tile::Exit => Some(EXIT),
        Tile::SecretExit => Some(SECRET_EXIT),
        // Spawn markers are consumed when entities are seeded.
        _ => None,
    }
}

fn cell_size(grid: &Grid) -> f32 {
    let width = screen_width();
    let height = screen_height() - HUD_HEIGHT - HINT_HEIGHT;
    let cell_w = (width - PADDING * 2.0) / grid.width() as f32;
    let cell_h = (height - PADDING * 2.0) / grid.height() as f32;
    cell_w.min(cell_h)
}

fn grid_offset(grid: &Grid) -> (f32, f32) {
    let cell = cell_size(grid);
    let grid_w = grid.width() as f32 * cell;
    let offset_x = (screen_width() - grid_w) / 2.0;
    let offset_y = HUD_HEIGHT + PADDING;
    (offset_x, offset_y)
}

pub(crate) fn render_session<S: LevelSource>(session: &Session<S>) {
    let grid = session.grid();
    let cell = cell_size(grid);
    let (offset_x, offset_y) = grid_offset(grid);
    let to_screen = |x: f32, y: f32| (offset_x + x * cell, offset_y + y * cell);

    clear_background(BACKGROUND);
    render_hud(session);

    for (pos, tile) in grid.entries() {
        if let Some(color) = tile_color(tile) {
            let (px, py) = to_screen(pos.x as f32, pos.y as f32);
            draw_rectangle(px, py, cell, cell, color);
        }
    }

    if !session.has_key() {
        let pos = session.key().pos;
        let (px, py) = to_screen(pos.x as f32, pos.y as f32);
        draw_glyph("K", px, py, cell, KEY);
    }

    for enemy in session.enemies() {
        let color = if enemy.is_active() {
            ENEMY
        } else {
            ENEMY_INACTIVE
        };
        let (px, py) = to_screen(enemy.pos.x as f32, enemy.pos.y as f32);
        draw_glyph("X", px, py, cell, color);
    }

    let player = session.player();
    let glyph = match player.gravity {
        Gravity::Down => "v",
        Gravity::Up => "^",
    };
    let (px, py) = to_screen(player.x, player.y);
    draw_glyph(glyph, px, py, cell, PLAYER);

    draw_centered(
        PLAY_HINT,
        screen_width() / 2.0,
        screen_height() - HINT_HEIGHT / 2.0,
        20,
        GRAY,
    );
}

fn render_hud<S: LevelSource>(session: &Session<S>) {
    let level = if session.detour().is_active() {
        "secret".to_string()
    } else {
        format!("{}/{}", session.level_index() + 1, session.level_count())
    };
    let key = if session.has_key() { "yes" } else { "no" };
    let hud = format!(
        "Lives: {}   Level: {}   Score: {}   Key: {}",
        session.lives(),
        level,
        session.score() as i64,
        key
    );
    draw_text(&hud, PADDING * 2.0, HUD_HEIGHT * 0.7, 28.0, WHITE);
}

pub(crate) fn render_menu() {
    clear_background(BACKGROUND);
    let center_x = screen_width() / 2.0;
    let center_y = screen_height() / 2.0;
    draw_centered("GRAVSWAP", center_x, center_y - 60.0, 72, PLAYER);
    draw_centered("Enter to play", center_x, center_y + 20.0, 32, WHITE);
    draw_centered("H for high scores", center_x, center_y + 60.0, 32, WHITE);
    draw_centered("Esc to quit", center_x, center_y + 100.0, 32, WHITE);
}

fn render_overlay(title: &str, color: Color, summary: Summary) -> (f32, f32) {
    draw_rectangle(0.0, 0.0, screen_width(), screen_height(), OVERLAY);
    let center_x = screen_width() / 2.0;
    let center_y = screen_height() / 2.0;
    draw_centered(title, center_x, center_y - 60.0, 64, color);
    let line = format!("Score: {}   Level: {}", summary.score, summary.level);
    draw_centered(&line, center_x, center_y, 32, WHITE);
    (center_x, center_y)
}

fn outcome(summary: Summary) -> (&'static str, Color) {
    if summary.victory {
        ("VICTORY", GREEN)
    } else {
        ("GAME OVER", RED)
    }
}

pub(crate) fn render_name_entry(summary: Summary, name: &str) {
    let (title, color) = outcome(summary);
    let (center_x, center_y) = render_overlay(title, color, summary);
    draw_centered("New high score! Enter your name:", center_x, center_y + 50.0, 28, WHITE);
    draw_centered(&format!("{name}_"), center_x, center_y + 90.0, 36, KEY);
    draw_centered("Enter to save | Esc to skip", center_x, center_y + 130.0, 24, GRAY);
}

pub(crate) fn render_results(summary: Summary, rank: Option<usize>) {
    let (title, color) = outcome(summary);
    let (center_x, center_y) = render_overlay(title, color, summary);
    if let Some(rank) = rank {
        let line = format!("Ranked #{} on the board", rank + 1);
        draw_centered(&line, center_x, center_y + 50.0, 28, KEY);
    }
    draw_centered("R to play again | Esc to quit", center_x, center_y + 100.0, 28, WHITE);
}

pub(crate) fn render_scores(board: &ScoreBoard) {
    clear_background(BACKGROUND);
    let center_x = screen_width() / 2.0;
    draw_centered("HIGH SCORES", center_x, 80.0, 56, PLAYER);

    if board.is_empty() {
        draw_centered("No scores yet", center_x, 160.0, 32, GRAY);
    }
    for (i, entry) in board.entries().iter().enumerate() {
        let marker = if entry.victory { "*" } else { " " };
        let line = format!(
            "{:>2}. {:<12} {:>8}  L{:<2} {} {}",
            i + 1,
            entry.name,
            entry.score,
            entry.level,
            marker,
            entry.date
        );
        draw_centered(&line, center_x, 150.0 + i as f32 * 36.0, 30, WHITE);
    }

    draw_centered("Esc to go back", center_x, screen_height() - 40.0, 24, GRAY);
}

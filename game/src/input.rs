use macroquad::prelude::*;

use crate::game::Command;

const REPEAT_DELAY: f32 = 0.5;
const REPEAT_RATE: f32 = 0.05;

const LEFT_KEYS: [KeyCode; 2] = [KeyCode::Q, KeyCode::Left];
const RIGHT_KEYS: [KeyCode; 2] = [KeyCode::D, KeyCode::Right];
const FLIP_KEYS: [KeyCode; 2] = [KeyCode::Z, KeyCode::Space];

/// Menu-level input, outside of play.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum MenuInput {
    Confirm,
    Scores,
    Restart,
    Back,
}

/// Tracks held state for move repeat.
#[derive(Default)]
pub(crate) struct InputState {
    held_left: f32,
    held_right: f32,
}

impl InputState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reset(&mut self) {
        self.held_left = 0.0;
        self.held_right = 0.0;
    }

    /// Poll the keyboard for session commands this frame.
    pub(crate) fn poll_commands(&mut self, dt: f32) -> Vec<Command> {
        let mut commands = Vec::new();

        if input_repeat(any_down(&LEFT_KEYS), any_pressed(&LEFT_KEYS), &mut self.held_left, dt) {
            commands.push(Command::MoveLeft);
        }
        if input_repeat(any_down(&RIGHT_KEYS), any_pressed(&RIGHT_KEYS), &mut self.held_right, dt) {
            commands.push(Command::MoveRight);
        }

        // Flips cost points, so they never repeat.
        if any_pressed(&FLIP_KEYS) {
            commands.push(Command::FlipGravity);
        }
        if is_key_pressed(KeyCode::E) {
            commands.push(Command::PickKey);
        }
        if is_key_pressed(KeyCode::R) {
            commands.push(Command::RestartLevel);
        }
        if is_key_pressed(KeyCode::Escape) {
            commands.push(Command::Quit);
        }

        commands
    }
}

pub(crate) fn poll_menu() -> Option<MenuInput> {
    if is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter) {
        Some(MenuInput::Confirm)
    } else if is_key_pressed(KeyCode::H) {
        Some(MenuInput::Scores)
    } else if is_key_pressed(KeyCode::R) {
        Some(MenuInput::Restart)
    } else if is_key_pressed(KeyCode::Escape) {
        Some(MenuInput::Back)
    } else {
        None
    }
}

fn any_down(keys: &[KeyCode]) -> bool {
    keys.iter().any(|&key| is_key_down(key))
}

fn any_pressed(keys: &[KeyCode]) -> bool {
    keys.iter().any(|&key| is_key_pressed(key))
}

fn input_repeat(down: bool, pressed: bool, held: &mut f32, dt: f32) -> bool {
    if down {
        *held += dt;
        pressed || (*held > REPEAT_DELAY && *held % REPEAT_RATE < dt)
    } else {
        *held = 0.0;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_fires_once_then_waits_for_the_delay() {
        let mut held = 0.0;
        assert!(input_repeat(true, true, &mut held, 0.1));
        assert!(!input_repeat(true, false, &mut held, 0.1));
        assert!(!input_repeat(true, false, &mut held, 0.1));
    }

    #[test]
    fn holding_past_the_delay_repeats() {
        let mut held = 0.0;
        let dt = 0.02;
        let fired = (0..50)
            .filter(|_| input_repeat(true, false, &mut held, dt))
            .count();
        assert!(fired > 0);
    }

    #[test]
    fn release_clears_the_hold() {
        let mut held = 0.4;
        assert!(!input_repeat(false, false, &mut held, 0.1));
        assert_eq!(held, 0.0);
    }
}

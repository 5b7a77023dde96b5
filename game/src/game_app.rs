use chrono::Local;
use macroquad::prelude::*;

use crate::game::{Session, SharedSession, Summary};
use crate::input::{InputState, MenuInput, poll_menu};
use crate::render::{render_menu, render_name_entry, render_results, render_scores, render_session};
use crate::scores::{MAX_NAME_LEN, ScoreBoard, ScoreEntry};
use crate::storage::{load_scores, save_scores};

const TIME_STEP: f32 = 0.01;
const MAX_TICKS_PER_FRAME: u32 = 10;

#[derive(Clone, Debug, PartialEq)]
enum Screen {
    Menu,
    Playing,
    NameEntry { summary: Summary, name: String },
    Results { summary: Summary, rank: Option<usize> },
    Scores,
}

pub struct App {
    session: SharedSession,
    screen: Screen,
    input: InputState,
    scores: ScoreBoard,
    accumulator: f32,
}

impl App {
    pub fn new() -> Self {
        Self {
            session: SharedSession::new(Session::new()),
            screen: Screen::Menu,
            input: InputState::new(),
            scores: load_scores(),
            accumulator: 0.0,
        }
    }

    fn start(&mut self) {
        self.session.lock().reset_session();
        self.input.reset();
        self.accumulator = 0.0;
        self.screen = Screen::Playing;
    }

    /// Route a finished session to name entry or straight to the results.
    fn finish(&mut self, summary: Summary) {
        // Drop letters typed as movement keys during play.
        while get_char_pressed().is_some() {}
        self.screen = if self.scores.is_worthy(summary.score) {
            Screen::NameEntry {
                summary,
                name: String::new(),
            }
        } else {
            Screen::Results {
                summary,
                rank: None,
            }
        };
    }

    fn record(&mut self, summary: Summary, name: &str) -> Option<usize> {
        let date = Local::now().format("%d/%m/%Y").to_string();
        let rank = self.scores.add(ScoreEntry::new(name, summary, date));
        if rank.is_some() {
            save_scores(&self.scores);
        }
        rank
    }

    /// Feed input and fixed steps into the session. Returns false if the
    /// player quit.
    fn play(&mut self, dt: f32) -> bool {
        let commands = self.input.poll_commands(dt);
        let mut session = self.session.lock();
        for command in commands {
            session.apply(command);
        }

        self.accumulator += dt;
        let mut ticks = 0;
        while self.accumulator >= TIME_STEP && ticks < MAX_TICKS_PER_FRAME {
            session.tick();
            self.accumulator -= TIME_STEP;
            ticks += 1;
        }
        if ticks == MAX_TICKS_PER_FRAME {
            self.accumulator = 0.0;
        }

        if let Some(summary) = session.summary() {
            drop(session);
            self.finish(summary);
            return true;
        }
        session.is_running()
    }

    fn edit_name(&mut self) {
        let Screen::NameEntry { summary, name } = &mut self.screen else {
            return;
        };
        let summary = *summary;

        while let Some(c) = get_char_pressed() {
            if !c.is_control() && name.chars().count() < MAX_NAME_LEN {
                name.push(c);
            }
        }
        if is_key_pressed(KeyCode::Backspace) {
            name.pop();
        }

        if is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter) {
            let name = std::mem::take(name);
            let rank = self.record(summary, &name);
            self.screen = Screen::Results { summary, rank };
        } else if is_key_pressed(KeyCode::Escape) {
            self.screen = Screen::Results {
                summary,
                rank: None,
            };
        }
    }

    /// Run one frame of the game loop. Returns false if the game should exit.
    pub fn tick(&mut self) -> bool {
        let dt = get_frame_time();

        match self.screen {
            Screen::Menu => match poll_menu() {
                Some(MenuInput::Confirm) => self.start(),
                Some(MenuInput::Scores) => self.screen = Screen::Scores,
                Some(MenuInput::Back) => return false,
                _ => {}
            },
            Screen::Playing => {
                if !self.play(dt) {
                    return false;
                }
            }
            Screen::NameEntry { .. } => self.edit_name(),
            Screen::Results { .. } => match poll_menu() {
                Some(MenuInput::Restart) => self.start(),
                Some(MenuInput::Back) => return false,
                _ => {}
            },
            Screen::Scores => {
                if poll_menu() == Some(MenuInput::Back) {
                    self.screen = Screen::Menu;
                }
            }
        }

        self.render();
        true
    }

    fn render(&self) {
        match &self.screen {
            Screen::Menu => render_menu(),
            Screen::Playing => render_session(&*self.session.lock()),
            Screen::NameEntry { summary, name } => {
                render_session(&*self.session.lock());
                render_name_entry(*summary, name);
            }
            Screen::Results { summary, rank } => {
                render_session(&*self.session.lock());
                render_results(*summary, *rank);
            }
            Screen::Scores => render_scores(&self.scores),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

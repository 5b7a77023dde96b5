use serde::{Deserialize, Serialize};

use crate::game::Summary;

pub const MAX_ENTRIES: usize = 10;
pub const MAX_NAME_LEN: usize = 12;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: i64,
    pub level: usize,
    pub victory: bool,
    /// Local date the session ended, `dd/mm/YYYY`.
    pub date: String,
}

impl ScoreEntry {
    pub fn new(name: &str, summary: Summary, date: String) -> Self {
        Self {
            name: clean_name(name),
            score: summary.score,
            level: summary.level,
            victory: summary.victory,
            date,
        }
    }
}

/// Trim, cap at [`MAX_NAME_LEN`] characters and substitute a placeholder for
/// blank names.
pub fn clean_name(name: &str) -> String {
    let name: String = name.trim().chars().take(MAX_NAME_LEN).collect();
    if name.is_empty() {
        "Anonyme".to_string()
    } else {
        name
    }
}

/// Best scores, highest first, at most [`MAX_ENTRIES`] long.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreBoard {
    entries: Vec<ScoreEntry>,
}

impl ScoreBoard {
    /// Build a board from stored entries, restoring order and length.
    pub fn from_entries(mut entries: Vec<ScoreEntry>) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_ENTRIES);
        Self { entries }
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `score` would make it onto the board.
    pub fn is_worthy(&self, score: i64) -> bool {
        self.entries.len() < MAX_ENTRIES
            || self.entries.last().is_none_or(|last| score > last.score)
    }

    /// Insert `entry` and return its zero-based rank, or `None` if it did
    /// not place. Ties rank below existing entries.
    pub fn add(&mut self, entry: ScoreEntry) -> Option<usize> {
        if !self.is_worthy(entry.score) {
            return None;
        }
        let rank = self
            .entries
            .iter()
            .position(|e| entry.score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(rank, entry);
        self.entries.truncate(MAX_ENTRIES);
        Some(rank)
    }
}

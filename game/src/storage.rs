use crate::scores::{ScoreBoard, ScoreEntry};

pub(crate) use backend::save_scores;

/// Stored score board, or an empty one if nothing readable is stored.
pub(crate) fn load_scores() -> ScoreBoard {
    backend::try_load_scores()
        .map(ScoreBoard::from_entries)
        .unwrap_or_default()
}

macro_rules! warn_err {
    ($expr:expr, $($arg:tt)+) => {
        $expr.map_err(|e| log::warn!($($arg)+, e)).ok()
    };
}

#[cfg(target_arch = "wasm32")]
mod backend {
    use super::*;

    const STORAGE_KEY: &str = "gravswap_scores";

    pub(crate) fn save_scores(board: &ScoreBoard) {
        let Some(json) = warn_err!(serde_json::to_string(board), "Failed to encode scores: {}")
        else {
            return;
        };
        match quad_storage::STORAGE.lock() {
            Ok(mut storage) => storage.set(STORAGE_KEY, &json),
            Err(e) => log::warn!("Score storage unavailable: {e}"),
        }
    }

    pub(super) fn try_load_scores() -> Option<Vec<ScoreEntry>> {
        let s = quad_storage::STORAGE.lock().ok()?.get(STORAGE_KEY)?;
        warn_err!(serde_json::from_str(&s), "Failed to parse {}: {}", s)
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod backend {
    use super::*;
    use std::fs::{create_dir_all, read_to_string, write};
    use std::path::PathBuf;

    pub(crate) fn save_scores(board: &ScoreBoard) {
        let Some(path) = save_path() else {
            log::warn!("No data directory, scores not saved");
            return;
        };
        if let Some(parent) = path.parent() {
            warn_err!(
                create_dir_all(parent),
                "Failed to create {}: {}",
                parent.display()
            );
        }
        if let Some(json) = warn_err!(serde_json::to_string_pretty(board), "Failed to encode scores: {}") {
            warn_err!(write(&path, json), "Failed to write {}: {}", path.display());
        }
    }

    pub(super) fn try_load_scores() -> Option<Vec<ScoreEntry>> {
        let path = save_path()?;
        if !path.exists() {
            return None;
        }
        let s = warn_err!(
            read_to_string(&path),
            "Failed to read {}: {}",
            path.display()
        )?;
        warn_err!(
            serde_json::from_str(&s),
            "Failed to parse {}: {}",
            path.display()
        )
    }

    fn save_path() -> Option<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "gravswap", "Gravswap")?;
        Some(dirs.data_dir().join("scores.json"))
    }
}

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::grid::Grid;

include!(concat!(env!("OUT_DIR"), "/levels.rs"));

const LEVEL_PREFIX: &str = "level-";
const SECRET_PREFIX: &str = "secret-";
/// Secret level used when the one matching the current level is missing.
const FALLBACK_SECRET: usize = 1;

/// Supplies parsed level grids to a session.
pub trait LevelSource {
    /// Main level sequence in play order.
    fn levels(&self) -> Vec<Grid>;

    /// Secret level reached from main level `index`, if there is one.
    fn secret(&self, index: usize) -> Option<Grid>;
}

/// Main levels, never empty: an empty source plays the default level.
pub(crate) fn main_levels<S: LevelSource>(source: &S) -> Vec<Grid> {
    let levels = source.levels();
    if levels.is_empty() {
        log::warn!("No levels found, using the default level");
        return vec![Grid::default_level()];
    }
    levels
}

/// Secret level for main level `index`, falling back to the shared secret
/// level and then to the default level.
pub(crate) fn secret_or_fallback<S: LevelSource>(source: &S, index: usize) -> Grid {
    if let Some(grid) = source.secret(index) {
        return grid;
    }
    log::warn!("No secret level for level {index}, using secret level {FALLBACK_SECRET}");
    source.secret(FALLBACK_SECRET).unwrap_or_else(|| {
        log::warn!("Secret level {FALLBACK_SECRET} is missing, using the default level");
        Grid::default_level()
    })
}

struct Level {
    name: &'static str,
    grid: Grid,
}

static LEVELS: LazyLock<Vec<Level>> = LazyLock::new(|| {
    LEVEL_DATA
        .iter()
        .map(|&(name, text)| Level {
            name,
            grid: Grid::parse(text).unwrap_or_else(|| {
                log::warn!("Level {name} is empty, using the default level");
                Grid::default_level()
            }),
        })
        .collect()
});

fn get_level(name: &str) -> Option<&'static Level> {
    LEVELS.iter().find(|l| l.name == name)
}

/// Levels compiled into the binary from the `levels/` directory.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbeddedLevels;

impl LevelSource for EmbeddedLevels {
    fn levels(&self) -> Vec<Grid> {
        // LEVEL_DATA is sorted by name, so this is play order.
        LEVELS
            .iter()
            .filter(|l| l.name.starts_with(LEVEL_PREFIX))
            .map(|l| l.grid.clone())
            .collect()
    }

    fn secret(&self, index: usize) -> Option<Grid> {
        get_level(&format!("{SECRET_PREFIX}{index:02}")).map(|l| l.grid.clone())
    }
}

/// Level set held in memory, for callers that load levels themselves.
#[derive(Clone, Debug, Default)]
pub struct MemoryLevels {
    pub levels: Vec<Grid>,
    pub secrets: HashMap<usize, Grid>,
}

impl MemoryLevels {
    pub fn new(levels: Vec<Grid>) -> Self {
        Self {
            levels,
            secrets: HashMap::new(),
        }
    }

    pub fn with_secret(mut self, index: usize, grid: Grid) -> Self {
        self.secrets.insert(index, grid);
        self
    }
}

impl LevelSource for MemoryLevels {
    fn levels(&self) -> Vec<Grid> {
        self.levels.clone()
    }

    fn secret(&self, index: usize) -> Option<Grid> {
        self.secrets.get(&index).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_levels_are_in_order_and_playable() {
        let levels = EmbeddedLevels.levels();
        assert!(!levels.is_empty());
        for grid in &levels {
            let spawns = grid.spawns();
            assert!(spawns.player.is_some());
            assert!(spawns.key.is_some());
        }
        let names: Vec<_> = LEVELS
            .iter()
            .filter(|l| l.name.starts_with(LEVEL_PREFIX))
            .map(|l| l.name)
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn embedded_fallback_secret_exists() {
        assert!(EmbeddedLevels.secret(FALLBACK_SECRET).is_some());
    }

    #[test]
    fn missing_secret_falls_back() {
        let shared = Grid::parse("#@+#").unwrap();
        let source = MemoryLevels::new(vec![Grid::default_level()]).with_secret(1, shared.clone());
        assert_eq!(secret_or_fallback(&source, 7), shared);

        let bare = MemoryLevels::new(vec![Grid::default_level()]);
        assert_eq!(secret_or_fallback(&bare, 7), Grid::default_level());
    }

    #[test]
    fn empty_source_plays_the_default_level() {
        let source = MemoryLevels::default();
        assert_eq!(main_levels(&source), vec![Grid::default_level()]);
    }
}

use std::mem;

use crate::grid::Grid;

/// Tracks a secret-level visit: which level slot currently holds a secret
/// grid, and the grid it replaced.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Detour {
    #[default]
    Normal,
    InSecret { return_index: usize, saved: Grid },
}

impl Detour {
    pub fn is_active(&self) -> bool {
        matches!(self, Detour::InSecret { .. })
    }

    /// Level index the detour started from, if one is in progress.
    pub fn return_index(&self) -> Option<usize> {
        match self {
            Detour::Normal => None,
            Detour::InSecret { return_index, .. } => Some(*return_index),
        }
    }

    /// Substitute `secret` into `levels[index]`.
    ///
    /// Entering again while already in a detour replaces the active secret grid
    /// but keeps the original level saved, so detours never stack.
    pub(crate) fn enter(&mut self, levels: &mut [Grid], index: usize, secret: Grid) {
        let replaced = mem::replace(&mut levels[index], secret);
        if !self.is_active() {
            *self = Detour::InSecret {
                return_index: index,
                saved: replaced,
            };
        }
    }

    /// End the detour and put the saved level back in its slot.
    /// Returns the index the detour started from.
    pub(crate) fn leave(&mut self, levels: &mut [Grid]) -> Option<usize> {
        match mem::take(self) {
            Detour::Normal => None,
            Detour::InSecret {
                return_index,
                saved,
            } => {
                levels[return_index] = saved;
                Some(return_index)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels() -> Vec<Grid> {
        vec![
            Grid::parse("#@+S#").unwrap(),
            Grid::parse("#@ S#").unwrap(),
        ]
    }

    fn secret(text: &str) -> Grid {
        Grid::parse(text).unwrap()
    }

    #[test]
    fn enter_substitutes_and_leave_restores() {
        let original = levels();
        let mut levels = original.clone();
        let mut detour = Detour::default();

        detour.enter(&mut levels, 0, secret("#@ K S#"));
        assert_eq!(detour.return_index(), Some(0));
        assert_eq!(levels[0], secret("#@ K S#"));
        assert_eq!(levels[1], original[1]);

        assert_eq!(detour.leave(&mut levels), Some(0));
        assert!(!detour.is_active());
        assert_eq!(levels, original);
    }

    #[test]
    fn reentry_keeps_the_original_level() {
        let original = levels();
        let mut levels = original.clone();
        let mut detour = Detour::default();

        detour.enter(&mut levels, 0, secret("#@+S#  "));
        detour.enter(&mut levels, 0, secret("#@ S#KK"));
        assert_eq!(levels[0], secret("#@ S#KK"));
        assert_eq!(detour.return_index(), Some(0));

        detour.leave(&mut levels);
        assert_eq!(levels, original);
    }

    #[test]
    fn leaving_without_a_detour_is_a_no_op() {
        let original = levels();
        let mut levels = original.clone();
        let mut detour = Detour::Normal;
        assert_eq!(detour.leave(&mut levels), None);
        assert_eq!(levels, original);
    }
}

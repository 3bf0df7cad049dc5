#![allow(dead_code)]
//! Selection matching: turning a traced cell path into a word find
//!
//! Validates a path against:
//! - Minimum length (3 cells)
//! - Straight-line shape (row, column, or exact diagonal, unit steps)
//! - The match's target words, read forward or backward
//! - The finder's own found-list (no double credit)

use super::grid::Grid;
use std::collections::HashSet;

/// Minimum number of cells in a valid selection.
pub const MIN_SELECTION_LEN: usize = 3;

/// Result of matching a selection with specific feedback per failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionResult {
    /// The path spells this target word, not yet found by the player.
    Matched { word: String },
    /// Fewer than [`MIN_SELECTION_LEN`] cells selected.
    TooShort { length: usize },
    /// Cells do not form a straight contiguous line on the board.
    NotALine,
    /// The path spells a target word the player already has.
    AlreadyFound { word: String },
    /// The letters spell no remaining target word.
    NoMatch,
}

impl SelectionResult {
    /// Returns true if the selection scored a word.
    pub fn is_match(&self) -> bool {
        matches!(self, SelectionResult::Matched { .. })
    }

    /// User-facing feedback line.
    pub fn message(&self) -> String {
        match self {
            SelectionResult::Matched { word } => format!("Found {} (+{})", word, word.len()),
            SelectionResult::TooShort { length } => {
                format!("Too short ({} cells, need {}+)", length, MIN_SELECTION_LEN)
            }
            SelectionResult::NotALine => "Not a straight line".to_string(),
            SelectionResult::AlreadyFound { word } => format!("{} already found", word),
            SelectionResult::NoMatch => "No word there".to_string(),
        }
    }
}

/// Match a selected path against the target words.
///
/// `already_found` is the finder's own found-list only. The opponent's
/// found-list is deliberately not consulted: both players may find the
/// same word independently.
pub fn match_selection(
    grid: &Grid,
    path: &[(usize, usize)],
    targets: &[String],
    already_found: &HashSet<String>,
) -> SelectionResult {
    if path.len() < MIN_SELECTION_LEN {
        return SelectionResult::TooShort { length: path.len() };
    }
    if path.iter().any(|&(r, c)| r >= grid.size() || c >= grid.size()) {
        return SelectionResult::NotALine;
    }
    if !is_straight_line(path) {
        return SelectionResult::NotALine;
    }

    let forward = grid.read_path(path);
    let backward: String = forward.chars().rev().collect();

    // Prefer an unfound target; remember a found one for feedback.
    let mut found_repeat: Option<&String> = None;
    for target in targets {
        if *target == forward || *target == backward {
            if already_found.contains(target) {
                found_repeat.get_or_insert(target);
            } else {
                return SelectionResult::Matched {
                    word: target.clone(),
                };
            }
        }
    }

    match found_repeat {
        Some(word) => SelectionResult::AlreadyFound { word: word.clone() },
        None => SelectionResult::NoMatch,
    }
}

/// True when every consecutive pair advances by the same unit step.
///
/// A shared unit step also rules out repeated cells.
pub fn is_straight_line(path: &[(usize, usize)]) -> bool {
    if path.len() < 2 {
        return true;
    }
    let step = (
        path[1].0 as i32 - path[0].0 as i32,
        path[1].1 as i32 - path[0].1 as i32,
    );
    if step == (0, 0) || step.0.abs() > 1 || step.1.abs() > 1 {
        return false;
    }
    path.windows(2).all(|pair| {
        (
            pair[1].0 as i32 - pair[0].0 as i32,
            pair[1].1 as i32 - pair[0].1 as i32,
        ) == step
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Row 0 spells LION forward; column 0 spells LAMB downward.
    fn fixture_grid() -> Grid {
        Grid::from_text("LION\nAAAA\nMBCD\nBEFG").expect("fixture parses")
    }

    fn targets() -> Vec<String> {
        vec!["LION".to_string(), "LAMB".to_string()]
    }

    #[test]
    fn test_forward_match() {
        let result = match_selection(
            &fixture_grid(),
            &[(0, 0), (0, 1), (0, 2), (0, 3)],
            &targets(),
            &HashSet::new(),
        );
        assert_eq!(
            result,
            SelectionResult::Matched {
                word: "LION".to_string()
            }
        );
    }

    #[test]
    fn test_backward_match() {
        // Tracing NOIL still credits LION.
        let result = match_selection(
            &fixture_grid(),
            &[(0, 3), (0, 2), (0, 1), (0, 0)],
            &targets(),
            &HashSet::new(),
        );
        assert_eq!(
            result,
            SelectionResult::Matched {
                word: "LION".to_string()
            }
        );
    }

    #[test]
    fn test_vertical_match() {
        let result = match_selection(
            &fixture_grid(),
            &[(0, 0), (1, 0), (2, 0), (3, 0)],
            &targets(),
            &HashSet::new(),
        );
        assert_eq!(
            result,
            SelectionResult::Matched {
                word: "LAMB".to_string()
            }
        );
    }

    #[test]
    fn test_too_short_rejected_without_lookup() {
        let result = match_selection(&fixture_grid(), &[(0, 0), (0, 1)], &targets(), &HashSet::new());
        assert_eq!(result, SelectionResult::TooShort { length: 2 });
    }

    #[test]
    fn test_bent_path_rejected() {
        let result = match_selection(
            &fixture_grid(),
            &[(0, 0), (0, 1), (1, 1), (2, 1)],
            &targets(),
            &HashSet::new(),
        );
        assert_eq!(result, SelectionResult::NotALine);
    }

    #[test]
    fn test_gapped_path_rejected() {
        assert!(!is_straight_line(&[(0, 0), (0, 2), (0, 4)]));
    }

    #[test]
    fn test_no_double_credit_for_same_player() {
        let mut found = HashSet::new();
        found.insert("LION".to_string());
        let result = match_selection(
            &fixture_grid(),
            &[(0, 0), (0, 1), (0, 2), (0, 3)],
            &targets(),
            &found,
        );
        assert_eq!(
            result,
            SelectionResult::AlreadyFound {
                word: "LION".to_string()
            }
        );
    }

    #[test]
    fn test_opponent_found_list_does_not_block() {
        // The opponent having LION is invisible here: the caller passes
        // only the finder's own found-list.
        let result = match_selection(
            &fixture_grid(),
            &[(0, 0), (0, 1), (0, 2), (0, 3)],
            &targets(),
            &HashSet::new(),
        );
        assert!(result.is_match());
    }

    #[test]
    fn test_non_target_letters_spell_nothing() {
        let result = match_selection(
            &fixture_grid(),
            &[(1, 0), (1, 1), (1, 2), (1, 3)],
            &targets(),
            &HashSet::new(),
        );
        assert_eq!(result, SelectionResult::NoMatch);
    }

    #[test]
    fn test_diagonal_is_a_line() {
        assert!(is_straight_line(&[(0, 0), (1, 1), (2, 2)]));
        assert!(is_straight_line(&[(3, 0), (2, 1), (1, 2)]));
    }
}

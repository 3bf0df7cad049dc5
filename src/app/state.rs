#![allow(dead_code)]
//! In-match state for the local player
//!
//! Two duel flavors share the same play surface: a cursor-and-anchor
//! selection model over the board, a 1-second countdown, and a feedback
//! line. The CPU duel runs entirely locally; the online duel delegates
//! find persistence to its [`OnlineSession`].

use crate::game::cpu::{profile, CpuProfile, CpuSchedule};
use crate::game::grid::Grid;
use crate::game::outcome::{cpu_match_xp, Outcome};
use crate::game::selection::{match_selection, SelectionResult};
use crate::game::wordbank::{self, Category};
use crate::game::{Difficulty, GRID_SIZE, MATCH_DURATION_SECS};
use crate::session::{MatchReport, OnlineSession};
use crate::storage::{PlayerColor, Storage};
use std::collections::{HashMap, HashSet};
use std::time::Instant;

/// Cursor plus an optional selection anchor on the board.
///
/// The traced path is the straight line from anchor to cursor; moving off
/// every straight line through the anchor leaves no path, which the UI
/// shows as an empty selection.
#[derive(Debug, Clone)]
pub struct SelectionCursor {
    size: usize,
    pub cursor: (usize, usize),
    anchor: Option<(usize, usize)>,
}

impl SelectionCursor {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cursor: (0, 0),
            anchor: None,
        }
    }

    /// Move the cursor, clamped to the board.
    pub fn move_by(&mut self, dr: i32, dc: i32) {
        let r = (self.cursor.0 as i32 + dr).clamp(0, self.size as i32 - 1);
        let c = (self.cursor.1 as i32 + dc).clamp(0, self.size as i32 - 1);
        self.cursor = (r as usize, c as usize);
    }

    /// Drop the anchor at the cursor, or lift it if one is set.
    pub fn toggle_anchor(&mut self) {
        if self.anchor.is_some() {
            self.anchor = None;
        } else {
            self.anchor = Some(self.cursor);
        }
    }

    pub fn anchor(&self) -> Option<(usize, usize)> {
        self.anchor
    }

    pub fn clear(&mut self) {
        self.anchor = None;
    }

    /// The selected path, anchor through cursor inclusive, when they are
    /// aligned on a row, column, or exact diagonal.
    pub fn path(&self) -> Option<Vec<(usize, usize)>> {
        let anchor = self.anchor?;
        let dr = self.cursor.0 as i32 - anchor.0 as i32;
        let dc = self.cursor.1 as i32 - anchor.1 as i32;
        if !(dr == 0 || dc == 0 || dr.abs() == dc.abs()) {
            return None;
        }
        let steps = dr.abs().max(dc.abs());
        let step = (dr.signum(), dc.signum());
        let mut path = Vec::with_capacity(steps as usize + 1);
        for i in 0..=steps {
            path.push((
                (anchor.0 as i32 + step.0 * i) as usize,
                (anchor.1 as i32 + step.1 * i) as usize,
            ));
        }
        Some(path)
    }
}

/// Everything the play screen needs to draw one duel, either flavor.
pub struct DuelView<'a> {
    pub grid: &'a Grid,
    pub words: &'a [String],
    pub my_label: &'a str,
    pub opp_label: &'a str,
    pub my_words: &'a [String],
    pub opp_words: &'a [String],
    pub my_color: Option<PlayerColor>,
    pub opp_color: Option<PlayerColor>,
    pub my_score: u32,
    pub opp_score: u32,
    pub time_remaining: u32,
    pub feedback: &'a str,
    pub cursor: (usize, usize),
    pub anchor: Option<(usize, usize)>,
    pub selection: Vec<(usize, usize)>,
    pub found_paths: &'a HashMap<String, Vec<(usize, usize)>>,
    pub report: Option<&'a MatchReport>,
}

/// A match against the scripted CPU. Runs entirely in memory; only the
/// final XP award touches the store.
pub struct CpuDuel {
    pub difficulty: Difficulty,
    pub grid: Grid,
    pub words: Vec<String>,
    pub cursor: SelectionCursor,
    pub my_words: Vec<String>,
    pub my_score: u32,
    my_found: HashSet<String>,
    pub cpu_profile: &'static CpuProfile,
    cpu: CpuSchedule,
    pub cpu_words: Vec<String>,
    pub cpu_score: u32,
    pub found_paths: HashMap<String, Vec<(usize, usize)>>,
    pub feedback: String,
    pub time_remaining: u32,
    started: Instant,
    pub report: Option<MatchReport>,
}

impl CpuDuel {
    /// Start a duel on a fresh board.
    pub fn new(difficulty: Difficulty) -> Self {
        let candidates = wordbank::pick_match_words(Category::Mixed);
        let (grid, words) = Grid::generate(&candidates, GRID_SIZE);
        Self::with_board(difficulty, grid, words)
    }

    /// Start a duel on a given board (used by tests).
    pub fn with_board(difficulty: Difficulty, grid: Grid, words: Vec<String>) -> Self {
        let cpu = CpuSchedule::new(&words, difficulty);
        let size = grid.size();
        Self {
            difficulty,
            grid,
            words,
            cursor: SelectionCursor::new(size),
            my_words: Vec::new(),
            my_score: 0,
            my_found: HashSet::new(),
            cpu_profile: profile(difficulty),
            cpu,
            cpu_words: Vec::new(),
            cpu_score: 0,
            found_paths: HashMap::new(),
            feedback: String::new(),
            time_remaining: MATCH_DURATION_SECS,
            started: Instant::now(),
            report: None,
        }
    }

    pub fn move_cursor(&mut self, dr: i32, dc: i32) {
        if self.is_over() {
            return;
        }
        self.cursor.move_by(dr, dc);
    }

    pub fn toggle_anchor(&mut self) {
        if self.is_over() {
            return;
        }
        self.cursor.toggle_anchor();
        self.feedback.clear();
    }

    /// Submit the current selection (Enter).
    pub fn submit(&mut self) {
        if self.is_over() {
            return;
        }
        let Some(path) = self.cursor.path() else {
            self.feedback = SelectionResult::NotALine.message();
            self.cursor.clear();
            return;
        };
        let result = match_selection(&self.grid, &path, &self.words, &self.my_found);
        self.feedback = result.message();
        if let SelectionResult::Matched { word } = &result {
            self.my_score += word.len() as u32;
            self.my_found.insert(word.clone());
            self.my_words.push(word.clone());
            self.found_paths.insert(word.clone(), path);
        }
        self.cursor.clear();
    }

    /// One-second tick: countdown, CPU poll, and settlement at the end.
    pub fn tick(&mut self, storage: &Storage, user_id: &str, username: &str) {
        if self.report.is_some() {
            return;
        }
        if self.time_remaining > 0 {
            self.time_remaining -= 1;
        }

        // The CPU measures elapsed time from the captured wall-clock
        // start, so it catches up after a stalled tick loop. The visible
        // countdown stays tick-counted.
        if !self.is_over() {
            let elapsed = self.started.elapsed().as_secs();
            if let Some(word) = self.cpu.poll(elapsed) {
                let word = word.to_string();
                self.cpu_score += word.len() as u32;
                self.cpu_words.push(word);
            }
        }

        if self.is_over() {
            self.settle(storage, user_id, username);
        }
    }

    /// Timeout, or either side swept the board.
    pub fn is_over(&self) -> bool {
        self.report.is_some()
            || self.time_remaining == 0
            || (!self.words.is_empty()
                && (self.my_words.len() >= self.words.len()
                    || self.cpu_words.len() >= self.words.len()))
    }

    // Runs once: tick() never calls settle() after the report is set.
    fn settle(&mut self, storage: &Storage, user_id: &str, username: &str) {
        let outcome = Outcome::from_scores(self.my_score, self.cpu_score);
        let xp_earned = cpu_match_xp(outcome, self.difficulty);
        let awarded = storage
            .ensure_profile(user_id, username)
            .and_then(|_| storage.add_xp(user_id, xp_earned));
        let report = match awarded {
            Ok(profile) => MatchReport {
                outcome,
                xp_earned,
                new_total_xp: profile.xp,
            },
            Err(e) => {
                self.feedback = format!("XP not saved: {}", e);
                MatchReport {
                    outcome,
                    xp_earned: 0,
                    new_total_xp: 0,
                }
            }
        };
        self.report = Some(report);
    }

    pub fn view(&self) -> DuelView<'_> {
        DuelView {
            grid: &self.grid,
            words: &self.words,
            my_label: "You",
            opp_label: self.cpu_profile.name,
            my_words: &self.my_words,
            opp_words: &self.cpu_words,
            my_color: None,
            opp_color: None,
            my_score: self.my_score,
            opp_score: self.cpu_score,
            time_remaining: self.time_remaining,
            feedback: &self.feedback,
            cursor: self.cursor.cursor,
            anchor: self.cursor.anchor(),
            selection: self.cursor.path().unwrap_or_default(),
            found_paths: &self.found_paths,
            report: self.report.as_ref(),
        }
    }
}

/// An online match seen from the local seat.
pub struct OnlineDuel {
    pub session: OnlineSession,
    pub cursor: SelectionCursor,
    pub found_paths: HashMap<String, Vec<(usize, usize)>>,
    pub feedback: String,
    pub time_remaining: u32,
    pub report: Option<MatchReport>,
}

impl OnlineDuel {
    pub fn new(session: OnlineSession) -> Self {
        let size = session.game().grid.size();
        Self {
            session,
            cursor: SelectionCursor::new(size),
            found_paths: HashMap::new(),
            feedback: String::new(),
            time_remaining: MATCH_DURATION_SECS,
            report: None,
        }
    }

    pub fn move_cursor(&mut self, dr: i32, dc: i32) {
        if self.report.is_some() {
            return;
        }
        self.cursor.move_by(dr, dc);
    }

    pub fn toggle_anchor(&mut self) {
        if self.report.is_some() {
            return;
        }
        self.cursor.toggle_anchor();
        self.feedback.clear();
    }

    pub fn submit(&mut self, storage: &Storage) {
        if self.report.is_some() {
            return;
        }
        let Some(path) = self.cursor.path() else {
            self.feedback = SelectionResult::NotALine.message();
            self.cursor.clear();
            return;
        };
        let result = self.session.submit_selection(storage, &path);
        self.feedback = result.message();
        if let SelectionResult::Matched { word } = &result {
            self.found_paths.insert(word.clone(), path);
        }
        self.cursor.clear();
    }

    /// One-second tick: countdown, store sync, and settlement.
    pub fn tick(&mut self, storage: &Storage) {
        if self.report.is_some() {
            return;
        }
        if self.time_remaining > 0 {
            self.time_remaining -= 1;
        }
        self.session.pump(storage);
        if let Some(err) = self.session.take_error() {
            self.feedback = err;
        }

        if self.time_remaining == 0 || self.session.board_swept() || self.session.is_ended() {
            match self.session.finish(storage) {
                Ok(report) => self.report = Some(report),
                Err(e) => {
                    // Surfaced, not retried; the match still ends locally.
                    self.feedback = format!("Result not saved: {}", e);
                    let outcome = Outcome::from_scores(
                        self.session.my_score(),
                        self.session.opponent_score(),
                    );
                    self.report = Some(MatchReport {
                        outcome,
                        xp_earned: 0,
                        new_total_xp: 0,
                    });
                }
            }
        }
    }

    pub fn view<'a>(&'a self, opp_label: &'a str) -> DuelView<'a> {
        let game = self.session.game();
        DuelView {
            grid: &game.grid,
            words: &game.words,
            my_label: "You",
            opp_label,
            my_words: self.session.my_words(),
            opp_words: self.session.opponent_words(),
            my_color: game.color(self.session.seat()),
            opp_color: game.color(self.session.seat().other()),
            my_score: self.session.my_score(),
            opp_score: self.session.opponent_score(),
            time_remaining: self.time_remaining,
            feedback: &self.feedback,
            cursor: self.cursor.cursor,
            anchor: self.cursor.anchor(),
            selection: self.cursor.path().unwrap_or_default(),
            found_paths: &self.found_paths,
            report: self.report.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_clamps_to_the_board() {
        let mut cursor = SelectionCursor::new(4);
        cursor.move_by(-1, -1);
        assert_eq!(cursor.cursor, (0, 0));
        cursor.move_by(10, 10);
        assert_eq!(cursor.cursor, (3, 3));
    }

    #[test]
    fn test_path_follows_the_anchor_line() {
        let mut cursor = SelectionCursor::new(8);
        cursor.toggle_anchor();
        cursor.move_by(0, 3);
        assert_eq!(
            cursor.path(),
            Some(vec![(0, 0), (0, 1), (0, 2), (0, 3)])
        );

        // Off every line through the anchor: no path.
        cursor.move_by(1, 0);
        assert_eq!(cursor.cursor, (1, 3));
        assert_eq!(cursor.path(), None);
    }

    #[test]
    fn test_diagonal_and_reverse_paths() {
        let mut cursor = SelectionCursor::new(8);
        cursor.move_by(3, 3);
        cursor.toggle_anchor();
        cursor.move_by(-3, -3);
        assert_eq!(
            cursor.path(),
            Some(vec![(3, 3), (2, 2), (1, 1), (0, 0)])
        );
    }

    #[test]
    fn test_no_path_without_anchor() {
        let cursor = SelectionCursor::new(8);
        assert_eq!(cursor.path(), None);
    }

    fn fixture_duel() -> CpuDuel {
        // Row 0 spells LION; everything else is filler.
        let grid = Grid::from_text(
            "LIONAAAAAAAA\nBBBBBBBBBBBB\nCCCCCCCCCCCC\nDDDDDDDDDDDD\nEEEEEEEEEEEE\nFFFFFFFFFFFF\nGGGGGGGGGGGG\nHHHHHHHHHHHH\nIIIIIIIIIIII\nJJJJJJJJJJJJ\nKKKKKKKKKKKK\nLLLLLLLLLLLL",
        )
        .expect("fixture parses");
        CpuDuel::with_board(Difficulty::Easy, grid, vec!["LION".to_string()])
    }

    #[test]
    fn test_submitting_a_word_scores_it() {
        let mut duel = fixture_duel();
        duel.toggle_anchor();
        duel.move_cursor(0, 3);
        duel.submit();

        assert_eq!(duel.my_words, vec!["LION".to_string()]);
        assert_eq!(duel.my_score, 4);
        assert!(duel.found_paths.contains_key("LION"));
        assert!(duel.cursor.anchor().is_none());
    }

    #[test]
    fn test_resubmitting_gives_no_double_credit() {
        let mut duel = fixture_duel();
        duel.toggle_anchor();
        duel.move_cursor(0, 3);
        duel.submit();
        assert!(duel.is_over(), "single word swept the board");

        // Further input after game over is ignored.
        duel.toggle_anchor();
        duel.submit();
        assert_eq!(duel.my_words.len(), 1);
        assert_eq!(duel.my_score, 4);
    }

    #[test]
    fn test_settlement_awards_xp_exactly_once() {
        let storage = Storage::open_in_memory().expect("db");
        storage.ensure_profile("alice", "Alice").expect("profile");

        let mut duel = fixture_duel();
        duel.toggle_anchor();
        duel.move_cursor(0, 3);
        duel.submit();

        duel.tick(&storage, "alice", "Alice");
        let report = duel.report.expect("settled");
        assert_eq!(report.outcome, Outcome::Win);
        assert_eq!(report.xp_earned, 50);
        assert_eq!(storage.profile("alice").expect("profile").xp, 50);

        // Ticks after settlement change nothing.
        let frozen = duel.time_remaining;
        duel.tick(&storage, "alice", "Alice");
        duel.tick(&storage, "alice", "Alice");
        assert_eq!(duel.time_remaining, frozen);
        assert_eq!(storage.profile("alice").expect("profile").xp, 50);
    }

    #[test]
    fn test_timeout_with_no_finds_is_settled_as_a_draw() {
        let storage = Storage::open_in_memory().expect("db");
        storage.ensure_profile("alice", "Alice").expect("profile");

        let mut duel = fixture_duel();
        duel.time_remaining = 1;
        duel.tick(&storage, "alice", "Alice");

        let report = duel.report.expect("settled");
        assert_eq!(report.outcome, Outcome::Draw);
        assert_eq!(report.xp_earned, 15);
    }
}

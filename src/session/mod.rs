#![allow(dead_code)]
//! Online match session
//!
//! Wraps one seat's view of a shared game row: an optimistic local copy
//! of the record, a change subscription, and the write path for finds.
//!
//! Two disciplines from the storage design are enforced here:
//! - Writes touch only this seat's field group; the opponent's fields and
//!   the shared status group only ever arrive via reads.
//! - Local state is optimistic. A find is applied locally first, then
//!   persisted fire-and-continue; a failed or lost write is reconciled on
//!   the next read instead of rolling back mid-match.

use crate::game::outcome::{online_match_xp, Outcome};
use crate::game::selection::{match_selection, SelectionResult};
use crate::matchmaking::MatchTicket;
use crate::storage::{GameRecord, GameStatus, Seat, Storage, StorageError};
use std::collections::HashSet;
use std::sync::mpsc::Receiver;

/// How many ticks between authoritative re-reads of the game row.
const REFRESH_INTERVAL_TICKS: u32 = 2;

/// End-of-match summary for the local player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchReport {
    pub outcome: Outcome,
    pub xp_earned: u32,
    pub new_total_xp: u32,
}

/// One seat's live connection to an online match.
pub struct OnlineSession {
    game: GameRecord,
    seat: Seat,
    user_id: String,
    updates: Receiver<GameRecord>,
    my_found: HashSet<String>,
    last_error: Option<String>,
    refresh_in: u32,
}

impl OnlineSession {
    /// Open a session for a matchmaking ticket.
    pub fn new(storage: &Storage, user_id: &str, ticket: MatchTicket) -> Self {
        let updates = storage.watch_game(&ticket.game.id);
        let my_found = ticket
            .game
            .words_found(ticket.seat)
            .iter()
            .cloned()
            .collect();
        Self {
            game: ticket.game,
            seat: ticket.seat,
            user_id: user_id.to_string(),
            updates,
            my_found,
            last_error: None,
            // First pump re-reads immediately so a join that predates the
            // subscription is not missed.
            refresh_in: 0,
        }
    }

    pub fn game(&self) -> &GameRecord {
        &self.game
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn my_score(&self) -> u32 {
        self.game.score(self.seat)
    }

    pub fn opponent_score(&self) -> u32 {
        self.game.score(self.seat.other())
    }

    pub fn my_words(&self) -> &[String] {
        self.game.words_found(self.seat)
    }

    pub fn opponent_words(&self) -> &[String] {
        self.game.words_found(self.seat.other())
    }

    pub fn opponent_id(&self) -> Option<&str> {
        self.game.player_id(self.seat.other())
    }

    pub fn is_ended(&self) -> bool {
        self.game.status == GameStatus::Ended
    }

    /// True when the match should end early: one side swept the board.
    pub fn board_swept(&self) -> bool {
        self.game.any_side_swept()
    }

    /// Take the latest store-failure feedback, if any.
    pub fn take_error(&mut self) -> Option<String> {
        self.last_error.take()
    }

    /// Drain pending change notifications and periodically re-read the
    /// row. Called once per tick; never blocks.
    pub fn pump(&mut self, storage: &Storage) {
        while let Ok(record) = self.updates.try_recv() {
            self.merge(record);
        }
        if self.refresh_in == 0 {
            self.refresh_in = REFRESH_INTERVAL_TICKS;
            match storage.game(&self.game.id) {
                Ok(record) => self.merge(record),
                Err(e) => self.last_error = Some(e.to_string()),
            }
        } else {
            self.refresh_in -= 1;
        }
    }

    /// Submit a traced cell path for this seat.
    ///
    /// On a match: applied locally, then persisted. Selections against an
    /// ended match are no-ops.
    pub fn submit_selection(
        &mut self,
        storage: &Storage,
        path: &[(usize, usize)],
    ) -> SelectionResult {
        if self.game.status != GameStatus::Active {
            return SelectionResult::NoMatch;
        }
        let result = match_selection(&self.game.grid, path, &self.game.words, &self.my_found);
        if let SelectionResult::Matched { word } = &result {
            self.apply_local_find(word);
            match storage.record_find(&self.game.id, self.seat, word) {
                Ok(Some(record)) => self.merge(record),
                // Ended under us; the next pump reconciles.
                Ok(None) => {}
                Err(e) => self.last_error = Some(e.to_string()),
            }
        }
        result
    }

    /// End the match and settle XP.
    ///
    /// The status transition is guarded in the store; only the client
    /// that performs it awards XP (for both seats), so a double finish
    /// cannot double-award. The other client just reads the final row and
    /// reports its own share.
    pub fn finish(&mut self, storage: &Storage) -> Result<MatchReport, StorageError> {
        let ended = storage.end_game(&self.game.id)?;
        let performed_transition = ended.is_some();
        match ended {
            Some(record) => self.merge(record),
            None => {
                if let Ok(record) = storage.game(&self.game.id) {
                    self.merge(record);
                }
            }
        }

        let outcome = Outcome::from_scores(self.my_score(), self.opponent_score());
        let xp_earned = online_match_xp(outcome);

        if performed_transition {
            storage.ensure_profile(&self.user_id, &self.user_id)?;
            let mine = storage.add_xp(&self.user_id, xp_earned)?;
            if let Some(opponent) = self.opponent_id().map(str::to_string) {
                let their_outcome = Outcome::from_scores(self.opponent_score(), self.my_score());
                storage.ensure_profile(&opponent, &opponent)?;
                storage.add_xp(&opponent, online_match_xp(their_outcome))?;
            }
            Ok(MatchReport {
                outcome,
                xp_earned,
                new_total_xp: mine.xp,
            })
        } else {
            let mine = storage.ensure_profile(&self.user_id, &self.user_id)?;
            Ok(MatchReport {
                outcome,
                xp_earned,
                new_total_xp: mine.xp,
            })
        }
    }

    fn apply_local_find(&mut self, word: &str) {
        self.my_found.insert(word.to_string());
        let score = self.game.score(self.seat) + word.len() as u32;
        match self.seat {
            Seat::Player1 => {
                self.game.player1_words_found.push(word.to_string());
                self.game.player1_score = score;
            }
            Seat::Player2 => {
                self.game.player2_words_found.push(word.to_string());
                self.game.player2_score = score;
            }
        }
    }

    // Adopt a record read from the store. The opponent's fields and the
    // shared status group always come from the store; this seat's fields
    // are kept local only while the store lags behind an optimistic find.
    fn merge(&mut self, record: GameRecord) {
        let local_words = self.game.words_found(self.seat).to_vec();
        let local_score = self.game.score(self.seat);
        let store_lags = record.words_found(self.seat).len() < local_words.len()
            && self.game.status == GameStatus::Active;

        let keep_status = status_rank(self.game.status) > status_rank(record.status);
        let (status, ended_at) = if keep_status {
            (self.game.status, self.game.ended_at)
        } else {
            (record.status, record.ended_at)
        };

        self.game = record;
        self.game.status = status;
        self.game.ended_at = ended_at;
        if store_lags {
            match self.seat {
                Seat::Player1 => {
                    self.game.player1_words_found = local_words;
                    self.game.player1_score = local_score;
                }
                Seat::Player2 => {
                    self.game.player2_words_found = local_words;
                    self.game.player2_score = local_score;
                }
            }
        }
        self.my_found = self.game.words_found(self.seat).iter().cloned().collect();
    }
}

// Lifecycle order; merges never move a session backwards.
fn status_rank(status: GameStatus) -> u8 {
    match status {
        GameStatus::Waiting => 0,
        GameStatus::Active => 1,
        GameStatus::Ended => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Difficulty;
    use crate::matchmaking::find_or_create_with_rng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn matched_pair(storage: &Storage) -> (OnlineSession, OnlineSession) {
        let mut rng = StdRng::seed_from_u64(10);
        storage.ensure_profile("alice", "Alice").expect("profile");
        storage.ensure_profile("bob", "Bob").expect("profile");

        let ticket_a =
            find_or_create_with_rng(storage, "alice", Difficulty::Medium, &mut rng).expect("mm");
        let ticket_b =
            find_or_create_with_rng(storage, "bob", Difficulty::Medium, &mut rng).expect("mm");
        assert_eq!(ticket_a.game.id, ticket_b.game.id);

        let mut session_a = OnlineSession::new(storage, "alice", ticket_a);
        // Player1's ticket predates the join; a pump catches it up.
        session_a.pump(storage);
        session_a.pump(storage);
        let session_b = OnlineSession::new(storage, "bob", ticket_b);
        (session_a, session_b)
    }

    fn path_for(session: &OnlineSession, index: usize) -> Vec<(usize, usize)> {
        let word = &session.game().words[index];
        session.game().grid.find_path(word).expect("placed word")
    }

    #[test]
    fn test_find_persists_and_reaches_the_opponent() {
        let storage = Storage::open_in_memory().expect("db");
        let (mut session_a, mut session_b) = matched_pair(&storage);

        let path = path_for(&session_b, 0);
        let result = session_b.submit_selection(&storage, &path);
        assert!(result.is_match(), "got {result:?}");
        assert_eq!(session_b.my_words().len(), 1);
        assert!(session_b.my_score() >= 3);

        session_a.pump(&storage);
        assert_eq!(session_a.opponent_words().len(), 1);
        assert_eq!(session_a.opponent_score(), session_b.my_score());
        assert_eq!(session_a.my_score(), 0);
    }

    #[test]
    fn test_both_seats_may_find_the_same_word() {
        let storage = Storage::open_in_memory().expect("db");
        let (mut session_a, mut session_b) = matched_pair(&storage);

        let path = path_for(&session_a, 0);
        assert!(session_a.submit_selection(&storage, &path).is_match());
        session_b.pump(&storage);
        assert!(session_b.submit_selection(&storage, &path).is_match());

        let record = storage.game(&session_a.game().id).expect("row");
        assert_eq!(record.player1_words_found, record.player2_words_found);
    }

    #[test]
    fn test_same_seat_gets_no_double_credit() {
        let storage = Storage::open_in_memory().expect("db");
        let (mut session_a, _session_b) = matched_pair(&storage);

        let path = path_for(&session_a, 0);
        assert!(session_a.submit_selection(&storage, &path).is_match());
        let repeat = session_a.submit_selection(&storage, &path);
        assert!(matches!(repeat, SelectionResult::AlreadyFound { .. }));
        assert_eq!(session_a.my_words().len(), 1);
    }

    #[test]
    fn test_double_finish_awards_xp_once_per_player() {
        let storage = Storage::open_in_memory().expect("db");
        let (mut session_a, mut session_b) = matched_pair(&storage);

        let path = path_for(&session_a, 0);
        assert!(session_a.submit_selection(&storage, &path).is_match());

        let report_a = session_a.finish(&storage).expect("finish");
        assert_eq!(report_a.outcome, Outcome::Win);
        assert_eq!(report_a.xp_earned, 100);

        session_b.pump(&storage);
        assert!(session_b.is_ended());
        let report_b = session_b.finish(&storage).expect("finish");
        assert_eq!(report_b.outcome, Outcome::Loss);
        assert_eq!(report_b.xp_earned, 5);

        // One award each, no doubling from the second finish.
        assert_eq!(storage.profile("alice").expect("profile").xp, 100);
        assert_eq!(storage.profile("bob").expect("profile").xp, 5);
    }

    #[test]
    fn test_selections_after_game_over_are_noops() {
        let storage = Storage::open_in_memory().expect("db");
        let (mut session_a, mut session_b) = matched_pair(&storage);

        session_a.finish(&storage).expect("finish");
        session_b.pump(&storage);

        let path = path_for(&session_b, 0);
        let late = session_b.submit_selection(&storage, &path);
        assert!(!late.is_match());
        assert!(session_b.my_words().is_empty());
        assert_eq!(storage.game(&session_b.game().id).expect("row").player2_score, 0);
    }

    #[test]
    fn test_draw_when_nobody_scores() {
        let storage = Storage::open_in_memory().expect("db");
        let (mut session_a, _session_b) = matched_pair(&storage);

        let report = session_a.finish(&storage).expect("finish");
        assert_eq!(report.outcome, Outcome::Draw);
        assert_eq!(report.xp_earned, 20);
        assert_eq!(storage.profile("bob").expect("profile").xp, 20);
    }
}

#![allow(dead_code)]
//! Store-mediated matchmaking
//!
//! Find-or-create against the shared games table: join the oldest waiting
//! game for the requested difficulty, otherwise open a new one and wait.
//! Board generation and color assignment happen exactly once, at the
//! create/join moment, and are never redone later.

use crate::game::grid::Grid;
use crate::game::wordbank::{self, Category};
use crate::game::{Difficulty, GRID_SIZE};
use crate::storage::{GameRecord, GameStatus, GameType, PlayerColor, Seat, Storage, StorageError};
use rand::prelude::*;

/// The caller's placement after matchmaking.
#[derive(Debug, Clone)]
pub struct MatchTicket {
    pub game: GameRecord,
    pub seat: Seat,
}

impl MatchTicket {
    /// True while the ticket is still waiting on an opponent.
    pub fn is_waiting(&self) -> bool {
        self.game.status == GameStatus::Waiting
    }
}

/// Join a waiting game or create one.
pub fn find_or_create(
    storage: &Storage,
    player_id: &str,
    difficulty: Difficulty,
) -> Result<MatchTicket, StorageError> {
    find_or_create_with_rng(storage, player_id, difficulty, &mut rand::rng())
}

/// Matchmaking with a specific RNG (for testing/seeding).
pub fn find_or_create_with_rng<R: Rng>(
    storage: &Storage,
    player_id: &str,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<MatchTicket, StorageError> {
    if let Some(waiting) = storage.find_waiting_game(difficulty, player_id)? {
        // Rows from creators that never embedded a board get one now.
        let board = if waiting.words.is_empty() {
            Some(fresh_board(rng))
        } else {
            None
        };

        let mut colors = [PlayerColor::Red, PlayerColor::Blue];
        colors.shuffle(rng);

        let joined = storage.join_game(
            &waiting.id,
            player_id,
            (colors[0], colors[1]),
            board.as_ref().map(|(grid, words)| (grid, words.as_slice())),
        )?;
        if let Some(game) = joined {
            return Ok(MatchTicket {
                game,
                seat: Seat::Player2,
            });
        }
        // Lost the seat to a faster joiner; open our own game instead.
    }

    let (grid, words) = fresh_board(rng);
    let game = storage.create_game(
        player_id,
        difficulty,
        GameType::Online,
        GameStatus::Waiting,
        &grid,
        &words,
    )?;
    Ok(MatchTicket {
        game,
        seat: Seat::Player1,
    })
}

// A fresh board embeds only the words that actually fit; those are the
// match's words to find.
fn fresh_board<R: Rng>(rng: &mut R) -> (Grid, Vec<String>) {
    let candidates = wordbank::pick_match_words_with_rng(Category::Mixed, rng);
    Grid::generate_with_rng(&candidates, GRID_SIZE, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_first_seeker_creates_a_waiting_game() {
        let storage = Storage::open_in_memory().expect("in-memory db");
        let mut rng = StdRng::seed_from_u64(1);

        let ticket =
            find_or_create_with_rng(&storage, "alice", Difficulty::Medium, &mut rng).expect("mm");
        assert_eq!(ticket.seat, Seat::Player1);
        assert!(ticket.is_waiting());
        assert!(!ticket.game.words.is_empty());
        assert!(ticket.game.player1_color.is_none());
    }

    #[test]
    fn test_second_seeker_joins_and_activates() {
        let storage = Storage::open_in_memory().expect("in-memory db");
        let mut rng = StdRng::seed_from_u64(2);

        let first =
            find_or_create_with_rng(&storage, "alice", Difficulty::Hard, &mut rng).expect("mm");
        let second =
            find_or_create_with_rng(&storage, "bob", Difficulty::Hard, &mut rng).expect("mm");

        assert_eq!(second.seat, Seat::Player2);
        assert_eq!(second.game.id, first.game.id);
        assert_eq!(second.game.status, GameStatus::Active);
        assert_eq!(second.game.player2_id.as_deref(), Some("bob"));

        // The board embedded at creation survives the join untouched.
        assert_eq!(second.game.grid, first.game.grid);
        assert_eq!(second.game.words, first.game.words);
    }

    #[test]
    fn test_colors_assigned_once_without_repeats() {
        let storage = Storage::open_in_memory().expect("in-memory db");
        let mut rng = StdRng::seed_from_u64(3);

        find_or_create_with_rng(&storage, "alice", Difficulty::Easy, &mut rng).expect("mm");
        let joined =
            find_or_create_with_rng(&storage, "bob", Difficulty::Easy, &mut rng).expect("mm");

        let p1 = joined.game.player1_color.expect("p1 color");
        let p2 = joined.game.player2_color.expect("p2 color");
        assert_ne!(p1, p2);
    }

    #[test]
    fn test_difficulties_do_not_cross_match() {
        let storage = Storage::open_in_memory().expect("in-memory db");
        let mut rng = StdRng::seed_from_u64(4);

        let easy =
            find_or_create_with_rng(&storage, "alice", Difficulty::Easy, &mut rng).expect("mm");
        let hard =
            find_or_create_with_rng(&storage, "bob", Difficulty::Hard, &mut rng).expect("mm");

        assert_ne!(easy.game.id, hard.game.id);
        assert_eq!(hard.seat, Seat::Player1);
    }

    #[test]
    fn test_third_seeker_starts_a_new_queue() {
        let storage = Storage::open_in_memory().expect("in-memory db");
        let mut rng = StdRng::seed_from_u64(5);

        let a = find_or_create_with_rng(&storage, "alice", Difficulty::Medium, &mut rng).expect("mm");
        let b = find_or_create_with_rng(&storage, "bob", Difficulty::Medium, &mut rng).expect("mm");
        let c = find_or_create_with_rng(&storage, "carol", Difficulty::Medium, &mut rng).expect("mm");

        assert_eq!(b.game.id, a.game.id);
        assert_ne!(c.game.id, a.game.id);
        assert_eq!(c.seat, Seat::Player1);
    }
}

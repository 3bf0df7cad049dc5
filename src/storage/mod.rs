#![allow(dead_code)]
//! Persistent storage using SQLite (rusqlite)
//!
//! This module provides:
//! - OS-standard data directory location (via `directories` crate)
//! - SQLite database with schema versioning
//! - The profile ledger (XP, level, Elo, view counter)
//! - The shared game table: matchmaking rows with per-player field groups
//! - Change notification on game-row mutation (see [`watch`])
//!
//! Game rows partition mutable fields by seat: each player's finds touch
//! only that player's `words_found`/`score` columns, so concurrent clients
//! never contend on the same field group. The one shared transition,
//! `status` -> ended, is a guarded idempotent update.

pub mod watch;

use crate::game::grid::Grid;
use crate::game::Difficulty;
use crate::stats::level_for_xp;
use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use watch::WatchHub;

/// Current schema version. Bump this when making schema changes.
/// Version history:
/// - v1: Initial schema with meta, profiles and games tables
const SCHEMA_VERSION: u32 = 1;

/// Elo assigned to a freshly created profile.
pub const STARTING_ELO: i64 = 1000;

/// Errors that can occur during storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// Database error from SQLite
    Database(rusqlite::Error),
    /// Could not determine data directory
    NoDataDirectory,
    /// Failed to create data directory
    CreateDirFailed(std::io::Error),
    /// Schema version mismatch (future version)
    FutureSchemaVersion { found: u32, supported: u32 },
    /// No profile row for this user
    ProfileNotFound { user_id: String },
    /// No game row with this id
    GameNotFound { id: String },
    /// A persisted column failed to parse
    MalformedRecord { id: String, field: &'static str },
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Database(e) => write!(f, "database error: {}", e),
            StorageError::NoDataDirectory => write!(f, "could not determine data directory"),
            StorageError::CreateDirFailed(e) => write!(f, "failed to create data directory: {}", e),
            StorageError::FutureSchemaVersion { found, supported } => {
                write!(
                    f,
                    "database schema version {} is newer than supported version {}",
                    found, supported
                )
            }
            StorageError::ProfileNotFound { user_id } => {
                write!(f, "no profile for user {}", user_id)
            }
            StorageError::GameNotFound { id } => write!(f, "no game with id {}", id),
            StorageError::MalformedRecord { id, field } => {
                write!(f, "game {} has a malformed {} column", id, field)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        StorageError::Database(e)
    }
}

/// Lifecycle of a game row. Transitions are monotonic:
/// waiting -> active -> ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Waiting,
    Active,
    Ended,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Waiting => "waiting",
            GameStatus::Active => "active",
            GameStatus::Ended => "ended",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "waiting" => Some(GameStatus::Waiting),
            "active" => Some(GameStatus::Active),
            "ended" => Some(GameStatus::Ended),
            _ => None,
        }
    }
}

/// Kind of opponent the game was created for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameType {
    Cpu,
    Online,
}

impl GameType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameType::Cpu => "cpu",
            GameType::Online => "online",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cpu" => Some(GameType::Cpu),
            "online" => Some(GameType::Online),
            _ => None,
        }
    }
}

/// Side color assigned at the join moment, unique per player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerColor {
    Red,
    Blue,
}

impl PlayerColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerColor::Red => "red",
            PlayerColor::Blue => "blue",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "red" => Some(PlayerColor::Red),
            "blue" => Some(PlayerColor::Blue),
            _ => None,
        }
    }
}

/// Which participant a field group belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat {
    Player1,
    Player2,
}

impl Seat {
    pub fn other(self) -> Seat {
        match self {
            Seat::Player1 => Seat::Player2,
            Seat::Player2 => Seat::Player1,
        }
    }

    fn words_column(self) -> &'static str {
        match self {
            Seat::Player1 => "player1_words_found",
            Seat::Player2 => "player2_words_found",
        }
    }

    fn score_column(self) -> &'static str {
        match self {
            Seat::Player1 => "player1_score",
            Seat::Player2 => "player2_score",
        }
    }
}

/// A player's persisted progression row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub user_id: String,
    pub username: String,
    pub xp: u32,
    pub level: u32,
    pub elo: i64,
    pub profile_views: u32,
}

/// One match row from the games table.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub id: String,
    pub player1_id: String,
    pub player2_id: Option<String>,
    pub status: GameStatus,
    pub grid: Grid,
    pub words: Vec<String>,
    pub difficulty: Difficulty,
    pub game_type: GameType,
    pub player1_color: Option<PlayerColor>,
    pub player2_color: Option<PlayerColor>,
    pub player1_score: u32,
    pub player2_score: u32,
    pub player1_words_found: Vec<String>,
    pub player2_words_found: Vec<String>,
    pub started_at: Option<i64>,
    pub ended_at: Option<i64>,
}

impl GameRecord {
    /// The seat a user occupies, if any.
    pub fn seat_of(&self, user_id: &str) -> Option<Seat> {
        if self.player1_id == user_id {
            Some(Seat::Player1)
        } else if self.player2_id.as_deref() == Some(user_id) {
            Some(Seat::Player2)
        } else {
            None
        }
    }

    pub fn player_id(&self, seat: Seat) -> Option<&str> {
        match seat {
            Seat::Player1 => Some(self.player1_id.as_str()),
            Seat::Player2 => self.player2_id.as_deref(),
        }
    }

    pub fn score(&self, seat: Seat) -> u32 {
        match seat {
            Seat::Player1 => self.player1_score,
            Seat::Player2 => self.player2_score,
        }
    }

    pub fn words_found(&self, seat: Seat) -> &[String] {
        match seat {
            Seat::Player1 => &self.player1_words_found,
            Seat::Player2 => &self.player2_words_found,
        }
    }

    pub fn color(&self, seat: Seat) -> Option<PlayerColor> {
        match seat {
            Seat::Player1 => self.player1_color,
            Seat::Player2 => self.player2_color,
        }
    }

    /// True once either participant has found every match word.
    pub fn any_side_swept(&self) -> bool {
        !self.words.is_empty()
            && (self.player1_words_found.len() >= self.words.len()
                || self.player2_words_found.len() >= self.words.len())
    }
}

// Raw column values before parsing into a GameRecord.
struct GameRow {
    id: String,
    player1_id: String,
    player2_id: Option<String>,
    status: String,
    grid: String,
    words: String,
    difficulty: String,
    game_type: String,
    player1_color: Option<String>,
    player2_color: Option<String>,
    player1_score: u32,
    player2_score: u32,
    player1_words_found: String,
    player2_words_found: String,
    started_at: Option<i64>,
    ended_at: Option<i64>,
}

const GAME_COLUMNS: &str = "id, player1_id, player2_id, status, grid, words, difficulty, \
    game_type, player1_color, player2_color, player1_score, player2_score, \
    player1_words_found, player2_words_found, started_at, ended_at";

/// The main storage handle.
pub struct Storage {
    conn: Connection,
    hub: WatchHub,
}

impl Storage {
    /// Open or create the storage database.
    ///
    /// Uses OS-standard directories:
    /// - Linux: `$XDG_DATA_HOME/gridlock/` or `~/.local/share/gridlock/`
    /// - macOS: `~/Library/Application Support/gridlock/`
    ///
    /// Clients on the same machine share this database, which is what
    /// makes store-mediated matchmaking work without a server process.
    pub fn open() -> Result<Self, StorageError> {
        let data_dir = Self::data_dir()?;
        std::fs::create_dir_all(&data_dir).map_err(StorageError::CreateDirFailed)?;

        let db_path = data_dir.join("gridlock.db");
        let conn = Connection::open(&db_path)?;
        Self::from_connection(conn)
    }

    /// Open an in-memory database (for testing).
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        let storage = Storage {
            conn,
            hub: WatchHub::new(),
        };
        storage.initialize_schema()?;
        Ok(storage)
    }

    /// Get the OS-standard data directory.
    pub fn data_dir() -> Result<PathBuf, StorageError> {
        ProjectDirs::from("", "", "gridlock")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(StorageError::NoDataDirectory)
    }

    /// Subscribe to changes of one game row.
    pub fn watch_game(&self, game_id: &str) -> Receiver<GameRecord> {
        self.hub.subscribe(game_id)
    }

    // Identity: one stable opaque user id per installation, created with
    // the schema and never rotated.

    /// This installation's stable user id.
    pub fn user_id(&self) -> Result<String, StorageError> {
        let id: String = self
            .conn
            .query_row("SELECT user_id FROM meta LIMIT 1", [], |row| row.get(0))?;
        Ok(id)
    }

    /// The locally chosen display name, if one was set.
    pub fn username(&self) -> Result<Option<String>, StorageError> {
        let name: Option<String> = self
            .conn
            .query_row("SELECT username FROM meta LIMIT 1", [], |row| row.get(0))?;
        Ok(name)
    }

    /// Set the display name.
    pub fn set_username(&self, username: &str) -> Result<(), StorageError> {
        self.conn
            .execute("UPDATE meta SET username = ?1", params![username])?;
        Ok(())
    }

    // Profile ledger

    /// Create (or refresh the username of) a profile row.
    pub fn create_profile(&self, user_id: &str, username: &str) -> Result<Profile, StorageError> {
        self.conn.execute(
            "INSERT INTO profiles (user_id, username, xp, level, elo, profile_views)
             VALUES (?1, ?2, 0, 1, ?3, 0)
             ON CONFLICT(user_id) DO UPDATE SET username = excluded.username",
            params![user_id, username, STARTING_ELO],
        )?;
        self.profile(user_id)
    }

    /// Fetch a profile row.
    pub fn profile(&self, user_id: &str) -> Result<Profile, StorageError> {
        self.conn
            .query_row(
                "SELECT user_id, username, xp, level, elo, profile_views
                 FROM profiles WHERE user_id = ?1",
                params![user_id],
                |row| {
                    Ok(Profile {
                        user_id: row.get(0)?,
                        username: row.get(1)?,
                        xp: row.get(2)?,
                        level: row.get(3)?,
                        elo: row.get(4)?,
                        profile_views: row.get(5)?,
                    })
                },
            )
            .optional()?
            .ok_or_else(|| StorageError::ProfileNotFound {
                user_id: user_id.to_string(),
            })
    }

    /// Fetch a profile, creating it on first contact.
    pub fn ensure_profile(&self, user_id: &str, username: &str) -> Result<Profile, StorageError> {
        match self.profile(user_id) {
            Ok(profile) => Ok(profile),
            Err(StorageError::ProfileNotFound { .. }) => self.create_profile(user_id, username),
            Err(e) => Err(e),
        }
    }

    /// Add XP and recompute the stored level from the curve.
    pub fn add_xp(&self, user_id: &str, xp_delta: u32) -> Result<Profile, StorageError> {
        let profile = self.profile(user_id)?;
        let new_xp = profile.xp + xp_delta;
        let new_level = level_for_xp(new_xp);
        self.conn.execute(
            "UPDATE profiles SET xp = ?1, level = ?2 WHERE user_id = ?3",
            params![new_xp, new_level, user_id],
        )?;
        self.profile(user_id)
    }

    /// Set the Elo rating. Separate administrative path; match results do
    /// not call this.
    pub fn set_elo(&self, user_id: &str, elo: i64) -> Result<(), StorageError> {
        let changed = self.conn.execute(
            "UPDATE profiles SET elo = ?1 WHERE user_id = ?2",
            params![elo, user_id],
        )?;
        if changed == 0 {
            return Err(StorageError::ProfileNotFound {
                user_id: user_id.to_string(),
            });
        }
        Ok(())
    }

    /// Bump the profile view counter.
    pub fn increment_views(&self, user_id: &str) -> Result<(), StorageError> {
        let changed = self.conn.execute(
            "UPDATE profiles SET profile_views = profile_views + 1 WHERE user_id = ?1",
            params![user_id],
        )?;
        if changed == 0 {
            return Err(StorageError::ProfileNotFound {
                user_id: user_id.to_string(),
            });
        }
        Ok(())
    }

    /// All profiles, highest XP first (leaderboard order).
    pub fn all_profiles(&self) -> Result<Vec<Profile>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT user_id, username, xp, level, elo, profile_views
             FROM profiles ORDER BY xp DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Profile {
                user_id: row.get(0)?,
                username: row.get(1)?,
                xp: row.get(2)?,
                level: row.get(3)?,
                elo: row.get(4)?,
                profile_views: row.get(5)?,
            })
        })?;
        let mut profiles = Vec::new();
        for row in rows {
            profiles.push(row?);
        }
        Ok(profiles)
    }

    // Game rows

    /// Create a new game row. The board is embedded at creation and never
    /// regenerated.
    pub fn create_game(
        &self,
        player1_id: &str,
        difficulty: Difficulty,
        game_type: GameType,
        status: GameStatus,
        grid: &Grid,
        words: &[String],
    ) -> Result<GameRecord, StorageError> {
        use rand::Rng;
        let id = format!("g{:016x}", rand::rng().random::<u64>());
        self.conn.execute(
            "INSERT INTO games (id, player1_id, status, grid, words, difficulty, game_type,
                                player1_words_found, player2_words_found, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, '', '', ?8)",
            params![
                id,
                player1_id,
                status.as_str(),
                grid.to_text(),
                words.join(","),
                difficulty.as_str(),
                game_type.as_str(),
                now_millis(),
            ],
        )?;
        self.game(&id)
    }

    /// Fetch a game row.
    pub fn game(&self, id: &str) -> Result<GameRecord, StorageError> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {} FROM games WHERE id = ?1", GAME_COLUMNS),
                params![id],
                map_game_row,
            )
            .optional()?
            .ok_or_else(|| StorageError::GameNotFound { id: id.to_string() })?;
        parse_game_row(row)
    }

    /// The oldest waiting game for a difficulty, excluding the seeker's
    /// own rows.
    pub fn find_waiting_game(
        &self,
        difficulty: Difficulty,
        exclude_player: &str,
    ) -> Result<Option<GameRecord>, StorageError> {
        let row = self
            .conn
            .query_row(
                &format!(
                    "SELECT {} FROM games
                     WHERE status = 'waiting' AND player2_id IS NULL
                       AND difficulty = ?1 AND player1_id != ?2
                     ORDER BY created_at LIMIT 1",
                    GAME_COLUMNS
                ),
                params![difficulty.as_str(), exclude_player],
                map_game_row,
            )
            .optional()?;
        row.map(parse_game_row).transpose()
    }

    /// Join a waiting game as player2 and activate it.
    ///
    /// Guarded on the row still being joinable, so two racing joiners
    /// cannot both take the seat; the loser gets None. Colors are set
    /// here, exactly once. `board` replaces an empty board left by a
    /// creator that had not generated one.
    pub fn join_game(
        &self,
        id: &str,
        player2_id: &str,
        colors: (PlayerColor, PlayerColor),
        board: Option<(&Grid, &[String])>,
    ) -> Result<Option<GameRecord>, StorageError> {
        let changed = match board {
            Some((grid, words)) => self.conn.execute(
                "UPDATE games SET player2_id = ?1, status = 'active',
                        player1_color = ?2, player2_color = ?3,
                        grid = ?4, words = ?5, started_at = ?6
                 WHERE id = ?7 AND status = 'waiting' AND player2_id IS NULL",
                params![
                    player2_id,
                    colors.0.as_str(),
                    colors.1.as_str(),
                    grid.to_text(),
                    words.join(","),
                    now_millis(),
                    id,
                ],
            )?,
            None => self.conn.execute(
                "UPDATE games SET player2_id = ?1, status = 'active',
                        player1_color = ?2, player2_color = ?3, started_at = ?4
                 WHERE id = ?5 AND status = 'waiting' AND player2_id IS NULL",
                params![
                    player2_id,
                    colors.0.as_str(),
                    colors.1.as_str(),
                    now_millis(),
                    id,
                ],
            )?,
        };
        if changed == 0 {
            return Ok(None);
        }
        let record = self.game(id)?;
        self.hub.publish(&record);
        Ok(Some(record))
    }

    /// Record a word find for one seat.
    ///
    /// Touches only that seat's `words_found`/`score` columns, guarded on
    /// the game still being active; a find landing after game over is a
    /// no-op and returns None. Re-recording a word the seat already has
    /// changes nothing.
    pub fn record_find(
        &self,
        id: &str,
        seat: Seat,
        word: &str,
    ) -> Result<Option<GameRecord>, StorageError> {
        let game = self.game(id)?;
        if game.status != GameStatus::Active {
            return Ok(None);
        }
        let found = game.words_found(seat);
        if found.iter().any(|w| w == word) {
            return Ok(Some(game));
        }
        let mut words: Vec<String> = found.to_vec();
        words.push(word.to_string());
        let score = game.score(seat) + word.len() as u32;

        let changed = self.conn.execute(
            &format!(
                "UPDATE games SET {} = ?1, {} = ?2 WHERE id = ?3 AND status = 'active'",
                seat.words_column(),
                seat.score_column()
            ),
            params![words.join(","), score, id],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        let record = self.game(id)?;
        self.hub.publish(&record);
        Ok(Some(record))
    }

    /// Transition a game to ended.
    ///
    /// Idempotent: only the first caller performs the transition and gets
    /// the record back; later calls (and calls racing from the other
    /// client) get None. Callers award XP only when they performed the
    /// transition.
    pub fn end_game(&self, id: &str) -> Result<Option<GameRecord>, StorageError> {
        let changed = self.conn.execute(
            "UPDATE games SET status = 'ended', ended_at = ?1
             WHERE id = ?2 AND status != 'ended'",
            params![now_millis(), id],
        )?;
        if changed == 0 {
            // Distinguish "already ended" from "no such game".
            let _ = self.game(id)?;
            return Ok(None);
        }
        let record = self.game(id)?;
        self.hub.publish(&record);
        Ok(Some(record))
    }

    // Private helper methods

    fn initialize_schema(&self) -> Result<(), StorageError> {
        let current_version = self.get_schema_version()?;

        if current_version == 0 {
            self.create_schema_v1()?;
        } else if current_version > SCHEMA_VERSION {
            return Err(StorageError::FutureSchemaVersion {
                found: current_version,
                supported: SCHEMA_VERSION,
            });
        }
        Ok(())
    }

    fn get_schema_version(&self) -> Result<u32, StorageError> {
        let table_exists: bool = self.conn.query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='meta'",
            [],
            |row| row.get(0),
        )?;
        if !table_exists {
            return Ok(0);
        }
        let version: u32 = self
            .conn
            .query_row("SELECT schema_version FROM meta LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);
        Ok(version)
    }

    fn create_schema_v1(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            r#"
            -- Meta table: stores the installation identity and schema version
            CREATE TABLE meta (
                schema_version INTEGER NOT NULL,
                user_id TEXT NOT NULL,
                username TEXT,
                created_at INTEGER NOT NULL
            );

            -- Profile ledger: per-user progression
            CREATE TABLE profiles (
                user_id TEXT PRIMARY KEY,
                username TEXT NOT NULL,
                xp INTEGER NOT NULL DEFAULT 0,
                level INTEGER NOT NULL DEFAULT 1,
                elo INTEGER NOT NULL DEFAULT 1000,
                profile_views INTEGER NOT NULL DEFAULT 0
            );

            -- Game rows: one per match, mutable field groups split by seat
            CREATE TABLE games (
                id TEXT PRIMARY KEY,
                player1_id TEXT NOT NULL,
                player2_id TEXT,
                status TEXT NOT NULL,
                grid TEXT NOT NULL,
                words TEXT NOT NULL,
                difficulty TEXT NOT NULL,
                game_type TEXT NOT NULL,
                player1_color TEXT,
                player2_color TEXT,
                player1_score INTEGER NOT NULL DEFAULT 0,
                player2_score INTEGER NOT NULL DEFAULT 0,
                player1_words_found TEXT NOT NULL DEFAULT '',
                player2_words_found TEXT NOT NULL DEFAULT '',
                started_at INTEGER,
                ended_at INTEGER,
                created_at INTEGER NOT NULL
            );

            -- Matchmaking scans waiting rows by difficulty
            CREATE INDEX idx_games_matchmaking ON games (status, difficulty, created_at);
            "#,
        )?;

        use rand::Rng;
        let user_id = format!("user-{:016x}", rand::rng().random::<u64>());
        self.conn.execute(
            "INSERT INTO meta (schema_version, user_id, username, created_at)
             VALUES (?1, ?2, NULL, ?3)",
            params![SCHEMA_VERSION, user_id, now_millis()],
        )?;
        Ok(())
    }
}

fn map_game_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<GameRow> {
    Ok(GameRow {
        id: row.get(0)?,
        player1_id: row.get(1)?,
        player2_id: row.get(2)?,
        status: row.get(3)?,
        grid: row.get(4)?,
        words: row.get(5)?,
        difficulty: row.get(6)?,
        game_type: row.get(7)?,
        player1_color: row.get(8)?,
        player2_color: row.get(9)?,
        player1_score: row.get(10)?,
        player2_score: row.get(11)?,
        player1_words_found: row.get(12)?,
        player2_words_found: row.get(13)?,
        started_at: row.get(14)?,
        ended_at: row.get(15)?,
    })
}

fn parse_game_row(row: GameRow) -> Result<GameRecord, StorageError> {
    let malformed = |field: &'static str| StorageError::MalformedRecord {
        id: row.id.clone(),
        field,
    };
    let status = GameStatus::parse(&row.status).ok_or_else(|| malformed("status"))?;
    let difficulty = Difficulty::parse(&row.difficulty).ok_or_else(|| malformed("difficulty"))?;
    let game_type = GameType::parse(&row.game_type).ok_or_else(|| malformed("game_type"))?;
    let grid = Grid::from_text(&row.grid).ok_or_else(|| malformed("grid"))?;
    let player1_color = match &row.player1_color {
        Some(s) => Some(PlayerColor::parse(s).ok_or_else(|| malformed("player1_color"))?),
        None => None,
    };
    let player2_color = match &row.player2_color {
        Some(s) => Some(PlayerColor::parse(s).ok_or_else(|| malformed("player2_color"))?),
        None => None,
    };

    Ok(GameRecord {
        player1_id: row.player1_id,
        player2_id: row.player2_id,
        status,
        grid,
        words: split_words(&row.words),
        difficulty,
        game_type,
        player1_color,
        player2_color,
        player1_score: row.player1_score,
        player2_score: row.player2_score,
        player1_words_found: split_words(&row.player1_words_found),
        player2_words_found: split_words(&row.player2_words_found),
        started_at: row.started_at,
        ended_at: row.ended_at,
        id: row.id,
    })
}

fn split_words(s: &str) -> Vec<String> {
    if s.is_empty() {
        Vec::new()
    } else {
        s.split(',').map(str::to_string).collect()
    }
}

fn now_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

//! Application screen state management
//!
//! Handles transitions between screens:
//! - Main menu (with display-name editing)
//! - CPU difficulty select
//! - Pre-match countdowns (cancellable, no side effects until they expire)
//! - Playing (CPU or online)
//! - Online matchmaking wait
//! - Profile & ranks
//! - Error display

use crate::app::state::{CpuDuel, OnlineDuel};
use crate::game::{Difficulty, CPU_COUNTDOWN_SECS, ONLINE_COUNTDOWN_SECS};
use crate::matchmaking;
use crate::session::OnlineSession;
use crate::stats::{self, LevelInfo};
use crate::storage::{GameStatus, Profile, Storage, StorageError};

/// Menu option on the main screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    PlayCpu,
    PlayOnline,
    ProfileRanks,
    Quit,
}

impl MenuOption {
    /// All menu options in order
    pub fn all() -> &'static [MenuOption] {
        &[
            MenuOption::PlayCpu,
            MenuOption::PlayOnline,
            MenuOption::ProfileRanks,
            MenuOption::Quit,
        ]
    }

    /// Display label for this option
    pub fn label(&self) -> &'static str {
        match self {
            MenuOption::PlayCpu => "Play vs CPU",
            MenuOption::PlayOnline => "Play Online",
            MenuOption::ProfileRanks => "Profile & Ranks",
            MenuOption::Quit => "Quit",
        }
    }
}

/// Profile screen data, computed once on entry.
pub struct ProfileView {
    pub profile: Profile,
    pub level: LevelInfo,
    pub elo_rank: String,
    pub percentile_rank: String,
    /// All profiles, highest XP first.
    pub leaderboard: Vec<Profile>,
}

/// The current application screen
pub enum Screen {
    /// Main menu
    Menu {
        selected: usize,
        name_input: String,
        editing_name: bool,
    },
    /// Choosing a CPU difficulty
    CpuSetup { selected: usize },
    /// Countdown into a CPU duel
    CpuCountdown {
        difficulty: Difficulty,
        remaining: u32,
    },
    /// Playing against the CPU
    Playing { duel: CpuDuel },
    /// Waiting for an online opponent to take the second seat
    OnlineWaiting { session: OnlineSession },
    /// Countdown into an online duel
    OnlineCountdown {
        session: Option<OnlineSession>,
        remaining: u32,
    },
    /// Playing online
    PlayingOnline { duel: OnlineDuel },
    /// Profile, ranks and leaderboard
    ProfileRanks { view: ProfileView },
    /// Error message display
    Error { message: String },
}

/// Main application coordinator
pub struct Coordinator {
    /// Current screen
    pub screen: Screen,
    /// Whether the application should quit
    pub should_quit: bool,
    user_id: String,
    username: String,
}

impl Coordinator {
    /// Load the local identity and start at the menu.
    pub fn new(storage: &Storage) -> Result<Self, StorageError> {
        let user_id = storage.user_id()?;
        let username = match storage.username()? {
            Some(name) => name,
            None => {
                let default = std::env::var("USER")
                    .unwrap_or_else(|_| "Player".to_string())
                    .chars()
                    .take(12)
                    .collect::<String>();
                storage.set_username(&default)?;
                default
            }
        };
        storage.ensure_profile(&user_id, &username)?;

        Ok(Self {
            screen: Screen::Menu {
                selected: 0,
                name_input: username.clone(),
                editing_name: false,
            },
            should_quit: false,
            user_id,
            username,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Arrow up
    pub fn move_up(&mut self) {
        match &mut self.screen {
            Screen::Menu {
                selected,
                editing_name,
                ..
            } => {
                if !*editing_name && *selected > 0 {
                    *selected -= 1;
                }
            }
            Screen::CpuSetup { selected } => {
                if *selected > 0 {
                    *selected -= 1;
                }
            }
            Screen::Playing { duel } => duel.move_cursor(-1, 0),
            Screen::PlayingOnline { duel } => duel.move_cursor(-1, 0),
            _ => {}
        }
    }

    /// Arrow down
    pub fn move_down(&mut self) {
        match &mut self.screen {
            Screen::Menu {
                selected,
                editing_name,
                ..
            } => {
                if !*editing_name && *selected < MenuOption::all().len() - 1 {
                    *selected += 1;
                }
            }
            Screen::CpuSetup { selected } => {
                if *selected < Difficulty::all().len() - 1 {
                    *selected += 1;
                }
            }
            Screen::Playing { duel } => duel.move_cursor(1, 0),
            Screen::PlayingOnline { duel } => duel.move_cursor(1, 0),
            _ => {}
        }
    }

    /// Arrow left
    pub fn move_left(&mut self) {
        match &mut self.screen {
            Screen::Playing { duel } => duel.move_cursor(0, -1),
            Screen::PlayingOnline { duel } => duel.move_cursor(0, -1),
            _ => {}
        }
    }

    /// Arrow right
    pub fn move_right(&mut self) {
        match &mut self.screen {
            Screen::Playing { duel } => duel.move_cursor(0, 1),
            Screen::PlayingOnline { duel } => duel.move_cursor(0, 1),
            _ => {}
        }
    }

    /// Space: anchor or lift the selection while playing.
    pub fn space(&mut self) {
        match &mut self.screen {
            Screen::Playing { duel } => duel.toggle_anchor(),
            Screen::PlayingOnline { duel } => duel.toggle_anchor(),
            _ => {}
        }
    }

    /// Tab: toggle display-name editing on the menu.
    pub fn tab(&mut self, storage: &Storage) {
        let new_name = match &mut self.screen {
            Screen::Menu {
                name_input,
                editing_name,
                ..
            } => {
                let committed = if *editing_name {
                    if name_input.is_empty() {
                        None
                    } else {
                        Some(name_input.clone())
                    }
                } else {
                    None
                };
                *editing_name = !*editing_name;
                committed
            }
            _ => return,
        };

        if let Some(name) = new_name {
            if name != self.username {
                self.username = name;
                // Persist quietly; the menu is not the place for errors.
                let _ = storage.set_username(&self.username);
                let _ = storage.create_profile(&self.user_id, &self.username);
            }
        } else if let Screen::Menu {
            name_input,
            editing_name: false,
            ..
        } = &mut self.screen
        {
            // Editing finished empty: restore the previous name.
            *name_input = self.username.clone();
        }
    }

    /// Character input (name editing only).
    pub fn on_char(&mut self, c: char) {
        if let Screen::Menu {
            name_input,
            editing_name: true,
            ..
        } = &mut self.screen
        {
            if name_input.len() < 12 {
                name_input.push(c);
            }
        }
    }

    /// Backspace (name editing only).
    pub fn on_backspace(&mut self) {
        if let Screen::Menu {
            name_input,
            editing_name: true,
            ..
        } = &mut self.screen
        {
            name_input.pop();
        }
    }

    /// Enter.
    pub fn select(&mut self, storage: &Storage) {
        // Transitions replace self.screen, so copy what they need out of
        // the current screen before acting.
        let menu_choice = match &self.screen {
            Screen::Menu {
                selected,
                editing_name: false,
                ..
            } => Some(MenuOption::all()[*selected]),
            _ => None,
        };
        if let Some(option) = menu_choice {
            self.menu_select(storage, option);
            return;
        }
        if matches!(
            &self.screen,
            Screen::Menu {
                editing_name: true,
                ..
            }
        ) {
            self.tab(storage);
            return;
        }

        let cpu_choice = match &self.screen {
            Screen::CpuSetup { selected } => Some(Difficulty::all()[*selected]),
            _ => None,
        };
        if let Some(difficulty) = cpu_choice {
            self.screen = Screen::CpuCountdown {
                difficulty,
                remaining: CPU_COUNTDOWN_SECS,
            };
            return;
        }

        let leave = match &self.screen {
            Screen::Playing { duel } => duel.report.is_some(),
            Screen::PlayingOnline { duel } => duel.report.is_some(),
            Screen::ProfileRanks { .. } | Screen::Error { .. } => true,
            _ => false,
        };
        if leave {
            self.go_to_menu();
            return;
        }

        match &mut self.screen {
            Screen::Playing { duel } => duel.submit(),
            Screen::PlayingOnline { duel } => duel.submit(storage),
            _ => {}
        }
    }

    /// Esc: back out (or quit from the menu). Cancelling a countdown or a
    /// matchmaking wait has no side effects beyond leaving the screen.
    pub fn back(&mut self) {
        match &self.screen {
            Screen::Menu { .. } => self.should_quit = true,
            _ => self.go_to_menu(),
        }
    }

    /// One-second tick. Drives countdowns, matchmaking polls and duels.
    pub fn tick(&mut self, storage: &Storage) {
        // In-place updates first.
        match &mut self.screen {
            Screen::CpuCountdown { remaining, .. } | Screen::OnlineCountdown { remaining, .. } => {
                *remaining = remaining.saturating_sub(1);
            }
            Screen::OnlineWaiting { session } => session.pump(storage),
            Screen::Playing { duel } => duel.tick(storage, &self.user_id, &self.username),
            Screen::PlayingOnline { duel } => duel.tick(storage),
            _ => {}
        }

        // Then transitions out of expired screens.
        let cpu_start = match &self.screen {
            Screen::CpuCountdown {
                difficulty,
                remaining: 0,
            } => Some(*difficulty),
            _ => None,
        };
        if let Some(difficulty) = cpu_start {
            self.screen = Screen::Playing {
                duel: CpuDuel::new(difficulty),
            };
            return;
        }

        let opponent_joined = matches!(
            &self.screen,
            Screen::OnlineWaiting { session } if session.game().status == GameStatus::Active
        );
        if opponent_joined {
            self.start_online_countdown();
            return;
        }

        if matches!(&self.screen, Screen::OnlineCountdown { remaining: 0, .. }) {
            self.start_online_duel();
        }
    }

    /// Go back to the main menu
    pub fn go_to_menu(&mut self) {
        self.screen = Screen::Menu {
            selected: 0,
            name_input: self.username.clone(),
            editing_name: false,
        };
    }

    fn menu_select(&mut self, storage: &Storage, option: MenuOption) {
        match option {
            MenuOption::PlayCpu => {
                self.screen = Screen::CpuSetup { selected: 1 };
            }
            MenuOption::PlayOnline => match self.start_matchmaking(storage) {
                Ok(screen) => self.screen = screen,
                Err(e) => {
                    self.screen = Screen::Error {
                        message: format!("Matchmaking failed: {}", e),
                    }
                }
            },
            MenuOption::ProfileRanks => match self.build_profile_view(storage) {
                Ok(view) => self.screen = Screen::ProfileRanks { view },
                Err(e) => {
                    self.screen = Screen::Error {
                        message: format!("Could not load profile: {}", e),
                    }
                }
            },
            MenuOption::Quit => self.should_quit = true,
        }
    }

    // Online matches queue at medium; difficulty only shapes CPU play.
    fn start_matchmaking(&self, storage: &Storage) -> Result<Screen, StorageError> {
        storage.ensure_profile(&self.user_id, &self.username)?;
        let ticket = matchmaking::find_or_create(storage, &self.user_id, Difficulty::Medium)?;
        let waiting = ticket.is_waiting();
        let session = OnlineSession::new(storage, &self.user_id, ticket);
        if waiting {
            Ok(Screen::OnlineWaiting { session })
        } else {
            Ok(Screen::OnlineCountdown {
                session: Some(session),
                remaining: ONLINE_COUNTDOWN_SECS,
            })
        }
    }

    fn start_online_countdown(&mut self) {
        let screen = std::mem::replace(&mut self.screen, placeholder());
        self.screen = match screen {
            Screen::OnlineWaiting { session } => Screen::OnlineCountdown {
                session: Some(session),
                remaining: ONLINE_COUNTDOWN_SECS,
            },
            other => other,
        };
    }

    fn start_online_duel(&mut self) {
        let screen = std::mem::replace(&mut self.screen, placeholder());
        self.screen = match screen {
            Screen::OnlineCountdown {
                session: Some(session),
                ..
            } => Screen::PlayingOnline {
                duel: OnlineDuel::new(session),
            },
            other => other,
        };
    }

    fn build_profile_view(&self, storage: &Storage) -> Result<ProfileView, StorageError> {
        storage.ensure_profile(&self.user_id, &self.username)?;
        storage.increment_views(&self.user_id)?;
        let profile = storage.profile(&self.user_id)?;

        let leaderboard = storage.all_profiles()?;

        // Percentile standing comes from Elo, not XP.
        let mut by_elo: Vec<&Profile> = leaderboard.iter().collect();
        by_elo.sort_by(|a, b| b.elo.cmp(&a.elo));
        let position = by_elo
            .iter()
            .position(|p| p.user_id == profile.user_id)
            .unwrap_or(0);
        let percentile = stats::percentile_of(position, by_elo.len());

        Ok(ProfileView {
            level: stats::level_info(profile.xp),
            elo_rank: stats::elo_rank(profile.elo),
            percentile_rank: stats::percentile_rank(percentile),
            leaderboard,
            profile,
        })
    }
}

fn placeholder() -> Screen {
    Screen::Menu {
        selected: 0,
        name_input: String::new(),
        editing_name: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinator(storage: &Storage) -> Coordinator {
        Coordinator::new(storage).expect("coordinator")
    }

    #[test]
    fn test_menu_navigation_clamps_at_the_edges() {
        let storage = Storage::open_in_memory().expect("db");
        let mut coord = coordinator(&storage);

        coord.move_up();
        assert!(matches!(coord.screen, Screen::Menu { selected: 0, .. }));
        for _ in 0..10 {
            coord.move_down();
        }
        let last = MenuOption::all().len() - 1;
        assert!(matches!(coord.screen, Screen::Menu { selected, .. } if selected == last));
    }

    #[test]
    fn test_cpu_flow_counts_down_into_a_duel() {
        let storage = Storage::open_in_memory().expect("db");
        let mut coord = coordinator(&storage);

        coord.select(&storage); // Play vs CPU
        assert!(matches!(coord.screen, Screen::CpuSetup { selected: 1 }));
        coord.move_down();
        coord.select(&storage); // Hard
        assert!(matches!(
            coord.screen,
            Screen::CpuCountdown {
                difficulty: Difficulty::Hard,
                remaining
            } if remaining == CPU_COUNTDOWN_SECS
        ));

        for _ in 0..CPU_COUNTDOWN_SECS {
            coord.tick(&storage);
        }
        assert!(matches!(coord.screen, Screen::Playing { .. }));
    }

    #[test]
    fn test_countdown_is_cancellable_without_side_effects() {
        let storage = Storage::open_in_memory().expect("db");
        let mut coord = coordinator(&storage);

        coord.select(&storage);
        coord.select(&storage);
        coord.tick(&storage);
        coord.back();
        assert!(matches!(coord.screen, Screen::Menu { .. }));
        assert!(!coord.should_quit);
    }

    #[test]
    fn test_name_editing_persists_on_commit() {
        let storage = Storage::open_in_memory().expect("db");
        let mut coord = coordinator(&storage);

        coord.tab(&storage);
        for _ in 0..20 {
            coord.on_backspace();
        }
        for c in "Ada".chars() {
            coord.on_char(c);
        }
        coord.tab(&storage);

        assert_eq!(coord.username(), "Ada");
        assert_eq!(storage.username().expect("username"), Some("Ada".to_string()));
    }

    #[test]
    fn test_first_online_seeker_waits_for_an_opponent() {
        let storage = Storage::open_in_memory().expect("db");
        let mut coord = coordinator(&storage);

        // Play Online
        coord.move_down();
        coord.select(&storage);
        assert!(matches!(coord.screen, Screen::OnlineWaiting { .. }));
    }

    #[test]
    fn test_waiting_seeker_advances_once_the_seat_fills() {
        let storage = Storage::open_in_memory().expect("db");
        let mut coord = coordinator(&storage);

        coord.move_down();
        coord.select(&storage);
        let game_id = match &coord.screen {
            Screen::OnlineWaiting { session } => session.game().id.clone(),
            _ => panic!("expected waiting screen"),
        };

        // A second client takes the seat.
        storage.ensure_profile("rival", "Rival").expect("profile");
        matchmaking::find_or_create(&storage, "rival", Difficulty::Medium).expect("join");

        coord.tick(&storage);
        assert!(matches!(
            coord.screen,
            Screen::OnlineCountdown { remaining, .. } if remaining == ONLINE_COUNTDOWN_SECS
        ));

        for _ in 0..ONLINE_COUNTDOWN_SECS {
            coord.tick(&storage);
        }
        match &coord.screen {
            Screen::PlayingOnline { duel } => assert_eq!(duel.session.game().id, game_id),
            _ => panic!("expected online duel"),
        }
    }

    #[test]
    fn test_profile_screen_counts_the_view() {
        let storage = Storage::open_in_memory().expect("db");
        let mut coord = coordinator(&storage);

        coord.move_down();
        coord.move_down();
        coord.select(&storage); // Profile & Ranks
        match &coord.screen {
            Screen::ProfileRanks { view } => {
                assert_eq!(view.profile.profile_views, 1);
                assert_eq!(view.level.level, 1);
                assert_eq!(view.elo_rank, "Platinum III");
                assert_eq!(view.percentile_rank, "Diamond I");
                assert_eq!(view.leaderboard.len(), 1);
            }
            _ => panic!("expected profile screen"),
        }
    }

    #[test]
    fn test_esc_on_menu_quits() {
        let storage = Storage::open_in_memory().expect("db");
        let mut coord = coordinator(&storage);
        coord.back();
        assert!(coord.should_quit);
    }
}

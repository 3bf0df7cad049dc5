//! Application state and screen flow

pub mod screen;
pub mod state;

pub use screen::{Coordinator, MenuOption, ProfileView, Screen};
pub use state::{CpuDuel, DuelView, OnlineDuel, SelectionCursor};

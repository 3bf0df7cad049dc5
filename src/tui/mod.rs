//! Terminal UI components using ratatui

mod terminal;
pub mod ui;

pub use terminal::Tui;
pub use ui::render;

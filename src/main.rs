//! GRIDLOCK - head-to-head word-search duels in the terminal
//!
//! Trace words on a shared board faster than your rival, scripted or human.

mod app;
mod game;
mod matchmaking;
mod session;
mod stats;
mod storage;
mod tui;

use app::Coordinator;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use std::time::{Duration, Instant};
use storage::Storage;
use tui::Tui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let storage = Storage::open()?;
    let mut coordinator = Coordinator::new(&storage)?;

    let mut terminal = Tui::new()?;
    terminal.enter()?;

    // Main event loop
    let tick_rate = Duration::from_secs(1);
    let mut last_tick = Instant::now();

    loop {
        // Render
        terminal.draw(|frame| tui::render(frame, &coordinator))?;

        // Calculate timeout for next tick
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        // Poll for events with timeout
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Esc => coordinator.back(),
                        KeyCode::Enter => coordinator.select(&storage),
                        KeyCode::Up => coordinator.move_up(),
                        KeyCode::Down => coordinator.move_down(),
                        KeyCode::Left => coordinator.move_left(),
                        KeyCode::Right => coordinator.move_right(),
                        KeyCode::Tab => coordinator.tab(&storage),
                        KeyCode::Backspace => coordinator.on_backspace(),
                        KeyCode::Char(' ') => coordinator.space(),
                        KeyCode::Char(c) => {
                            if c.is_ascii_alphanumeric() {
                                coordinator.on_char(c);
                            }
                        }
                        _ => {}
                    }
                }
            }
        }

        // Handle timer tick
        if last_tick.elapsed() >= tick_rate {
            coordinator.tick(&storage);
            last_tick = Instant::now();
        }

        // Check for quit
        if coordinator.should_quit {
            break;
        }
    }

    // Terminal cleanup happens automatically via Tui::drop
    Ok(())
}

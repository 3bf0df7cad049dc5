#![allow(dead_code)]
//! UI rendering using ratatui
//!
//! Supports multiple screens:
//! - Menu: main menu with display-name editing
//! - CpuSetup: CPU difficulty select with opponent cards
//! - Countdowns: pre-match countdowns (CPU and online)
//! - Playing: the duel board, both modes
//! - OnlineWaiting: matchmaking wait
//! - ProfileRanks: profile, level progress, ranks and leaderboard
//! - Error: error message display

use crate::app::state::DuelView;
use crate::app::{Coordinator, MenuOption, ProfileView, Screen};
use crate::game::cpu::{self, CpuProfile};
use crate::game::Difficulty;
use crate::stats;
use crate::storage::PlayerColor;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph},
};

/// Render the appropriate screen based on app state
pub fn render(frame: &mut Frame, coordinator: &Coordinator) {
    match &coordinator.screen {
        Screen::Menu {
            selected,
            name_input,
            editing_name,
        } => render_menu(frame, *selected, coordinator.username(), name_input, *editing_name),
        Screen::CpuSetup { selected } => render_cpu_setup(frame, *selected),
        Screen::CpuCountdown {
            difficulty,
            remaining,
        } => render_cpu_countdown(frame, *difficulty, *remaining),
        Screen::Playing { duel } => render_duel(frame, &duel.view()),
        Screen::OnlineWaiting { .. } => render_online_waiting(frame),
        Screen::OnlineCountdown { remaining, .. } => render_online_countdown(frame, *remaining),
        Screen::PlayingOnline { duel } => render_duel(frame, &duel.view("Opponent")),
        Screen::ProfileRanks { view } => render_profile(frame, view),
        Screen::Error { message } => render_error(frame, message),
    }
}

/// Render the main menu
fn render_menu(
    frame: &mut Frame,
    selected: usize,
    username: &str,
    name_input: &str,
    editing_name: bool,
) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Logo
            Constraint::Length(3), // Name input
            Constraint::Length(1), // Spacer
            Constraint::Min(6),    // Menu options
            Constraint::Length(2), // Footer
        ])
        .margin(2)
        .split(area);

    let logo = r#"
  ___ ___ ___ ___  _    ___   ___ _  __
 / __| _ \_ _|   \| |  / _ \ / __| |/ /
| (_ |   /| || |) | |_| (_) | (__| ' <
 \___|_|_\___|___/|____\___/ \___|_|\_\
"#;
    let logo_widget = Paragraph::new(logo)
        .style(Style::default().fg(Color::Yellow).bold())
        .alignment(Alignment::Center);
    frame.render_widget(logo_widget, layout[0]);

    let name_display = if editing_name {
        format!("Name: [{}]_", name_input)
    } else {
        format!("Name: {} (Tab to edit)", username)
    };
    let name_style = if editing_name {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let name_widget = Paragraph::new(name_display)
        .style(name_style)
        .alignment(Alignment::Center);
    frame.render_widget(name_widget, layout[1]);

    let items: Vec<ListItem> = MenuOption::all()
        .iter()
        .enumerate()
        .map(|(i, opt)| {
            let style = if i == selected {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::White)
            };
            let prefix = if i == selected { "> " } else { "  " };
            ListItem::new(format!("{}{}", prefix, opt.label())).style(style)
        })
        .collect();
    let menu = List::new(items).block(Block::default());
    frame.render_widget(menu, layout[3]);

    let footer = Paragraph::new("↑↓ Navigate  Enter Select  Esc Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, layout[4]);
}

/// Render the CPU difficulty select with opponent cards
fn render_cpu_setup(frame: &mut Frame, selected: usize) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(9),    // Difficulty cards
            Constraint::Length(2), // Footer
        ])
        .margin(2)
        .split(area);

    let header = Paragraph::new("Choose your opponent")
        .style(Style::default().fg(Color::Cyan).bold())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, layout[0]);

    let items: Vec<ListItem> = Difficulty::all()
        .iter()
        .enumerate()
        .map(|(i, difficulty)| {
            let profile: &CpuProfile = cpu::profile(*difficulty);
            let line = format!(
                "{} {:<8} {:<10} {}s/word  {}",
                if i == selected { ">" } else { " " },
                difficulty.label(),
                profile.name,
                profile.reveal_interval_secs,
                profile.flavor,
            );
            let style = if i == selected {
                Style::default().fg(difficulty_color(*difficulty)).bold()
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(line).style(style)
        })
        .collect();
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Difficulty"));
    frame.render_widget(list, layout[1]);

    let footer = Paragraph::new("↑↓ Navigate  Enter Play  Esc Back")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, layout[2]);
}

/// Render the CPU pre-match countdown
fn render_cpu_countdown(frame: &mut Frame, difficulty: Difficulty, remaining: u32) {
    let profile = cpu::profile(difficulty);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Match Found!",
            Style::default().fg(Color::White).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            profile.name,
            Style::default().fg(difficulty_color(difficulty)).bold(),
        )),
        Line::from(format!("{} • {}", difficulty.label(), profile.skill)),
        Line::from(format!("{}s per word", profile.reveal_interval_secs)),
        Line::from(Span::styled(
            profile.flavor,
            Style::default().fg(Color::DarkGray).italic(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}", remaining),
            Style::default().fg(Color::Magenta).bold(),
        )),
        Line::from(Span::styled(
            "Starting in...",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    render_centered_card(frame, "Versus", lines);
}

/// Render the matchmaking wait
fn render_online_waiting(frame: &mut Frame) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Waiting for an opponent to join...",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Esc to cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    render_centered_card(frame, "Online Match", lines);
}

/// Render the online pre-match countdown
fn render_online_countdown(frame: &mut Frame, remaining: u32) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Opponent found!",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}", remaining),
            Style::default().fg(Color::Magenta).bold(),
        )),
        Line::from(Span::styled(
            "Starting in...",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    render_centered_card(frame, "Online Match", lines);
}

/// Render a duel: board, word bar, both player panels, summary overlay.
fn render_duel(frame: &mut Frame, view: &DuelView) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Timer + feedback
            Constraint::Length(4), // Word bar
            Constraint::Min(14),   // Panels + board
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_duel_header(frame, layout[0], view);
    render_word_bar(frame, layout[1], view);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(22),
            Constraint::Min(28),
            Constraint::Length(22),
        ])
        .split(layout[2]);

    render_player_panel(
        frame,
        columns[0],
        view.my_label,
        view.my_score,
        view.my_words,
        side_color(view.my_color, Color::Blue),
    );
    render_board(frame, columns[1], view);
    render_player_panel(
        frame,
        columns[2],
        view.opp_label,
        view.opp_score,
        view.opp_words,
        side_color(view.opp_color, Color::Red),
    );

    let footer = Paragraph::new("Arrows Move  Space Anchor  Enter Submit  Esc Leave")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, layout[3]);

    if let Some(report) = view.report {
        render_summary(frame, view, report);
    }
}

fn render_duel_header(frame: &mut Frame, area: Rect, view: &DuelView) {
    let minutes = view.time_remaining / 60;
    let seconds = view.time_remaining % 60;
    let timer_color = if view.time_remaining <= 30 {
        Color::Red
    } else {
        Color::Green
    };
    let header = Line::from(vec![
        Span::styled(
            format!(" {}:{:02} ", minutes, seconds),
            Style::default().fg(timer_color).bold(),
        ),
        Span::raw("  "),
        Span::styled(view.feedback, Style::default().fg(Color::Cyan)),
    ]);
    let widget = Paragraph::new(header)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(widget, area);
}

// Word bar colors mirror the panels: mine blue, theirs red, both green.
fn render_word_bar(frame: &mut Frame, area: Rect, view: &DuelView) {
    let mut spans = Vec::with_capacity(view.words.len() * 2);
    for word in view.words {
        let mine = view.my_words.contains(word);
        let theirs = view.opp_words.contains(word);
        let style = match (mine, theirs) {
            (true, true) => Style::default().fg(Color::Green).bold(),
            (true, false) => Style::default().fg(side_color(view.my_color, Color::Blue)).bold(),
            (false, true) => Style::default().fg(side_color(view.opp_color, Color::Red)).bold(),
            (false, false) => Style::default().fg(Color::Gray),
        };
        spans.push(Span::styled(word.clone(), style));
        spans.push(Span::raw("  "));
    }
    let widget = Paragraph::new(Line::from(spans))
        .wrap(ratatui::widgets::Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(Block::default().title("Words to Find"));
    frame.render_widget(widget, area);
}

fn render_player_panel(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    score: u32,
    words: &[String],
    color: Color,
) {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{}", score),
            Style::default().fg(color).bold(),
        )),
        Line::from(""),
    ];
    for word in words {
        lines.push(Line::from(Span::styled(
            word.clone(),
            Style::default().fg(color),
        )));
    }
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(label.to_string()));
    frame.render_widget(widget, area);
}

fn render_board(frame: &mut Frame, area: Rect, view: &DuelView) {
    let mut lines = Vec::with_capacity(view.grid.size());
    for row in 0..view.grid.size() {
        let mut spans = Vec::with_capacity(view.grid.size());
        for col in 0..view.grid.size() {
            let cell = (row, col);
            let in_selection = view.selection.contains(&cell);
            let is_found = view
                .found_paths
                .values()
                .any(|path| path.contains(&cell));

            let mut style = if in_selection {
                Style::default().fg(Color::White).bg(Color::Blue)
            } else if is_found {
                Style::default().fg(Color::White).bg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };
            if cell == view.cursor {
                style = style.fg(Color::Yellow).bold().reversed();
            } else if Some(cell) == view.anchor {
                style = style.bold().underlined();
            }
            spans.push(Span::styled(format!("{} ", view.grid.get(row, col)), style));
        }
        lines.push(Line::from(spans));
    }
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Select letters"));
    frame.render_widget(widget, area);
}

// Post-match summary, drawn over the board.
fn render_summary(frame: &mut Frame, view: &DuelView, report: &crate::session::MatchReport) {
    let area = centered_rect(frame.area(), 46, 12);
    frame.render_widget(Clear, area);

    let level = stats::level_info(report.new_total_xp);
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Headline + scores
            Constraint::Length(2), // Progress gauge
            Constraint::Min(1),    // Footer hint
        ])
        .margin(1)
        .split(area);

    let outcome_color = match report.outcome {
        crate::game::outcome::Outcome::Win => Color::Green,
        crate::game::outcome::Outcome::Draw => Color::Yellow,
        crate::game::outcome::Outcome::Loss => Color::Red,
    };
    let lines = vec![
        Line::from(Span::styled(
            report.outcome.label(),
            Style::default().fg(outcome_color).bold(),
        )),
        Line::from(format!(
            "You {} – {} {}",
            view.my_score, view.opp_score, view.opp_label
        )),
        Line::from(format!("XP earned: +{}", report.xp_earned)),
        Line::from(format!("Level {}", level.level)),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Match Summary")
        .style(Style::default().bg(Color::Black));
    frame.render_widget(block, area);
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        layout[0],
    );

    let gauge_label = match level.xp_for_next {
        Some(next) => format!("{} / {} XP", level.xp_this_level, next),
        None => "MAX".to_string(),
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Blue))
        .ratio(level.progress.clamp(0.0, 1.0))
        .label(gauge_label);
    frame.render_widget(gauge, layout[1]);

    let hint = Paragraph::new("Enter Menu")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(hint, layout[2]);
}

/// Render the profile, rank and leaderboard screen
fn render_profile(frame: &mut Frame, view: &ProfileView) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Profile card
            Constraint::Length(2), // Level progress
            Constraint::Min(6),    // Leaderboard
            Constraint::Length(2), // Footer
        ])
        .margin(1)
        .split(area);

    let lines = vec![
        Line::from(Span::styled(
            view.profile.username.clone(),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(format!(
            "Level {}  •  {} XP  •  {} views",
            view.level.level, view.profile.xp, view.profile.profile_views
        )),
        Line::from(format!(
            "Elo {}  •  Rank {}",
            view.profile.elo, view.elo_rank
        )),
        Line::from(format!("Leaderboard standing: {}", view.percentile_rank)),
    ];
    let card = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Profile"));
    frame.render_widget(card, layout[0]);

    let gauge_label = match view.level.xp_for_next {
        Some(next) => format!("{} / {} XP", view.level.xp_this_level, next),
        None => "MAX".to_string(),
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Blue))
        .ratio(view.level.progress.clamp(0.0, 1.0))
        .label(gauge_label);
    frame.render_widget(gauge, layout[1]);

    let items: Vec<ListItem> = view
        .leaderboard
        .iter()
        .enumerate()
        .map(|(i, profile)| {
            let style = if profile.user_id == view.profile.user_id {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(format!(
                "{:>3}. {:<14} {:>6} XP  Lv {:<3} Elo {}",
                i + 1,
                profile.username,
                profile.xp,
                profile.level,
                profile.elo
            ))
            .style(style)
        })
        .collect();
    let list =
        List::new(items).block(Block::default().borders(Borders::ALL).title("Leaderboard"));
    frame.render_widget(list, layout[2]);

    let footer = Paragraph::new("Enter/Esc Back")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, layout[3]);
}

/// Render an error screen
fn render_error(frame: &mut Frame, message: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Enter/Esc Back",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    render_centered_card(frame, "Error", lines);
}

fn render_centered_card(frame: &mut Frame, title: &str, lines: Vec<Line>) {
    let area = centered_rect(frame.area(), 50, lines.len() as u16 + 4);
    let card = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    frame.render_widget(card, area);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn side_color(color: Option<PlayerColor>, fallback: Color) -> Color {
    match color {
        Some(PlayerColor::Red) => Color::Red,
        Some(PlayerColor::Blue) => Color::Blue,
        None => fallback,
    }
}

fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => Color::Green,
        Difficulty::Medium => Color::Yellow,
        Difficulty::Hard => Color::Magenta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fits_inside_the_area() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = centered_rect(area, 46, 12);
        assert!(rect.x >= area.x && rect.right() <= area.right());
        assert!(rect.y >= area.y && rect.bottom() <= area.bottom());

        // Oversized requests clamp instead of overflowing.
        let rect = centered_rect(Rect::new(0, 0, 20, 5), 46, 12);
        assert_eq!(rect.width, 20);
        assert_eq!(rect.height, 5);
    }
}

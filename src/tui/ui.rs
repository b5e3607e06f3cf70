//! Stateless UI rendering.

use super::app::{App, Screen};
use crate::controller::{GameReport, GameStatus};
use crate::effects::CONFETTI;
use crate::settings::Theme;
use blossom_tictactoe::{Board, Player, Square};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

const CELL_HEIGHT: u16 = 3;
const BOARD_HEIGHT: u16 = CELL_HEIGHT * 3 + 2;
const RESULT_PANEL_HEIGHT: u16 = 10;

/// Background of the cells on the winning line.
pub const WIN_HIGHLIGHT: Color = Color::Green;

/// Headline and blurb shown when a game ends.
pub fn result_text(status: GameStatus) -> (&'static str, &'static str) {
    match status {
        GameStatus::Won => (
            "Поздравляем!",
            "Вы великолепно сыграли! Вот ваш эксклюзивный подарок.",
        ),
        GameStatus::Lost => (
            "Увы!",
            "В этот раз удача на стороне компьютера. Попробуем еще раз?",
        ),
        _ => ("Ничья", "Силы оказались равны. Достойная игра!"),
    }
}

/// Width in columns of one board cell for `theme`.
///
/// Emoji glyphs take two terminal columns, so the grid is sized from the
/// widest mark plus a margin of two on each side.
pub fn cell_width(theme: Theme) -> u16 {
    let widest = [theme.glyph(Player::X), theme.glyph(Player::O), "9"]
        .iter()
        .map(|s| s.width())
        .max()
        .unwrap_or(1);
    widest as u16 + 4
}

/// Draws the whole screen.
pub fn draw<E, R>(frame: &mut Frame, app: &App<E, R>) {
    let panel_height = match app.screen() {
        Screen::Playing => 3,
        Screen::Result(_) => RESULT_PANEL_HEIGHT,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(BOARD_HEIGHT),
            Constraint::Length(panel_height),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let title = Paragraph::new(format!(
        "Крестики-Нолики · {}",
        app.controller().difficulty()
    ))
    .style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    draw_board(frame, chunks[1], app);

    match app.screen() {
        Screen::Playing => {
            let status = Paragraph::new(app.status_message())
                .style(Style::default().fg(Color::Yellow))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Статус"));
            frame.render_widget(status, chunks[2]);
        }
        Screen::Result(report) => draw_result(frame, chunks[2], report, app.delivery()),
    }

    let help = match app.screen() {
        Screen::Playing => "1-9 или стрелки и Enter: ход | Q: выход",
        Screen::Result(report) if report.status() == GameStatus::Won => "Enter: выход",
        Screen::Result(_) => "Д: сыграть еще | Н: выход",
    };
    let help = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[3]);
}

fn draw_board<E, R>(frame: &mut Frame, area: Rect, app: &App<E, R>) {
    let width = cell_width(app.theme());
    let board_area = center_rect(area, width * 3 + 2, BOARD_HEIGHT);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(CELL_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(CELL_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(CELL_HEIGHT),
        ])
        .split(board_area);

    let marks = Marks {
        board: app.controller().board(),
        theme: app.theme(),
        highlight: app.controller().winning_line(),
        cursor: (*app.screen() == Screen::Playing && app.controller().is_human_turn())
            .then(|| app.cursor().to_index()),
    };

    for (i, start) in [0, 3, 6].into_iter().enumerate() {
        draw_row(frame, rows[i * 2], &marks, start, width);
        if i < 2 {
            draw_separator(frame, rows[i * 2 + 1]);
        }
    }
}

/// What a cell needs to know to draw itself.
struct Marks<'a> {
    board: &'a Board,
    theme: Theme,
    highlight: Option<[usize; 3]>,
    cursor: Option<usize>,
}

fn draw_row(frame: &mut Frame, area: Rect, marks: &Marks<'_>, start: usize, width: u16) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(width),
            Constraint::Length(1),
            Constraint::Length(width),
            Constraint::Length(1),
            Constraint::Length(width),
        ])
        .split(area);

    for i in 0..3 {
        draw_cell(frame, cols[i * 2], marks, start + i);
        if i < 2 {
            draw_separator_vertical(frame, cols[i * 2 + 1]);
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, marks: &Marks<'_>, pos: usize) {
    let (text, base_style) = match marks.board.squares()[pos] {
        Square::Empty => ((pos + 1).to_string(), Style::default().fg(Color::DarkGray)),
        Square::Occupied(player @ Player::X) => (
            marks.theme.glyph(player).to_string(),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Square::Occupied(player @ Player::O) => (
            marks.theme.glyph(player).to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
    };

    let style = if marks.highlight.is_some_and(|line| line.contains(&pos)) {
        base_style.bg(WIN_HIGHLIGHT).fg(Color::Black)
    } else if marks.cursor == Some(pos) {
        base_style.bg(Color::White).fg(Color::Black)
    } else {
        base_style
    };

    let paragraph = Paragraph::new(vec![Line::default(), Line::from(text)])
        .style(style)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_result(frame: &mut Frame, area: Rect, report: &GameReport, delivery: Option<&str>) {
    let (headline, blurb) = result_text(report.status());

    let mut lines = Vec::new();
    if report.status() == GameStatus::Won {
        lines.push(Line::from(Span::styled(
            CONFETTI,
            Style::default().fg(Color::Magenta),
        )));
    }
    lines.push(Line::from(blurb));
    if let Some(code) = report.promo_code() {
        lines.push(Line::from(vec![
            Span::raw("Ваш промокод: "),
            Span::styled(
                code.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
    }
    if let Some(delivery) = delivery {
        lines.push(Line::from(Span::styled(
            delivery.to_string(),
            Style::default().fg(Color::DarkGray),
        )));
    }
    if report.status() != GameStatus::Won {
        lines.push(Line::default());
        lines.push(Line::from("Попробовать снова? [д/н]"));
    }

    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(headline)
                .title_style(Style::default().add_modifier(Modifier::BOLD)),
        );
    frame.render_widget(panel, area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("─".repeat(area.width as usize))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new(vec![Line::from("│"); area.height as usize])
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1])[1]
}

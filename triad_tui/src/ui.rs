use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;
use triad::{Card, Direction, Owner, Phase, BOARD_SIZE};

use crate::app::App;

const CELL_WIDTH: u16 = 11;
const CELL_HEIGHT: u16 = 5;
const BOARD_WIDTH: u16 = CELL_WIDTH * BOARD_SIZE as u16;
const BOARD_HEIGHT: u16 = CELL_HEIGHT * BOARD_SIZE as u16;
const SIDE_PANEL_WIDTH: u16 = 34;

fn owner_color(owner: Owner) -> Color {
    match owner {
        Owner::Player => Color::Blue,
        Owner::Opponent => Color::Red,
    }
}

fn rounded_block<'a>(title: &'a str) -> Block<'a> {
    Block::new()
        .border_type(BorderType::Rounded)
        .borders(Borders::ALL)
        .title(title)
}

/// The card's sides laid out like a compass, for a board cell.
fn card_lines(card: &Card, owner: Owner) -> Vec<Line<'static>> {
    let side = |dir| card.side(dir).to_string();
    vec![
        Line::from(side(Direction::North)),
        Line::from(vec![
            Span::raw(side(Direction::West)),
            Span::raw("  "),
            Span::styled(
                if owner == Owner::Player { "P" } else { "O" },
                Style::new()
                    .fg(owner_color(owner))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::raw(side(Direction::East)),
        ]),
        Line::from(side(Direction::South)),
    ]
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App) {
    let board = app.game().state().board();
    let area = centered(area, BOARD_WIDTH, BOARD_HEIGHT);
    let rows = Layout::vertical([Constraint::Length(CELL_HEIGHT); BOARD_SIZE]).split(area);
    for (row, row_area) in rows.iter().enumerate() {
        let cols =
            Layout::horizontal([Constraint::Length(CELL_WIDTH); BOARD_SIZE]).split(*row_area);
        for (col, cell_area) in cols.iter().enumerate() {
            let cell = row * BOARD_SIZE + col;
            let mut block = Block::new()
                .border_type(BorderType::Rounded)
                .borders(Borders::ALL);
            let lines = match board.get(cell) {
                Some(slot) => {
                    block = block.border_style(Style::new().fg(owner_color(slot.owner)));
                    card_lines(&slot.card, slot.owner)
                }
                None => vec![
                    Line::from(""),
                    Line::styled(format!("{}", cell), Style::new().fg(Color::DarkGray)),
                ],
            };
            if cell == app.cursor {
                block = block
                    .border_type(BorderType::Double)
                    .border_style(Style::new().fg(Color::Yellow));
            }
            let paragraph = Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(paragraph, *cell_area);
        }
    }
}

fn draw_player_hand(frame: &mut Frame, area: Rect, app: &App) {
    let selected = match app.game().phase() {
        Phase::AwaitingPlayerPlacement { card_index } => Some(card_index),
        _ => None,
    };
    let lines: Vec<Line> = app
        .game()
        .state()
        .hand(Owner::Player)
        .iter()
        .enumerate()
        .map(|(i, card)| {
            let text = format!("{} {}", i + 1, card);
            if selected == Some(i) {
                Line::styled(
                    format!("▶{}", text),
                    Style::new()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Line::from(format!(" {}", text))
            }
        })
        .collect();
    frame.render_widget(
        Paragraph::new(lines).block(rounded_block(" Your hand ")),
        area,
    );
}

fn draw_opponent_hand(frame: &mut Frame, area: Rect, app: &App) {
    let hand = app.game().state().hand(Owner::Opponent);
    let mut lines: Vec<Line> = hand.iter().map(|_| Line::from(" 🂠  ???")).collect();
    if app.opponent_thinking() {
        lines.push(Line::from(""));
        lines.push(Line::styled(" thinking…", Style::new().fg(Color::DarkGray)));
    }
    frame.render_widget(
        Paragraph::new(lines).block(rounded_block(" AI hand ")),
        area,
    );
}

fn draw_status(frame: &mut Frame, area: Rect, app: &App) {
    let score = app.game().state().score();
    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("You {}", score.player),
            Style::new().fg(owner_color(Owner::Player)),
        ),
        Span::raw(" · "),
        Span::styled(
            format!("AI {}", score.opponent),
            Style::new().fg(owner_color(Owner::Opponent)),
        ),
        Span::raw("   "),
        Span::raw(app.game().status()),
    ])];
    if let Some(err) = &app.error {
        lines.push(Line::styled(err.clone(), Style::new().fg(Color::Red)));
    }
    frame.render_widget(Paragraph::new(lines).block(rounded_block(" Status ")), area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [_, middle, _] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(width),
        Constraint::Min(0),
    ])
    .areas(area);
    let [_, center, _] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(height),
        Constraint::Min(0),
    ])
    .areas(middle);
    center
}

pub fn draw(frame: &mut Frame, app: &App) {
    let [title, main, status, help] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(BOARD_HEIGHT),
        Constraint::Length(4),
        Constraint::Length(1),
    ])
    .areas(frame.size());
    let [player_hand, board, opponent_hand] = Layout::horizontal([
        Constraint::Length(SIDE_PANEL_WIDTH),
        Constraint::Min(BOARD_WIDTH),
        Constraint::Length(SIDE_PANEL_WIDTH / 2),
    ])
    .areas(main);

    frame.render_widget(
        Paragraph::new("Hero Triple Triad")
            .alignment(Alignment::Center)
            .style(Style::new().add_modifier(Modifier::BOLD)),
        title,
    );
    draw_player_hand(frame, player_hand, app);
    draw_board(frame, board, app);
    draw_opponent_hand(frame, opponent_hand, app);
    draw_status(frame, status, app);
    frame.render_widget(
        Paragraph::new("1-5/Tab select · arrows move · Enter place · n new match · q quit")
            .style(Style::new().fg(Color::DarkGray)),
        help,
    );
}

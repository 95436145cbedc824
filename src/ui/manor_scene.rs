//! Game screen: map, ledger panel, room offer and end screens.

use super::game_common::{
    category_color, centered_rect, create_game_layout, render_info_panel_frame,
    render_result_overlay, render_status_bar, GameResultType,
};
use super::manor_map::ManorMapWidget;
use crate::exploration::{Exploration, PendingChoice};
use crate::input::GameOverlay;
use crate::inventory::ResourceLedger;
use crate::rooms::RoomArchetype;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const INFO_PANEL_WIDTH: u16 = 26;
const OPTION_WIDTH: u16 = 22;
const OPTION_HEIGHT: u16 = 7;

pub fn render_game(frame: &mut Frame, session: &Exploration, overlay: GameOverlay, message: &str) {
    let area = frame.size();
    let layout = create_game_layout(frame, area, " Manor ", Color::Blue, INFO_PANEL_WIDTH);

    frame.render_widget(ManorMapWidget::new(session), layout.content);
    render_info_panel(frame, layout.info_panel, session);

    let status = if message.is_empty() {
        "Find the Antechamber."
    } else {
        message
    };
    let controls: &[(&str, &str)] = if session.is_over() {
        &[]
    } else if session.pending().is_some() {
        &[("[</>]", "Choose"), ("[Enter]", "Confirm"), ("[Esc]", "Cancel")]
    } else {
        &[
            ("[ZQSD]", "Move"),
            ("[Space]", "Open"),
            ("[Enter]", "Recenter"),
            ("[P]", "Pause"),
            ("[^S]", "Save"),
        ]
    };
    render_status_bar(frame, layout.status_bar, status, Color::White, controls);

    if let Some(pending) = session.pending() {
        render_choice(frame, layout.content, pending, session.ledger());
    }

    if session.is_won() {
        render_result_overlay(
            frame,
            layout.content,
            GameResultType::Win,
            "Victory!",
            summary_lines(session.ledger()),
            &[("[R]", "Play again"), ("[Esc]", "Menu")],
        );
    } else if session.is_exhausted() {
        render_result_overlay(
            frame,
            layout.content,
            GameResultType::Loss,
            "Out of steps",
            vec![Line::from("You collapse in the hallway.")],
            &[("[R]", "Try again"), ("[Esc]", "Menu")],
        );
    } else if overlay == GameOverlay::Paused {
        render_result_overlay(
            frame,
            layout.content,
            GameResultType::Paused,
            "Paused",
            Vec::new(),
            &[("[P]", "Resume")],
        );
    }
}

fn stat_line(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<7}", label), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(color)),
    ])
}

fn render_info_panel(frame: &mut Frame, area: Rect, session: &Exploration) {
    let inner = render_info_panel_frame(frame, area, " Ledger ");
    let ledger = session.ledger();

    let steps_color = if ledger.steps <= 10 {
        Color::Red
    } else {
        Color::White
    };
    let mut lines = vec![
        stat_line("Steps", ledger.steps.to_string(), steps_color),
        stat_line("Gems", ledger.gems.to_string(), Color::Magenta),
        stat_line("Keys", ledger.keys.to_string(), Color::Yellow),
        stat_line("Dice", ledger.dice.to_string(), Color::White),
        stat_line("Gold", ledger.gold.to_string(), Color::Yellow),
        Line::from(""),
        Line::from(Span::styled(
            "Tools",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];

    let tools = ledger.permanents.owned();
    if tools.is_empty() {
        lines.push(Line::from(Span::styled(
            "  none",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for tool in tools {
        lines.push(Line::from(format!("  {}", tool.name())));
    }

    lines.push(Line::from(""));
    if let Some(room) = session.current_room() {
        lines.push(Line::from(Span::styled(
            room.name.clone(),
            Style::default()
                .fg(category_color(room.color))
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            room.rarity_name(),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let grid = session.grid();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(
            "Explored {}/{}",
            grid.discovered_count(),
            grid.rows() * grid.cols()
        ),
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(Span::styled(
        format!("Rooms {}", grid.room_count()),
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Side-by-side cards for the offered rooms.
fn render_choice(frame: &mut Frame, area: Rect, pending: &PendingChoice, ledger: &ResourceLedger) {
    let count = pending.options.len() as u16;
    let modal = centered_rect(area, OPTION_WIDTH * count + 2, OPTION_HEIGHT + 2);
    frame.render_widget(Clear, modal);

    let block = Block::default()
        .title(" Choose a room ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, u32::from(count.max(1))); count as usize])
        .split(inner);

    for (index, (room, card)) in pending.options.iter().zip(cards.iter()).enumerate() {
        render_option(frame, *card, room, index == pending.highlighted, ledger);
    }
}

fn render_option(
    frame: &mut Frame,
    area: Rect,
    room: &RoomArchetype,
    highlighted: bool,
    ledger: &ResourceLedger,
) {
    let border = if highlighted {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let affordable = ledger.gems >= room.gem_cost;
    let cost = if room.is_free() {
        Span::styled("Free", Style::default().fg(Color::Green))
    } else {
        Span::styled(
            format!("{} gem(s)", room.gem_cost),
            Style::default().fg(if affordable { Color::Magenta } else { Color::Red }),
        )
    };

    let mut lines = vec![
        Line::from(Span::styled(
            room.name.clone(),
            Style::default()
                .fg(category_color(room.color))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            room.rarity_name(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(cost),
    ];
    if room.requires_key_to_enter() {
        let color = if ledger.keys > 0 {
            Color::Yellow
        } else {
            Color::Red
        };
        lines.push(Line::from(Span::styled(
            "Needs a key",
            Style::default().fg(color),
        )));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn summary_lines(ledger: &ResourceLedger) -> Vec<Line<'static>> {
    let tools: Vec<&str> = ledger.permanents.owned().iter().map(|t| t.name()).collect();
    let tools = if tools.is_empty() {
        "none".to_string()
    } else {
        tools.join(", ")
    };
    vec![
        Line::from(format!(
            "Steps {}  Gems {}  Keys {}",
            ledger.steps, ledger.gems, ledger.keys
        )),
        Line::from(format!("Gold {}  Dice {}", ledger.gold, ledger.dice)),
        Line::from(format!("Tools: {}", tools)),
    ]
}

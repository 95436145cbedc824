//! Title screen.

use super::game_common::{centered_rect, render_status_bar};
use crate::build_info;
use crate::input::{MainMenuState, MenuItem};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const TITLE: [&str; 3] = [
    "█▀▄▀█ ▄▀█ █▄ █ █▀█ █▀█",
    "█ ▀ █ █▀█ █ ▀█ █▄█ █▀▄",
    "",
];

pub fn render_main_menu(frame: &mut Frame, menu: &MainMenuState) {
    let area = frame.size();
    frame.render_widget(Clear, area);

    let panel = centered_rect(area, 48, 18);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let mut lines: Vec<Line> = TITLE
        .iter()
        .map(|row| {
            Line::from(Span::styled(
                *row,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ))
        })
        .collect();

    for (index, item) in MenuItem::ALL.iter().enumerate() {
        let line = if index == menu.selected {
            Line::from(Span::styled(
                format!("> {} <", item.label()),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(Span::styled(
                item.label().to_string(),
                Style::default().fg(Color::White),
            ))
        };
        lines.push(line);
    }

    lines.push(Line::from(""));
    match &menu.save_info {
        Some(info) => {
            lines.push(Line::from(Span::styled(
                format!("Saved {}", info.save_date),
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::from(Span::styled(
                format!(
                    "Steps {}  Gold {}  Gems {}",
                    info.steps, info.gold, info.gems
                ),
                Style::default().fg(Color::DarkGray),
            )));
        }
        None => lines.push(Line::from(Span::styled(
            "No saved game",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);

    let footer = Rect {
        y: area.y + area.height.saturating_sub(2),
        height: 2.min(area.height),
        ..area
    };
    render_status_bar(
        frame,
        footer,
        &build_info::version_line(),
        Color::DarkGray,
        &[("[Up/Down]", "Select"), ("[Enter]", "Confirm"), ("[Q]", "Quit")],
    );
}

//! Manor floor plan with fog over undiscovered cells.

use super::game_common::category_color;
use crate::exploration::Exploration;
use crate::grid::Position;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

/// Each cell is drawn as `[xx]`.
const CELL_WIDTH: u16 = 4;

mod symbols {
    pub const PLAYER: &str = "@@";
    pub const HIDDEN: &str = "  ";
    pub const EMPTY: &str = "  ";
    pub const REACHABLE: &str = "??";
}

pub struct ManorMapWidget<'a> {
    session: &'a Exploration,
    /// Cells next to the player
    reachable: Vec<Position>,
}

impl<'a> ManorMapWidget<'a> {
    pub fn new(session: &'a Exploration) -> Self {
        let reachable = session.grid().neighbors(session.player());
        Self { session, reachable }
    }

    /// Size needed to draw the whole grid.
    pub fn required_size(&self) -> (u16, u16) {
        let grid = self.session.grid();
        (grid.cols() as u16 * CELL_WIDTH, grid.rows() as u16)
    }

    fn cell_display(&self, pos: Position) -> (&'static str, Style) {
        let grid = self.session.grid();
        let player = self.session.player();

        if pos == player {
            return (
                symbols::PLAYER,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        }

        match (grid.get_room(pos), grid.is_discovered(pos)) {
            (Some(room), _) => (
                room.room_type.icon(),
                Style::default().fg(category_color(room.color)),
            ),
            (None, true) => (symbols::EMPTY, Style::default().fg(Color::DarkGray)),
            (None, false) if self.reachable.contains(&pos) => {
                (symbols::REACHABLE, Style::default().fg(Color::DarkGray))
            }
            (None, false) => (symbols::HIDDEN, Style::default()),
        }
    }
}

impl Widget for ManorMapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (width, height) = self.required_size();
        let x_offset = area.x + area.width.saturating_sub(width) / 2;
        let y_offset = area.y + area.height.saturating_sub(height) / 2;
        let cursor = self.session.cursor();
        let frame_style = Style::default().fg(Color::DarkGray);

        for ((row, col), _, _) in self.session.grid().cells() {
            let x = x_offset + col as u16 * CELL_WIDTH;
            let y = y_offset + row as u16;
            if x + CELL_WIDTH > area.x + area.width || y >= area.y + area.height {
                continue;
            }

            let (symbol, style) = self.cell_display((row, col));
            let (left, right, edge_style) = if (row, col) == cursor {
                ("<", ">", Style::default().fg(Color::White).bg(Color::DarkGray))
            } else {
                ("[", "]", frame_style)
            };
            buf.set_string(x, y, left, edge_style);
            buf.set_string(x + 1, y, symbol, style);
            buf.set_string(x + 3, y, right, edge_style);
        }
    }
}

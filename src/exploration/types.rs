//! Exploration session data structures.

use crate::core::GameConfig;
use crate::grid::{Grid, PlacementError, Position};
use crate::inventory::ResourceLedger;
use crate::rooms::{EffectKind, RoomArchetype, RoomType};
use thiserror::Error;

/// Cursor movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// (d_row, d_col) offset.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// One discrete input from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveCursor(Direction),
    /// Commit to the cell under the cursor
    Select,
    PreviousOption,
    NextOption,
    /// Take the highlighted room
    Confirm,
    /// Close the room offer
    Cancel,
    /// Snap the cursor back onto the player
    Recenter,
}

/// Which inputs the session currently accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingChoice,
}

/// Rooms offered for an undiscovered cell, alive until confirmed or cancelled.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingChoice {
    pub options: Vec<RoomArchetype>,
    pub target: Position,
    pub highlighted: usize,
}

impl PendingChoice {
    pub fn highlighted_room(&self) -> Option<&RoomArchetype> {
        self.options.get(self.highlighted)
    }
}

/// Refused inputs. The display text is shown to the player as-is; nothing
/// in the session changes when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("The destination must be adjacent to the player.")]
    NotAdjacent,
    #[error("You need a key to enter the {0}.")]
    KeyRequired(String),
    #[error("Not enough gems to choose the {name} ({cost} needed).")]
    NotEnoughGems { name: String, cost: u32 },
    #[error("Choose a room first, or cancel.")]
    ChoicePending,
    #[error("There is no room offer open.")]
    NoPendingChoice,
    #[error("No rooms are available here.")]
    NoRoomsAvailable,
    #[error("The game is over.")]
    GameOver,
    #[error("That room cannot be placed here.")]
    PlacementRefused(#[from] PlacementError),
}

/// Things that happened during one turn, for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplorationEvent {
    CursorMoved(Position),
    CursorRecentered(Position),
    ChoiceOffered { target: Position, options: usize },
    HighlightChanged(usize),
    ChoiceCancelled,
    KeyUsed,
    GemsSpent(u32),
    RoomPlaced { position: Position, room_type: RoomType },
    EnteredRoom {
        position: Position,
        room_type: Option<RoomType>,
        effect: Option<EffectKind>,
    },
    Won,
    Exhausted,
}

/// Result of an accepted command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub message: String,
    pub events: Vec<ExplorationEvent>,
}

impl Turn {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            events: Vec::new(),
        }
    }

    pub fn with_event(mut self, event: ExplorationEvent) -> Self {
        self.events.push(event);
        self
    }
}

/// A game in progress. Sole owner of the grid and the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Exploration {
    pub(super) grid: Grid,
    pub(super) ledger: ResourceLedger,
    pub(super) player: Position,
    pub(super) cursor: Position,
    pub(super) pending: Option<PendingChoice>,
    pub(super) won: bool,
    pub(super) exhausted: bool,
    pub(super) offer_size: usize,
    pub(super) step_cost: i32,
}

impl Exploration {
    /// Fresh game: player and cursor on the entrance.
    pub fn new(config: &GameConfig) -> Self {
        let grid = Grid::new(config.rows, config.cols);
        let ledger = ResourceLedger::new(config.starting_steps, config.starting_gems);
        let start = grid.start();
        Self::from_parts(grid, ledger, start, config)
    }

    /// Rebuilds a session from saved parts. The cursor starts on the player
    /// and the terminal flags are recomputed.
    pub fn from_parts(
        grid: Grid,
        ledger: ResourceLedger,
        player: Position,
        config: &GameConfig,
    ) -> Self {
        let player = if grid.in_bounds(player) {
            player
        } else {
            grid.start()
        };
        let mut session = Self {
            grid,
            ledger,
            player,
            cursor: player,
            pending: None,
            won: false,
            exhausted: false,
            offer_size: config.offer_size,
            step_cost: config.step_cost_per_move,
        };
        session.refresh_terminal_flags();
        session
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn ledger(&self) -> &ResourceLedger {
        &self.ledger
    }

    pub fn player(&self) -> Position {
        self.player
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn pending(&self) -> Option<&PendingChoice> {
        self.pending.as_ref()
    }

    pub fn phase(&self) -> Phase {
        if self.pending.is_some() {
            Phase::AwaitingChoice
        } else {
            Phase::Idle
        }
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Once true, only restart or quit remain.
    pub fn is_over(&self) -> bool {
        self.won || self.exhausted
    }

    /// The room the player is standing in.
    pub fn current_room(&self) -> Option<&RoomArchetype> {
        self.grid.get_room(self.player)
    }

    /// Moves the cursor one cell, clamping to the grid.
    pub(super) fn move_cursor(&mut self, d_row: i32, d_col: i32) {
        let max_row = self.grid.rows() as i32 - 1;
        let max_col = self.grid.cols() as i32 - 1;
        let row = (self.cursor.0 as i32 + d_row).clamp(0, max_row) as usize;
        let col = (self.cursor.1 as i32 + d_col).clamp(0, max_col) as usize;
        self.cursor = (row, col);
    }

    /// Win: standing on the exit. Lose: out of steps.
    pub(super) fn refresh_terminal_flags(&mut self) {
        self.won = self.current_room().is_some_and(RoomArchetype::is_exit);
        self.exhausted = self.ledger.is_exhausted();
    }
}

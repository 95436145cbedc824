//! Key handling for the menu and game screens.

use crate::exploration::{process_command, Command, Direction, Exploration, Phase};
use crate::utils::SaveInfo;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::Rng;

/// Game-screen overlay state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverlay {
    None,
    Paused,
}

/// Result of handling a game input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Continue the game loop normally.
    Continue,
    /// Write the current game to disk.
    Save,
    /// Start over with a fresh grid.
    Restart,
    /// Return to the main menu.
    QuitToMenu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    NewGame,
    LoadGame,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 3] = [MenuItem::NewGame, MenuItem::LoadGame, MenuItem::Quit];

    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::NewGame => "New Game",
            MenuItem::LoadGame => "Load Game",
            MenuItem::Quit => "Quit",
        }
    }
}

pub struct MainMenuState {
    pub selected: usize,
    /// Summary of the existing save, if any
    pub save_info: Option<SaveInfo>,
}

impl MainMenuState {
    pub fn new(save_info: Option<SaveInfo>) -> Self {
        Self {
            selected: 0,
            save_info,
        }
    }

    pub fn selected_item(&self) -> MenuItem {
        MenuItem::ALL[self.selected.min(MenuItem::ALL.len() - 1)]
    }
}

/// Main menu input. Returns the item the player activated, if any.
pub fn handle_menu_input(key: KeyEvent, menu: &mut MainMenuState) -> Option<MenuItem> {
    match key.code {
        KeyCode::Up | KeyCode::Char('z') | KeyCode::Char('w') => {
            menu.selected = menu.selected.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('s') => {
            menu.selected = (menu.selected + 1).min(MenuItem::ALL.len() - 1);
            None
        }
        KeyCode::Enter | KeyCode::Char(' ') => Some(menu.selected_item()),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(MenuItem::Quit),
        _ => None,
    }
}

/// Maps a key to an exploration command for the current phase.
///
/// Both ZQSD and WASD layouts move the cursor. While a room offer is open,
/// left/right cycle the options.
pub fn map_game_key(key: KeyEvent, phase: Phase) -> Option<Command> {
    match phase {
        Phase::Idle => match key.code {
            KeyCode::Up | KeyCode::Char('z') | KeyCode::Char('w') => {
                Some(Command::MoveCursor(Direction::Up))
            }
            KeyCode::Down | KeyCode::Char('s') => Some(Command::MoveCursor(Direction::Down)),
            KeyCode::Left | KeyCode::Char('q') | KeyCode::Char('a') => {
                Some(Command::MoveCursor(Direction::Left))
            }
            KeyCode::Right | KeyCode::Char('d') => Some(Command::MoveCursor(Direction::Right)),
            KeyCode::Char(' ') => Some(Command::Select),
            KeyCode::Enter => Some(Command::Recenter),
            _ => None,
        },
        Phase::AwaitingChoice => match key.code {
            KeyCode::Left | KeyCode::Char('q') | KeyCode::Char('a') => {
                Some(Command::PreviousOption)
            }
            KeyCode::Right | KeyCode::Char('d') => Some(Command::NextOption),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Command::Confirm),
            KeyCode::Esc => Some(Command::Cancel),
            _ => None,
        },
    }
}

fn is_save_key(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('s') | KeyCode::Char('S'))
}

/// Main dispatcher for game-screen input.
///
/// `message` receives the outcome text of accepted commands and the
/// reason for refused ones.
pub fn handle_game_input<R: Rng>(
    key: KeyEvent,
    session: &mut Exploration,
    overlay: &mut GameOverlay,
    message: &mut String,
    rng: &mut R,
) -> InputResult {
    // Victory / game-over screens
    if session.is_over() {
        return match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') => InputResult::Restart,
            KeyCode::Esc => InputResult::QuitToMenu,
            _ => InputResult::Continue,
        };
    }

    if *overlay == GameOverlay::Paused {
        if matches!(
            key.code,
            KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc
        ) {
            *overlay = GameOverlay::None;
        }
        return InputResult::Continue;
    }

    if is_save_key(&key) {
        return InputResult::Save;
    }

    let phase = session.phase();
    match key.code {
        KeyCode::Char('p') | KeyCode::Char('P') => {
            *overlay = GameOverlay::Paused;
            return InputResult::Continue;
        }
        KeyCode::Esc if phase == Phase::Idle => return InputResult::QuitToMenu,
        _ => {}
    }

    let Some(command) = map_game_key(key, phase) else {
        return InputResult::Continue;
    };
    match process_command(session, command, rng) {
        Ok(turn) => {
            if !turn.message.is_empty() {
                *message = turn.message;
            }
        }
        Err(rejection) => {
            log::debug!("{:?} refused: {}", command, rejection);
            *message = rejection.to_string();
        }
    }
    InputResult::Continue
}

//! Exploration transitions: cursor, room offers, gating and entry.

use rand::Rng;

use super::types::{Command, Exploration, ExplorationEvent, PendingChoice, Rejection, Turn};
use crate::grid::{is_adjacent, Position};
use crate::rooms::{catalog, draw_choices, resolve};

/// Process one command. On `Err` nothing in the session has changed.
pub fn process_command<R: Rng>(
    state: &mut Exploration,
    command: Command,
    rng: &mut R,
) -> Result<Turn, Rejection> {
    if state.is_over() {
        return Err(Rejection::GameOver);
    }

    match (command, state.pending.is_some()) {
        (Command::MoveCursor(direction), false) => {
            let (d_row, d_col) = direction.delta();
            state.move_cursor(d_row, d_col);
            log::debug!("cursor at {:?}", state.cursor);
            Ok(Turn::new("").with_event(ExplorationEvent::CursorMoved(state.cursor)))
        }
        (Command::Select, false) => select_target(state, rng),
        (Command::Recenter, false) => {
            state.cursor = state.player;
            Ok(Turn::new("Cursor recentered.")
                .with_event(ExplorationEvent::CursorRecentered(state.cursor)))
        }
        (Command::PreviousOption, true) => Ok(cycle_option(state, -1)),
        (Command::NextOption, true) => Ok(cycle_option(state, 1)),
        (Command::Confirm, true) => confirm_choice(state, rng),
        (Command::Cancel, true) => {
            state.pending = None;
            log::debug!("room offer cancelled");
            Ok(Turn::new("Choice cancelled.").with_event(ExplorationEvent::ChoiceCancelled))
        }
        (Command::MoveCursor(_) | Command::Select | Command::Recenter, true) => {
            Err(Rejection::ChoicePending)
        }
        (
            Command::PreviousOption | Command::NextOption | Command::Confirm | Command::Cancel,
            false,
        ) => Err(Rejection::NoPendingChoice),
    }
}

/// Commits to the cell under the cursor: walk in if it is known, otherwise
/// open a room offer for it.
fn select_target<R: Rng>(state: &mut Exploration, rng: &mut R) -> Result<Turn, Rejection> {
    let target = state.cursor;
    if !is_adjacent(state.player, target) {
        return Err(Rejection::NotAdjacent);
    }

    if state.grid.is_discovered(target) {
        let mut events = Vec::new();
        let message = enter_room(state, target, &mut events, rng);
        return Ok(Turn { message, events });
    }

    let options = draw_choices(catalog(), state.offer_size, rng);
    if options.is_empty() {
        return Err(Rejection::NoRoomsAvailable);
    }

    let names: Vec<&str> = options.iter().map(|room| room.name.as_str()).collect();
    log::debug!("offering {:?} for {:?}", names, target);
    let count = options.len();
    state.pending = Some(PendingChoice {
        options,
        target,
        highlighted: 0,
    });

    Ok(Turn::new("Choose a room.").with_event(ExplorationEvent::ChoiceOffered {
        target,
        options: count,
    }))
}

fn cycle_option(state: &mut Exploration, delta: i32) -> Turn {
    let mut turn = Turn::new("");
    if let Some(pending) = state.pending.as_mut() {
        let last = pending.options.len().saturating_sub(1) as i32;
        pending.highlighted = (pending.highlighted as i32 + delta).clamp(0, last) as usize;
        turn = turn.with_event(ExplorationEvent::HighlightChanged(pending.highlighted));
    }
    turn
}

/// Gates, places and enters the highlighted room.
///
/// Both the key and the gem requirement are checked before anything is
/// spent, so a refusal leaves the ledger and the offer untouched.
fn confirm_choice<R: Rng>(state: &mut Exploration, rng: &mut R) -> Result<Turn, Rejection> {
    let (room, target) = match state.pending.as_ref() {
        Some(pending) => match pending.highlighted_room() {
            Some(room) => (room.clone(), pending.target),
            None => return Err(Rejection::NoRoomsAvailable),
        },
        None => return Err(Rejection::NoPendingChoice),
    };

    let needs_key = room.requires_key_to_enter();
    if needs_key && state.ledger.keys == 0 {
        return Err(Rejection::KeyRequired(room.name));
    }
    if state.ledger.gems < room.gem_cost {
        return Err(Rejection::NotEnoughGems {
            name: room.name,
            cost: room.gem_cost,
        });
    }

    let room_type = room.room_type;
    let cost = room.gem_cost;
    if let Err(err) = state.grid.place_room(target, room) {
        log::error!("placement at {:?} refused: {}", target, err);
        debug_assert!(false, "room offer targeted an unplaceable cell: {}", err);
        return Err(Rejection::PlacementRefused(err));
    }

    let mut events = vec![ExplorationEvent::RoomPlaced {
        position: target,
        room_type,
    }];
    if needs_key && state.ledger.spend_key() {
        events.push(ExplorationEvent::KeyUsed);
    }
    if cost > 0 && state.ledger.spend_gems(cost) {
        events.push(ExplorationEvent::GemsSpent(cost));
    }
    state.pending = None;

    let message = enter_room(state, target, &mut events, rng);
    Ok(Turn { message, events })
}

/// Moves the player into `pos`, applies the room there and refreshes the
/// terminal flags. Returns the message for the player.
fn enter_room<R: Rng>(
    state: &mut Exploration,
    pos: Position,
    events: &mut Vec<ExplorationEvent>,
    rng: &mut R,
) -> String {
    state.player = pos;
    state.cursor = pos;
    if state.step_cost > 0 {
        state.ledger.lose_steps(state.step_cost);
    }

    let (message, room_type, effect) = match state.grid.get_room(pos) {
        Some(room) => {
            let resolution = resolve(room, &state.ledger, rng);
            let room_type = room.room_type;
            state.ledger = resolution.ledger;
            (resolution.message, Some(room_type), Some(resolution.kind))
        }
        None => ("The room is empty.".to_string(), None, None),
    };

    events.push(ExplorationEvent::EnteredRoom {
        position: pos,
        room_type,
        effect,
    });

    state.refresh_terminal_flags();
    if state.won {
        log::info!("exit reached at {:?}", pos);
        events.push(ExplorationEvent::Won);
    }
    if state.exhausted {
        log::info!("out of steps at {:?}", pos);
        events.push(ExplorationEvent::Exhausted);
    }

    format!("{} | Steps left: {}", message, state.ledger.steps)
}

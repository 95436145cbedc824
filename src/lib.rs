//! Manor - a turn-based room-drafting exploration game.
//!
//! The library holds the game core (ledger, room catalog, effects, grid,
//! exploration state machine, save files) plus the terminal front end used
//! by the `manor` binary.

pub mod build_info;
pub mod core;
pub mod exploration;
pub mod grid;
pub mod input;
pub mod inventory;
pub mod rooms;
pub mod ui;
pub mod utils;

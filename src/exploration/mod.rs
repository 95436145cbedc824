//! The exploration state machine: the only writer of the grid and ledger.

pub mod logic;
pub mod types;

pub use logic::process_command;
pub use types::{
    Command, Direction, Exploration, ExplorationEvent, PendingChoice, Phase, Rejection, Turn,
};

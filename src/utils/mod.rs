//! Save files and the snapshot they hold.

pub mod persistence;
pub mod snapshot;

pub use persistence::{LoadOutcome, SaveError, SaveInfo, SaveManager};
pub use snapshot::Snapshot;

//! Save file management.

use super::snapshot::Snapshot;
use crate::core::constants::{LOG_FILE_NAME, SAVE_FILE_NAME};
use crate::core::GameConfig;
use crate::exploration::Exploration;
use crate::grid::Position;
use directories::ProjectDirs;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("could not determine the save directory")]
    NoSaveDirectory,
    #[error("could not write save file: {0}")]
    Io(#[from] io::Error),
    #[error("could not encode save: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result of a load attempt. Loading never fails outright.
#[derive(Debug)]
pub enum LoadOutcome {
    Restored(Exploration),
    /// No file, or a file that could not be read
    NoSave,
}

/// Summary shown on the main menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveInfo {
    pub save_date: String,
    pub steps: i64,
    pub gold: i64,
    pub gems: i64,
    pub player: Option<Position>,
}

/// Reads and writes the JSON save file.
pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Uses the platform config directory, creating it if needed.
    pub fn new() -> Result<Self, SaveError> {
        let project_dirs =
            ProjectDirs::from("", "", "manor").ok_or(SaveError::NoSaveDirectory)?;
        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;
        Ok(Self {
            save_path: config_dir.join(SAVE_FILE_NAME),
        })
    }

    /// Uses an explicit file, creating its parent directory if needed.
    pub fn with_path(path: impl Into<PathBuf>) -> Result<Self, SaveError> {
        let save_path = path.into();
        if let Some(parent) = save_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Self { save_path })
    }

    /// Creates a SaveManager for testing with a unique temporary directory
    #[cfg(test)]
    fn new_for_test() -> io::Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

        let test_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let temp_dir = std::env::temp_dir().join(format!(
            "manor-test-{}-{}",
            std::process::id(),
            test_id
        ));
        fs::create_dir_all(&temp_dir)?;
        Ok(Self {
            save_path: temp_dir.join(SAVE_FILE_NAME),
        })
    }

    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    /// Log file kept next to the save.
    pub fn log_path(&self) -> PathBuf {
        self.save_path.with_file_name(LOG_FILE_NAME)
    }

    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }

    /// Writes the session as pretty-printed JSON. Any open room offer is
    /// dropped from the save.
    pub fn save(&self, session: &Exploration) -> Result<(), SaveError> {
        let json = Snapshot::capture(session).to_json()?;
        fs::write(&self.save_path, json)?;
        log::info!("game saved to {}", self.save_path.display());
        Ok(())
    }

    pub fn load(&self, config: &GameConfig) -> LoadOutcome {
        match self.read_snapshot() {
            Some(snapshot) => {
                log::info!("game loaded from {}", self.save_path.display());
                LoadOutcome::Restored(snapshot.restore(config))
            }
            None => LoadOutcome::NoSave,
        }
    }

    /// Reads the menu summary without restoring the game.
    pub fn save_info(&self) -> Option<SaveInfo> {
        let snapshot = self.read_snapshot()?;
        let player = snapshot.player.row.zip(snapshot.player.col);
        Some(SaveInfo {
            save_date: snapshot.metadata.save_date,
            steps: snapshot.inventory.steps,
            gold: snapshot.inventory.gold,
            gems: snapshot.inventory.gems,
            player,
        })
    }

    fn read_snapshot(&self) -> Option<Snapshot> {
        let json = match fs::read_to_string(&self.save_path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("no save at {}", self.save_path.display());
                return None;
            }
            Err(err) => {
                log::warn!("could not read {}: {}", self.save_path.display(), err);
                return None;
            }
        };
        match Snapshot::from_json(&json) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                log::warn!("ignoring unreadable save {}: {}", self.save_path.display(), err);
                None
            }
        }
    }
}

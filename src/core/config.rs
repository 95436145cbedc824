//! Runtime game configuration.

use super::constants::{GRID_COLS, GRID_ROWS, OFFER_SIZE, STARTING_GEMS, STARTING_STEPS};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for a single game session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub starting_steps: i32,
    pub starting_gems: u32,
    /// Number of rooms offered when opening an undiscovered cell
    pub offer_size: usize,
    /// Steps spent for every committed move (0 = moving is free)
    pub step_cost_per_move: i32,
    /// Random seed for reproducibility (None = entropy)
    pub seed: Option<u64>,
    /// Overrides the platform save location
    pub save_path: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: GRID_ROWS,
            cols: GRID_COLS,
            starting_steps: STARTING_STEPS,
            starting_gems: STARTING_GEMS,
            offer_size: OFFER_SIZE,
            step_cost_per_move: 0,
            seed: None,
            save_path: None,
        }
    }
}

/// What the binary should do after parsing its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliAction {
    Play(GameConfig),
    ShowHelp,
    ShowVersion,
    Unknown(String),
}

impl GameConfig {
    /// Parses `manor [--seed N] [--save PATH] [--help] [--version]`.
    ///
    /// `args` includes the program name at index 0.
    pub fn from_args(args: &[String]) -> CliAction {
        let mut config = GameConfig::default();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--help" | "-h" => return CliAction::ShowHelp,
                "--version" | "-v" => return CliAction::ShowVersion,
                "--seed" | "-s" => {
                    if i + 1 < args.len() {
                        config.seed = args[i + 1].parse().ok();
                        i += 1;
                    }
                }
                "--save" => {
                    if i + 1 < args.len() {
                        config.save_path = Some(PathBuf::from(&args[i + 1]));
                        i += 1;
                    }
                }
                other => return CliAction::Unknown(other.to_string()),
            }
            i += 1;
        }

        CliAction::Play(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("manor")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_default_matches_constants() {
        let config = GameConfig::default();
        assert_eq!(config.rows, 5);
        assert_eq!(config.cols, 9);
        assert_eq!(config.starting_steps, 70);
        assert_eq!(config.starting_gems, 2);
        assert_eq!(config.offer_size, 3);
        assert_eq!(config.step_cost_per_move, 0);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_no_args_plays_with_defaults() {
        assert_eq!(
            GameConfig::from_args(&args(&[])),
            CliAction::Play(GameConfig::default())
        );
    }

    #[test]
    fn test_seed_and_save_path() {
        match GameConfig::from_args(&args(&["--seed", "42", "--save", "/tmp/m.json"])) {
            CliAction::Play(config) => {
                assert_eq!(config.seed, Some(42));
                assert_eq!(config.save_path, Some(PathBuf::from("/tmp/m.json")));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_invalid_seed_falls_back_to_entropy() {
        match GameConfig::from_args(&args(&["--seed", "abc"])) {
            CliAction::Play(config) => assert!(config.seed.is_none()),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_help_version_unknown() {
        assert_eq!(GameConfig::from_args(&args(&["-h"])), CliAction::ShowHelp);
        assert_eq!(
            GameConfig::from_args(&args(&["--version"])),
            CliAction::ShowVersion
        );
        assert_eq!(
            GameConfig::from_args(&args(&["--bogus"])),
            CliAction::Unknown("--bogus".to_string())
        );
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"rows": 7}"#).unwrap();
        assert_eq!(config.rows, 7);
        assert_eq!(config.cols, 9);
        assert_eq!(config.starting_steps, 70);
    }
}

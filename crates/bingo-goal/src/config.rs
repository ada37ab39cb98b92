// config.rs - Where the board lives on disk and the defaults it starts with.
//
// `BingoConfig::for_project()` lays everything out under a `.bingo/`
// directory in the project root. An optional `.bingo/config.toml` can
// override the board defaults:
//
//   [board]
//   storage_key = "goal_bingo_save"
//   goal_duration_days = 365
//   strict_dates = true

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::BingoError;
use crate::goal::{DateRangeCheck, MAX_GOAL_DURATION_DAYS};

/// Paths plus board defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BingoConfig {
    /// Root directory of the project.
    pub project_root: PathBuf,

    /// Directory holding the saved snapshot.
    pub data_dir: PathBuf,

    /// Path to the event notification log.
    pub events_log: PathBuf,

    /// Path to the optional TOML overrides.
    pub config_file: PathBuf,

    #[serde(default)]
    pub board: BoardDefaults,
}

/// Contents of `.bingo/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub board: BoardDefaults,
}

/// Defaults applied when a board is created or edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardDefaults {
    /// File stem of the saved snapshot inside `data_dir`.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Length of a new goal's period, counted from the day it is created.
    /// Must be in `0..=MAX_GOAL_DURATION_DAYS`.
    #[serde(default = "default_goal_duration_days")]
    pub goal_duration_days: i64,

    /// Reject unparseable or reversed goal periods.
    #[serde(default = "default_strict_dates")]
    pub strict_dates: bool,
}

impl Default for BoardDefaults {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            goal_duration_days: default_goal_duration_days(),
            strict_dates: default_strict_dates(),
        }
    }
}

impl BoardDefaults {
    /// Check values a config file could have set out of range.
    pub fn validate(&self) -> Result<(), BingoError> {
        if !(0..=MAX_GOAL_DURATION_DAYS).contains(&self.goal_duration_days) {
            return Err(BingoError::InvalidDuration {
                days: self.goal_duration_days,
                max: MAX_GOAL_DURATION_DAYS,
            });
        }
        Ok(())
    }

    pub fn date_range_check(&self) -> DateRangeCheck {
        if self.strict_dates {
            DateRangeCheck::Strict
        } else {
            DateRangeCheck::Unchecked
        }
    }
}

fn default_storage_key() -> String {
    "goal_bingo_save".to_string()
}

fn default_goal_duration_days() -> i64 {
    365
}

fn default_strict_dates() -> bool {
    true
}

impl ConfigFile {
    /// Parse a config file.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Parse a config file, falling back to defaults if it is missing or bad.
    /// An out-of-range value falls back on its own; the rest of the file
    /// still applies.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(mut config) => {
                if let Err(e) = config.board.validate() {
                    tracing::warn!(
                        "ignoring board.goal_duration_days in {}: {}",
                        path.display(),
                        e
                    );
                    config.board.goal_duration_days = default_goal_duration_days();
                }
                config
            }
            Err(e) => {
                if path.exists() {
                    tracing::warn!("ignoring unreadable config {}: {}", path.display(), e);
                }
                Self::default()
            }
        }
    }
}

impl BingoConfig {
    /// Standard `.bingo/` layout for a project, with overrides from
    /// `.bingo/config.toml` when present.
    pub fn for_project(project_root: impl AsRef<Path>) -> Self {
        let root = project_root.as_ref().to_path_buf();
        let bingo_dir = root.join(".bingo");
        let config_file = bingo_dir.join("config.toml");
        let board = ConfigFile::load_or_default(&config_file).board;
        Self {
            project_root: root,
            data_dir: bingo_dir.clone(),
            events_log: bingo_dir.join("events.jsonl"),
            config_file,
            board,
        }
    }

    /// Path of the saved snapshot.
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.board.storage_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn for_project_uses_bingo_dir_and_defaults() {
        let dir = tempdir().unwrap();
        let config = BingoConfig::for_project(dir.path());
        assert_eq!(config.data_dir, dir.path().join(".bingo"));
        assert_eq!(
            config.snapshot_path(),
            dir.path().join(".bingo").join("goal_bingo_save.json")
        );
        assert_eq!(config.board, BoardDefaults::default());
        assert_eq!(config.board.date_range_check(), DateRangeCheck::Strict);
    }

    #[test]
    fn config_file_overrides_defaults() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".bingo")).unwrap();
        std::fs::write(
            dir.path().join(".bingo/config.toml"),
            "[board]\nstorage_key = \"planner\"\nstrict_dates = false\n",
        )
        .unwrap();

        let config = BingoConfig::for_project(dir.path());
        assert_eq!(config.board.storage_key, "planner");
        assert_eq!(config.board.goal_duration_days, 365);
        assert_eq!(config.board.date_range_check(), DateRangeCheck::Unchecked);
        assert!(config.snapshot_path().ends_with("planner.json"));
    }

    #[test]
    fn out_of_range_duration_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        for days in ["9000000000000", "-30"] {
            std::fs::write(
                &path,
                format!("[board]\nstorage_key = \"planner\"\ngoal_duration_days = {days}\n"),
            )
            .unwrap();
            let config = ConfigFile::load_or_default(&path);
            assert_eq!(config.board.goal_duration_days, 365);
            assert_eq!(config.board.storage_key, "planner");
            config.board.validate().unwrap();
        }
    }

    #[test]
    fn zero_duration_is_allowed() {
        let defaults = BoardDefaults {
            goal_duration_days: 0,
            ..BoardDefaults::default()
        };
        defaults.validate().unwrap();
        let negative = BoardDefaults {
            goal_duration_days: -1,
            ..BoardDefaults::default()
        };
        assert!(matches!(
            negative.validate(),
            Err(BingoError::InvalidDuration { days: -1, .. })
        ));
    }

    #[test]
    fn malformed_config_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[board\nnot toml").unwrap();
        let config = ConfigFile::load_or_default(&path);
        assert_eq!(config.board, BoardDefaults::default());
    }
}

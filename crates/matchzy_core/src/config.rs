use std::path::{Path, PathBuf};

use crate::naming::sanitize_filename;

pub const DEFAULT_TEAM_DIR: &str = "teams";
pub const DEFAULT_SPECTATOR_FILE: &str = "spectators.json";

/// Where rosters and the spectator list live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    pub team_dir: PathBuf,
    pub spectator_file: PathBuf,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            team_dir: PathBuf::from(DEFAULT_TEAM_DIR),
            spectator_file: PathBuf::from(DEFAULT_SPECTATOR_FILE),
        }
    }
}

impl EditorConfig {
    pub fn new(team_dir: impl Into<PathBuf>, spectator_file: impl Into<PathBuf>) -> Self {
        Self {
            team_dir: team_dir.into(),
            spectator_file: spectator_file.into(),
        }
    }

    /// Roster file for `team_name` inside the team directory.
    pub fn team_path(&self, team_name: &str) -> PathBuf {
        team_file_path(&self.team_dir, team_name)
    }
}

pub(crate) fn team_file_path(team_dir: &Path, team_name: &str) -> PathBuf {
    team_dir.join(format!("{}.json", sanitize_filename(team_name)))
}

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::team_file_path;
use crate::core_api::{AddOutcome, CoreError, Player, TeamSlot};
use crate::json_file::{read_json, write_json};
use crate::player_list::PlayerList;

/// On-disk and in-config shape of a team: `{"name", "players"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub name: String,
    pub players: PlayerList,
}

#[derive(Debug, Clone)]
pub struct RosterEditor {
    slot: TeamSlot,
    roster: Roster,
}

impl RosterEditor {
    pub fn new(slot: TeamSlot) -> Self {
        Self {
            slot,
            roster: Roster::default(),
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn name(&self) -> &str {
        &self.roster.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.roster.name = name.into();
    }

    pub fn players(&self) -> &PlayerList {
        &self.roster.players
    }

    pub fn listing(&self) -> Vec<String> {
        self.roster.players.listing()
    }

    pub fn add_player(
        &mut self,
        display_name: &str,
        identifier: &str,
    ) -> Result<AddOutcome, CoreError> {
        let outcome = self
            .roster
            .players
            .add(display_name, identifier)
            .inspect_err(|e| tracing::warn!(slot = %self.slot, error = %e, "rejected player"))?;
        if outcome == AddOutcome::Added {
            tracing::debug!(slot = %self.slot, steamid = identifier.trim(), "added player");
        }
        Ok(outcome)
    }

    pub fn remove_player(&mut self, selected: Option<usize>) -> Option<Player> {
        let removed = self.roster.players.remove(selected);
        if let Some(player) = &removed {
            tracing::debug!(slot = %self.slot, steamid = %player.identifier, "removed player");
        }
        removed
    }

    /// Writes the roster to `<team_dir>/<name>.json`, replacing any existing
    /// file. Returns `None` without touching disk when the name is blank.
    pub fn save(&self, team_dir: &Path) -> Result<Option<PathBuf>, CoreError> {
        let name = self.roster.name.trim();
        if name.is_empty() {
            tracing::debug!(slot = %self.slot, "skipping save of unnamed team");
            return Ok(None);
        }

        let path = team_file_path(team_dir, name);
        let on_disk = Roster {
            name: name.to_string(),
            players: self.roster.players.clone(),
        };
        write_json(&path, &on_disk)?;
        tracing::info!(slot = %self.slot, path = %path.display(), "saved team");
        Ok(Some(path))
    }

    /// Replaces name and players with the contents of `path`. On any error
    /// the editor keeps its previous state.
    pub fn load(&mut self, path: &Path) -> Result<(), CoreError> {
        let roster: Roster = read_json(path)?;
        tracing::info!(
            slot = %self.slot,
            path = %path.display(),
            players = roster.players.len(),
            "loaded team"
        );
        self.roster = roster;
        Ok(())
    }
}

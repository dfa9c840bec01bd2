use std::path::Path;

use crate::core_api::{AddOutcome, CoreError, Player};
use crate::json_file::{read_json, write_json};
use crate::player_list::PlayerList;

/// Spectators shared by every match; stored as a bare SteamID -> nickname
/// object.
#[derive(Debug, Clone, Default)]
pub struct SpectatorRegistry {
    players: PlayerList,
}

impl SpectatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn players(&self) -> &PlayerList {
        &self.players
    }

    pub fn listing(&self) -> Vec<String> {
        self.players.listing()
    }

    pub fn add_spectator(
        &mut self,
        display_name: &str,
        identifier: &str,
    ) -> Result<AddOutcome, CoreError> {
        let outcome = self
            .players
            .add(display_name, identifier)
            .inspect_err(|e| tracing::warn!(error = %e, "rejected spectator"))?;
        if outcome == AddOutcome::Added {
            tracing::debug!(steamid = identifier.trim(), "added spectator");
        }
        Ok(outcome)
    }

    pub fn remove_spectator(&mut self, selected: Option<usize>) -> Option<Player> {
        let removed = self.players.remove(selected);
        if let Some(player) = &removed {
            tracing::debug!(steamid = %player.identifier, "removed spectator");
        }
        removed
    }

    pub fn save(&self, path: &Path) -> Result<(), CoreError> {
        write_json(path, &self.players)?;
        tracing::info!(path = %path.display(), count = self.players.len(), "saved spectators");
        Ok(())
    }

    /// Replaces the registry with the contents of `path`. A missing file is
    /// reported as `NotFound` and leaves the registry as it was.
    pub fn load(&mut self, path: &Path) -> Result<usize, CoreError> {
        let players: PlayerList = read_json(path)?;
        let count = players.len();
        self.players = players;
        tracing::info!(path = %path.display(), count, "loaded spectators");
        Ok(count)
    }
}

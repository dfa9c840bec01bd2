use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core_api::{AddOutcome, CoreError, CoreErrorCode, Player};
use crate::steam_id::validate_steamid;

/// Ordered SteamID -> nickname mapping. Iteration and display order is
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerList {
    entries: IndexMap<String, String>,
}

impl PlayerList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn display_name(&self, identifier: &str) -> Option<&str> {
        self.entries.get(identifier).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(id, name)| (id.as_str(), name.as_str()))
    }

    pub fn players(&self) -> Vec<Player> {
        self.iter()
            .map(|(identifier, display_name)| Player {
                identifier: identifier.to_string(),
                display_name: display_name.to_string(),
            })
            .collect()
    }

    /// `"<nickname> (<steamid>)"` per entry, in display order.
    pub fn listing(&self) -> Vec<String> {
        self.iter()
            .map(|(id, name)| format!("{name} ({id})"))
            .collect()
    }

    /// Trims both fields, then validates and inserts at the end.
    ///
    /// Empty input is ignored. A malformed SteamID is a `Validation` error and
    /// an already listed one is a `Duplicate` error; neither changes the list.
    pub fn add(&mut self, display_name: &str, identifier: &str) -> Result<AddOutcome, CoreError> {
        let display_name = display_name.trim();
        let identifier = identifier.trim();
        if display_name.is_empty() || identifier.is_empty() {
            return Ok(AddOutcome::Ignored);
        }

        validate_steamid(identifier)?;

        if let Some(existing) = self.entries.get(identifier) {
            return Err(CoreError::new(
                CoreErrorCode::Duplicate,
                format!("SteamID {identifier} already exists (listed as {existing:?})"),
            ));
        }

        self.entries
            .insert(identifier.to_string(), display_name.to_string());
        Ok(AddOutcome::Added)
    }

    /// Removes the entry at `selected` in display order. No selection, or a
    /// selection past the end, removes nothing.
    pub fn remove(&mut self, selected: Option<usize>) -> Option<Player> {
        let index = selected?;
        self.entries
            .shift_remove_index(index)
            .map(|(identifier, display_name)| Player {
                identifier,
                display_name,
            })
    }
}

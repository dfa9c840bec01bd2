use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core_api::{CoreError, CoreErrorCode};
use crate::json_file::write_json;
use crate::naming::match_config_filename;
use crate::player_list::PlayerList;
use crate::roster::Roster;

/// Maps collected for every match, whatever the series length.
pub const MAP_SLOTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapName {
    #[serde(rename = "de_inferno")]
    Inferno,
    #[serde(rename = "de_mirage")]
    Mirage,
    #[serde(rename = "de_nuke")]
    Nuke,
    #[serde(rename = "de_overpass")]
    Overpass,
    #[serde(rename = "de_ancient")]
    Ancient,
    #[serde(rename = "de_dust2")]
    Dust2,
    #[serde(rename = "de_train")]
    Train,
}

impl MapName {
    pub const POOL: [MapName; 7] = [
        MapName::Inferno,
        MapName::Mirage,
        MapName::Nuke,
        MapName::Overpass,
        MapName::Ancient,
        MapName::Dust2,
        MapName::Train,
    ];

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Inferno => "de_inferno",
            Self::Mirage => "de_mirage",
            Self::Nuke => "de_nuke",
            Self::Overpass => "de_overpass",
            Self::Ancient => "de_ancient",
            Self::Dust2 => "de_dust2",
            Self::Train => "de_train",
        }
    }
}

impl fmt::Display for MapName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MapName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::POOL
            .into_iter()
            .find(|map| map.as_str() == s)
            .ok_or_else(|| {
                CoreError::new(
                    CoreErrorCode::Validation,
                    format!("unknown map {s:?}, expected one of {}", join_names(&Self::POOL)),
                )
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SideChoice {
    #[serde(rename = "team1_ct")]
    Team1Ct,
    #[serde(rename = "team1_t")]
    Team1T,
    #[serde(rename = "team2_ct")]
    Team2Ct,
    #[serde(rename = "team2_t")]
    Team2T,
    #[serde(rename = "knife")]
    Knife,
}

impl SideChoice {
    pub const ALL: [SideChoice; 5] = [
        SideChoice::Team1Ct,
        SideChoice::Team1T,
        SideChoice::Team2Ct,
        SideChoice::Team2T,
        SideChoice::Knife,
    ];

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Team1Ct => "team1_ct",
            Self::Team1T => "team1_t",
            Self::Team2Ct => "team2_ct",
            Self::Team2T => "team2_t",
            Self::Knife => "knife",
        }
    }
}

impl fmt::Display for SideChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SideChoice {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|side| side.as_str() == s)
            .ok_or_else(|| {
                CoreError::new(
                    CoreErrorCode::Validation,
                    format!("unknown side {s:?}, expected one of {}", join_names(&Self::ALL)),
                )
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapPick {
    pub map: MapName,
    pub side: SideChoice,
}

/// The three map/side rows of the editor. All rows are emitted even for a
/// best-of-one, which is what the server plugin has always received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapSelection {
    picks: [MapPick; MAP_SLOTS],
}

impl Default for MapSelection {
    fn default() -> Self {
        Self {
            picks: [0, 1, 2].map(|i| MapPick {
                map: MapName::POOL[i],
                side: SideChoice::Knife,
            }),
        }
    }
}

impl MapSelection {
    pub fn set(&mut self, slot: usize, map: MapName, side: SideChoice) -> Result<(), CoreError> {
        let pick = self.picks.get_mut(slot).ok_or_else(|| {
            CoreError::new(
                CoreErrorCode::Validation,
                format!("invalid map slot {slot}, expected 0-{}", MAP_SLOTS - 1),
            )
        })?;
        *pick = MapPick { map, side };
        Ok(())
    }

    pub fn maplist(&self) -> Vec<MapName> {
        self.picks.iter().map(|p| p.map).collect()
    }

    pub fn map_sides(&self) -> Vec<SideChoice> {
        self.picks.iter().map(|p| p.side).collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    #[default]
    Bo1,
    Bo3,
}

impl MatchType {
    pub fn num_maps(&self) -> u32 {
        match *self {
            Self::Bo1 => 1,
            Self::Bo3 => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Bo1 => "bo1",
            Self::Bo3 => "bo3",
        }
    }
}

impl FromStr for MatchType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bo1" => Ok(Self::Bo1),
            "bo3" => Ok(Self::Bo3),
            other => Err(CoreError::new(
                CoreErrorCode::Validation,
                format!("unknown match type {other:?}, expected bo1 or bo3"),
            )),
        }
    }
}

pub const CVAR_SPEC_SWAP_PLAYER_SIDES: &str = "mp_spec_swapplayersides";
pub const CVAR_HOSTNAME: &str = "hostname";
pub const CVAR_FRIENDLY_FIRE: &str = "mp_friendlyfire";

/// The fixed set of server cvars written into every config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CvarSet {
    values: IndexMap<String, String>,
}

impl Default for CvarSet {
    fn default() -> Self {
        let values = [
            (CVAR_SPEC_SWAP_PLAYER_SIDES, "1"),
            (CVAR_HOSTNAME, ""),
            (CVAR_FRIENDLY_FIRE, "1"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        Self { values }
    }
}

impl CvarSet {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), CoreError> {
        if !self.values.contains_key(key) {
            let known: Vec<&str> = self.values.keys().map(String::as_str).collect();
            return Err(CoreError::new(
                CoreErrorCode::Validation,
                format!("unknown cvar {key:?}, expected one of {}", known.join(", ")),
            ));
        }
        let slot = self.values.get_mut(key).expect("key checked above");
        *slot = value.into();
        Ok(())
    }

    pub fn hostname(&self) -> &str {
        self.get(CVAR_HOSTNAME).unwrap_or_default()
    }
}

/// Match-level fields typed into the settings panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSettings {
    pub match_id: i64,
    pub tournament_name: String,
    /// Collected for the organiser's records; not part of the plugin config.
    pub stage_name: String,
    pub match_type: MatchType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpectatorBlock {
    pub players: PlayerList,
}

/// Document consumed by the MatchZy plugin. Field order is the key order of
/// the written file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub matchid: i64,
    pub team1: Roster,
    pub team2: Roster,
    pub num_maps: u32,
    pub maplist: Vec<MapName>,
    pub map_sides: Vec<SideChoice>,
    pub spectators: SpectatorBlock,
    pub clinch_series: bool,
    pub players_per_team: usize,
    pub cvars: CvarSet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledConfig {
    pub config: MatchConfig,
    pub default_filename: String,
}

/// Builds the complete match document in memory.
pub fn assemble(
    settings: &MatchSettings,
    team1: &Roster,
    team2: &Roster,
    spectators: &PlayerList,
    maps: &MapSelection,
    cvars: &CvarSet,
) -> AssembledConfig {
    let mut cvars = cvars.clone();
    if cvars.hostname().is_empty() {
        let hostname = format!(
            "{} | {} | {} vs {}",
            settings.tournament_name, settings.match_id, team1.name, team2.name
        );
        cvars.values.insert(CVAR_HOSTNAME.to_string(), hostname);
    }

    let config = MatchConfig {
        matchid: settings.match_id,
        team1: team1.clone(),
        team2: team2.clone(),
        num_maps: settings.match_type.num_maps(),
        maplist: maps.maplist(),
        map_sides: maps.map_sides(),
        spectators: SpectatorBlock {
            players: spectators.clone(),
        },
        clinch_series: true,
        // Team 2's size is never consulted.
        players_per_team: team1.players.len(),
        cvars,
    };

    AssembledConfig {
        default_filename: match_config_filename(settings.match_id, &team1.name, &team2.name),
        config,
    }
}

/// Writes `assembled` to `target`, appending `.json` when the target has no
/// extension. `None` means the save was cancelled: nothing is written and
/// `Ok(None)` is returned.
pub fn write_config(
    assembled: &AssembledConfig,
    target: Option<&Path>,
) -> Result<Option<PathBuf>, CoreError> {
    let Some(target) = target else {
        tracing::debug!("match config save cancelled");
        return Ok(None);
    };

    let path = if target.extension().is_none() {
        target.with_extension("json")
    } else {
        target.to_path_buf()
    };

    write_json(&path, &assembled.config)?;
    tracing::info!(
        path = %path.display(),
        matchid = assembled.config.matchid,
        "wrote match config"
    );
    Ok(Some(path))
}

fn join_names<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_and_side_tokens_parse_from_their_wire_names() {
        for map in MapName::POOL {
            assert_eq!(map.as_str().parse::<MapName>().unwrap(), map);
        }
        for side in SideChoice::ALL {
            assert_eq!(side.as_str().parse::<SideChoice>().unwrap(), side);
        }
        assert_eq!(
            "de_cache".parse::<MapName>().unwrap_err().code,
            CoreErrorCode::Validation
        );
    }

    #[test]
    fn default_selection_uses_first_three_pool_maps_with_knife() {
        let picks = MapSelection::default();
        assert_eq!(
            picks.maplist(),
            vec![MapName::Inferno, MapName::Mirage, MapName::Nuke]
        );
        assert!(picks.map_sides().iter().all(|s| *s == SideChoice::Knife));
    }

    #[test]
    fn set_rejects_slot_past_third_map() {
        let mut picks = MapSelection::default();
        let err = picks
            .set(3, MapName::Train, SideChoice::Team1Ct)
            .unwrap_err();
        assert_eq!(err.code, CoreErrorCode::Validation);
    }

    #[test]
    fn cvars_only_accept_known_keys() {
        let mut cvars = CvarSet::default();
        cvars.set(CVAR_FRIENDLY_FIRE, "0").unwrap();
        assert_eq!(cvars.get(CVAR_FRIENDLY_FIRE), Some("0"));

        let err = cvars.set("sv_cheats", "1").unwrap_err();
        assert_eq!(err.code, CoreErrorCode::Validation);
        assert_eq!(cvars.iter().count(), 3);
    }
}

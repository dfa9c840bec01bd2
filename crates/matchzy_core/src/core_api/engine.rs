use std::path::{Path, PathBuf};

use crate::config::EditorConfig;
use crate::match_config::{
    self, AssembledConfig, CvarSet, MapName, MapSelection, MatchSettings, SideChoice,
};
use crate::roster::RosterEditor;
use crate::spectators::SpectatorRegistry;

use super::error::CoreError;
use super::types::TeamSlot;

#[derive(Debug, Default, Clone)]
pub struct Engine {
    config: EditorConfig,
}

/// All editor state for one run. Each method is one user action.
#[derive(Debug)]
pub struct Session {
    config: EditorConfig,
    team1: RosterEditor,
    team2: RosterEditor,
    spectators: SpectatorRegistry,
    settings: MatchSettings,
    maps: MapSelection,
    cvars: CvarSet,
}

impl Engine {
    pub fn new(config: EditorConfig) -> Self {
        Self { config }
    }

    pub fn open(&self) -> Session {
        tracing::debug!(
            team_dir = %self.config.team_dir.display(),
            spectator_file = %self.config.spectator_file.display(),
            "opening editor session"
        );
        Session {
            config: self.config.clone(),
            team1: RosterEditor::new(TeamSlot::Team1),
            team2: RosterEditor::new(TeamSlot::Team2),
            spectators: SpectatorRegistry::new(),
            settings: MatchSettings::default(),
            maps: MapSelection::default(),
            cvars: CvarSet::default(),
        }
    }
}

impl Session {
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn team(&self, slot: TeamSlot) -> &RosterEditor {
        match slot {
            TeamSlot::Team1 => &self.team1,
            TeamSlot::Team2 => &self.team2,
        }
    }

    pub fn team_mut(&mut self, slot: TeamSlot) -> &mut RosterEditor {
        match slot {
            TeamSlot::Team1 => &mut self.team1,
            TeamSlot::Team2 => &mut self.team2,
        }
    }

    pub fn save_team(&self, slot: TeamSlot) -> Result<Option<PathBuf>, CoreError> {
        self.team(slot).save(&self.config.team_dir)
    }

    pub fn load_team(&mut self, slot: TeamSlot, path: &Path) -> Result<(), CoreError> {
        self.team_mut(slot).load(path)
    }

    /// Loads `<team_dir>/<team_name>.json` into `slot`.
    pub fn load_team_named(&mut self, slot: TeamSlot, team_name: &str) -> Result<(), CoreError> {
        let path = self.config.team_path(team_name);
        self.load_team(slot, &path)
    }

    pub fn spectators(&self) -> &SpectatorRegistry {
        &self.spectators
    }

    pub fn spectators_mut(&mut self) -> &mut SpectatorRegistry {
        &mut self.spectators
    }

    pub fn save_spectators(&self) -> Result<(), CoreError> {
        self.spectators.save(&self.config.spectator_file)
    }

    pub fn load_spectators(&mut self) -> Result<usize, CoreError> {
        self.spectators.load(&self.config.spectator_file)
    }

    pub fn settings(&self) -> &MatchSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut MatchSettings {
        &mut self.settings
    }

    pub fn set_map(
        &mut self,
        slot: usize,
        map: MapName,
        side: SideChoice,
    ) -> Result<(), CoreError> {
        self.maps.set(slot, map, side)
    }

    pub fn cvars(&self) -> &CvarSet {
        &self.cvars
    }

    pub fn set_cvar(&mut self, key: &str, value: impl Into<String>) -> Result<(), CoreError> {
        self.cvars.set(key, value)
    }

    pub fn assemble(&self) -> AssembledConfig {
        match_config::assemble(
            &self.settings,
            self.team1.roster(),
            self.team2.roster(),
            self.spectators.players(),
            &self.maps,
            &self.cvars,
        )
    }

    pub fn write_config(
        &self,
        assembled: &AssembledConfig,
        target: Option<&Path>,
    ) -> Result<Option<PathBuf>, CoreError> {
        match_config::write_config(assembled, target)
    }
}

mod engine;
mod error;
mod types;

pub use engine::{Engine, Session};
pub use error::{CoreError, CoreErrorCode};
pub use types::{AddOutcome, Player, TeamSlot};

pub use crate::config::EditorConfig;
pub use crate::match_config::{
    AssembledConfig, CvarSet, MapName, MapPick, MapSelection, MatchConfig, MatchSettings,
    MatchType, SideChoice, SpectatorBlock,
};
pub use crate::player_list::PlayerList;
pub use crate::roster::{Roster, RosterEditor};
pub use crate::spectators::SpectatorRegistry;

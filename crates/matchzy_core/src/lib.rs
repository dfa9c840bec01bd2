pub mod config;
pub mod core_api;
mod json_file;
pub mod match_config;
pub mod naming;
pub mod player_list;
pub mod roster;
pub mod spectators;
pub mod steam_id;

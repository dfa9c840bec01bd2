use std::sync::LazyLock;

use regex::Regex;

use crate::core_api::{CoreError, CoreErrorCode};

/// Number of digits in a SteamID64.
pub const STEAM_ID_LEN: usize = 17;

static STEAM_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{17}$").expect("steamid pattern is valid"));

pub fn is_valid_steamid(identifier: &str) -> bool {
    STEAM_ID_PATTERN.is_match(identifier)
}

pub fn validate_steamid(identifier: &str) -> Result<(), CoreError> {
    if is_valid_steamid(identifier) {
        return Ok(());
    }
    Err(CoreError::new(
        CoreErrorCode::Validation,
        format!("invalid SteamID {identifier:?}: must be a {STEAM_ID_LEN}-digit numeric string"),
    ))
}

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub identifier: String,
    pub display_name: String,
}

impl Player {
    /// Line shown in roster and spectator listings.
    pub fn listing_line(&self) -> String {
        format!("{} ({})", self.display_name, self.identifier)
    }
}

/// Result of an add request that did not fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// Either field was empty after trimming; nothing changed.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TeamSlot {
    Team1,
    Team2,
}

impl TeamSlot {
    pub fn number(&self) -> u8 {
        match *self {
            Self::Team1 => 1,
            Self::Team2 => 2,
        }
    }
}

impl fmt::Display for TeamSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Team {}", self.number())
    }
}

use std::fmt;

use thiserror::Error;

/// Which menu rejected a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuLevel {
    Hall,
    Room,
}

impl fmt::Display for MenuLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuLevel::Hall => f.write_str("option"),
            MenuLevel::Room => f.write_str("choice"),
        }
    }
}

/// Recoverable player mistakes. Each one re-prompts; none ends the game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Invalid {level}, try again.")]
    InvalidSelection { level: MenuLevel, key: String },

    #[error("You need a {item} to do that.")]
    UnmetRequirement { item: String },
}

use std::io;

use thiserror::Error;

use super::validator::ValidationError;

/// Everything that can go wrong between a world file and a playable `World`.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("could not read world file: {0}")]
    Io(#[from] io::Error),

    #[error("could not parse world file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{0}")]
    Malformed(String),

    #[error("world failed validation:\n{}", join_problems(.0))]
    Invalid(Vec<ValidationError>),
}

impl WorldError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        WorldError::Malformed(msg.into())
    }
}

fn join_problems(problems: &[ValidationError]) -> String {
    problems
        .iter()
        .map(|p| format!("  - {}", p))
        .collect::<Vec<String>>()
        .join("\n")
}

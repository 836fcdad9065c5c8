use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::error::WorldError;
use super::model::{Choice, ChoiceKind, Room, World};
use super::validator::validate_world;

////////////////////
/// TOML STRUCTS ///
////////////////////

#[derive(Deserialize)]
struct WorldFile {
    world: WorldHeader,
    #[serde(default)]
    room: Vec<RoomConfig>, // [[room]] blocks
}

#[derive(Deserialize)]
struct WorldHeader {
    id: String,
    name: String,
    #[serde(default)]
    intro: String,
    #[serde(default = "default_hall_prompt")]
    hall_prompt: String,
    #[serde(default = "default_quit_key")]
    quit_key: String,
    #[serde(default = "default_victory")]
    victory: String,
}

#[derive(Deserialize)]
struct RoomConfig {
    key: String,
    name: String,

    #[serde(default)]
    choice: Vec<ChoiceConfig>, // [[room.choice]]
}

#[derive(Deserialize)]
struct ChoiceConfig {
    key: String,
    desc: String,

    #[serde(default)]
    item: Option<String>,

    #[serde(default)]
    requires: Option<String>,

    #[serde(default)]
    escape: bool,

    #[serde(default)]
    back: bool,
}

// Helpers for serde defaults
fn default_hall_prompt() -> String {
    "Where do you go?".to_string()
}

fn default_quit_key() -> String {
    "0".to_string()
}

fn default_victory() -> String {
    "CONGRATULATIONS! You escaped!".to_string()
}

/////////////////////////////
/// TOML PARSER FUNCTIONS ///
/////////////////////////////

/// Public API: load a world from a .toml file on disk.
pub fn load_world_from_file(path: &Path) -> Result<World, WorldError> {
    let contents = fs::read_to_string(path)?;
    let world = load_world_from_str(&contents)?;
    tracing::info!(path = %path.display(), world = %world.id, "loaded world file");
    Ok(world)
}

/// Public API: load a world from TOML text, then validate it.
pub fn load_world_from_str(contents: &str) -> Result<World, WorldError> {
    let world_file: WorldFile = toml::from_str(contents)?;
    let world = build_world(world_file)?;

    let (errors, warnings): (Vec<_>, Vec<_>) = validate_world(&world)
        .into_iter()
        .partition(|p| p.is_error());

    for w in &warnings {
        tracing::warn!(world = %world.id, "{}", w);
    }

    if !errors.is_empty() {
        return Err(WorldError::Invalid(errors));
    }

    tracing::debug!(world = %world.id, rooms = world.rooms.len(), "world ready");
    Ok(world)
}

fn build_world(world_file: WorldFile) -> Result<World, WorldError> {
    let header = world_file.world;

    // Basic validation
    if header.id.trim().is_empty() {
        return Err(WorldError::malformed("world.id may not be empty"));
    }
    let quit_key = header.quit_key.trim().to_string();
    if quit_key.is_empty() {
        return Err(WorldError::malformed("world.quit_key may not be empty"));
    }

    let mut rooms: Vec<Room> = Vec::new();
    let mut seen_rooms: HashSet<String> = HashSet::new();

    for room_cfg in world_file.room {
        let key = room_cfg.key.trim().to_string();
        if key.is_empty() {
            return Err(WorldError::malformed(format!(
                "Room '{}' has an empty key",
                room_cfg.name
            )));
        }
        if !seen_rooms.insert(key.clone()) {
            return Err(WorldError::malformed(format!("Duplicate room key: {}", key)));
        }
        if room_cfg.name.trim().is_empty() {
            return Err(WorldError::malformed(format!(
                "Room '{}' has an empty name",
                key
            )));
        }

        let mut choices: Vec<Choice> = Vec::new();
        let mut seen_choices: HashSet<String> = HashSet::new();

        for cc in room_cfg.choice {
            let choice_key = cc.key.trim().to_lowercase();
            if choice_key.is_empty() {
                return Err(WorldError::malformed(format!(
                    "Room '{}' has a choice with an empty key",
                    key
                )));
            }
            if !seen_choices.insert(choice_key.clone()) {
                return Err(WorldError::malformed(format!(
                    "Duplicate choice key '{}' in room '{}'",
                    choice_key, key
                )));
            }

            let kind = parse_choice_kind(&cc).map_err(|msg| {
                WorldError::malformed(format!("Room '{}' choice '{}': {}", key, choice_key, msg))
            })?;

            choices.push(Choice {
                key: choice_key,
                description: normalize_multiline_desc(&cc.desc),
                kind,
            });
        }

        rooms.push(Room {
            key,
            name: room_cfg.name.trim().to_string(),
            choices,
        });
    }

    Ok(World {
        id: header.id,
        name: header.name,
        intro: normalize_multiline_desc(&header.intro),
        hall_prompt: normalize_multiline_desc(&header.hall_prompt),
        quit_key,
        victory: normalize_multiline_desc(&header.victory),
        rooms,
    })
}

fn normalize_multiline_desc(raw: &str) -> String {
    let mut result = String::new();
    let mut pending_blank_lines = 0usize;
    let mut first_text_seen = false;

    for line in raw.lines() {
        // Indentation in TOML never reaches the player.
        let trimmed = line.trim();

        if trimmed.is_empty() {
            pending_blank_lines += 1;
            continue;
        }

        if first_text_seen {
            match pending_blank_lines {
                // Wrapped line: single newline in TOML → space in output
                0 => result.push(' '),
                1 => result.push('\n'),
                _ => result.push_str("\n\n"),
            }
        }
        result.push_str(trimmed);
        first_text_seen = true;
        pending_blank_lines = 0;
    }

    result
}

//////////////////////////////
/// CHOICE PARSE HELPERS   ///
//////////////////////////////

fn parse_choice_kind(cc: &ChoiceConfig) -> Result<ChoiceKind, String> {
    let item = non_empty(cc.item.as_deref());
    let requires = non_empty(cc.requires.as_deref());

    if cc.back {
        if item.is_some() || requires.is_some() || cc.escape {
            return Err("a back choice cannot also grant, require or escape".to_string());
        }
        return Ok(ChoiceKind::Back);
    }

    let base = match (cc.escape, item) {
        (true, Some(_)) => {
            return Err("an escape choice cannot also grant an item".to_string());
        }
        (true, None) => ChoiceKind::Escape,
        (false, Some(item)) => ChoiceKind::Grant(item),
        (false, None) => ChoiceKind::Plain,
    };

    Ok(match requires {
        Some(requires) => ChoiceKind::RequireThen {
            requires,
            then: Box::new(base),
        },
        None => base,
    })
}

fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_lowercase())
}

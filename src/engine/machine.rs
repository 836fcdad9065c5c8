use crate::engine::error::{MenuLevel, SelectionError};
use crate::engine::output::Output;
use crate::engine::player::PlayerState;
use crate::engine::render;
use crate::world;

/// Where the player is in the menu structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    MainHall,
    InRoom(String),
    /// The "stay in this room?" question is waiting for an answer.
    ConfirmStay(String),
    Escaped,
    Quit,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Escaped | Phase::Quit)
    }
}

/// What resolving a satisfiable choice did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<'w> {
    ReturnToHall,
    Narrated {
        description: &'w str,
        granted: Option<&'w str>,
    },
    Escaped {
        description: &'w str,
    },
}

pub fn select_room<'w>(
    world: &'w world::World,
    key: &str,
) -> Result<&'w world::Room, SelectionError> {
    world
        .room(key)
        .ok_or_else(|| SelectionError::InvalidSelection {
            level: MenuLevel::Hall,
            key: key.to_string(),
        })
}

/// Resolve choice `key` in `room`. On error the player is untouched.
pub fn resolve_choice<'w>(
    room: &'w world::Room,
    key: &str,
    player: &mut PlayerState,
) -> Result<Outcome<'w>, SelectionError> {
    let choice = room
        .choice(key)
        .ok_or_else(|| SelectionError::InvalidSelection {
            level: MenuLevel::Room,
            key: key.to_string(),
        })?;

    resolve_kind(&choice.kind, &choice.description, player)
}

fn resolve_kind<'w>(
    kind: &'w world::ChoiceKind,
    description: &'w str,
    player: &mut PlayerState,
) -> Result<Outcome<'w>, SelectionError> {
    use world::ChoiceKind;

    match kind {
        ChoiceKind::Back => Ok(Outcome::ReturnToHall),
        ChoiceKind::RequireThen { requires, then } => {
            if !player.has(requires) {
                return Err(SelectionError::UnmetRequirement {
                    item: requires.clone(),
                });
            }
            resolve_kind(then, description, player)
        }
        ChoiceKind::Grant(item) => {
            let granted = player.grant(item).then_some(item.as_str());
            if granted.is_some() {
                tracing::debug!(item = %item, "item added to inventory");
            }
            Ok(Outcome::Narrated {
                description,
                granted,
            })
        }
        ChoiceKind::Escape => {
            player.escaped = true;
            Ok(Outcome::Escaped { description })
        }
        ChoiceKind::Plain => Ok(Outcome::Narrated {
            description,
            granted: None,
        }),
    }
}

pub fn is_affirmative(answer: &str) -> bool {
    let a = answer.trim();
    a.eq_ignore_ascii_case("y") || a.eq_ignore_ascii_case("yes")
}

/// Apply one line of input to `phase`, writing narration and errors to `out`.
/// Returns the next phase. Menus for the next phase are not rendered here.
pub fn advance(
    out: &mut Output,
    world: &world::World,
    phase: &Phase,
    player: &mut PlayerState,
    input: &str,
) -> Phase {
    let next = match phase {
        Phase::MainHall => {
            let key = input.trim();
            if key == world.quit_key {
                Phase::Quit
            } else {
                match select_room(world, key) {
                    Ok(room) => Phase::InRoom(room.key.clone()),
                    Err(e) => {
                        render::render_error(out, &e);
                        Phase::MainHall
                    }
                }
            }
        }
        Phase::InRoom(room_key) => match world.room(room_key) {
            Some(room) => {
                let key = input.trim().to_lowercase();
                match resolve_choice(room, &key, player) {
                    Ok(Outcome::ReturnToHall) => Phase::MainHall,
                    Ok(Outcome::Narrated {
                        description,
                        granted,
                    }) => {
                        render::render_narration(out, description, granted);
                        Phase::ConfirmStay(room_key.clone())
                    }
                    Ok(Outcome::Escaped { description }) => {
                        render::render_narration(out, description, None);
                        Phase::Escaped
                    }
                    Err(e) => {
                        render::render_error(out, &e);
                        phase.clone()
                    }
                }
            }
            None => {
                tracing::error!(room = %room_key, "phase points at a room the world does not have");
                Phase::MainHall
            }
        },
        Phase::ConfirmStay(room_key) => {
            if is_affirmative(input) {
                Phase::InRoom(room_key.clone())
            } else {
                Phase::MainHall
            }
        }
        Phase::Escaped | Phase::Quit => phase.clone(),
    };

    if &next != phase {
        tracing::debug!(from = ?phase, to = ?next, "phase transition");
    }

    next
}

use std::collections::HashSet;
use std::fmt;

use super::model::{ChoiceKind, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Worth telling the author about; the world is still playable.
    Warning,
    /// The world cannot be played as written.
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub severity: Severity,
    pub message: String,
}

impl ValidationError {
    fn error(msg: impl Into<String>) -> Self {
        ValidationError {
            severity: Severity::Error,
            message: msg.into(),
        }
    }

    fn warning(msg: impl Into<String>) -> Self {
        ValidationError {
            severity: Severity::Warning,
            message: msg.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

pub fn validate_world(world: &World) -> Vec<ValidationError> {
    let mut errors: Vec<ValidationError> = Vec::new();

    // Rooms must not be empty
    if world.rooms.is_empty() {
        errors.push(ValidationError::error("world has no rooms"));
    }

    for room in &world.rooms {
        if room.key == world.quit_key {
            errors.push(ValidationError::error(format!(
                "room '{}' uses the quit key '{}'",
                room.name, world.quit_key
            )));
        }

        if room.choices.is_empty() {
            errors.push(ValidationError::error(format!(
                "room '{}' has no choices",
                room.name
            )));
        } else if !room.has_back() {
            errors.push(ValidationError::warning(format!(
                "room '{}' has no way back to the main hall",
                room.name
            )));
        }
    }

    let obtainable = obtainable_items(world);

    // Requirements must be obtainable from an empty inventory
    for (room, choice) in world.choices() {
        if let Some(req) = choice.kind.requirement() {
            if !obtainable.contains(req) {
                errors.push(ValidationError::error(format!(
                    "room '{}' choice '{}' requires '{}', which the player can never obtain",
                    room.name, choice.key, req
                )));
            }
        }
    }

    let escapes: Vec<_> = world.choices().filter(|(_, c)| c.kind.is_escape()).collect();
    if !world.rooms.is_empty() {
        if escapes.is_empty() {
            errors.push(ValidationError::error("world has no escape choice"));
        } else if !escapes.iter().any(|(_, c)| unlocked(&c.kind, &obtainable)) {
            errors.push(ValidationError::error(
                "world has no escape choice the player can reach",
            ));
        }
    }

    errors
}

fn unlocked(kind: &ChoiceKind, obtainable: &HashSet<&str>) -> bool {
    kind.requirement().is_none_or(|req| obtainable.contains(req))
}

/// Items the player can end up holding, starting empty-handed.
/// Repeats until no pass adds anything, so grants locked behind their own
/// item (or behind a cycle of items) never count.
fn obtainable_items(world: &World) -> HashSet<&str> {
    let mut obtainable: HashSet<&str> = HashSet::new();

    loop {
        let mut changed = false;
        for (_, choice) in world.choices() {
            let Some(item) = choice.kind.grant() else {
                continue;
            };
            if !obtainable.contains(item) && unlocked(&choice.kind, &obtainable) {
                obtainable.insert(item);
                changed = true;
            }
        }
        if !changed {
            return obtainable;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Choice, ChoiceKind, Room};

    fn choice(key: &str, kind: ChoiceKind) -> Choice {
        Choice {
            key: key.to_string(),
            description: format!("choice {}", key),
            kind,
        }
    }

    fn world_with(rooms: Vec<Room>) -> World {
        World {
            id: "test".to_string(),
            name: "Test".to_string(),
            intro: String::new(),
            hall_prompt: "Where do you go?".to_string(),
            quit_key: "0".to_string(),
            victory: "You win.".to_string(),
            rooms,
        }
    }

    fn room(key: &str, name: &str, choices: Vec<Choice>) -> Room {
        Room {
            key: key.to_string(),
            name: name.to_string(),
            choices,
        }
    }

    #[test]
    fn accepts_minimal_escapable_world() {
        let world = world_with(vec![room(
            "1",
            "Door",
            vec![choice("a", ChoiceKind::Escape), choice("0", ChoiceKind::Back)],
        )]);
        assert!(validate_world(&world).is_empty());
    }

    #[test]
    fn empty_world_is_an_error() {
        let problems = validate_world(&world_with(Vec::new()));
        assert_eq!(problems.len(), 1);
        assert!(problems[0].is_error());
        assert!(problems[0].message.contains("no rooms"));
    }

    #[test]
    fn unsatisfiable_requirement_is_an_error() {
        let world = world_with(vec![room(
            "1",
            "Door",
            vec![
                choice(
                    "a",
                    ChoiceKind::RequireThen {
                        requires: "key".to_string(),
                        then: Box::new(ChoiceKind::Escape),
                    },
                ),
                choice("0", ChoiceKind::Back),
            ],
        )]);
        let problems = validate_world(&world);
        assert!(
            problems
                .iter()
                .any(|p| p.is_error() && p.message.contains("requires 'key'"))
        );
    }

    #[test]
    fn missing_escape_is_an_error() {
        let world = world_with(vec![room(
            "1",
            "Closet",
            vec![choice("a", ChoiceKind::Plain), choice("0", ChoiceKind::Back)],
        )]);
        let problems = validate_world(&world);
        assert!(problems.iter().any(|p| p.message.contains("no escape")));
    }

    fn locked(requires: &str, then: ChoiceKind) -> ChoiceKind {
        ChoiceKind::RequireThen {
            requires: requires.to_string(),
            then: Box::new(then),
        }
    }

    #[test]
    fn self_locked_grant_is_unobtainable() {
        let world = world_with(vec![room(
            "1",
            "Door",
            vec![
                choice("a", locked("key", ChoiceKind::Grant("key".to_string()))),
                choice("b", locked("key", ChoiceKind::Escape)),
                choice("0", ChoiceKind::Back),
            ],
        )]);
        let problems = validate_world(&world);
        assert!(
            problems
                .iter()
                .any(|p| p.is_error() && p.message.contains("'a' requires 'key'"))
        );
        assert!(
            problems
                .iter()
                .any(|p| p.is_error() && p.message.contains("no escape choice the player can reach"))
        );
    }

    #[test]
    fn cyclic_requirements_are_unobtainable() {
        let world = world_with(vec![room(
            "1",
            "Vault",
            vec![
                choice("a", locked("b", ChoiceKind::Grant("a".to_string()))),
                choice("b", locked("a", ChoiceKind::Grant("b".to_string()))),
                choice("c", ChoiceKind::Escape),
                choice("0", ChoiceKind::Back),
            ],
        )]);
        let problems = validate_world(&world);
        assert_eq!(problems.iter().filter(|p| p.is_error()).count(), 2);
        assert!(!problems.iter().any(|p| p.message.contains("no escape")));
    }

    #[test]
    fn chained_requirements_are_obtainable() {
        let world = world_with(vec![
            room(
                "1",
                "Shed",
                vec![
                    choice("a", ChoiceKind::Grant("lamp".to_string())),
                    choice("b", locked("lamp", ChoiceKind::Grant("key".to_string()))),
                    choice("0", ChoiceKind::Back),
                ],
            ),
            room(
                "2",
                "Door",
                vec![
                    choice("a", locked("key", ChoiceKind::Escape)),
                    choice("0", ChoiceKind::Back),
                ],
            ),
        ]);
        assert!(validate_world(&world).is_empty());
    }

    #[test]
    fn room_on_quit_key_is_an_error() {
        let world = world_with(vec![room(
            "0",
            "Door",
            vec![choice("a", ChoiceKind::Escape), choice("0", ChoiceKind::Back)],
        )]);
        let problems = validate_world(&world);
        assert!(problems.iter().any(|p| p.message.contains("quit key")));
    }

    #[test]
    fn room_without_back_only_warns() {
        let world = world_with(vec![room("1", "Door", vec![choice("a", ChoiceKind::Escape)])]);
        let problems = validate_world(&world);
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].severity, Severity::Warning);
    }

    #[test]
    fn room_without_choices_is_an_error() {
        let world = world_with(vec![
            room("1", "Door", vec![choice("a", ChoiceKind::Escape)]),
            room("2", "Void", Vec::new()),
        ]);
        let problems = validate_world(&world);
        assert!(
            problems
                .iter()
                .any(|p| p.is_error() && p.message.contains("'Void' has no choices"))
        );
    }
}

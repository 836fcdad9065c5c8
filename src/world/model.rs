//////////////////////////////
/// GAME STRUCTS AND ENUMS ///
//////////////////////////////

/// Runtime world type used by the game loop. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct World {
    pub id: String,
    pub name: String,
    pub intro: String,
    pub hall_prompt: String,
    pub quit_key: String,
    pub victory: String,
    /// Rooms in data-file order; this is the main menu order.
    pub rooms: Vec<Room>,
}

impl World {
    pub fn room(&self, key: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.key == key)
    }

    /// Every choice in the world, paired with the room that offers it.
    pub fn choices(&self) -> impl Iterator<Item = (&Room, &Choice)> {
        self.rooms
            .iter()
            .flat_map(|room| room.choices.iter().map(move |c| (room, c)))
    }
}

#[derive(Debug, Clone)]
pub struct Room {
    pub key: String,
    pub name: String,
    pub choices: Vec<Choice>,
}

impl Room {
    pub fn choice(&self, key: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.key == key)
    }

    pub fn has_back(&self) -> bool {
        self.choices.iter().any(|c| c.kind.is_back())
    }
}

#[derive(Debug, Clone)]
pub struct Choice {
    pub key: String,
    pub description: String,
    pub kind: ChoiceKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceKind {
    /// Narrate only.
    Plain,
    /// Narrate and pick up an item.
    Grant(String),
    /// Narrate and win.
    Escape,
    /// Return to the main hall.
    Back,
    /// `then` only resolves while `requires` is held.
    RequireThen {
        requires: String,
        then: Box<ChoiceKind>,
    },
}

impl ChoiceKind {
    pub fn requirement(&self) -> Option<&str> {
        match self {
            ChoiceKind::RequireThen { requires, .. } => Some(requires),
            _ => None,
        }
    }

    pub fn grant(&self) -> Option<&str> {
        match self {
            ChoiceKind::Grant(item) => Some(item),
            ChoiceKind::RequireThen { then, .. } => then.grant(),
            _ => None,
        }
    }

    pub fn is_escape(&self) -> bool {
        match self {
            ChoiceKind::Escape => true,
            ChoiceKind::RequireThen { then, .. } => then.is_escape(),
            _ => false,
        }
    }

    pub fn is_back(&self) -> bool {
        matches!(self, ChoiceKind::Back)
    }
}

use std::collections::HashSet;

/// The only mutable state in a game: what the player holds and whether they got out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerState {
    pub inventory: HashSet<String>,
    pub escaped: bool,
}

impl PlayerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, item: &str) -> bool {
        self.inventory.contains(item)
    }

    /// Adds `item`; returns false (and changes nothing) if it was already held.
    pub fn grant(&mut self, item: &str) -> bool {
        if self.has(item) {
            return false;
        }
        self.inventory.insert(item.to_string())
    }

    /// Inventory in display order.
    pub fn sorted_items(&self) -> Vec<&str> {
        let mut items: Vec<&str> = self.inventory.iter().map(String::as_str).collect();
        items.sort_unstable();
        items
    }
}

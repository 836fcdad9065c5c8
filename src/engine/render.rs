use crate::engine::error::SelectionError;
use crate::engine::machine::Phase;
use crate::engine::output::{MenuEntry, Output};
use crate::engine::player::PlayerState;
use crate::world;

pub fn render_welcome(out: &mut Output, world: &world::World) {
    out.title(format!("*** WELCOME TO {} ***", world.name.to_uppercase()));
}

/// Draw whatever the player should see while sitting in `phase`.
pub fn render_phase(
    out: &mut Output,
    world: &world::World,
    phase: &Phase,
    player: &PlayerState,
) {
    match phase {
        Phase::MainHall => render_hall(out, world),
        Phase::InRoom(room_key) => match world.room(room_key) {
            Some(room) => render_room(out, room, player),
            None => render_hall(out, world),
        },
        Phase::ConfirmStay(_) => out.set_prompt("Stay in this room? (y/n): "),
        Phase::Escaped => render_victory(out, world, player),
        Phase::Quit => out.say("You chose to quit. Goodbye!"),
    }
}

pub fn render_hall(out: &mut Output, world: &world::World) {
    out.title(world.intro.to_uppercase());
    out.say(world.hall_prompt.clone());

    let mut entries: Vec<MenuEntry> = world
        .rooms
        .iter()
        .map(|r| MenuEntry {
            key: r.key.clone(),
            label: r.name.clone(),
        })
        .collect();
    entries.push(MenuEntry {
        key: world.quit_key.clone(),
        label: "Quit".to_string(),
    });
    out.menu(entries);
    out.set_prompt("Your choice: ");
}

pub fn render_room(out: &mut Output, room: &world::Room, player: &PlayerState) {
    out.heading(room.name.clone());
    out.say(format!("Inventory: {}", inventory_line(player)));
    out.say("What do you do?");
    out.menu(
        room.choices
            .iter()
            .map(|c| MenuEntry {
                key: c.key.clone(),
                label: c.description.clone(),
            })
            .collect(),
    );
    out.set_prompt("Your choice: ");
}

pub fn render_narration(out: &mut Output, description: &str, granted: Option<&str>) {
    out.say(format!(">> {}", description));
    if let Some(item) = granted {
        out.event(format!("[+] {} added to inventory.", item.to_uppercase()));
    }
}

pub fn render_error(out: &mut Output, err: &SelectionError) {
    match err {
        SelectionError::UnmetRequirement { .. } => out.event(format!("[!] {}", err)),
        SelectionError::InvalidSelection { .. } => out.event(err.to_string()),
    }
}

pub fn render_victory(out: &mut Output, world: &world::World, player: &PlayerState) {
    out.title(world.victory.clone());
    out.say(format!("Items collected: {}", inventory_line(player)));
}

fn inventory_line(player: &PlayerState) -> String {
    let items = player.sorted_items();
    if items.is_empty() {
        "empty".to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_WORLD;
    use crate::engine::output::OutputBlock;
    use crate::world::load_world_from_str;

    #[test]
    fn hall_lists_rooms_then_quit() {
        let world = load_world_from_str(DEFAULT_WORLD).unwrap();
        let mut out = Output::new();
        render_hall(&mut out, &world);

        let menu = out
            .blocks
            .iter()
            .find_map(|b| match b {
                OutputBlock::Menu(entries) => Some(entries.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(menu.len(), world.rooms.len() + 1);
        assert_eq!(menu[0].label, "Dark Forest");
        assert_eq!(menu.last().unwrap().key, "0");
        assert!(matches!(out.blocks.last(), Some(OutputBlock::Prompt(_))));
    }

    #[test]
    fn room_menu_shows_inventory() {
        let world = load_world_from_str(DEFAULT_WORLD).unwrap();
        let room = world.room("1").unwrap();
        let mut player = PlayerState::new();

        let mut out = Output::new();
        render_room(&mut out, room, &player);
        assert_eq!(out.blocks[0], OutputBlock::Heading("Dark Forest".to_string()));
        assert!(out.contains("Inventory: empty"));

        player.grant("key");
        player.grant("apple");
        let mut out = Output::new();
        render_room(&mut out, room, &player);
        assert!(out.contains("Inventory: apple, key"));
    }

    #[test]
    fn unmet_requirement_is_flagged() {
        let mut out = Output::new();
        render_error(
            &mut out,
            &SelectionError::UnmetRequirement {
                item: "key".to_string(),
            },
        );
        assert_eq!(
            out.blocks,
            vec![OutputBlock::Event("[!] You need a key to do that.".to_string())]
        );
    }

    #[test]
    fn pickup_is_announced_in_caps() {
        let mut out = Output::new();
        render_narration(&mut out, "You find it.", Some("key"));
        assert!(out.contains(">> You find it."));
        assert!(out.contains("[+] KEY added to inventory."));
    }
}

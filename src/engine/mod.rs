mod error;
mod machine;
mod output;
mod player;
mod render;

pub use error::{MenuLevel, SelectionError};
pub use machine::{Outcome, Phase, advance, is_affirmative, resolve_choice, select_room};
pub use output::{MenuEntry, Output, OutputBlock};
pub use player::PlayerState;
pub use render::{render_phase, render_welcome};

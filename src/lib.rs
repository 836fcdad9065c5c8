pub mod engine;
pub mod world;

use engine::{Output, Phase, PlayerState, advance, render_phase, render_welcome};
use world::World;

pub use world::{WorldError, load_world_from_file, load_world_from_str};

/// The mansion shipped with the game, played when no world file is given.
pub const DEFAULT_WORLD: &str = include_str!("../public/mansion.toml");

pub struct GameState {
    world: World,
    player: PlayerState,
    phase: Phase,
}

#[cfg(feature = "wasm")]
mod wasm_bindings {
    use super::*;
    use serde::Serialize;
    use serde_wasm_bindgen::to_value;
    use wasm_bindgen::prelude::*;

    #[derive(Serialize)]
    struct WasmStepResult {
        text: Vec<String>,
        blocks: Vec<engine::OutputBlock>,
        finished: bool,
    }

    impl WasmStepResult {
        fn new(out: Output, finished: bool) -> Self {
            WasmStepResult {
                text: out.lines(),
                blocks: out.blocks,
                finished,
            }
        }
    }

    #[wasm_bindgen]
    pub struct WasmGame {
        state: GameState,
    }

    #[wasm_bindgen]
    impl WasmGame {
        /// Create a new game from a TOML world string. Call `init()` to get the first screen.
        #[wasm_bindgen(constructor)]
        pub fn new(world_toml: &str) -> Result<WasmGame, JsValue> {
            let world =
                load_world_from_str(world_toml).map_err(|e| JsValue::from_str(&e.to_string()))?;
            Ok(WasmGame {
                state: GameState::new(world),
            })
        }

        /// Return the welcome banner and the main hall menu.
        #[wasm_bindgen]
        pub fn init(&self) -> JsValue {
            to_value(&WasmStepResult::new(
                self.state.initialize(),
                self.state.is_finished(),
            ))
            .unwrap_or(JsValue::NULL)
        }

        /// Process one line of player input and return the resulting output blocks.
        #[wasm_bindgen]
        pub fn step(&mut self, input: &str) -> JsValue {
            let (out, finished) = self.state.step(input);
            to_value(&WasmStepResult::new(out, finished)).unwrap_or(JsValue::NULL)
        }
    }
}

impl GameState {
    pub fn new(world: World) -> Self {
        GameState {
            world,
            player: PlayerState::new(),
            phase: Phase::MainHall,
        }
    }

    /// Welcome banner plus the screen for the current phase.
    pub fn initialize(&self) -> Output {
        let mut out = Output::new();
        render_welcome(&mut out, &self.world);
        render_phase(&mut out, &self.world, &self.phase, &self.player);
        out
    }

    /// Process a single line of input; returns (output, finished?)
    pub fn step(&mut self, input: &str) -> (Output, bool) {
        let mut out = Output::new();

        if self.phase.is_terminal() {
            return (out, true);
        }

        self.phase = advance(
            &mut out,
            &self.world,
            &self.phase,
            &mut self.player,
            input,
        );
        render_phase(&mut out, &self.world, &self.phase, &self.player);

        (out, self.phase.is_terminal())
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    /// End the session and hand back the player's final state.
    pub fn into_player(self) -> PlayerState {
        self.player
    }
}

//! Game loop: poll input, step the simulation, render unless minimized.

use std::path::Path;

use tracing::{info, warn};

use crate::compute::{init_state, step};
use crate::display;
use crate::entities::GameState;
use crate::input::{process_input, InputState, KeyBindings};
use crate::platform::{AssetLoader, Platform};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Closed,
}

/// Owns the platform and every piece of mutable game state.
pub struct Game<P: Platform> {
    platform: P,
    state: GameState,
    input: InputState,
    bindings: KeyBindings,
}

impl<P: Platform> Game<P> {
    /// Start from an explicit state.
    pub fn new(platform: P, state: GameState, bindings: KeyBindings) -> Self {
        Self {
            platform,
            state,
            input: InputState::default(),
            bindings,
        }
    }

    /// Load the player sprite and spawn the player into the current window.
    /// A sprite that fails to load leaves the player as a plain rectangle.
    pub fn startup(mut platform: P, sprite_path: &Path, bindings: KeyBindings) -> Self
    where
        P: AssetLoader,
    {
        let sprite = match platform.load_sprite(sprite_path) {
            Ok(id) => Some(id),
            Err(err) => {
                warn!(path = %sprite_path.display(), %err, "player sprite unavailable, drawing a rectangle");
                None
            }
        };
        let (width, height) = platform.window_size();
        info!(width, height, "spawning player");
        let state = init_state(width, height, sprite);
        Self::new(platform, state, bindings)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn loop_state(&self) -> LoopState {
        if self.input.closed {
            LoopState::Closed
        } else {
            LoopState::Running
        }
    }

    /// One pass of the loop. The simulation runs even when this pass saw the
    /// close request; the loop only stops at the next boundary.
    pub fn iterate(&mut self) -> LoopState {
        process_input(
            &mut self.platform,
            &mut self.input,
            &mut self.state,
            &self.bindings,
        );

        self.state = step(&self.state, &self.input);

        if !self.input.minimized {
            if let Err(err) = display::render(self.platform.canvas(), &self.state) {
                warn!(%err, frame = self.state.frame, "presenting frame failed");
            }
        }

        self.loop_state()
    }

    /// Loop until closed, handing back the platform and the final state.
    pub fn run(mut self) -> (P, GameState) {
        while self.loop_state() == LoopState::Running {
            self.iterate();
        }
        info!(frames = self.state.frame, bullets = self.state.bullets.len(), "game loop closed");
        (self.platform, self.state)
    }
}

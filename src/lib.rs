//! A ship that flies around a terminal window and fires bullets.
//!
//! - `entities`: pure data (player, bullets, game state)
//! - `input`: key/window flags fed from platform events
//! - `compute`: the deterministic per-step simulation
//! - `display`: draws a game state onto any `Canvas`
//! - `game`: the input → simulate → render loop
//! - `platform`: canvas/event traits plus the crossterm backend

pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod game;
pub mod input;
pub mod platform;

pub use config::Config;
pub use error::StartupError;
pub use game::{Game, LoopState};

//! Platform collaborator: event queue, window size, drawing surface and
//! asset loading. The game core only ever talks to these traits.

pub mod framebuffer;
pub mod terminal;

use std::io;
use std::path::Path;

use thiserror::Error;

use crate::entities::{Rgba, SpriteId};
use crate::input::PlatformEvent;

pub use framebuffer::FrameBuffer;
pub use terminal::TerminalPlatform;

/// Integer destination rectangle in window units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }
}

/// A surface frames are drawn on. Nothing is visible until `present`.
pub trait Canvas {
    fn clear(&mut self, color: Rgba);
    fn fill_rect(&mut self, rect: Rect, color: Rgba);
    /// Draw the sprite stretched to fill `rect`. Unknown ids draw nothing.
    fn draw_sprite(&mut self, sprite: SpriteId, rect: Rect);
    /// Make the finished frame visible in one go.
    fn present(&mut self) -> io::Result<()>;
}

pub trait Platform {
    type Canvas: Canvas;

    /// Next queued event, or `None` once the queue is drained. Never blocks.
    fn poll_event(&mut self) -> Option<PlatformEvent>;

    /// Current window size in units.
    fn window_size(&self) -> (u32, u32);

    fn canvas(&mut self) -> &mut Self::Canvas;
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("image load failed: {0}")]
    Image(#[from] image::ImageError),
}

pub trait AssetLoader {
    fn load_sprite(&mut self, path: &Path) -> Result<SpriteId, AssetError>;
}

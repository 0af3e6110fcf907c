//! Scripted platform used by the integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::path::Path;

use simple_shooter::entities::{Rgba, SpriteId};
use simple_shooter::input::PlatformEvent;
use simple_shooter::platform::{AssetError, AssetLoader, Canvas, Platform, Rect};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Clear(Rgba),
    Fill(Rect, Rgba),
    Sprite(SpriteId, Rect),
    Present,
}

/// Canvas that just remembers what it was asked to do.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn presents(&self) -> usize {
        self.calls.iter().filter(|c| **c == DrawCall::Present).count()
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self, color: Rgba) {
        self.calls.push(DrawCall::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.calls.push(DrawCall::Fill(rect, color));
    }

    fn draw_sprite(&mut self, sprite: SpriteId, rect: Rect) {
        self.calls.push(DrawCall::Sprite(sprite, rect));
    }

    fn present(&mut self) -> io::Result<()> {
        self.calls.push(DrawCall::Present);
        Ok(())
    }
}

/// Each entry of `frames` is what one full event drain returns.
pub struct ScriptedPlatform {
    pub frames: VecDeque<Vec<PlatformEvent>>,
    pub size: (u32, u32),
    pub canvas: RecordingCanvas,
    pub sprite: Option<SpriteId>,
    pub loaded: Vec<String>,
    current: VecDeque<PlatformEvent>,
    draining: bool,
}

impl ScriptedPlatform {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            frames: VecDeque::new(),
            size: (width, height),
            canvas: RecordingCanvas::default(),
            sprite: None,
            loaded: Vec::new(),
            current: VecDeque::new(),
            draining: false,
        }
    }

    pub fn with_frames(mut self, frames: Vec<Vec<PlatformEvent>>) -> Self {
        self.frames = frames.into();
        self
    }

    pub fn push_frame(&mut self, events: Vec<PlatformEvent>) {
        self.frames.push_back(events);
    }
}

impl Platform for ScriptedPlatform {
    type Canvas = RecordingCanvas;

    fn poll_event(&mut self) -> Option<PlatformEvent> {
        if !self.draining {
            self.current = self.frames.pop_front().unwrap_or_default().into();
            self.draining = true;
        }
        let event = self.current.pop_front();
        if event.is_none() {
            self.draining = false;
        }
        event
    }

    fn window_size(&self) -> (u32, u32) {
        self.size
    }

    fn canvas(&mut self) -> &mut RecordingCanvas {
        &mut self.canvas
    }
}

impl AssetLoader for ScriptedPlatform {
    fn load_sprite(&mut self, path: &Path) -> Result<SpriteId, AssetError> {
        self.loaded.push(path.display().to_string());
        self.sprite.ok_or_else(|| {
            AssetError::Image(image::ImageError::IoError(io::Error::new(
                io::ErrorKind::NotFound,
                "no such sprite",
            )))
        })
    }
}

pub fn key_down(key: simple_shooter::input::Key) -> PlatformEvent {
    PlatformEvent::KeyDown { key, repeat: false }
}

pub fn key_up(key: simple_shooter::input::Key) -> PlatformEvent {
    PlatformEvent::KeyUp { key, repeat: false }
}

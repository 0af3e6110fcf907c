//! Rendering layer.
//!
//! Receives a canvas and an immutable view of the game state. No game logic
//! is performed; this module only translates state into draw calls.

use std::io;

use crate::entities::{Entity, GameState, Rgba};
use crate::platform::{Canvas, Rect};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BACKGROUND: Rgba = Rgba::BLACK;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame: player first, then bullets in order.
pub fn render<C: Canvas>(canvas: &mut C, state: &GameState) -> io::Result<()> {
    canvas.clear(C_BACKGROUND);

    draw_entity(canvas, &state.player.entity);
    for bullet in &state.bullets {
        draw_entity(canvas, &bullet.entity);
    }

    canvas.present()
}

/// Destination rectangle for an entity. Fields are truncated toward zero.
pub fn dest_rect(entity: &Entity) -> Rect {
    Rect::new(
        entity.x as i32,
        entity.y as i32,
        entity.width as i32,
        entity.height as i32,
    )
}

fn draw_entity<C: Canvas>(canvas: &mut C, entity: &Entity) {
    let dest = dest_rect(entity);
    match entity.sprite {
        Some(sprite) => canvas.draw_sprite(sprite, dest),
        None => canvas.fill_rect(dest, entity.color),
    }
}

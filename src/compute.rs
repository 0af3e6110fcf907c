//! Pure game-logic functions.
//!
//! `step` takes an immutable reference to the current `GameState` plus the
//! sampled `InputState` and returns a brand-new `GameState`. Nothing here
//! touches the platform, so a fixed input script always yields the same run.

use crate::entities::{Bullet, GameState, Player, SpriteId};
use crate::input::InputState;

// ── Tuning ───────────────────────────────────────────────────────────────────

/// Horizontal player speed, units per step.
pub const PLAYER_SPEED_X: f32 = 4.0;
/// Vertical player speed, units per step.
pub const PLAYER_SPEED_Y: f32 = 5.0;
/// Steps between shots while fire is held.
pub const RELOAD_STEPS: u32 = 8;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state for a window of the given size.
pub fn init_state(width: u32, height: u32, sprite: Option<SpriteId>) -> GameState {
    GameState {
        player: Player::spawn(height, sprite),
        bullets: Vec::new(),
        width,
        height,
        frame: 0,
    }
}

// ── Per-frame step ───────────────────────────────────────────────────────────

/// Advance the simulation by one step.
pub fn step(state: &GameState, input: &InputState) -> GameState {
    let width = state.width as f32;
    let height = state.height as f32;

    // ── 1. Velocity from held directions ────────────────────────────────────
    let mut player = state.player.clone();
    let p = &mut player.entity;
    p.dx = 0.0;
    p.dy = 0.0;
    if input.left {
        p.dx -= PLAYER_SPEED_X;
    }
    if input.right {
        p.dx += PLAYER_SPEED_X;
    }
    if input.up {
        p.dy -= PLAYER_SPEED_Y;
    }
    if input.down {
        p.dy += PLAYER_SPEED_Y;
    }

    // ── 2. Integrate ─────────────────────────────────────────────────────────
    p.x += p.dx;
    p.y += p.dy;

    // ── 3. Clamp into the window, far edge first ─────────────────────────────
    p.x = clamp_axis(p.x, p.width, width);
    p.y = clamp_axis(p.y, p.height, height);

    // ── 4. Cool down ─────────────────────────────────────────────────────────
    player.reload = player.reload.saturating_sub(1);

    // ── 5. Move live bullets, cull the ones past the right edge ──────────────
    let mut bullets: Vec<Bullet> = state
        .bullets
        .iter()
        .filter_map(|b| {
            let mut moved = b.clone();
            moved.entity.x += moved.entity.dx;
            moved.entity.y += moved.entity.dy;
            // Only the right edge culls: every shot travels rightward.
            if moved.entity.x > width {
                None
            } else {
                Some(moved)
            }
        })
        .collect();

    // ── 6. Fire ──────────────────────────────────────────────────────────────
    // After the bullet pass: a fresh bullet sits at the muzzle for this step.
    if input.fire && player.reload == 0 {
        bullets.push(Bullet::fired_from(&player.entity));
        player.reload = RELOAD_STEPS;
    }

    GameState {
        player,
        bullets,
        frame: state.frame + 1,
        ..state.clone()
    }
}

/// Keep `[pos, pos + size]` inside `[0, limit]`. When the rectangle is larger
/// than the window the far edge wins and `pos` goes negative.
fn clamp_axis(pos: f32, size: f32, limit: f32) -> f32 {
    if pos + size > limit {
        limit - size
    } else if pos < 0.0 {
        0.0
    } else {
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_axis_snaps_far_edge() {
        assert_eq!(clamp_axis(700.0, 128.0, 800.0), 672.0);
    }

    #[test]
    fn clamp_axis_snaps_near_edge() {
        assert_eq!(clamp_axis(-3.0, 128.0, 800.0), 0.0);
    }

    #[test]
    fn clamp_axis_leaves_inside_alone() {
        assert_eq!(clamp_axis(10.5, 128.0, 800.0), 10.5);
    }

    #[test]
    fn clamp_axis_oversized_rect_prefers_far_edge() {
        assert_eq!(clamp_axis(0.0, 128.0, 100.0), -28.0);
    }
}

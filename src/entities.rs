//! All game entity types: pure data, no per-frame logic.

// ── Appearance ────────────────────────────────────────────────────────────────

/// An 8-bit-per-channel colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0x00, 0x00, 0x00, 0xFF);
    pub const WHITE: Rgba = Rgba::new(0xFF, 0xFF, 0xFF, 0xFF);
    pub const RED: Rgba = Rgba::new(0xFF, 0x00, 0x00, 0xFF);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Opaque handle to an image held by the platform's asset store.
///
/// Entities copy the handle; the pixels themselves are never owned here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpriteId(pub u32);

// ── Shared geometry ───────────────────────────────────────────────────────────

/// A moving, drawable rectangle. Embedded by both `Player` and `Bullet`.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    /// Top-left corner, window units (+x right, +y down).
    pub x: f32,
    pub y: f32,
    /// Added to the position once per simulation step.
    pub dx: f32,
    pub dy: f32,
    /// Fixed at creation.
    pub width: f32,
    pub height: f32,
    /// Only used when `sprite` is `None`.
    pub color: Rgba,
    pub sprite: Option<SpriteId>,
}

impl Entity {
    pub fn new(width: f32, height: f32, color: Rgba) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            dx: 0.0,
            dy: 0.0,
            width,
            height,
            color,
            sprite: None,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

/// Size of a freshly constructed player before spawn.
pub const PLAYER_DEFAULT_WIDTH: f32 = 100.0;
pub const PLAYER_DEFAULT_HEIGHT: f32 = 50.0;

/// Size the player takes on when spawned into a window.
pub const PLAYER_SIZE: f32 = 128.0;

/// Left edge of the player at spawn.
pub const PLAYER_SPAWN_X: f32 = 100.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub entity: Entity,
    /// Reserved: nothing reads or changes it yet.
    pub health: i32,
    /// Steps left before the next shot is allowed. Firing requires exactly 0.
    pub reload: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            entity: Entity::new(PLAYER_DEFAULT_WIDTH, PLAYER_DEFAULT_HEIGHT, Rgba::WHITE),
            health: 0,
            reload: 0,
        }
    }
}

impl Player {
    /// A player resized to `PLAYER_SIZE` and vertically centred in a window
    /// of the given height.
    pub fn spawn(window_height: u32, sprite: Option<SpriteId>) -> Self {
        let mut player = Player::default();
        player.entity.width = PLAYER_SIZE;
        player.entity.height = PLAYER_SIZE;
        player.entity.x = PLAYER_SPAWN_X;
        player.entity.y = (window_height as f32 - PLAYER_SIZE) / 2.0;
        player.entity.sprite = sprite;
        player
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

pub const BULLET_SIZE: f32 = 10.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub entity: Entity,
}

impl Default for Bullet {
    fn default() -> Self {
        Self {
            entity: Entity::new(BULLET_SIZE, BULLET_SIZE, Rgba::RED),
        }
    }
}

impl Bullet {
    /// A bullet sitting on the shooter's right edge, vertically centred,
    /// travelling right at a speed equal to its own width.
    pub fn fired_from(shooter: &Entity) -> Self {
        let mut bullet = Bullet::default();
        let e = &mut bullet.entity;
        e.x = shooter.x + shooter.width - e.width;
        e.y = shooter.y + shooter.height / 2.0 - e.height / 2.0;
        e.dx = e.width;
        e.dy = 0.0;
        bullet
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything the simulation and renderer need. Owned by the game loop.
/// Cloneable so pure update functions can return a new copy.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    /// Insertion order is render order.
    pub bullets: Vec<Bullet>,
    /// Current window size in units.
    pub width: u32,
    pub height: u32,
    /// Simulation steps run so far.
    pub frame: u64,
}

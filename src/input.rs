//! Input State: level-triggered control flags plus window lifecycle flags,
//! updated from platform events.

use serde::Deserialize;
use tracing::{debug, info};

use crate::entities::GameState;
use crate::platform::Platform;

// ── Platform events ───────────────────────────────────────────────────────────

/// Physical keys the game can tell apart. Anything else arrives as `Other`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Escape,
    Up,
    Down,
    Left,
    Right,
    Space,
    Enter,
    LeftControl,
    Char(char),
    #[serde(skip)]
    Other,
}

impl Key {
    /// The form key events arrive in: letters lowercased, `' '` as `Space`.
    pub fn normalized(self) -> Key {
        match self {
            Key::Char(' ') => Key::Space,
            Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
            other => other,
        }
    }
}

/// One entry from the platform's event queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlatformEvent {
    Quit,
    KeyDown { key: Key, repeat: bool },
    KeyUp { key: Key, repeat: bool },
    WindowResized,
    WindowMinimized,
    WindowMaximized,
    WindowRestored,
}

/// Which key fires. Movement and Escape are fixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyBindings {
    pub fire: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self { fire: Key::Space }
    }
}

// ── Flags ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    /// Terminal: once set the loop ends at the next iteration boundary.
    pub closed: bool,
    /// Set when a resize arrived during the most recent drain.
    pub resized: bool,
    pub minimized: bool,
}

/// Apply a single event to the flags. Repeat key events and unknown keys
/// leave everything untouched.
pub fn apply_event(input: &mut InputState, event: &PlatformEvent, bindings: &KeyBindings) {
    match *event {
        PlatformEvent::Quit => input.closed = true,
        PlatformEvent::KeyDown { key, repeat } => {
            if !repeat {
                apply_key(input, key, true, bindings);
            }
        }
        PlatformEvent::KeyUp { key, repeat } => {
            if !repeat {
                apply_key(input, key, false, bindings);
            }
        }
        PlatformEvent::WindowResized => input.resized = true,
        PlatformEvent::WindowMinimized => input.minimized = true,
        PlatformEvent::WindowMaximized | PlatformEvent::WindowRestored => {
            input.minimized = false
        }
    }
}

fn apply_key(input: &mut InputState, key: Key, down: bool, bindings: &KeyBindings) {
    match key {
        Key::Escape => {
            if down {
                input.closed = true;
            }
        }
        Key::Up => input.up = down,
        Key::Down => input.down = down,
        Key::Left => input.left = down,
        Key::Right => input.right = down,
        _ => {}
    }
    // The fire binding may share a key with a fixed action; both apply.
    if key == bindings.fire {
        input.fire = down;
    }
}

/// Drain every pending platform event into `input`. A resize reads the
/// current window size back from the platform into `state`.
pub fn process_input<P: Platform>(
    platform: &mut P,
    input: &mut InputState,
    state: &mut GameState,
    bindings: &KeyBindings,
) {
    input.resized = false;
    let was_minimized = input.minimized;

    while let Some(event) = platform.poll_event() {
        apply_event(input, &event, bindings);
        if event == PlatformEvent::WindowResized {
            let (width, height) = platform.window_size();
            debug!(width, height, "window resized");
            state.width = width;
            state.height = height;
        }
    }

    if input.minimized != was_minimized {
        info!(minimized = input.minimized, "window visibility changed");
    }
}

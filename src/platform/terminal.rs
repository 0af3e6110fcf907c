//! crossterm backend: the terminal plays the part of the game window.
//!
//! One terminal cell is `CELL_WIDTH` × `CELL_HEIGHT` window units and shows
//! two stacked frame-buffer pixels through the upper-half-block glyph.

use std::collections::{HashMap, VecDeque};
use std::io::{self, BufWriter, Stdout, Write};
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, ModifierKeyCode, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Colors, Print},
    terminal, ExecutableCommand, QueueableCommand,
};
use tracing::{debug, info, warn};

use super::framebuffer::{FrameBuffer, PIXEL_SIZE};
use super::{AssetError, AssetLoader, Canvas, Platform, Rect};
use crate::config::WindowConfig;
use crate::entities::{Rgba, SpriteId};
use crate::input::{Key, PlatformEvent};

pub const CELL_WIDTH: u32 = PIXEL_SIZE as u32;
pub const CELL_HEIGHT: u32 = 2 * PIXEL_SIZE as u32;

// ── Key-hold emulation ────────────────────────────────────────────────────────

/// How long a freshly pressed key counts as held without hearing from it
/// again. Covers the OS delay before auto-repeat starts.
const HOLD_INITIAL: Duration = Duration::from_millis(600);

/// How long an auto-repeating key stays held between repeats.
const HOLD_REPEAT: Duration = Duration::from_millis(150);

struct Held {
    last_seen: Instant,
    repeating: bool,
}

/// Turns crossterm key events into down/up transitions.
///
/// Terminals speaking the keyboard-enhancement protocol report press, repeat
/// and release directly. Classic terminals only send presses (auto-repeat
/// shows up as more presses), so a key counts as held while its presses keep
/// arriving and gets a synthetic release once they stop.
pub struct KeyTracker {
    enhanced: bool,
    held: HashMap<Key, Held>,
}

impl KeyTracker {
    pub fn new(enhanced: bool) -> Self {
        Self {
            enhanced,
            held: HashMap::new(),
        }
    }

    pub fn on_key(&mut self, key: Key, kind: KeyEventKind, now: Instant) -> PlatformEvent {
        if self.enhanced {
            return match kind {
                KeyEventKind::Press => PlatformEvent::KeyDown { key, repeat: false },
                KeyEventKind::Repeat => PlatformEvent::KeyDown { key, repeat: true },
                KeyEventKind::Release => PlatformEvent::KeyUp { key, repeat: false },
            };
        }

        if kind == KeyEventKind::Release {
            self.held.remove(&key);
            return PlatformEvent::KeyUp { key, repeat: false };
        }
        match self.held.get_mut(&key) {
            Some(held) => {
                held.last_seen = now;
                held.repeating = true;
                PlatformEvent::KeyDown { key, repeat: true }
            }
            None => {
                self.held.insert(
                    key,
                    Held {
                        last_seen: now,
                        repeating: false,
                    },
                );
                PlatformEvent::KeyDown { key, repeat: false }
            }
        }
    }

    /// Synthetic releases for keys that went quiet. Always empty when the
    /// terminal reports releases itself.
    pub fn expire(&mut self, now: Instant) -> Vec<PlatformEvent> {
        let mut released = Vec::new();
        self.held.retain(|&key, held| {
            let window = if held.repeating { HOLD_REPEAT } else { HOLD_INITIAL };
            if now.saturating_duration_since(held.last_seen) > window {
                released.push(PlatformEvent::KeyUp { key, repeat: false });
                false
            } else {
                true
            }
        });
        released
    }
}

pub fn translate_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Esc => Key::Escape,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Enter => Key::Enter,
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Char(c) => Key::Char(c.to_ascii_lowercase()),
        KeyCode::Modifier(ModifierKeyCode::LeftControl) => Key::LeftControl,
        _ => Key::Other,
    }
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Map one crossterm event onto the platform's event vocabulary. A resize
/// also resizes `frame` to match the new cell grid.
pub fn translate_event(
    keys: &mut KeyTracker,
    frame: &mut FrameBuffer,
    event: Event,
    now: Instant,
) -> Option<PlatformEvent> {
    match event {
        Event::Key(key) if is_interrupt(&key) => {
            (key.kind != KeyEventKind::Release).then_some(PlatformEvent::Quit)
        }
        Event::Key(key) => Some(keys.on_key(translate_key(key.code), key.kind, now)),
        Event::Resize(cols, rows) => {
            let (w, h) = frame_for_cells(cols, rows);
            frame.resize(w, h);
            Some(PlatformEvent::WindowResized)
        }
        Event::FocusLost => Some(PlatformEvent::WindowMinimized),
        Event::FocusGained => Some(PlatformEvent::WindowRestored),
        _ => None,
    }
}

// ── Presentation ──────────────────────────────────────────────────────────────

fn to_color(c: Rgba) -> Color {
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// Queue one whole frame between synchronized-update markers and flush it.
pub fn write_frame<W: Write>(out: &mut W, frame: &FrameBuffer) -> io::Result<()> {
    out.queue(terminal::BeginSynchronizedUpdate)?;

    let rows: Vec<&[Rgba]> = frame.rows().collect();
    let mut current: Option<(Rgba, Rgba)> = None;
    for (cell_row, pair) in rows.chunks(2).enumerate() {
        out.queue(cursor::MoveTo(0, cell_row as u16))?;
        for x in 0..frame.width() {
            let top = pair[0][x];
            let bottom = pair.get(1).map_or(Rgba::BLACK, |row| row[x]);
            if current != Some((top, bottom)) {
                out.queue(style::SetColors(Colors::new(to_color(top), to_color(bottom))))?;
                current = Some((top, bottom));
            }
            out.queue(Print('▀'))?;
        }
    }

    out.queue(style::ResetColor)?;
    out.queue(terminal::EndSynchronizedUpdate)?;
    out.flush()
}

/// A `FrameBuffer` that presents to a terminal writer at a capped rate.
pub struct TerminalCanvas<W: Write> {
    frame: FrameBuffer,
    out: W,
    frame_interval: Duration,
    last_present: Instant,
}

impl<W: Write> TerminalCanvas<W> {
    pub fn new(out: W, frame: FrameBuffer, frame_interval: Duration) -> Self {
        Self {
            frame,
            out,
            frame_interval,
            last_present: Instant::now(),
        }
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut FrameBuffer {
        &mut self.frame
    }

    pub fn writer(&self) -> &W {
        &self.out
    }
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    fn clear(&mut self, color: Rgba) {
        self.frame.clear(color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.frame.fill_rect(rect, color);
    }

    fn draw_sprite(&mut self, sprite: SpriteId, rect: Rect) {
        self.frame.draw_sprite(sprite, rect);
    }

    fn present(&mut self) -> io::Result<()> {
        self.frame.present()?;
        write_frame(&mut self.out, &self.frame)?;

        if let Some(rest) = self.frame_interval.checked_sub(self.last_present.elapsed()) {
            thread::sleep(rest);
        }
        self.last_present = Instant::now();
        Ok(())
    }
}

// ── Platform ──────────────────────────────────────────────────────────────────

fn frame_for_cells(cols: u16, rows: u16) -> (usize, usize) {
    (cols as usize, rows as usize * 2)
}

/// How long the first poll of a drain may block. Nothing is presented while
/// the terminal is unfocused, so the wait there stands in for the frame sleep.
fn first_poll_timeout(unfocused: bool, frame_interval: Duration) -> Duration {
    if unfocused {
        frame_interval
    } else {
        Duration::ZERO
    }
}

/// Owns the terminal for the life of the game. Dropping it restores the
/// terminal even if `shutdown` was never reached.
pub struct TerminalPlatform {
    canvas: TerminalCanvas<BufWriter<Stdout>>,
    keys: KeyTracker,
    pending: VecDeque<PlatformEvent>,
    pumped: bool,
    cols: u16,
    rows: u16,
    unfocused: bool,
    active: bool,
}

impl TerminalPlatform {
    /// Take over the terminal and size it to the requested window.
    pub fn startup(config: &WindowConfig) -> io::Result<Self> {
        terminal::enable_raw_mode()?;

        let mut platform = Self {
            canvas: TerminalCanvas::new(
                BufWriter::new(io::stdout()),
                FrameBuffer::new(0, 0),
                config.frame_interval(),
            ),
            keys: KeyTracker::new(false),
            pending: VecDeque::new(),
            pumped: false,
            cols: 0,
            rows: 0,
            unfocused: false,
            active: true,
        };
        // From here on an early return drops `platform`, which restores the terminal.

        let out = &mut platform.canvas.out;
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;
        out.execute(EnableFocusChange)?;
        out.execute(terminal::SetTitle(&config.title))?;

        // Request key-release (and key-repeat) events from the terminal.
        // Terminals that don't speak the protocol fall back to hold emulation.
        let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
            && out
                .execute(PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                        | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES,
                ))
                .is_ok();
        platform.keys = KeyTracker::new(enhanced);

        let want_cols = (config.width / CELL_WIDTH).clamp(1, u16::MAX as u32) as u16;
        let want_rows = (config.height / CELL_HEIGHT).clamp(1, u16::MAX as u32) as u16;
        if let Err(err) = platform.canvas.out.execute(terminal::SetSize(want_cols, want_rows)) {
            debug!(%err, "terminal refused resize");
        }

        let (cols, rows) = terminal::size()?;
        platform.set_cells(cols, rows);
        info!(cols, rows, enhanced, "terminal ready");
        Ok(platform)
    }

    /// Hand the terminal back.
    pub fn shutdown(mut self) {
        self.restore();
    }

    fn restore(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;

        let out = &mut self.canvas.out;
        if self.keys.enhanced {
            let _ = out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = out.execute(style::ResetColor);
        let _ = out.execute(DisableFocusChange);
        let _ = out.execute(cursor::Show);
        let _ = out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }

    fn set_cells(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        let (w, h) = frame_for_cells(cols, rows);
        self.canvas.frame_mut().resize(w, h);
    }

    fn translate(&mut self, event: Event, now: Instant) -> Option<PlatformEvent> {
        if let Event::Resize(cols, rows) = event {
            self.cols = cols;
            self.rows = rows;
        }
        let translated = translate_event(&mut self.keys, self.canvas.frame_mut(), event, now);
        match translated {
            Some(PlatformEvent::WindowMinimized) => self.unfocused = true,
            Some(PlatformEvent::WindowRestored) => self.unfocused = false,
            _ => {}
        }
        translated
    }

    /// Pull everything crossterm has ready. Only blocks while unfocused.
    fn pump(&mut self) {
        let mut timeout = first_poll_timeout(self.unfocused, self.canvas.frame_interval);
        loop {
            let ready = event::poll(timeout);
            timeout = Duration::ZERO;
            let now = Instant::now();
            match ready {
                Ok(true) => match event::read() {
                    Ok(raw) => {
                        if let Some(ev) = self.translate(raw, now) {
                            self.pending.push_back(ev);
                        }
                    }
                    Err(err) => {
                        warn!(%err, "reading terminal event failed");
                        break;
                    }
                },
                Ok(false) => break,
                Err(err) => {
                    warn!(%err, "polling terminal events failed");
                    break;
                }
            }
        }
        let released = self.keys.expire(Instant::now());
        self.pending.extend(released);
    }
}

impl Drop for TerminalPlatform {
    fn drop(&mut self) {
        self.restore();
    }
}

impl Platform for TerminalPlatform {
    type Canvas = TerminalCanvas<BufWriter<Stdout>>;

    fn poll_event(&mut self) -> Option<PlatformEvent> {
        // One pump per drain: the drain ends when this returns `None`.
        if self.pending.is_empty() && !self.pumped {
            self.pump();
            self.pumped = true;
        }
        let event = self.pending.pop_front();
        if event.is_none() {
            self.pumped = false;
        }
        event
    }

    fn window_size(&self) -> (u32, u32) {
        (self.cols as u32 * CELL_WIDTH, self.rows as u32 * CELL_HEIGHT)
    }

    fn canvas(&mut self) -> &mut Self::Canvas {
        &mut self.canvas
    }
}

impl AssetLoader for TerminalPlatform {
    fn load_sprite(&mut self, path: &Path) -> Result<SpriteId, AssetError> {
        let image = image::open(path)?.to_rgba8();
        debug!(path = %path.display(), width = image.width(), height = image.height(), "sprite loaded");
        Ok(self.canvas.frame_mut().add_sprite(image))
    }
}

/// Translation of terminal key events into demo input
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use wireship_core::{InputEvent, Key};

/// Without release events a freshly pressed key counts as held this long.
/// Covers the delay before auto-repeat starts (660 ms on X11 by default).
pub const INITIAL_HOLD: Duration = Duration::from_millis(1000);

/// Once auto-repeat is running, a key is up when repeats stop for this long
pub const REPEAT_HOLD: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy)]
struct HeldKey {
    last_seen: Instant,
    repeating: bool,
}

impl HeldKey {
    fn window(&self) -> Duration {
        if self.repeating {
            REPEAT_HOLD
        } else {
            INITIAL_HOLD
        }
    }
}

/// Tracks which keys are down and turns presses into key-down events.
///
/// Terminals that support the keyboard enhancement protocol report releases
/// and repeats explicitly. Others only send presses, repeated while the key
/// stays down, so holding is inferred from how recent the last press was.
#[derive(Debug)]
pub struct KeyTracker {
    reports_release: bool,
    held: HashMap<Key, HeldKey>,
}

impl KeyTracker {
    pub fn new(reports_release: bool) -> Self {
        Self {
            reports_release,
            held: HashMap::new(),
        }
    }

    /// Feed one terminal event; returns the discrete event it produces, if any
    pub fn handle(&mut self, event: &Event, now: Instant) -> Option<InputEvent> {
        match event {
            Event::Key(key_event) => self.handle_key(key_event, now),
            Event::FocusLost => {
                // Releases that happen while unfocused never arrive
                self.held.clear();
                None
            }
            _ => None,
        }
    }

    fn handle_key(&mut self, event: &KeyEvent, now: Instant) -> Option<InputEvent> {
        if event.kind == KeyEventKind::Press && is_close_request(event) {
            return Some(InputEvent::QuitRequested);
        }

        let key = map_key(event.code)?;
        match event.kind {
            KeyEventKind::Press => {
                let repeat = self.is_held(key, now);
                self.held.insert(
                    key,
                    HeldKey {
                        last_seen: now,
                        repeating: repeat,
                    },
                );
                (!repeat).then_some(InputEvent::KeyDown(key))
            }
            KeyEventKind::Repeat => {
                self.held.insert(
                    key,
                    HeldKey {
                        last_seen: now,
                        repeating: true,
                    },
                );
                None
            }
            KeyEventKind::Release => {
                self.held.remove(&key);
                None
            }
        }
    }

    pub fn is_held(&self, key: Key, now: Instant) -> bool {
        match self.held.get(&key) {
            Some(_) if self.reports_release => true,
            Some(held) => now.saturating_duration_since(held.last_seen) < held.window(),
            None => false,
        }
    }
}

/// Esc and Ctrl+C stand in for closing the window
fn is_close_request(event: &KeyEvent) -> bool {
    match event.code {
        KeyCode::Esc => true,
        KeyCode::Char('c') | KeyCode::Char('C') => event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(c) => Some(Key::Char(c.to_ascii_lowercase())),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        _ => None,
    }
}

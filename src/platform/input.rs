//! Keyboard input
//!
//! Browser key handlers write into `KeyboardState` whenever events arrive.
//! Once per tick the frame driver samples it into a `TickInput`; fire goes
//! through `EdgeTracker` so a held key only shoots on the tick it went down.

use std::collections::HashSet;

use crate::sim::TickInput;

/// Logical game keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Fire,
}

impl Key {
    const ALL: [Key; 5] = [Key::Left, Key::Right, Key::Up, Key::Down, Key::Fire];

    /// Lowercased DOM `KeyboardEvent.key` values bound to this key
    pub fn bindings(self) -> &'static [&'static str] {
        match self {
            Key::Left => &["arrowleft", "a"],
            Key::Right => &["arrowright", "d"],
            Key::Up => &["arrowup", "w"],
            Key::Down => &["arrowdown", "s"],
            Key::Fire => &[" ", "space", "spacebar"],
        }
    }

    /// Map a DOM `KeyboardEvent.key` value; arrows and WASD are synonyms
    pub fn from_dom_key(key: &str) -> Option<Self> {
        let key = key.to_lowercase();
        Key::ALL
            .into_iter()
            .find(|k| k.bindings().contains(&key.as_str()))
    }
}

/// Physical keys currently held down, by lowercased DOM key name.
/// Synonyms are tracked separately: releasing `a` leaves ArrowLeft held.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<String>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the mapped key so callers can suppress browser defaults for it
    pub fn key_down(&mut self, dom_key: &str) -> Option<Key> {
        let key = Key::from_dom_key(dom_key)?;
        self.held.insert(dom_key.to_lowercase());
        Some(key)
    }

    pub fn key_up(&mut self, dom_key: &str) -> Option<Key> {
        let key = Key::from_dom_key(dom_key)?;
        self.held.remove(&dom_key.to_lowercase());
        Some(key)
    }

    /// Drop everything, e.g. when the window loses focus and key-ups go missing
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// True while any key bound to `key` is down
    pub fn is_held(&self, key: Key) -> bool {
        key.bindings().iter().any(|b| self.held.contains(*b))
    }

    /// Build this tick's input. Only `edges` is updated.
    pub fn sample(&self, edges: &mut EdgeTracker) -> TickInput {
        TickInput {
            left: self.is_held(Key::Left),
            right: self.is_held(Key::Right),
            up: self.is_held(Key::Up),
            down: self.is_held(Key::Down),
            fire: edges.pressed_once(Key::Fire, self.is_held(Key::Fire)),
        }
    }
}

/// Per-key previous-state cache for press-edge detection
#[derive(Debug, Clone, Default)]
pub struct EdgeTracker {
    latched: HashSet<Key>,
}

impl EdgeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// True only on the first sample where `key` is down after being up
    pub fn pressed_once(&mut self, key: Key, down: bool) -> bool {
        if down {
            self.latched.insert(key)
        } else {
            self.latched.remove(&key);
            false
        }
    }
}

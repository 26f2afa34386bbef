use std::collections::HashMap;

use crate::input::queue::InputEvent;

/// A keyboard key, identified the way the DOM's `KeyboardEvent.key` names it.
///
/// Printable keys keep their case (`"a"` and `"A"` are different keys), so
/// games decide themselves whether Shift matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Space,
    Char(char),
    /// Any named key the engine has no use for (Shift, Tab, F5, ...).
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` string.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            " " | "Spacebar" => Key::Space,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Other,
                }
            }
        }
    }
}

/// Held/released state per key, folded from key events.
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    pressed: HashMap<Key, bool>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one input event into the state. Returns `true` for a key-down.
    pub fn apply(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::KeyDown { key } => {
                self.pressed.insert(key, true);
                true
            }
            InputEvent::KeyUp { key } => {
                self.pressed.insert(key, false);
                false
            }
            InputEvent::Custom { .. } => false,
        }
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.pressed.get(&key).copied().unwrap_or(false)
    }

    /// Whether any of the given keys is held.
    pub fn any_down(&self, keys: &[Key]) -> bool {
        keys.iter().any(|&k| self.is_down(k))
    }

    /// Release every key.
    pub fn clear(&mut self) {
        self.pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_names_map_to_keys() {
        assert_eq!(Key::from_dom("ArrowLeft"), Key::ArrowLeft);
        assert_eq!(Key::from_dom("ArrowUp"), Key::ArrowUp);
        assert_eq!(Key::from_dom(" "), Key::Space);
        assert_eq!(Key::from_dom("a"), Key::Char('a'));
        assert_eq!(Key::from_dom("D"), Key::Char('D'));
        assert_eq!(Key::from_dom("Shift"), Key::Other);
        assert_eq!(Key::from_dom(""), Key::Other);
    }

    #[test]
    fn press_and_release() {
        let mut keys = KeyState::new();
        assert!(keys.apply(&InputEvent::KeyDown { key: Key::Char('w') }));
        assert!(keys.is_down(Key::Char('w')));
        assert!(!keys.is_down(Key::Char('W')));

        assert!(!keys.apply(&InputEvent::KeyUp { key: Key::Char('w') }));
        assert!(!keys.is_down(Key::Char('w')));
    }

    #[test]
    fn any_down_and_clear() {
        let mut keys = KeyState::new();
        keys.apply(&InputEvent::KeyDown { key: Key::Space });
        assert!(keys.any_down(&[Key::ArrowUp, Key::Space]));
        assert!(!keys.any_down(&[Key::ArrowLeft]));
        keys.clear();
        assert!(!keys.any_down(&[Key::Space]));
    }

    #[test]
    fn custom_events_leave_keys_alone() {
        let mut keys = KeyState::new();
        assert!(!keys.apply(&InputEvent::Custom { kind: 1, a: 0.0, b: 0.0, c: 0.0 }));
        assert!(!keys.is_down(Key::Other));
    }
}

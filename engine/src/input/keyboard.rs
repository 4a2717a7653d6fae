//! Keyboard Input Module
//!
//! Contains keyboard state tracking for the flight and fire keys.
//! Decoupled from any windowing system to use generic key codes.

use std::collections::HashSet;

/// Generic key codes, independent of windowing system.
///
/// Letter keys are physical keys, so `A` covers both the lower and upper
/// case character a browser or terminal would report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Flight keys
    A,
    D,
    W,
    S,
    Space,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Control keys
    Enter,
    Escape,
    ShiftLeft,
    ShiftRight,

    /// Catch-all for unhandled keys
    Unknown,
}

impl KeyCode {
    /// Map a DOM-style key name (`"ArrowLeft"`, `"a"`, `"A"`, `" "`) to a key code.
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "a" | "A" => KeyCode::A,
            "d" | "D" => KeyCode::D,
            "w" | "W" => KeyCode::W,
            "s" | "S" => KeyCode::S,
            " " | "Space" | "Spacebar" => KeyCode::Space,
            "ArrowUp" => KeyCode::ArrowUp,
            "ArrowDown" => KeyCode::ArrowDown,
            "ArrowLeft" => KeyCode::ArrowLeft,
            "ArrowRight" => KeyCode::ArrowRight,
            "Enter" => KeyCode::Enter,
            "Escape" => KeyCode::Escape,
            "Shift" | "ShiftLeft" => KeyCode::ShiftLeft,
            "ShiftRight" => KeyCode::ShiftRight,
            _ => KeyCode::Unknown,
        }
    }
}

/// Complete keyboard state tracking.
///
/// Remembers which keys are currently held so continuous movement works
/// while a key stays down. Key events are pushed in by the host; the
/// simulation only ever polls.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: HashSet<KeyCode>,
}

impl KeyboardState {
    /// Create a new keyboard state with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press or release event.
    ///
    /// Returns `true` if the held state of the key changed.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        if key == KeyCode::Unknown {
            return false;
        }
        if pressed {
            self.pressed.insert(key)
        } else {
            self.pressed.remove(&key)
        }
    }

    /// Check whether a key is currently held.
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// Set of currently held keys.
    pub fn pressed_keys(&self) -> &HashSet<KeyCode> {
        &self.pressed
    }

    /// Release every key (e.g. when the window loses focus).
    pub fn reset(&mut self) {
        self.pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_default() {
        let keys = KeyboardState::new();
        assert!(keys.pressed_keys().is_empty());
        assert!(!keys.is_pressed(KeyCode::ArrowLeft));
    }

    #[test]
    fn test_press_and_release() {
        let mut keys = KeyboardState::new();
        assert!(keys.handle_key(KeyCode::ArrowLeft, true));
        assert!(keys.is_pressed(KeyCode::ArrowLeft));

        // Auto-repeat press does not change state
        assert!(!keys.handle_key(KeyCode::ArrowLeft, true));

        assert!(keys.handle_key(KeyCode::ArrowLeft, false));
        assert!(!keys.is_pressed(KeyCode::ArrowLeft));
    }

    #[test]
    fn test_unknown_key_ignored() {
        let mut keys = KeyboardState::new();
        assert!(!keys.handle_key(KeyCode::Unknown, true));
        assert!(keys.pressed_keys().is_empty());
    }

    #[test]
    fn test_key_names_case_insensitive_letters() {
        assert_eq!(KeyCode::from_key_name("a"), KeyCode::A);
        assert_eq!(KeyCode::from_key_name("A"), KeyCode::A);
        assert_eq!(KeyCode::from_key_name("D"), KeyCode::D);
        assert_eq!(KeyCode::from_key_name(" "), KeyCode::Space);
        assert_eq!(KeyCode::from_key_name("ArrowRight"), KeyCode::ArrowRight);
        assert_eq!(KeyCode::from_key_name("F13"), KeyCode::Unknown);
    }
}

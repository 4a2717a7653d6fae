//! Input Bindings Module
//!
//! Maps physical keys to the logical flight actions. Several keys may drive
//! the same action (arrow keys and A/D both steer), but a key drives at most
//! one action.

use std::collections::{HashMap, HashSet};

use super::KeyCode;

/// Logical input actions polled by the simulation once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Slide the craft toward -x (default: ArrowLeft, A)
    MoveLeft,
    /// Slide the craft toward +x (default: ArrowRight, D)
    MoveRight,
    /// Fire a laser, rate limited by the weapon cooldown (default: Space)
    Fire,
}

impl InputAction {
    /// Every action, in a fixed order.
    pub const ALL: [InputAction; 3] = [
        InputAction::MoveLeft,
        InputAction::MoveRight,
        InputAction::Fire,
    ];
}

/// Maps physical keys to logical actions.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    /// Map from physical key to logical action
    key_to_action: HashMap<KeyCode, InputAction>,
    /// Map from logical action to its physical keys (for reverse lookup and display)
    action_to_keys: HashMap<InputAction, Vec<KeyCode>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindings {
    /// Create a new KeyBindings instance with default key mappings.
    ///
    /// Default bindings:
    /// - ArrowLeft, A = MoveLeft
    /// - ArrowRight, D = MoveRight
    /// - Space = Fire
    pub fn new() -> Self {
        let mut bindings = Self::empty();

        bindings.bind(KeyCode::ArrowLeft, InputAction::MoveLeft);
        bindings.bind(KeyCode::A, InputAction::MoveLeft);
        bindings.bind(KeyCode::ArrowRight, InputAction::MoveRight);
        bindings.bind(KeyCode::D, InputAction::MoveRight);
        bindings.bind(KeyCode::Space, InputAction::Fire);

        bindings
    }

    /// Create a binding table with nothing bound.
    pub fn empty() -> Self {
        Self {
            key_to_action: HashMap::new(),
            action_to_keys: HashMap::new(),
        }
    }

    /// Bind a physical key to a logical action.
    ///
    /// If the key was previously bound to another action, that binding is removed.
    /// Other keys already bound to `action` keep working.
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        self.unbind_key(key);
        self.key_to_action.insert(key, action);
        self.action_to_keys.entry(action).or_default().push(key);
    }

    /// Remove the binding for a specific key.
    pub fn unbind_key(&mut self, key: KeyCode) {
        if let Some(action) = self.key_to_action.remove(&key) {
            if let Some(keys) = self.action_to_keys.get_mut(&action) {
                keys.retain(|k| *k != key);
                if keys.is_empty() {
                    self.action_to_keys.remove(&action);
                }
            }
        }
    }

    /// Get the action bound to a physical key, if any.
    pub fn get_action(&self, key: KeyCode) -> Option<InputAction> {
        self.key_to_action.get(&key).copied()
    }

    /// Get the keys bound to a logical action.
    pub fn get_keys(&self, action: InputAction) -> &[KeyCode] {
        self.action_to_keys
            .get(&action)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Check if an action is active, given a set of pressed keys.
    ///
    /// Any one of the action's keys being held is enough.
    pub fn is_action_pressed(&self, action: InputAction, pressed_keys: &HashSet<KeyCode>) -> bool {
        self.get_keys(action)
            .iter()
            .any(|key| pressed_keys.contains(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::new();

        assert_eq!(bindings.get_action(KeyCode::ArrowLeft), Some(InputAction::MoveLeft));
        assert_eq!(bindings.get_action(KeyCode::A), Some(InputAction::MoveLeft));
        assert_eq!(bindings.get_action(KeyCode::ArrowRight), Some(InputAction::MoveRight));
        assert_eq!(bindings.get_action(KeyCode::D), Some(InputAction::MoveRight));
        assert_eq!(bindings.get_action(KeyCode::Space), Some(InputAction::Fire));
        assert_eq!(bindings.get_action(KeyCode::W), None);
    }

    #[test]
    fn test_reverse_lookup() {
        let bindings = KeyBindings::new();

        assert_eq!(
            bindings.get_keys(InputAction::MoveLeft),
            &[KeyCode::ArrowLeft, KeyCode::A]
        );
        assert_eq!(bindings.get_keys(InputAction::Fire), &[KeyCode::Space]);
    }

    #[test]
    fn test_rebind_key_moves_it() {
        let mut bindings = KeyBindings::new();

        bindings.bind(KeyCode::A, InputAction::Fire);

        assert_eq!(bindings.get_action(KeyCode::A), Some(InputAction::Fire));
        assert_eq!(bindings.get_keys(InputAction::MoveLeft), &[KeyCode::ArrowLeft]);
        assert_eq!(
            bindings.get_keys(InputAction::Fire),
            &[KeyCode::Space, KeyCode::A]
        );
    }

    #[test]
    fn test_unbind_last_key() {
        let mut bindings = KeyBindings::new();
        bindings.unbind_key(KeyCode::Space);
        assert!(bindings.get_keys(InputAction::Fire).is_empty());
    }

    #[test]
    fn test_is_action_pressed() {
        let bindings = KeyBindings::new();

        let mut pressed = HashSet::new();
        assert!(!bindings.is_action_pressed(InputAction::MoveLeft, &pressed));

        pressed.insert(KeyCode::A);
        assert!(bindings.is_action_pressed(InputAction::MoveLeft, &pressed));
        assert!(!bindings.is_action_pressed(InputAction::MoveRight, &pressed));

        pressed.clear();
        pressed.insert(KeyCode::ArrowLeft);
        assert!(bindings.is_action_pressed(InputAction::MoveLeft, &pressed));
    }
}

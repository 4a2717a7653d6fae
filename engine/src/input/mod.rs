//! Input Module
//!
//! Provides platform-agnostic input handling for the flight controls.
//! This module is decoupled from any windowing system: the host pushes key
//! events into a [`KeyboardState`], and the simulation polls logical actions
//! through the [`InputSource`] trait once per tick.
//!
//! # Example
//!
//! ```rust,ignore
//! use laser_strike_engine::input::{InputAction, InputSource, InputState, KeyCode};
//!
//! let mut input = InputState::new();
//! input.keyboard.handle_key(KeyCode::ArrowLeft, true);
//! assert!(input.is_active(InputAction::MoveLeft));
//! ```

pub mod bindings;
pub mod keyboard;

// Re-export commonly used types at module level
pub use bindings::{InputAction, KeyBindings};
pub use keyboard::{KeyCode, KeyboardState};

/// Read-only view of the current state of the logical actions.
///
/// Polled once per tick, never pushed.
pub trait InputSource {
    /// Whether `action` is currently held.
    fn is_active(&self, action: InputAction) -> bool;
}

/// Plain boolean action map.
///
/// Useful for scripted pilots and tests that do not care about physical keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionState {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
}

impl ActionState {
    /// All actions released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the held state of one action.
    pub fn set(&mut self, action: InputAction, active: bool) {
        match action {
            InputAction::MoveLeft => self.move_left = active,
            InputAction::MoveRight => self.move_right = active,
            InputAction::Fire => self.fire = active,
        }
    }

    /// Builder-style variant of [`set`](Self::set).
    pub fn with(mut self, action: InputAction, active: bool) -> Self {
        self.set(action, active);
        self
    }
}

impl InputSource for ActionState {
    fn is_active(&self, action: InputAction) -> bool {
        match action {
            InputAction::MoveLeft => self.move_left,
            InputAction::MoveRight => self.move_right,
            InputAction::Fire => self.fire,
        }
    }
}

/// Keyboard state combined with the bindings that interpret it.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keyboard: KeyboardState,
    pub bindings: KeyBindings,
}

impl InputState {
    /// Create a new input state with default bindings and no keys held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all input state to defaults, keeping the bindings.
    pub fn reset(&mut self) {
        self.keyboard.reset();
    }

    /// Snapshot the current action state.
    pub fn actions(&self) -> ActionState {
        let mut actions = ActionState::new();
        for action in InputAction::ALL {
            actions.set(action, self.is_active(action));
        }
        actions
    }
}

impl InputSource for InputState {
    fn is_active(&self, action: InputAction) -> bool {
        self.bindings
            .is_action_pressed(action, self.keyboard.pressed_keys())
    }
}

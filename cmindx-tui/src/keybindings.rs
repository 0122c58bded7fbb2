//! Key bindings for the dashboard.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Actions that can be triggered by key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Poll now instead of waiting for the next tick
    Refresh,
    ScrollUp,
    ScrollDown,
}

/// Key to action lookup table.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, Action>,
}

impl KeyBindings {
    /// Resolve a key press. Ctrl-C always quits.
    pub fn resolve(&self, key: KeyEvent) -> Option<Action> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Action::Quit);
        }
        self.bindings
            .get(&KeyEvent::new(key.code, key.modifiers))
            .copied()
    }

    pub fn bind(&mut self, key: KeyEvent, action: Action) {
        self.bindings.insert(key, action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = HashMap::new();

        bindings.insert(key('q'), Action::Quit);
        bindings.insert(key_code(KeyCode::Esc), Action::Quit);
        bindings.insert(key('r'), Action::Refresh);

        // vim style and arrows
        bindings.insert(key('k'), Action::ScrollUp);
        bindings.insert(key('j'), Action::ScrollDown);
        bindings.insert(key_code(KeyCode::Up), Action::ScrollUp);
        bindings.insert(key_code(KeyCode::Down), Action::ScrollDown);

        Self { bindings }
    }
}

fn key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

fn key_code(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

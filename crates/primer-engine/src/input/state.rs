use std::collections::HashSet;

use super::keys::{InputEvent, Key, KeyState};

/// Held-key state of the window, polled once per frame.
#[derive(Debug, Default)]
pub struct InputState {
    pub focused: bool,
    keys_down: HashSet<Key>,
}

impl InputState {
    pub fn apply_event(&mut self, ev: InputEvent) {
        match ev {
            InputEvent::Focused(focused) => {
                self.focused = focused;
                // Releases are not delivered while unfocused.
                if !focused {
                    self.keys_down.clear();
                }
            }
            InputEvent::Key { key, state: KeyState::Pressed, .. } => {
                self.keys_down.insert(key);
            }
            InputEvent::Key { key, state: KeyState::Released, .. } => {
                self.keys_down.remove(&key);
            }
        }
    }

    /// True while `key` is held.
    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

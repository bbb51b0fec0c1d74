//! Keyboard and focus input.
//!
//! The runtime translates winit events (`platform::winit`) into `InputEvent`s
//! and folds them into an `InputState`, which the frame loop polls.

mod keys;
mod state;

pub(crate) mod platform {
    pub(crate) mod winit;
}

pub use keys::{InputEvent, Key, KeyState};
pub use state::InputState;

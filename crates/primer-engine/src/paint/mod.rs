//! Color model used for clear values.

pub mod color;

pub use color::Color;

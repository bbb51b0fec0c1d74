//! Primer engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the demo programs:
//! shader compilation and linking, mesh upload, and the frame loop that draws
//! one mesh per frame until the window closes.

pub mod device;
pub mod window;
pub mod input;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;

pub mod shader;
pub mod program;
pub mod mesh;
pub mod frame;

//! Coordinate types shared by the frame loop and the draw pass.
//!
//! Viewports are expressed in physical pixels, matching the size reported
//! by the window system in resize notifications.

mod viewport;

pub use viewport::Viewport;

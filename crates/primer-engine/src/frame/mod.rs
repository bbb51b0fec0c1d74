//! Frame loop.
//!
//! Intended usage:
//! - one `FrameLoop` per window
//! - forward resize notifications with `resize`
//! - call `step` once per redraw; encode the returned `FramePlan`, or stop
//!   when it returns `None`

mod frame_loop;

pub use frame_loop::{CloseReason, FrameLoop, FrameLoopConfig, FramePlan, LoopState};

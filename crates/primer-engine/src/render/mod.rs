//! GPU rendering subsystem.
//!
//! One pass per frame: clear the color target, set the viewport, bind the
//! program and the mesh, issue the mesh's draw call.

mod ctx;
mod pass;

pub use ctx::RenderCtx;
pub use pass::{encode_frame, RenderTarget};

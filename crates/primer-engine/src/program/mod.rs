//! Program linker.
//!
//! `link` checks that a vertex and a fragment unit fit together and produces
//! a [`LinkedProgram`]; `Program` realizes a linked program as a wgpu render
//! pipeline. `build` runs the whole compile + link sequence.

mod link;
mod pipeline;

pub use link::{build, link, BuildError, LinkError, LinkedProgram, StageCode};
pub use pipeline::Program;

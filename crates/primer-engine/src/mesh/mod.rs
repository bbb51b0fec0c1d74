//! Mesh uploader.
//!
//! `MeshData` is the validated CPU-side geometry; `Mesh` is its write-once
//! GPU copy (vertex buffer, optional index buffer, draw call). Vertices are
//! bare positions bound to attribute slot 0.

mod buffer;
mod data;
mod layout;

pub use buffer::Mesh;
pub use data::{DrawCall, MeshData, MeshError};
pub use layout::Position;

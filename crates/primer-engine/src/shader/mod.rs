//! Shader unit builder.
//!
//! Turns stage-tagged WGSL text into compiled [`ShaderUnit`]s or a bounded
//! [`DiagnosticLog`]. Units carry their stage interface so the program linker
//! can check that the stages agree before any GPU object exists.

mod compile;
mod diagnostic;
mod interface;
mod source;

pub use compile::{compile, CompileError, ShaderUnit};
pub use diagnostic::DiagnosticLog;
pub use interface::{ComponentKind, IoType, StageInterface, Varying};
pub use source::{ShaderSource, ShaderStage};

use std::fmt;

use super::diagnostic::DiagnosticLog;
use super::interface::{stage_interface, StageInterface};
use super::source::{ShaderSource, ShaderStage};

/// A compiled shader stage, ready to be handed to the linker.
///
/// Units are move-only and are consumed by [`crate::program::link`]; they have
/// no use once a link has been attempted.
#[derive(Debug)]
pub struct ShaderUnit {
    source: ShaderSource,
    entry_point: String,
    interface: StageInterface,
}

impl ShaderUnit {
    #[inline]
    pub fn stage(&self) -> ShaderStage {
        self.source.stage()
    }

    #[inline]
    pub fn source(&self) -> &ShaderSource {
        &self.source
    }

    /// Name of the entry point used for this stage.
    #[inline]
    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    #[inline]
    pub fn interface(&self) -> &StageInterface {
        &self.interface
    }
}

/// Compilation failure for one shader stage.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileError {
    pub stage: ShaderStage,
    pub label: Option<String>,
    pub log: DiagnosticLog,
}

impl CompileError {
    fn new(source: &ShaderSource, message: impl Into<String>) -> Self {
        Self {
            stage: source.stage(),
            label: source.label().map(str::to_owned),
            log: DiagnosticLog::new(message),
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{} shader error ({}):\n{}", self.stage, label, self.log),
            None => write!(f, "{} shader error:\n{}", self.stage, self.log),
        }
    }
}

impl std::error::Error for CompileError {}

/// Compiles one shader stage.
///
/// The WGSL is parsed and validated with naga, the same front end wgpu runs
/// at shader-module creation, so a unit that compiles here is accepted by
/// the device. The first entry point of the source's stage is selected.
pub fn compile(source: &ShaderSource) -> Result<ShaderUnit, CompileError> {
    let text = source.text();

    let module = naga::front::wgsl::parse_str(text)
        .map_err(|e| CompileError::new(source, e.emit_to_string(text)))?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::default(),
    );
    validator
        .validate(&module)
        .map_err(|e| CompileError::new(source, e.emit_to_string(text)))?;

    let stage = source.stage();
    let ep = module
        .entry_points
        .iter()
        .find(|ep| ep.stage == stage.to_naga())
        .ok_or_else(|| CompileError::new(source, format!("no @{stage} entry point found")))?;

    let interface = stage_interface(&module, ep);

    log::debug!(
        "compiled {} shader{}: entry `{}`, {} input(s), {} output(s)",
        stage,
        source.label().map(|l| format!(" `{l}`")).unwrap_or_default(),
        ep.name,
        interface.inputs.len(),
        interface.outputs.len(),
    );

    Ok(ShaderUnit {
        entry_point: ep.name.clone(),
        interface,
        source: source.clone(),
    })
}

use std::fmt;

use crate::shader::{
    self, CompileError, DiagnosticLog, IoType, ShaderSource, ShaderStage, ShaderUnit, Varying,
};

/// Validated code for one stage of a linked program.
#[derive(Debug, Clone)]
pub struct StageCode {
    pub source: ShaderSource,
    pub entry_point: String,
}

/// A successfully linked vertex + fragment pair.
///
/// This is the only input [`super::Program`] accepts, so a failed compile or
/// link can never reach a draw call.
#[derive(Debug, Clone)]
pub struct LinkedProgram {
    vertex: StageCode,
    fragment: StageCode,
    vertex_inputs: Vec<Varying>,
}

impl LinkedProgram {
    #[inline]
    pub fn vertex(&self) -> &StageCode {
        &self.vertex
    }

    #[inline]
    pub fn fragment(&self) -> &StageCode {
        &self.fragment
    }

    /// Vertex attributes the program reads, sorted by location.
    #[inline]
    pub fn vertex_inputs(&self) -> &[Varying] {
        &self.vertex_inputs
    }

    /// Label for GPU objects built from this program.
    pub fn label(&self) -> &str {
        self.vertex
            .source
            .label()
            .or(self.fragment.source.label())
            .unwrap_or("program")
    }

    /// Verifies that `layout` feeds every vertex input with a matching type.
    ///
    /// Extra attributes in the layout are allowed; the pipeline ignores them.
    pub fn check_layout(&self, layout: &wgpu::VertexBufferLayout<'_>) -> Result<(), LinkError> {
        for input in &self.vertex_inputs {
            let Some(attr) = layout
                .attributes
                .iter()
                .find(|a| a.shader_location == input.location)
            else {
                return Err(LinkError::MissingAttribute {
                    location: input.location,
                    expected: input.ty,
                });
            };

            if IoType::from_vertex_format(attr.format) != Some(input.ty) {
                return Err(LinkError::AttributeMismatch {
                    location: input.location,
                    shader: input.ty,
                    buffer: attr.format,
                });
            }
        }
        Ok(())
    }
}

/// Link failure between two compiled stages (or between a program and a
/// vertex layout).
#[derive(Debug, Clone, PartialEq)]
pub enum LinkError {
    /// A unit of the wrong stage was passed in a stage slot.
    WrongStage {
        expected: ShaderStage,
        found: ShaderStage,
    },
    /// The fragment stage reads a location the vertex stage never writes.
    MissingVarying { location: u32, ty: IoType },
    /// Both stages use a location, with different types.
    VaryingMismatch {
        location: u32,
        vertex: IoType,
        fragment: IoType,
    },
    /// The fragment stage does not write `@location(0)`.
    MissingColorOutput,
    /// The vertex layout has no attribute for a vertex input.
    MissingAttribute { location: u32, expected: IoType },
    /// The vertex layout attribute format does not match the shader input.
    AttributeMismatch {
        location: u32,
        shader: IoType,
        buffer: wgpu::VertexFormat,
    },
}

impl LinkError {
    /// The failure as a bounded diagnostic, same contract as compile errors.
    pub fn log(&self) -> DiagnosticLog {
        DiagnosticLog::new(self.to_string())
    }
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::WrongStage { expected, found } => {
                write!(f, "expected a {expected} shader unit, got a {found} unit")
            }
            LinkError::MissingVarying { location, ty } => write!(
                f,
                "fragment input @location({location}) {ty} is not written by the vertex stage"
            ),
            LinkError::VaryingMismatch { location, vertex, fragment } => write!(
                f,
                "@location({location}) is {vertex} in the vertex stage but {fragment} in the fragment stage"
            ),
            LinkError::MissingColorOutput => {
                f.write_str("fragment stage does not write a color to @location(0)")
            }
            LinkError::MissingAttribute { location, expected } => write!(
                f,
                "vertex input @location({location}) {expected} has no attribute in the vertex layout"
            ),
            LinkError::AttributeMismatch { location, shader, buffer } => write!(
                f,
                "vertex input @location({location}) is {shader} but the layout supplies {buffer:?}"
            ),
        }
    }
}

impl std::error::Error for LinkError {}

/// Links a vertex and a fragment unit into one program.
///
/// Both units are consumed: whatever the outcome, they are released when
/// this returns.
pub fn link(vertex: ShaderUnit, fragment: ShaderUnit) -> Result<LinkedProgram, LinkError> {
    if let Err(err) = check_units(&vertex, &fragment) {
        drop((vertex, fragment));
        log::debug!("shader units released after failed link");
        return Err(err);
    }

    let vertex_inputs = vertex.interface().inputs.clone();
    let linked = LinkedProgram {
        vertex: stage_code(vertex),
        fragment: stage_code(fragment),
        vertex_inputs,
    };
    log::debug!("shader units released after link");

    log::info!(
        "linked program `{}` ({} vertex input(s))",
        linked.label(),
        linked.vertex_inputs.len()
    );
    Ok(linked)
}

fn stage_code(unit: ShaderUnit) -> StageCode {
    StageCode {
        entry_point: unit.entry_point().to_owned(),
        source: unit.source().clone(),
    }
}

fn check_units(vertex: &ShaderUnit, fragment: &ShaderUnit) -> Result<(), LinkError> {
    if vertex.stage() != ShaderStage::Vertex {
        return Err(LinkError::WrongStage {
            expected: ShaderStage::Vertex,
            found: vertex.stage(),
        });
    }
    if fragment.stage() != ShaderStage::Fragment {
        return Err(LinkError::WrongStage {
            expected: ShaderStage::Fragment,
            found: fragment.stage(),
        });
    }

    let produced = vertex.interface();
    for input in &fragment.interface().inputs {
        match produced.output(input.location) {
            None => {
                return Err(LinkError::MissingVarying {
                    location: input.location,
                    ty: input.ty,
                });
            }
            Some(out) if out.ty != input.ty => {
                return Err(LinkError::VaryingMismatch {
                    location: input.location,
                    vertex: out.ty,
                    fragment: input.ty,
                });
            }
            Some(_) => {}
        }
    }

    if fragment.interface().output(0).is_none() {
        return Err(LinkError::MissingColorOutput);
    }

    Ok(())
}

/// Failure of the whole compile + link sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildError {
    /// One or both stages failed to compile; every failure is listed.
    Compile(Vec<CompileError>),
    Link(LinkError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::Compile(errors) => {
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{err}")?;
                }
                Ok(())
            }
            BuildError::Link(err) => write!(f, "shader link error:\n{err}"),
        }
    }
}

impl std::error::Error for BuildError {}

impl From<LinkError> for BuildError {
    fn from(err: LinkError) -> Self {
        BuildError::Link(err)
    }
}

/// Compiles both stages, then links them.
///
/// Both stages are compiled even if the first fails, so every diagnostic is
/// reported in one go. Linking only happens when both compiles succeed.
pub fn build(vertex: &ShaderSource, fragment: &ShaderSource) -> Result<LinkedProgram, BuildError> {
    let vs = shader::compile(vertex);
    let fs = shader::compile(fragment);

    match (vs, fs) {
        (Ok(vs), Ok(fs)) => Ok(link(vs, fs)?),
        (vs, fs) => Err(BuildError::Compile(
            vs.err().into_iter().chain(fs.err()).collect(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::compile;

    const VERTEX: &str = r#"
@vertex
fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(position, 1.0);
}
"#;

    const FRAGMENT: &str = r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 0.5, 0.6, 1.0);
}
"#;

    const VERTEX_TINT: &str = r#"
struct VsOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) tint: vec3<f32>,
};

@vertex
fn vs_main(@location(0) position: vec3<f32>) -> VsOut {
    var out: VsOut;
    out.clip = vec4<f32>(position, 1.0);
    out.tint = position;
    return out;
}
"#;

    const FRAGMENT_TINT: &str = r#"
@fragment
fn fs_main(@location(0) tint: vec3<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(tint, 1.0);
}
"#;

    const FRAGMENT_TINT_VEC4: &str = r#"
@fragment
fn fs_main(@location(0) tint: vec4<f32>) -> @location(0) vec4<f32> {
    return tint;
}
"#;

    const FRAGMENT_NO_COLOR: &str = r#"
@fragment
fn fs_main() {
}
"#;

    const BROKEN: &str = "fn (";

    fn vs(src: &'static str) -> ShaderUnit {
        compile(&ShaderSource::vertex(src)).unwrap()
    }

    fn fs(src: &'static str) -> ShaderUnit {
        compile(&ShaderSource::fragment(src)).unwrap()
    }

    fn layout(format: wgpu::VertexFormat) -> ([wgpu::VertexAttribute; 1], u64) {
        (
            [wgpu::VertexAttribute { format, offset: 0, shader_location: 0 }],
            format.size(),
        )
    }

    #[test]
    fn matching_stages_link() {
        let program = link(vs(VERTEX), fs(FRAGMENT)).unwrap();
        assert_eq!(program.vertex().entry_point, "vs_main");
        assert_eq!(program.fragment().entry_point, "fs_main");
        assert_eq!(program.vertex_inputs().len(), 1);
        assert_eq!(program.vertex_inputs()[0].ty, IoType::VEC3_F32);
    }

    #[test]
    fn linked_program_keeps_stage_code_of_consumed_units() {
        let vertex = compile(&ShaderSource::vertex(VERTEX).with_label("pos.vert")).unwrap();
        let fragment = compile(&ShaderSource::fragment(FRAGMENT).with_label("solid.frag")).unwrap();

        let program = link(vertex, fragment).unwrap();
        assert_eq!(program.vertex().source.label(), Some("pos.vert"));
        assert_eq!(program.fragment().source.label(), Some("solid.frag"));
        assert_eq!(program.vertex().source.text(), VERTEX);
    }

    #[test]
    fn varyings_link_when_types_agree() {
        assert!(link(vs(VERTEX_TINT), fs(FRAGMENT_TINT)).is_ok());
    }

    #[test]
    fn swapped_stages_are_rejected() {
        let err = link(fs(FRAGMENT), vs(VERTEX)).unwrap_err();
        assert_eq!(
            err,
            LinkError::WrongStage { expected: ShaderStage::Vertex, found: ShaderStage::Fragment }
        );
    }

    #[test]
    fn unwritten_varying_is_rejected() {
        let err = link(vs(VERTEX), fs(FRAGMENT_TINT)).unwrap_err();
        assert!(matches!(err, LinkError::MissingVarying { location: 0, .. }));
        assert!(err.log().as_str().contains("@location(0)"));
    }

    #[test]
    fn varying_type_mismatch_is_rejected() {
        let err = link(vs(VERTEX_TINT), fs(FRAGMENT_TINT_VEC4)).unwrap_err();
        assert!(matches!(err, LinkError::VaryingMismatch { location: 0, .. }));
    }

    #[test]
    fn fragment_without_color_output_is_rejected() {
        let err = link(vs(VERTEX), fs(FRAGMENT_NO_COLOR)).unwrap_err();
        assert_eq!(err, LinkError::MissingColorOutput);
    }

    #[test]
    fn build_succeeds_iff_both_stages_compile() {
        let v = ShaderSource::vertex(VERTEX);
        let f = ShaderSource::fragment(FRAGMENT);
        let bad_v = ShaderSource::vertex(BROKEN);
        let bad_f = ShaderSource::fragment(BROKEN);

        assert!(build(&v, &f).is_ok());

        for (vsrc, fsrc, failures) in [(&bad_v, &f, 1), (&v, &bad_f, 1), (&bad_v, &bad_f, 2)] {
            match build(vsrc, fsrc) {
                Err(BuildError::Compile(errors)) => assert_eq!(errors.len(), failures),
                other => panic!("expected compile failure, got {other:?}"),
            }
        }
    }

    #[test]
    fn build_reports_stage_of_each_failure() {
        let err = build(&ShaderSource::vertex(BROKEN), &ShaderSource::fragment(BROKEN)).unwrap_err();
        let BuildError::Compile(errors) = err else { panic!("expected compile failure") };
        assert_eq!(errors[0].stage, ShaderStage::Vertex);
        assert_eq!(errors[1].stage, ShaderStage::Fragment);
    }

    #[test]
    fn build_surfaces_link_failure() {
        let err = build(&ShaderSource::vertex(VERTEX), &ShaderSource::fragment(FRAGMENT_TINT))
            .unwrap_err();
        assert!(matches!(err, BuildError::Link(LinkError::MissingVarying { .. })));
    }

    #[test]
    fn position_layout_satisfies_program() {
        let program = link(vs(VERTEX), fs(FRAGMENT)).unwrap();
        let (attrs, stride) = layout(wgpu::VertexFormat::Float32x3);
        let layout = wgpu::VertexBufferLayout {
            array_stride: stride,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &attrs,
        };
        assert!(program.check_layout(&layout).is_ok());
    }

    #[test]
    fn wrong_attribute_format_is_rejected() {
        let program = link(vs(VERTEX), fs(FRAGMENT)).unwrap();
        let (attrs, stride) = layout(wgpu::VertexFormat::Float32x2);
        let layout = wgpu::VertexBufferLayout {
            array_stride: stride,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &attrs,
        };
        assert!(matches!(
            program.check_layout(&layout),
            Err(LinkError::AttributeMismatch { location: 0, .. })
        ));
    }

    #[test]
    fn missing_attribute_is_rejected() {
        let program = link(vs(VERTEX), fs(FRAGMENT)).unwrap();
        let layout = wgpu::VertexBufferLayout {
            array_stride: 12,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[],
        };
        assert!(matches!(
            program.check_layout(&layout),
            Err(LinkError::MissingAttribute { location: 0, .. })
        ));
    }
}

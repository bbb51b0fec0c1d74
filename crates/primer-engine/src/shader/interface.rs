use std::fmt;

/// Scalar kind of a stage input/output.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ComponentKind {
    Float,
    Sint,
    Uint,
    Bool,
}

/// Type of a user-location stage input/output (scalar or vector).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct IoType {
    pub kind: ComponentKind,
    /// Bytes per component.
    pub width: u8,
    /// 1 for scalars, 2..=4 for vectors.
    pub components: u8,
}

impl IoType {
    pub const VEC3_F32: Self = Self {
        kind: ComponentKind::Float,
        width: 4,
        components: 3,
    };

    /// Shader-side type a vertex attribute format is read as.
    ///
    /// Only the 32-bit formats are mapped; that is all the mesh layer emits.
    pub fn from_vertex_format(format: wgpu::VertexFormat) -> Option<Self> {
        use wgpu::VertexFormat as F;

        let (kind, components) = match format {
            F::Float32 => (ComponentKind::Float, 1),
            F::Float32x2 => (ComponentKind::Float, 2),
            F::Float32x3 => (ComponentKind::Float, 3),
            F::Float32x4 => (ComponentKind::Float, 4),
            F::Uint32 => (ComponentKind::Uint, 1),
            F::Uint32x2 => (ComponentKind::Uint, 2),
            F::Uint32x3 => (ComponentKind::Uint, 3),
            F::Uint32x4 => (ComponentKind::Uint, 4),
            F::Sint32 => (ComponentKind::Sint, 1),
            F::Sint32x2 => (ComponentKind::Sint, 2),
            F::Sint32x3 => (ComponentKind::Sint, 3),
            F::Sint32x4 => (ComponentKind::Sint, 4),
            _ => return None,
        };

        Some(Self { kind, width: 4, components })
    }

    fn from_naga(inner: &naga::TypeInner) -> Option<Self> {
        match *inner {
            naga::TypeInner::Scalar(scalar) => Self::from_scalar(scalar, 1),
            naga::TypeInner::Vector { size, scalar } => Self::from_scalar(scalar, size as u8),
            _ => None,
        }
    }

    fn from_scalar(scalar: naga::Scalar, components: u8) -> Option<Self> {
        let kind = match scalar.kind {
            naga::ScalarKind::Float => ComponentKind::Float,
            naga::ScalarKind::Sint => ComponentKind::Sint,
            naga::ScalarKind::Uint => ComponentKind::Uint,
            naga::ScalarKind::Bool => ComponentKind::Bool,
            // Abstract types never survive to an entry point signature.
            _ => return None,
        };
        Some(Self { kind, width: scalar.width, components })
    }
}

impl fmt::Display for IoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scalar = match (self.kind, self.width) {
            (ComponentKind::Bool, _) => "bool".to_string(),
            (ComponentKind::Float, w) => format!("f{}", w as u32 * 8),
            (ComponentKind::Sint, w) => format!("i{}", w as u32 * 8),
            (ComponentKind::Uint, w) => format!("u{}", w as u32 * 8),
        };
        if self.components == 1 {
            f.write_str(&scalar)
        } else {
            write!(f, "vec{}<{}>", self.components, scalar)
        }
    }
}

/// One `@location(n)` stage input or output.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Varying {
    pub location: u32,
    pub ty: IoType,
    pub name: Option<String>,
}

/// User-location inputs and outputs of one entry point.
///
/// Builtins (`@builtin(position)` and friends) are not part of the interface
/// a linker has to match, so they are left out.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct StageInterface {
    pub inputs: Vec<Varying>,
    pub outputs: Vec<Varying>,
}

impl StageInterface {
    pub fn input(&self, location: u32) -> Option<&Varying> {
        self.inputs.iter().find(|v| v.location == location)
    }

    pub fn output(&self, location: u32) -> Option<&Varying> {
        self.outputs.iter().find(|v| v.location == location)
    }
}

pub(crate) fn stage_interface(module: &naga::Module, ep: &naga::EntryPoint) -> StageInterface {
    let mut interface = StageInterface::default();

    for arg in &ep.function.arguments {
        collect(module, arg.ty, arg.binding.as_ref(), arg.name.as_deref(), &mut interface.inputs);
    }

    if let Some(result) = &ep.function.result {
        collect(module, result.ty, result.binding.as_ref(), None, &mut interface.outputs);
    }

    interface.inputs.sort_by_key(|v| v.location);
    interface.outputs.sort_by_key(|v| v.location);
    interface
}

fn collect(
    module: &naga::Module,
    ty: naga::Handle<naga::Type>,
    binding: Option<&naga::Binding>,
    name: Option<&str>,
    out: &mut Vec<Varying>,
) {
    let inner = &module.types[ty].inner;

    match binding {
        Some(naga::Binding::Location { location, .. }) => {
            if let Some(io) = IoType::from_naga(inner) {
                out.push(Varying {
                    location: *location,
                    ty: io,
                    name: name.map(str::to_owned),
                });
            }
        }
        Some(naga::Binding::BuiltIn(_)) => {}
        // Unbound arguments/results are structs whose members carry the bindings.
        None => {
            if let naga::TypeInner::Struct { members, .. } = inner {
                for member in members {
                    collect(module, member.ty, member.binding.as_ref(), member.name.as_deref(), out);
                }
            }
        }
    }
}

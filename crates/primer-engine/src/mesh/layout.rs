use bytemuck::{Pod, Zeroable};

// ── position vertex ───────────────────────────────────────────────────────

/// One vertex: a clip-space position, three tightly packed `f32`s.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Position {
    pub pos: [f32; 3],
}

impl Position {
    /// Attribute slot the position is bound to.
    pub const LOCATION: u32 = 0;

    /// Bytes between consecutive vertices.
    pub const STRIDE: u64 = std::mem::size_of::<Position>() as u64;

    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    /// Slot 0 ← 3 × f32, stride 12, offset 0.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: Self::STRIDE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

impl From<[f32; 3]> for Position {
    #[inline]
    fn from(pos: [f32; 3]) -> Self {
        Self { pos }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_is_three_packed_floats() {
        assert_eq!(Position::STRIDE, 3 * std::mem::size_of::<f32>() as u64);
        assert_eq!(Position::layout().array_stride, 12);
    }

    #[test]
    fn single_attribute_at_slot_zero() {
        let layout = Position::layout();
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);
        assert_eq!(layout.attributes.len(), 1);

        let attr = layout.attributes[0];
        assert_eq!(attr.shader_location, Position::LOCATION);
        assert_eq!(attr.format, wgpu::VertexFormat::Float32x3);
        assert_eq!(attr.offset, 0);
    }
}

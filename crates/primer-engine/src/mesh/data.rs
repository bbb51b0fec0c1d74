use std::fmt;

use super::layout::Position;

/// How a mesh is drawn: one call per frame, triangle list topology.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DrawCall {
    /// `count` consecutive vertices starting at `first`.
    Arrays { first: u32, count: u32 },
    /// `count` indices from the start of the index buffer.
    Indexed { count: u32 },
}

impl DrawCall {
    /// Vertices (non-indexed) or index lookups (indexed) the draw consumes.
    #[inline]
    pub fn element_count(self) -> u32 {
        match self {
            DrawCall::Arrays { count, .. } | DrawCall::Indexed { count } => count,
        }
    }

    #[inline]
    pub fn triangle_count(self) -> u32 {
        self.element_count() / 3
    }

    #[inline]
    pub fn is_indexed(self) -> bool {
        matches!(self, DrawCall::Indexed { .. })
    }
}

/// Mesh data rejected before upload.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum MeshError {
    /// No vertex positions.
    Empty,
    /// An index refers past the end of the vertex data.
    IndexOutOfRange {
        index: u32,
        position: usize,
        vertex_count: usize,
    },
    /// The drawn element count does not form whole triangles.
    NotTriangles { count: usize },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::Empty => f.write_str("mesh has no vertices"),
            MeshError::IndexOutOfRange { index, position, vertex_count } => write!(
                f,
                "index {index} at position {position} is out of range for {vertex_count} vertices"
            ),
            MeshError::NotTriangles { count } => {
                write!(f, "{count} elements do not form a triangle list")
            }
        }
    }
}

impl std::error::Error for MeshError {}

/// CPU-side mesh: positions plus optional triangle-list indices.
///
/// Invariants (checked by [`MeshData::new`]):
/// - at least one position
/// - every index is `< vertex_count`
/// - the drawn element count is a multiple of 3
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    positions: Vec<Position>,
    indices: Option<Vec<u32>>,
}

impl MeshData {
    pub fn new(
        positions: impl IntoIterator<Item = [f32; 3]>,
        indices: Option<Vec<u32>>,
    ) -> Result<Self, MeshError> {
        let positions: Vec<Position> = positions.into_iter().map(Position::from).collect();

        if positions.is_empty() {
            return Err(MeshError::Empty);
        }

        let count = indices.as_ref().map_or(positions.len(), Vec::len);
        if count == 0 || count % 3 != 0 {
            return Err(MeshError::NotTriangles { count });
        }

        if let Some(indices) = &indices {
            if let Some((position, &index)) = indices
                .iter()
                .enumerate()
                .find(|&(_, &i)| i as usize >= positions.len())
            {
                return Err(MeshError::IndexOutOfRange {
                    index,
                    position,
                    vertex_count: positions.len(),
                });
            }
        }

        Ok(Self { positions, indices })
    }

    /// Single triangle, drawn without indices.
    pub fn triangle() -> Self {
        Self {
            positions: vec![
                Position::from([-0.5, -0.5, 0.0]), // left
                Position::from([0.5, -0.5, 0.0]),  // right
                Position::from([0.0, 0.5, 0.0]),   // top
            ],
            indices: None,
        }
    }

    /// Axis-aligned rectangle from two indexed triangles sharing a diagonal.
    pub fn rectangle() -> Self {
        Self {
            positions: vec![
                Position::from([0.5, 0.5, 0.0]),   // top right
                Position::from([0.5, -0.5, 0.0]),  // bottom right
                Position::from([-0.5, -0.5, 0.0]), // bottom left
                Position::from([-0.5, 0.5, 0.0]),  // top left
            ],
            indices: Some(vec![0, 1, 3, 1, 2, 3]),
        }
    }

    #[inline]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    #[inline]
    pub fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn draw_call(&self) -> DrawCall {
        match &self.indices {
            Some(indices) => DrawCall::Indexed { count: indices.len() as u32 },
            None => DrawCall::Arrays { first: 0, count: self.positions.len() as u32 },
        }
    }

    /// Byte image of the vertex buffer.
    #[inline]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Byte image of the index buffer, if the mesh is indexed.
    #[inline]
    pub fn index_bytes(&self) -> Option<&[u8]> {
        self.indices.as_deref().map(bytemuck::cast_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangles(data: &MeshData) -> Vec<[[f32; 3]; 3]> {
        let pos = |i: usize| data.positions()[i].pos;
        match data.indices() {
            Some(indices) => indices
                .chunks(3)
                .map(|t| [pos(t[0] as usize), pos(t[1] as usize), pos(t[2] as usize)])
                .collect(),
            None => (0..data.vertex_count())
                .step_by(3)
                .map(|i| [pos(i), pos(i + 1), pos(i + 2)])
                .collect(),
        }
    }

    #[test]
    fn triangle_draws_three_vertices_as_one_triangle() {
        let data = MeshData::triangle();
        let draw = data.draw_call();

        assert_eq!(draw, DrawCall::Arrays { first: 0, count: 3 });
        assert_eq!(draw.triangle_count(), 1);
        assert_eq!(
            triangles(&data),
            vec![[[-0.5, -0.5, 0.0], [0.5, -0.5, 0.0], [0.0, 0.5, 0.0]]]
        );
        assert!(data.index_bytes().is_none());
    }

    #[test]
    fn rectangle_draws_six_indices_as_two_triangles() {
        let data = MeshData::rectangle();
        let draw = data.draw_call();

        assert_eq!(draw, DrawCall::Indexed { count: 6 });
        assert_eq!(draw.triangle_count(), 2);
        assert_eq!(data.indices(), Some(&[0, 1, 3, 1, 2, 3][..]));
        assert!(data.indices().unwrap().iter().all(|&i| i < 4));

        let tris = triangles(&data);
        assert_eq!(tris.len(), 2);
        // The two triangles share the bottom-right / top-left diagonal.
        assert_eq!(tris[0][1], tris[1][0]);
        assert_eq!(tris[0][2], tris[1][2]);
    }

    #[test]
    fn builtin_meshes_pass_validation() {
        for data in [MeshData::triangle(), MeshData::rectangle()] {
            let positions: Vec<[f32; 3]> = data.positions().iter().map(|p| p.pos).collect();
            let rebuilt = MeshData::new(positions, data.indices().map(<[u32]>::to_vec)).unwrap();
            assert_eq!(rebuilt, data);
        }
    }

    #[test]
    fn identical_inputs_yield_identical_bytes() {
        let a = MeshData::rectangle();
        let b = MeshData::rectangle();
        assert_eq!(a.vertex_bytes(), b.vertex_bytes());
        assert_eq!(a.index_bytes(), b.index_bytes());
        assert_eq!(a.vertex_bytes().len(), 4 * 12);
        assert_eq!(a.index_bytes().map(<[u8]>::len), Some(6 * 4));
    }

    #[test]
    fn vertex_bytes_are_native_f32() {
        let data = MeshData::triangle();
        let floats: &[f32] = bytemuck::cast_slice(data.vertex_bytes());
        assert_eq!(floats, &[-0.5, -0.5, 0.0, 0.5, -0.5, 0.0, 0.0, 0.5, 0.0]);
    }

    #[test]
    fn empty_mesh_is_rejected() {
        assert_eq!(MeshData::new([], None), Err(MeshError::Empty));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let err = MeshData::new([[0.0; 3]; 3], Some(vec![0, 1, 3])).unwrap_err();
        assert_eq!(
            err,
            MeshError::IndexOutOfRange { index: 3, position: 2, vertex_count: 3 }
        );
    }

    #[test]
    fn partial_triangle_is_rejected() {
        assert_eq!(
            MeshData::new([[0.0; 3]; 4], None),
            Err(MeshError::NotTriangles { count: 4 })
        );
        assert_eq!(
            MeshData::new([[0.0; 3]; 3], Some(vec![0, 1])),
            Err(MeshError::NotTriangles { count: 2 })
        );
    }
}

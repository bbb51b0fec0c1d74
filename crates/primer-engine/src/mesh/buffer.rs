use wgpu::util::DeviceExt;

use crate::render::RenderCtx;

use super::data::{DrawCall, MeshData};
use super::layout::Position;

/// A mesh uploaded to the GPU.
///
/// Buffers are written once at upload and never updated; building a new mesh
/// is the only way to change the geometry. Both buffers are destroyed when
/// the mesh is dropped.
pub struct Mesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: Option<wgpu::Buffer>,
    draw: DrawCall,
}

impl Mesh {
    pub fn upload(ctx: &RenderCtx<'_>, data: &MeshData) -> Self {
        let vertex_buffer = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("primer mesh vbo"),
            contents: data.vertex_bytes(),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = data.index_bytes().map(|bytes| {
            ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("primer mesh ibo"),
                contents: bytes,
                usage: wgpu::BufferUsages::INDEX,
            })
        });

        let draw = data.draw_call();
        log::debug!(
            "mesh uploaded: {} vertices, {:?}",
            data.vertex_count(),
            draw
        );

        Self {
            vertex_buffer,
            index_buffer,
            draw,
        }
    }

    /// Attribute layout the vertex buffer is described by.
    #[inline]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        Position::layout()
    }

    #[inline]
    pub fn draw_call(&self) -> DrawCall {
        self.draw
    }

    /// Binds the mesh buffers to `pass` and issues `draw`.
    ///
    /// An indexed draw on a mesh without an index buffer is skipped.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, draw: DrawCall) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));

        match draw {
            DrawCall::Arrays { first, count } => {
                pass.draw(first..first + count, 0..1);
            }
            DrawCall::Indexed { count } => {
                let Some(ibo) = self.index_buffer.as_ref() else {
                    log::warn!("indexed draw requested for a mesh without indices; skipped");
                    return;
                };
                pass.set_index_buffer(ibo.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..count, 0, 0..1);
            }
        }
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        if let Some(ibo) = self.index_buffer.take() {
            ibo.destroy();
        }
        self.vertex_buffer.destroy();
        log::debug!("mesh buffers released");
    }
}

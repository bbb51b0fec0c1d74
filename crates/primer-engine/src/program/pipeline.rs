use crate::render::RenderCtx;

use super::link::{LinkError, LinkedProgram};

/// A linked program realized on the GPU as a render pipeline.
///
/// Built for the surface format current at creation and one vertex layout;
/// the surface keeps that format for its whole life. The pipeline is
/// released when the program is dropped.
pub struct Program {
    pipeline: wgpu::RenderPipeline,
    label: String,
}

impl Program {
    /// Creates the shader modules and the render pipeline for `linked`.
    ///
    /// Fails if `vertex_layout` does not feed every vertex input the program
    /// reads; nothing is created on the GPU in that case.
    pub fn new(
        ctx: &RenderCtx<'_>,
        linked: &LinkedProgram,
        vertex_layout: wgpu::VertexBufferLayout<'_>,
    ) -> Result<Self, LinkError> {
        linked.check_layout(&vertex_layout)?;

        let label = linked.label().to_owned();

        let vs = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("{label} vertex shader")),
            source: wgpu::ShaderSource::Wgsl(linked.vertex().source.text().into()),
        });
        let fs = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("{label} fragment shader")),
            source: wgpu::ShaderSource::Wgsl(linked.fragment().source.text().into()),
        });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some(&format!("{label} pipeline layout")),
                    bind_group_layouts: &[],
                    immediate_size: 0,
                });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("{label} pipeline")),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &vs,
                entry_point: Some(&linked.vertex().entry_point),
                compilation_options: Default::default(),
                buffers: &[vertex_layout],
            },

            fragment: Some(wgpu::FragmentState {
                module: &fs,
                entry_point: Some(&linked.fragment().entry_point),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Mesh winding is not normalized; draw both faces.
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::info!("program `{label}` pipeline created for {:?}", ctx.surface_format);

        Ok(Self { pipeline, label })
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Makes this program the active pipeline of `pass`.
    pub fn bind(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        log::debug!("program `{}` released", self.label);
    }
}

use crate::frame::FramePlan;
use crate::mesh::Mesh;
use crate::program::Program;

/// Where one frame is recorded: the frame's encoder and its color view.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self { encoder, color_view }
    }
}

/// Records `plan` into `target` as a single render pass.
///
/// The viewport is applied as given; callers clamp it to the target size.
pub fn encode_frame(
    target: &mut RenderTarget<'_>,
    plan: &FramePlan,
    program: &Program,
    mesh: &Mesh,
) {
    let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("primer frame pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target.color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(plan.clear.clamped().to_wgpu()),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    });

    let vp = plan.viewport;
    rpass.set_viewport(
        vp.x as f32,
        vp.y as f32,
        vp.width as f32,
        vp.height as f32,
        0.0,
        1.0,
    );

    program.bind(&mut rpass);
    mesh.draw(&mut rpass, plan.draw);
}

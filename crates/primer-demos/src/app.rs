use anyhow::Context;

use primer_engine::core::{App, AppControl, FrameCtx};
use primer_engine::frame::{FrameLoop, FrameLoopConfig};
use primer_engine::mesh::{Mesh, MeshData};
use primer_engine::program::{LinkError, LinkedProgram, Program};
use primer_engine::render::RenderCtx;

/// Draws one mesh with one linked program until the frame loop closes.
///
/// GPU objects are created on the first frame, once a device exists. Field
/// order is drop order: the mesh buffers go first, then the pipeline.
pub struct MeshApp {
    mesh: Option<Mesh>,
    program: Option<Program>,

    linked: LinkedProgram,
    data: MeshData,
    frame_loop: FrameLoop,
}

impl MeshApp {
    pub fn new(linked: LinkedProgram, data: MeshData, config: FrameLoopConfig) -> Self {
        let frame_loop = FrameLoop::new(config, data.draw_call());
        Self {
            mesh: None,
            program: None,
            linked,
            data,
            frame_loop,
        }
    }

    #[inline]
    pub fn frame_loop(&self) -> &FrameLoop {
        &self.frame_loop
    }

    fn ensure_resources(&mut self, ctx: &RenderCtx<'_>) -> Result<(), LinkError> {
        if self.program.is_none() {
            self.program = Some(Program::new(ctx, &self.linked, Mesh::layout())?);
        }

        if self.mesh.is_none() {
            self.mesh = Some(Mesh::upload(ctx, &self.data));
        }

        Ok(())
    }
}

impl App for MeshApp {
    fn on_resize(&mut self, width: u32, height: u32) {
        self.frame_loop.resize(width, height);
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> anyhow::Result<AppControl> {
        let Some(plan) = self.frame_loop.step(ctx.should_close, ctx.input) else {
            return Ok(AppControl::Exit);
        };

        self.ensure_resources(&ctx.render_ctx())
            .context("failed to create the program pipeline")?;

        let (Some(program), Some(mesh)) = (&self.program, &self.mesh) else {
            return Ok(AppControl::Continue);
        };

        ctx.render(&plan, program, mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use primer_engine::coords::Viewport;
    use primer_engine::frame::LoopState;
    use primer_engine::input::InputState;
    use primer_engine::mesh::DrawCall;

    fn app(data: MeshData) -> MeshApp {
        let linked = primer_engine::program::build(&crate::shaders::vertex(), &crate::shaders::fragment())
            .unwrap();
        MeshApp::new(linked, data, FrameLoopConfig::default())
    }

    #[test]
    fn resize_drives_the_viewport() {
        let mut app = app(MeshData::triangle());
        app.on_resize(800, 600);
        assert_eq!(app.frame_loop().viewport(), Viewport::new(0, 0, 800, 600));
    }

    #[test]
    fn frame_loop_draws_the_mesh() {
        let mut app = app(MeshData::rectangle());
        let plan = app.frame_loop.step(false, &InputState::default()).unwrap();
        assert_eq!(plan.draw, DrawCall::Indexed { count: 6 });
        assert_eq!(app.frame_loop().state(), LoopState::Running);
    }

    #[test]
    fn no_gpu_objects_before_first_frame() {
        let app = app(MeshData::triangle());
        assert!(app.program.is_none());
        assert!(app.mesh.is_none());
    }
}
